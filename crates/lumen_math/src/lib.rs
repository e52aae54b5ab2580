// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod color;
mod interval;
mod ray;

pub use color::{pack_bgra, unpack_bgra, Color};
pub use interval::Interval;
pub use ray::Ray;
