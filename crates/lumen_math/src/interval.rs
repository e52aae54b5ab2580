/// A range of ray parameters.
///
/// Hit tests accept a root only when it lies strictly inside the interval, so
/// `min` doubles as the self-intersection guard and `max` as the closest hit
/// found so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Same lower bound, new upper bound.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.001, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.001));
        assert!(!interval.surrounds(10.0));
        assert!(interval.surrounds(5.0));
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(f32::NAN));
    }

    #[test]
    fn test_interval_with_max() {
        let narrowed = Interval::new(0.001, f32::MAX).with_max(4.0);
        assert_eq!(narrowed, Interval::new(0.001, 4.0));

        // Narrowing to a found hit rejects an exact tie
        assert!(!narrowed.surrounds(4.0));
    }
}
