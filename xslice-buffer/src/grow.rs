use crate::error::{Error, Result};

/// Capacity below which growth doubles.
pub const DEFAULT_THRESHOLD: usize = 1024;
/// Beyond the threshold, capacity grows by `old / DEFAULT_LARGE_DIVISOR`.
pub const DEFAULT_LARGE_DIVISOR: usize = 4;

/// Returns the capacity of the store allocated when a view with
/// capacity `old_cap` runs out of space, using the default policy.
#[inline]
pub fn grow(old_cap: usize) -> usize {
    GrowPolicy::default().grow(old_cap)
}

/// GrowPolicy decides new capacity on reallocation.
///
/// Small capacities double, large ones grow by a fraction of themselves.
/// The result is exact integer arithmetic and does not depend on the
/// allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowPolicy {
    threshold: usize,
    large_divisor: usize,
}

impl Default for GrowPolicy {
    #[inline]
    fn default() -> Self {
        GrowPolicy {
            threshold: DEFAULT_THRESHOLD,
            large_divisor: DEFAULT_LARGE_DIVISOR,
        }
    }
}

impl GrowPolicy {
    #[inline]
    pub fn new(threshold: usize, large_divisor: usize) -> Result<Self> {
        if threshold == 0 {
            return Err(Error::InvalidArgument(
                "grow threshold must be positive".to_string(),
            ));
        }
        if large_divisor == 0 {
            return Err(Error::InvalidArgument(
                "grow divisor must be positive".to_string(),
            ));
        }
        Ok(GrowPolicy {
            threshold,
            large_divisor,
        })
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    #[inline]
    pub fn large_divisor(&self) -> usize {
        self.large_divisor
    }

    /// Returns capacity after one growth step. Always greater than
    /// `old_cap` unless it saturates at `usize::MAX`.
    #[inline]
    pub fn grow(&self, old_cap: usize) -> usize {
        if old_cap == 0 {
            1
        } else if old_cap < self.threshold {
            old_cap.saturating_mul(2)
        } else {
            // small divisor ratio may round the increment to zero
            let incr = usize::max(old_cap / self.large_divisor, 1);
            old_cap.saturating_add(incr)
        }
    }

    /// Returns capacity able to hold `needed` elements, starting from
    /// `old_cap`.
    ///
    /// A requirement beyond twice the old capacity is taken as is,
    /// otherwise growth steps are applied until it fits.
    #[inline]
    pub fn grow_to(&self, old_cap: usize, needed: usize) -> usize {
        if needed <= old_cap {
            return old_cap;
        }
        if needed > old_cap.saturating_mul(2) {
            return needed;
        }
        let mut cap = old_cap;
        while cap < needed {
            cap = self.grow(cap);
        }
        cap
    }

    /// Returns iterator of successive capacities starting from `start`,
    /// `start` itself excluded.
    #[inline]
    pub fn steps(&self, start: usize) -> Steps {
        Steps {
            policy: *self,
            cap: start,
        }
    }
}

/// Infinite iterator of capacities produced by repeated growth.
#[derive(Debug, Clone)]
pub struct Steps {
    policy: GrowPolicy,
    cap: usize,
}

impl Iterator for Steps {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        self.cap = self.policy.grow(self.cap);
        Some(self.cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_doubling() {
        assert_eq!(1, grow(0));
        let mut cap = 1;
        while cap < DEFAULT_THRESHOLD {
            assert_eq!(cap * 2, grow(cap));
            cap *= 2;
        }
        assert_eq!(1023 * 2, grow(1023));
    }

    #[test]
    fn test_grow_quarter() {
        assert_eq!(1280, grow(1024));
        assert_eq!(1600, grow(1280));
        assert_eq!(2000, grow(1600));
        assert_eq!(2500, grow(2000));
        assert_eq!(3125, grow(2500));
        assert_eq!(3906, grow(3125));
        for cap in [1024usize, 5000, 65537, 1 << 30] {
            assert_eq!(cap + cap / 4, grow(cap));
            assert_ne!(cap * 2, grow(cap));
        }
    }

    #[test]
    fn test_grow_steps() {
        let caps: Vec<usize> = GrowPolicy::default().steps(0).take(14).collect();
        assert_eq!(
            vec![1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 1280, 1600, 2000],
            caps
        );
    }

    #[test]
    fn test_grow_saturates() {
        assert_eq!(usize::MAX, grow(usize::MAX));
        assert_eq!(usize::MAX, grow(usize::MAX - 1));
    }

    #[test]
    fn test_grow_to() {
        let p = GrowPolicy::default();
        // fits already
        assert_eq!(8, p.grow_to(8, 5));
        // more than double, use requirement directly
        assert_eq!(17, p.grow_to(8, 17));
        assert_eq!(3, p.grow_to(0, 3));
        // within double
        assert_eq!(16, p.grow_to(8, 9));
        // exactly double is still within growth steps
        assert_eq!(16, p.grow_to(8, 16));
        assert_eq!(1600, p.grow_to(1024, 1500));
        assert_eq!(2500, p.grow_to(1024, 2048));
    }

    #[test]
    fn test_grow_to_random() {
        use rand::{thread_rng, Rng};
        let p = GrowPolicy::default();
        let mut rng = thread_rng();
        for _ in 0..1000 {
            let old = rng.gen_range(0..1_000_000);
            let needed = rng.gen_range(0..3_000_000);
            let cap = p.grow_to(old, needed);
            assert!(cap >= needed);
            assert!(cap >= old);
            assert!(p.grow(old) > old);
        }
    }

    #[test]
    fn test_custom_policy() {
        assert!(GrowPolicy::new(0, 4).is_err());
        assert!(GrowPolicy::new(16, 0).is_err());
        let p = GrowPolicy::new(4, 2).unwrap();
        assert_eq!(4, p.threshold());
        assert_eq!(2, p.large_divisor());
        let caps: Vec<usize> = p.steps(0).take(6).collect();
        assert_eq!(vec![1, 2, 4, 6, 9, 13], caps);
        // divisor larger than capacity still makes progress
        let p = GrowPolicy::new(1, 100).unwrap();
        assert_eq!(2, p.grow(1));
        assert_eq!(3, p.grow(2));
    }
}
