//! Bounds for configurable values.

use std::cmp;

//------------ DefMinMax -----------------------------------------------------

/// The default, minimum, and maximum values for a config variable.
#[derive(Clone, Copy, Debug)]
pub struct DefMinMax<T> {
    /// The default value,
    def: T,

    /// The minimum value,
    min: T,

    /// The maximum value,
    max: T,
}

impl<T> DefMinMax<T> {
    /// Creates a new value.
    pub const fn new(def: T, min: T, max: T) -> Self {
        Self { def, min, max }
    }

    /// Returns the default value.
    pub fn default(self) -> T {
        self.def
    }

    /// Returns the minimum value.
    pub fn min(self) -> T {
        self.min
    }

    /// Returns the maximum value.
    pub fn max(self) -> T {
        self.max
    }

    /// Returns whether the given value lies within the bounds.
    pub fn contains(self, value: T) -> bool
    where
        T: Ord,
    {
        self.min <= value && value <= self.max
    }

    /// Trims the given value to fit into the minimum/maximum range.
    pub fn limit(self, value: T) -> T
    where
        T: Ord,
    {
        cmp::max(self.min, cmp::min(self.max, value))
    }
}

//------------ Crate-wide Settings -------------------------------------------

/// Supported widths in bytes of [`unsigned_int`].
///
/// [`unsigned_int`]: crate::schema::int::unsigned_int
pub const UNSIGNED_INT_WIDTH: DefMinMax<usize> = DefMinMax::new(4, 0, 8);

/// Supported widths in bytes of [`unsigned_big_int`].
///
/// [`unsigned_big_int`]: crate::schema::int::unsigned_big_int
pub const UNSIGNED_BIG_INT_WIDTH: DefMinMax<usize> =
    DefMinMax::new(8, 0, 16);

/// Buffer capacity reserved up front when collecting bytes.
///
/// The default is used when writing into a fresh vector. When reading a
/// byte array, the requested length is limited to this range, so a bogus
/// length prefix cannot make us allocate gigabytes before the source has
/// even shown that it has that many bytes.
pub const PREALLOC: DefMinMax<usize> = DefMinMax::new(64, 0, 4096);

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn limit() {
        let val = DefMinMax::new(5, 2, 10);
        assert_eq!(val.default(), 5);
        assert_eq!(val.limit(0), 2);
        assert_eq!(val.limit(7), 7);
        assert_eq!(val.limit(12), 10);
    }

    #[test]
    fn contains() {
        assert!(UNSIGNED_INT_WIDTH.contains(0));
        assert!(UNSIGNED_INT_WIDTH.contains(8));
        assert!(!UNSIGNED_INT_WIDTH.contains(9));
        assert!(UNSIGNED_BIG_INT_WIDTH.contains(16));
        assert!(!UNSIGNED_BIG_INT_WIDTH.contains(17));
    }
}
