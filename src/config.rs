//! Sizing and growth policy for [`Table`](crate::Table)

use crate::TableError;

/// Initial capacity of a table upon creation
pub const INITIAL_CAPACITY: usize = 16;

/// The load at which the table will rehash
pub const LOAD_THRESHOLD: f64 = 0.75;

/// The table size is multiplied by this factor upon each rehash
pub const RESIZE_FACTOR: usize = 2;

/// Load threshold stored as a percentage, matching [`LOAD_THRESHOLD`]
const DEFAULT_LOAD_PERCENT: usize = 75;

/// Tunable parameters of a table.
///
/// The defaults reproduce [`INITIAL_CAPACITY`], [`LOAD_THRESHOLD`] and
/// [`RESIZE_FACTOR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Number of slots allocated on the first insertion
    pub initial_capacity: usize,
    /// Threshold for load factor before resizing - stored as percentage (0-100)
    pub load_factor_threshold: usize,
    /// Multiplier applied to the capacity on every rehash
    pub resize_factor: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_CAPACITY,
            load_factor_threshold: DEFAULT_LOAD_PERCENT,
            resize_factor: RESIZE_FACTOR,
        }
    }
}

impl TableConfig {
    /// Sets the number of slots allocated on the first insertion
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the load factor threshold, in percent
    #[must_use]
    pub fn with_load_factor_threshold(mut self, percent: usize) -> Self {
        self.load_factor_threshold = percent;
        self
    }

    /// Sets the capacity multiplier used on growth
    #[must_use]
    pub fn with_resize_factor(mut self, factor: usize) -> Self {
        self.resize_factor = factor;
        self
    }

    /// Checks that the parameters describe a table that always keeps an empty
    /// slot after `put` returns.
    ///
    /// # Errors
    ///
    /// Returns the first parameter found out of range.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.initial_capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        if !(1..=95).contains(&self.load_factor_threshold) {
            return Err(TableError::InvalidLoadThreshold(self.load_factor_threshold));
        }
        if self.resize_factor < 2 {
            return Err(TableError::InvalidResizeFactor(self.resize_factor));
        }
        Ok(())
    }

    /// Whether `size` occupied slots out of `capacity` reach the threshold
    pub(crate) fn exceeds_threshold(&self, size: usize, capacity: usize) -> bool {
        size.saturating_mul(100) >= capacity.saturating_mul(self.load_factor_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = TableConfig::default();
        assert_eq!(config.initial_capacity, INITIAL_CAPACITY);
        assert_eq!(config.resize_factor, RESIZE_FACTOR);
        assert!((config.load_factor_threshold as f64 / 100.0 - LOAD_THRESHOLD).abs() < f64::EPSILON);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let base = TableConfig::default();
        assert_eq!(base.with_initial_capacity(0).validate(), Err(TableError::ZeroCapacity));
        assert_eq!(
            base.with_load_factor_threshold(0).validate(),
            Err(TableError::InvalidLoadThreshold(0))
        );
        assert_eq!(
            base.with_load_factor_threshold(100).validate(),
            Err(TableError::InvalidLoadThreshold(100))
        );
        assert_eq!(base.with_resize_factor(1).validate(), Err(TableError::InvalidResizeFactor(1)));
    }

    #[test]
    fn test_threshold_boundary() {
        let config = TableConfig::default();
        assert!(!config.exceeds_threshold(11, 16));
        assert!(config.exceeds_threshold(12, 16));
        assert!(!config.exceeds_threshold(3, 16));
    }
}
