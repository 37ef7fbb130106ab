//! Error type for the non-panicking variants of the table operations

use thiserror::Error;

/// Precondition failures reported by [`Table`](crate::Table) and
/// [`TableConfig`](crate::TableConfig).
///
/// The panicking operations (`get`, `get_mut`, `with_config`) treat these as
/// fatal; the `try_*` variants hand them back to the caller instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// The probed key has no entry in the table
    #[error("key is not present in the table")]
    KeyNotFound,
    /// The configured initial capacity was zero
    #[error("initial capacity must be at least 1")]
    ZeroCapacity,
    /// The configured load threshold is outside `1..=95` percent
    #[error("load factor threshold {0}% is outside the supported range 1..=95")]
    InvalidLoadThreshold(usize),
    /// The configured growth factor would not grow the table
    #[error("resize factor {0} must be at least 2")]
    InvalidResizeFactor(usize),
}
