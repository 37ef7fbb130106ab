//! Instrumentation counters of a table

use std::fmt;

/// A point-in-time copy of a table's counters.
///
/// `Display` renders the header that [`Table::dump`](crate::Table::dump)
/// writes, one counter per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableStats {
    /// Number of occupied slots
    pub size: usize,
    /// Number of slots, allocated or about to be
    pub capacity: usize,
    /// Cumulative number of probes that landed on an occupied, non-matching slot
    pub collisions: usize,
    /// Number of times the table has grown
    pub rehashes: usize,
}

impl TableStats {
    /// Ratio of occupied slots to total slots
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.size as f64 / self.capacity as f64
    }
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size: {}", self.size)?;
        writeln!(f, "Capacity: {}", self.capacity)?;
        writeln!(f, "Collisions: {}", self.collisions)?;
        writeln!(f, "Rehashes: {}", self.rehashes)
    }
}
