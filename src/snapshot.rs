//! Key and value snapshots of a [`Table`]

use std::{iter::FusedIterator, marker::PhantomData};

use crate::Table;

impl<K, V> Table<K, V> {
    /// Returns the stored keys in ascending slot order.
    ///
    /// The snapshot has exactly `len()` entries and is empty if nothing was
    /// ever inserted. The i-th key pairs with the i-th entry of
    /// [`values`](Self::values).
    #[must_use]
    pub fn keys(&self) -> Vec<&K> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Returns the stored values in ascending slot order
    #[must_use]
    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, value)| value).collect()
    }
}

/// Iterator over the occupied slots of a table, in slot order
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Reference to the slots of the table
    slots: &'a [Option<(K, V)>],
    /// Current position in the iteration
    index: usize,
    /// Phantom data to hold the lifetime and type parameters
    _marker: PhantomData<&'a (K, V)>,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Starts iterating at slot 0
    pub(crate) fn new(slots: &'a [Option<(K, V)>]) -> Self {
        Self { slots, index: 0, _marker: PhantomData }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Some((key, value)) = slot {
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.len().saturating_sub(self.index)))
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a Table<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Callbacks, Table};

    #[test]
    fn test_keys_and_values_are_pairwise_consistent() {
        let mut table = Table::new(Callbacks::standard());
        for i in 0..40 {
            table.put(format!("key-{i}"), i * 3);
        }

        let keys = table.keys();
        let values = table.values();
        assert_eq!(keys.len(), table.len());
        assert_eq!(values.len(), table.len());
        for (key, value) in keys.iter().zip(&values) {
            assert_eq!(table.get(key), *value);
        }
    }

    #[test]
    fn test_iter_matches_snapshots() {
        let mut table = Table::new(Callbacks::standard());
        table.put("a".to_string(), 1);
        table.put("b".to_string(), 2);
        table.put("c".to_string(), 3);

        let mut count = 0;
        let mut sum = 0;
        for (_, &value) in &table {
            count += 1;
            sum += value;
        }
        assert_eq!(count, 3);
        assert_eq!(sum, 6);

        let from_iter: Vec<&String> = table.iter().map(|(key, _)| key).collect();
        assert_eq!(from_iter, table.keys());
    }
}
