use std::{cell::Cell, io, mem};

use log::{debug, trace};

use crate::{Callbacks, Iter, TableConfig, TableError, TableStats};

/// Outcome of a linear probe for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The slot at this index holds a key equal to the probed one
    Found(usize),
    /// The probe reached an empty slot at this index
    Vacant(usize),
    /// Every slot was visited without a match or an empty slot, or no
    /// storage has been allocated yet
    Exhausted,
}

/// An open-addressing hash table driven by client-supplied behaviors.
///
/// Keys are located by linear probing from `hash(key) mod capacity`, wrapping
/// at the end of the slot array. Storage is allocated on the first
/// [`put`](Self::put), and the table doubles (by default) whenever the load
/// factor reaches the configured threshold, so an empty slot always remains.
///
/// Entries are never removed individually. When the table is destroyed, the
/// registered destroy behavior receives every stored pair.
///
/// Note: This implementation is not thread-safe. The collision counter is
/// updated through shared references, so the table is `!Sync`.
#[derive(Debug)]
pub struct Table<K, V> {
    /// The slots storing the key-value pairs; empty until the first insertion
    slots: Vec<Option<(K, V)>>,
    /// Current number of occupied slots
    size: usize,
    /// Number of slots, fixed at the initial capacity until storage grows
    capacity: usize,
    /// Probes that landed on an occupied slot holding a different key
    collisions: Cell<usize>,
    /// Number of times the storage has grown
    rehashes: usize,
    /// The hash, equals, print and destroy behaviors
    callbacks: Callbacks<K, V>,
    /// Sizing and growth policy
    config: TableConfig,
}

impl<K, V> Table<K, V> {
    /// Creates an empty table with the default configuration.
    ///
    /// No slots are allocated until the first insertion.
    #[must_use]
    pub fn new(callbacks: Callbacks<K, V>) -> Self {
        Self::build(callbacks, TableConfig::default())
    }

    /// Creates an empty table with the given sizing policy.
    ///
    /// # Panics
    ///
    /// Panics if `config` does not pass [`TableConfig::validate`].
    #[must_use]
    #[allow(clippy::panic)]
    pub fn with_config(callbacks: Callbacks<K, V>, config: TableConfig) -> Self {
        match Self::try_with_config(callbacks, config) {
            Ok(table) => table,
            Err(err) => panic!("invalid table configuration: {err}"),
        }
    }

    /// Creates an empty table with the given sizing policy.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`.
    pub fn try_with_config(
        callbacks: Callbacks<K, V>,
        config: TableConfig,
    ) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self::build(callbacks, config))
    }

    /// Assembles a table from an already validated configuration
    fn build(callbacks: Callbacks<K, V>, config: TableConfig) -> Self {
        Self {
            slots: Vec::new(),
            size: 0,
            capacity: config.initial_capacity,
            collisions: Cell::new(0),
            rehashes: 0,
            callbacks,
            config,
        }
    }

    /// Destroys the table, handing every stored pair to the destroy
    /// behavior if one was registered.
    pub fn destroy(self) {
        drop(self);
    }

    /// Takes every stored pair back in slot order, bypassing the destroy
    /// behavior.
    #[must_use]
    pub fn into_pairs(mut self) -> Vec<(K, V)> {
        self.size = 0;
        mem::take(&mut self.slots).into_iter().flatten().collect()
    }

    /// Returns true if the table holds an entry for `key`.
    ///
    /// Safe to call before anything was inserted. Probing stops at the first
    /// empty slot and after at most `capacity` steps.
    pub fn has(&self, key: &K) -> bool {
        matches!(self.probe(key), Probe::Found(_))
    }

    /// Returns the value stored for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the table has no entry for `key`; check with
    /// [`has`](Self::has) first or use [`try_get`](Self::try_get).
    #[allow(clippy::panic)]
    pub fn get(&self, key: &K) -> &V {
        match self.try_get(key) {
            Ok(value) => value,
            Err(err) => panic!("get: {err}"),
        }
    }

    /// Returns the value stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] if the table has no entry for `key`.
    pub fn try_get(&self, key: &K) -> Result<&V, TableError> {
        let Probe::Found(index) = self.probe(key) else {
            return Err(TableError::KeyNotFound);
        };
        match self.slots.get(index) {
            Some(Some((_, value))) => Ok(value),
            _ => Err(TableError::KeyNotFound),
        }
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the table has no entry for `key`.
    #[allow(clippy::panic)]
    pub fn get_mut(&mut self, key: &K) -> &mut V {
        match self.try_get_mut(key) {
            Ok(value) => value,
            Err(err) => panic!("get_mut: {err}"),
        }
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] if the table has no entry for `key`.
    pub fn try_get_mut(&mut self, key: &K) -> Result<&mut V, TableError> {
        let Probe::Found(index) = self.probe(key) else {
            return Err(TableError::KeyNotFound);
        };
        match self.slots.get_mut(index) {
            Some(Some((_, value))) => Ok(value),
            _ => Err(TableError::KeyNotFound),
        }
    }

    /// Inserts a key-value pair, or replaces the value of an existing key.
    ///
    /// When the key is already present the stored key is kept and the
    /// previous value is returned to the caller. A new entry that brings the
    /// load factor to the threshold grows the table, as many times as needed
    /// to get back under it, before returning.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.slots.is_empty() {
            self.slots = empty_slots(self.capacity);
            debug!("allocated {} slots", self.capacity);
        }

        let previous = self.place(key, value);
        if previous.is_some() {
            trace!("replaced value in place, size stays {}", self.size);
            return previous;
        }

        self.size = self.size.saturating_add(1);
        // A low threshold can need more than one resize
        while self.config.exceeds_threshold(self.size, self.capacity) {
            self.grow();
        }
        None
    }

    /// Stores a pair at the slot its probe sequence selects.
    ///
    /// Returns the replaced value if the key was already present. Leaves
    /// `size` untouched, so growth can reuse it for reinsertion.
    fn place(&mut self, key: K, value: V) -> Option<V> {
        loop {
            if let Probe::Found(index) | Probe::Vacant(index) = self.probe(&key) {
                if let Some(slot) = self.slots.get_mut(index) {
                    return match slot {
                        Some((_, stored)) => Some(mem::replace(stored, value)),
                        None => {
                            *slot = Some((key, value));
                            None
                        }
                    };
                }
            }
            // Only reachable if every slot is occupied.
            self.grow();
        }
    }

    /// Multiplies the capacity by the resize factor and reinserts every
    /// entry, in slot order, through the regular placement path.
    fn grow(&mut self) {
        let old_capacity = self.capacity;
        let new_capacity = old_capacity.saturating_mul(self.config.resize_factor);
        let old_slots = mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.capacity = new_capacity;
        self.rehashes = self.rehashes.saturating_add(1);

        for (key, value) in old_slots.into_iter().flatten() {
            let replaced = self.place(key, value);
            debug_assert!(replaced.is_none(), "stored keys must be unique under equals");
        }

        debug!(
            "rehashed {} entries from {} to {} slots (rehash #{})",
            self.size, old_capacity, new_capacity, self.rehashes
        );
    }

    /// Probes linearly from the home slot of `key`, counting every occupied
    /// slot that holds a different key.
    fn probe(&self, key: &K) -> Probe {
        if self.slots.is_empty() {
            return Probe::Exhausted;
        }

        let mut index = self.home_index(key);
        for _ in 0..self.capacity {
            match self.slots.get(index) {
                None => return Probe::Exhausted,
                Some(None) => return Probe::Vacant(index),
                Some(Some((stored, _))) => {
                    if (self.callbacks.equals)(stored, key) {
                        return Probe::Found(index);
                    }
                    self.collisions.set(self.collisions.get().saturating_add(1));
                }
            }
            index = self.next_index(index);
        }
        Probe::Exhausted
    }

    /// Gets the starting slot for a key: `hash(key) mod capacity`
    #[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
    fn home_index(&self, key: &K) -> usize {
        let hash = (self.callbacks.hash)(key);
        // capacity is never zero once validated
        (hash % (self.capacity as u64)) as usize
    }

    /// The slot after `index`, wrapping at the capacity
    fn next_index(&self, index: usize) -> usize {
        let next = index.saturating_add(1);
        if next >= self.capacity { 0 } else { next }
    }

    /// Writes the table counters and, if `contents` is true, every slot.
    ///
    /// Each slot is reported as `i: null` when empty or as `i: (...)` with
    /// the print behavior's output when occupied.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`; the table itself is left unchanged.
    pub fn dump<W: io::Write>(&self, out: &mut W, contents: bool) -> io::Result<()> {
        let out: &mut dyn io::Write = out;
        write!(out, "{}", self.stats())?;
        if !contents {
            return Ok(());
        }

        for index in 0..self.capacity {
            if let Some(Some((key, value))) = self.slots.get(index) {
                write!(out, "{index}: (")?;
                (self.callbacks.print)(key, value, &mut *out)?;
                writeln!(out, ")")?;
            } else {
                writeln!(out, "{index}: null")?;
            }
        }
        Ok(())
    }

    /// Returns an iterator over the stored pairs in slot order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots)
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the cumulative collision count
    #[must_use]
    pub fn collisions(&self) -> usize {
        self.collisions.get()
    }

    /// Returns how many times the table has grown
    #[must_use]
    pub fn rehashes(&self) -> usize {
        self.rehashes
    }

    /// Returns true once the first insertion allocated the slots
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Returns the current load factor of the table
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.stats().load_factor()
    }

    /// Returns a copy of the counters
    #[must_use]
    pub fn stats(&self) -> TableStats {
        TableStats {
            size: self.size,
            capacity: self.capacity,
            collisions: self.collisions.get(),
            rehashes: self.rehashes,
        }
    }
}

impl<K, V> Extend<(K, V)> for Table<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V> Drop for Table<K, V> {
    fn drop(&mut self) {
        let slots = mem::take(&mut self.slots);
        let Some(destroy) = self.callbacks.destroy.as_mut() else {
            return;
        };

        let mut released: usize = 0;
        for (key, value) in slots.into_iter().flatten() {
            destroy(key, value);
            released = released.saturating_add(1);
        }
        debug!("destroy behavior released {released} entries");
    }
}

/// Allocates `capacity` empty slots
fn empty_slots<K, V>(capacity: usize) -> Vec<Option<(K, V)>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}
