//! The behavior set a [`Table`](crate::Table) is parameterized by

use std::{
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
    io,
};

/// Hashes a key into an unsigned integer
pub type HashFn<K> = Box<dyn Fn(&K) -> u64>;
/// Decides whether two keys denote the same entry
pub type EqualsFn<K> = Box<dyn Fn(&K, &K) -> bool>;
/// Formats one `(key, value)` pair for [`Table::dump`](crate::Table::dump)
pub type PrintFn<K, V> = Box<dyn Fn(&K, &V, &mut dyn io::Write) -> io::Result<()>>;
/// Releases one `(key, value)` pair when the table is destroyed
pub type DestroyFn<K, V> = Box<dyn FnMut(K, V)>;

/// Client-supplied behaviors for hashing, comparing, printing and releasing
/// the data stored in a table.
///
/// `hash` must be consistent with `equals`: two keys considered equal must
/// hash identically, otherwise lookups may miss entries that are present.
/// `destroy` is optional; without it the table releases pairs without
/// running any hook.
pub struct Callbacks<K, V> {
    /// Hash function for key data
    pub(crate) hash: HashFn<K>,
    /// Equality function for key comparison
    pub(crate) equals: EqualsFn<K>,
    /// Print function used by `dump`
    pub(crate) print: PrintFn<K, V>,
    /// Release hook used by `destroy`, if any
    pub(crate) destroy: Option<DestroyFn<K, V>>,
}

impl<K, V> Callbacks<K, V> {
    /// Creates a behavior set without a destroy hook
    pub fn new<H, E, P>(hash: H, equals: E, print: P) -> Self
    where
        H: Fn(&K) -> u64 + 'static,
        E: Fn(&K, &K) -> bool + 'static,
        P: Fn(&K, &V, &mut dyn io::Write) -> io::Result<()> + 'static,
    {
        Self { hash: Box::new(hash), equals: Box::new(equals), print: Box::new(print), destroy: None }
    }

    /// Registers the hook invoked once per stored pair on destruction
    #[must_use]
    pub fn with_destroy<D>(mut self, destroy: D) -> Self
    where
        D: FnMut(K, V) + 'static,
    {
        self.destroy = Some(Box::new(destroy));
        self
    }

    /// Returns true if a destroy hook is registered
    #[must_use]
    pub fn has_destroy(&self) -> bool {
        self.destroy.is_some()
    }
}

impl<K, V> Callbacks<K, V>
where
    K: Hash + Eq + fmt::Debug,
    V: fmt::Debug,
{
    /// Behaviors derived from the standard traits: `DefaultHasher`, `==` and
    /// `Debug` formatting.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            |key: &K| {
                let mut hasher = DefaultHasher::new();
                key.hash(&mut hasher);
                hasher.finish()
            },
            |a: &K, b: &K| a == b,
            |key: &K, value: &V, out: &mut dyn io::Write| write!(out, "{key:?}, {value:?}"),
        )
    }
}

#[allow(clippy::missing_fields_in_debug)]
impl<K, V> fmt::Debug for Callbacks<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks").field("destroy", &self.destroy.is_some()).finish_non_exhaustive()
    }
}
