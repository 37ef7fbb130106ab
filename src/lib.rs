//! # hashtab
//!
//! A generic open-addressing hash table whose hashing, key equality, printing
//! and destruction are supplied by the client.
//!
//! Collisions are resolved by linear probing. Storage is allocated on the
//! first insertion and doubles whenever the load factor reaches 0.75, after
//! which every entry is reinserted. The table keeps diagnostic counters of
//! probe collisions and rehashes, reported by [`Table::dump`] and
//! [`Table::stats`].
//!
//! ## Basic Usage
//!
//! ```rust
//! use hashtab::{Callbacks, Table};
//!
//! // Hash with `DefaultHasher`, compare with `==`, print with `Debug`
//! let mut table = Table::new(Callbacks::standard());
//!
//! table.put("a".to_string(), 1);
//! table.put("b".to_string(), 2);
//! table.put("c".to_string(), 3);
//!
//! assert_eq!(table.len(), 3);
//! assert_eq!(table.capacity(), 16);
//! assert_eq!(*table.get(&"b".to_string()), 2);
//! assert!(!table.has(&"z".to_string()));
//!
//! // Overwriting hands the previous value back
//! assert_eq!(table.put("a".to_string(), 10), Some(1));
//! ```
//!
//! ## Custom Behaviors
//!
//! ```rust
//! use std::io::Write;
//! use hashtab::{Callbacks, Table};
//!
//! let callbacks = Callbacks::new(
//!     |key: &u64| *key,
//!     |a: &u64, b: &u64| a == b,
//!     |key: &u64, value: &String, out: &mut dyn Write| write!(out, "{key}, {value}"),
//! )
//! .with_destroy(|key, value| println!("releasing {key} => {value}"));
//!
//! let mut table = Table::new(callbacks);
//! table.put(1, "one".to_string());
//! table.put(17, "seventeen".to_string());
//!
//! let mut out = Vec::new();
//! table.dump(&mut out, false).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "Size: 2\nCapacity: 16\nCollisions: 1\nRehashes: 0\n"
//! );
//!
//! // Runs the destroy behavior on both pairs
//! table.destroy();
//! ```

/// Module defining the client-supplied behavior set
mod callbacks;
/// Module defining the sizing and growth policy
mod config;
/// Module defining the error type of the fallible operations
mod error;
/// Module implementing key and value snapshots
mod snapshot;
/// Module defining the counter snapshot
mod stats;
/// Module implementing the open-addressing table
mod table;

pub use callbacks::{Callbacks, DestroyFn, EqualsFn, HashFn, PrintFn};
pub use config::{INITIAL_CAPACITY, LOAD_THRESHOLD, RESIZE_FACTOR, TableConfig};
pub use error::TableError;
pub use snapshot::Iter;
pub use stats::TableStats;
pub use table::Table;
