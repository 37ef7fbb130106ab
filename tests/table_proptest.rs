// Table property tests.
//
// Property 1: unique insertions.
//  - size == number of puts, load factor stays below the threshold after
//    every put, and rehashes match a model of the doubling policy.
//
// Property 1b: the same under a random sizing policy.
//  - With any valid threshold and resize factor, the load factor is below
//    the threshold after every put, and capacity follows the model.
//
// Property 2: model equivalence against std HashMap.
//  - Operations: put (with overwrites), has, get over a small key space.
//  - put returns the previous value the model holds; len, has and get
//    agree with the model after every step.
//
// Property 3: snapshots and destruction.
//  - keys()/values() have len() entries, are pairwise consistent, and
//    cover the model; the destroy behavior receives exactly the final
//    model contents once each.
use std::{cell::RefCell, collections::HashMap, io, rc::Rc};

use hashtab::{Callbacks, INITIAL_CAPACITY, LOAD_THRESHOLD, RESIZE_FACTOR, Table, TableConfig};
use proptest::prelude::*;

/// A deliberately poor hash so that probe chains get long
fn clustered_table() -> Table<u16, u32> {
    Table::new(Callbacks::new(
        |key: &u16| u64::from(*key % 4),
        |a: &u16, b: &u16| a == b,
        |key: &u16, value: &u32, out: &mut dyn io::Write| write!(out, "{key}, {value}"),
    ))
}

proptest! {
    #[test]
    fn prop_unique_puts_track_size_and_growth(n in 1usize..300) {
        let mut table = Table::new(Callbacks::standard());
        let mut capacity = INITIAL_CAPACITY;
        let mut expected_rehashes = 0;

        for i in 0..n {
            prop_assert_eq!(table.put(i, i * 2), None);
            prop_assert_eq!(table.len(), i + 1);
            prop_assert!(table.load_factor() < LOAD_THRESHOLD);

            if (i + 1) * 100 >= capacity * 75 {
                capacity *= RESIZE_FACTOR;
                expected_rehashes += 1;
            }
            prop_assert_eq!(table.capacity(), capacity);
            prop_assert_eq!(table.rehashes(), expected_rehashes);
        }

        for i in 0..n {
            prop_assert!(table.has(&i));
            prop_assert_eq!(*table.get(&i), i * 2);
        }
    }

    #[test]
    fn prop_any_policy_keeps_load_under_threshold(
        initial in 1usize..40,
        threshold in 1usize..=95,
        factor in 2usize..5,
        n in 1usize..200,
    ) {
        let config = TableConfig::default()
            .with_initial_capacity(initial)
            .with_load_factor_threshold(threshold)
            .with_resize_factor(factor);
        let mut table = Table::with_config(Callbacks::standard(), config);
        let mut capacity = initial;

        for i in 0..n {
            table.put(i, i);
            while (i + 1) * 100 >= capacity * threshold {
                capacity *= factor;
            }
            prop_assert_eq!(table.capacity(), capacity);
            prop_assert!((i + 1) * 100 < table.capacity() * threshold);
        }

        for i in 0..n {
            prop_assert_eq!(*table.get(&i), i);
        }
    }

    #[test]
    fn prop_matches_std_hashmap(ops in proptest::collection::vec((0u8..=2u8, 0u16..64u16, any::<u32>()), 1..200)) {
        let mut table = clustered_table();
        let mut model: HashMap<u16, u32> = HashMap::new();

        for (op, key, value) in ops {
            match op {
                0 => {
                    prop_assert_eq!(table.put(key, value), model.insert(key, value));
                }
                1 => {
                    prop_assert_eq!(table.has(&key), model.contains_key(&key));
                }
                _ => {
                    if let Some(expected) = model.get(&key) {
                        prop_assert_eq!(table.get(&key), expected);
                    } else {
                        prop_assert!(table.try_get(&key).is_err());
                    }
                }
            }
            prop_assert_eq!(table.len(), model.len());
        }

        for (key, value) in &model {
            prop_assert_eq!(table.get(key), value);
        }
    }

    #[test]
    fn prop_snapshots_and_destroy_cover_contents(entries in proptest::collection::vec((any::<u16>(), any::<u32>()), 0..150)) {
        let released = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&released);
        let callbacks = Callbacks::standard()
            .with_destroy(move |key: u16, value: u32| sink.borrow_mut().push((key, value)));

        let mut table = Table::new(callbacks);
        let mut model: HashMap<u16, u32> = HashMap::new();
        for (key, value) in entries {
            table.put(key, value);
            model.insert(key, value);
        }

        let keys = table.keys();
        let values = table.values();
        prop_assert_eq!(keys.len(), table.len());
        prop_assert_eq!(values.len(), table.len());
        for (key, value) in keys.iter().zip(&values) {
            prop_assert_eq!(model.get(*key), Some(*value));
        }
        drop(keys);
        drop(values);

        table.destroy();
        let mut released = released.borrow().clone();
        released.sort_unstable();
        let mut expected: Vec<(u16, u32)> = model.into_iter().collect();
        expected.sort_unstable();
        prop_assert_eq!(released, expected);
    }
}

#[test]
fn twelve_keys_cross_the_threshold_once() {
    let mut table = Table::new(Callbacks::standard());
    for i in 0..12 {
        table.put(format!("key-{i}"), i);
    }
    assert_eq!(table.rehashes(), 1);
    assert_eq!(table.capacity(), 32);
    for i in 0..12 {
        assert!(table.has(&format!("key-{i}")));
        assert_eq!(*table.get(&format!("key-{i}")), i);
    }
}

#[test]
fn clustered_keys_survive_growth() {
    let mut table = clustered_table();
    for key in 0..100 {
        table.put(key, u32::from(key) + 1);
    }
    assert!(table.rehashes() >= 3);
    assert!(table.collisions() > 0);
    for key in 0..100 {
        assert_eq!(*table.get(&key), u32::from(key) + 1);
    }
    assert!(!table.has(&100));
}
