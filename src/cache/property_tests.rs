//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check lookup, overwrite and concurrency behaviour.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::cache::{CacheStore, TimedCache};

// == Test Configuration ==
/// Long enough that no sweep boundary passes during a test case
const TEST_INTERVAL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates arbitrary keys, including the empty string
fn key_strategy() -> impl Strategy<Value = String> {
    ".{0,64}"
}

/// Generates arbitrary byte payloads, including empty ones
fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

/// A single cache operation
#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: Vec<u8> },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Add { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a pair and reading it back before expiry returns the exact bytes.
    #[test]
    fn prop_insert_then_read(key in key_strategy(), value in value_strategy()) {
        let store = CacheStore::new(TEST_INTERVAL);

        store.insert(key.clone(), value.clone());

        prop_assert_eq!(store.get(&key), Some(value));
    }

    // A second add on the same key fully replaces the first.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let store = CacheStore::new(TEST_INTERVAL);

        store.insert(key.clone(), value1);
        store.insert(key.clone(), value2.clone());

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1, "Should have exactly one entry after overwrite");
    }

    // Any operation sequence behaves like a plain map, and hit/miss counts
    // match what the caller observed.
    #[test]
    fn prop_matches_model_map(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let store = CacheStore::new(TEST_INTERVAL);
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    store.insert(key.clone(), value.clone());
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let got = store.get(&key);
                    prop_assert_eq!(got.as_ref(), model.get(&key));
                    match got {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, model.len(), "Total entries mismatch");
    }

    // Distinct keys never see each other's values.
    #[test]
    fn prop_distinct_keys_independent(
        entries in prop::collection::hash_map(key_strategy(), value_strategy(), 1..20)
    ) {
        let cache = TimedCache::new(TEST_INTERVAL).unwrap();

        for (key, value) in &entries {
            cache.add(key.as_str(), value.as_slice()).unwrap();
        }

        for (key, value) in &entries {
            let got = cache.get(key);
            prop_assert_eq!(got.as_ref(), Some(value));
        }
        prop_assert_eq!(cache.len(), entries.len());
    }

    // Sweeping a store whose entries are all younger than the interval
    // removes nothing.
    #[test]
    fn prop_sweep_keeps_fresh_entries(
        entries in prop::collection::hash_map(key_strategy(), value_strategy(), 0..20)
    ) {
        let store = CacheStore::new(TEST_INTERVAL);
        for (key, value) in &entries {
            store.insert(key.clone(), value.clone());
        }

        prop_assert_eq!(store.sweep(), 0);
        prop_assert_eq!(store.len(), entries.len());
    }
}

// Fewer cases: each one spins up threads and runs across several sweeps
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // Concurrent writers on distinct keys and concurrent readers never observe
    // a value that some writer did not write in full.
    #[test]
    fn prop_concurrent_readers_and_writers(
        writers in 2usize..6,
        readers in 2usize..6,
        payload_len in 1usize..512
    ) {
        let cache = Arc::new(TimedCache::new(Duration::from_millis(2)).unwrap());
        let rounds = 200;

        let mut handles = Vec::new();
        for w in 0..writers {
            let cache = cache.clone();
            handles.push(thread::spawn(move || {
                for round in 0..rounds {
                    // Every payload is one repeated byte so torn writes are detectable
                    let byte = ((w * rounds + round) % 251) as u8;
                    cache.add(format!("writer-{}", w), vec![byte; payload_len]).unwrap();
                }
                true
            }));
        }

        for r in 0..readers {
            let cache = cache.clone();
            handles.push(thread::spawn(move || {
                for round in 0..rounds {
                    let key = format!("writer-{}", (r + round) % writers);
                    if let Some(value) = cache.get(&key) {
                        if value.len() != payload_len || value.iter().any(|b| *b != value[0]) {
                            return false;
                        }
                    }
                }
                true
            }));
        }

        for handle in handles {
            prop_assert!(handle.join().unwrap(), "Observed a partially written value");
        }
    }
}
