//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the weight bound, accounting, and eviction order of the LRU.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::cache::{ByteView, LruCache, OnEvicted, Value};

// == Strategies ==
/// Generates short cache keys so that collisions (updates) are common
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e][0-9]{0,2}".prop_map(|s| s)
}

/// Generates values of varying weight
fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..24)
}

#[derive(Debug, Clone)]
enum LruOp {
    Add { key: String, value: Vec<u8> },
    Get { key: String },
    RemoveOldest,
}

fn lru_op_strategy() -> impl Strategy<Value = LruOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| LruOp::Add { key, value }),
        2 => key_strategy().prop_map(|key| LruOp::Get { key }),
        1 => Just(LruOp::RemoveOldest),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Property 1: Weight Bound
    // With a positive bound, total weight never exceeds it after an add.
    #[test]
    fn prop_weight_bound(
        max_bytes in 1usize..64,
        ops in prop::collection::vec(lru_op_strategy(), 1..80)
    ) {
        let mut lru = LruCache::new(max_bytes, None);

        for op in ops {
            match op {
                LruOp::Add { key, value } => lru.add(key, ByteView::from(value)),
                LruOp::Get { key } => { lru.get(&key); }
                LruOp::RemoveOldest => { lru.remove_oldest(); }
            }
            prop_assert!(lru.bytes() <= max_bytes, "weight {} over bound {}", lru.bytes(), max_bytes);
        }
    }

    // Property 2: Weight Accounting
    // The tracked weight equals the sum of key and value lengths of resident entries.
    #[test]
    fn prop_weight_accounting(ops in prop::collection::vec(lru_op_strategy(), 1..80)) {
        let mut lru = LruCache::new(0, None);
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();

        for op in ops {
            match op {
                LruOp::Add { key, value } => {
                    model.insert(key.clone(), value.clone());
                    lru.add(key, ByteView::from(value));
                }
                LruOp::Get { key } => {
                    let got = lru.get(&key).map(|v| v.byte_slice());
                    prop_assert_eq!(got.as_ref(), model.get(&key));
                }
                LruOp::RemoveOldest => {
                    if let Some((key, _)) = lru.remove_oldest() {
                        model.remove(&key);
                    }
                }
            }
        }

        let expected: usize = model.iter().map(|(k, v)| k.len() + v.len()).sum();
        prop_assert_eq!(lru.bytes(), expected);
        prop_assert_eq!(lru.len(), model.len());
    }

    // Property 3: Update In Place
    // Re-adding a key replaces its value without changing the entry count.
    #[test]
    fn prop_update_in_place(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut lru = LruCache::new(0, None);

        lru.add(key.clone(), ByteView::from(value1));
        lru.add(key.clone(), ByteView::from(value2.clone()));

        prop_assert_eq!(lru.len(), 1);
        prop_assert_eq!(lru.bytes(), key.len() + value2.len());
        prop_assert_eq!(lru.get(&key).map(|v| v.byte_slice()), Some(value2));
    }

    // Property 4: Eviction Callback Fidelity
    // Every evicted key is reported exactly once, least recently used first.
    #[test]
    fn prop_eviction_callback_order(
        max_bytes in 4usize..40,
        keys in prop::collection::vec("[a-z]{1,3}", 1..40)
    ) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let callback: OnEvicted<ByteView> = Box::new(move |key, _| {
            sink.lock().unwrap().push(key.to_string());
        });
        let mut lru = LruCache::new(max_bytes, Some(callback));

        // Mirror of the recency order, least recently used first
        let mut order: Vec<String> = Vec::new();
        let mut expected: Vec<String> = Vec::new();
        let mut weight = 0usize;

        for key in keys {
            let value = ByteView::from("vv");
            if let Some(pos) = order.iter().position(|k| *k == key) {
                order.remove(pos);
            } else {
                weight += key.len() + value.len();
            }
            order.push(key.clone());
            lru.add(key, value);

            while weight > max_bytes {
                let oldest = order.remove(0);
                weight -= oldest.len() + 2;
                expected.push(oldest);
            }
        }

        prop_assert_eq!(&*log.lock().unwrap(), &expected);
        prop_assert_eq!(lru.keys_by_recency(), order);
    }

    // Property 5: LRU Access Tracking
    // A key touched by `get` is not the next eviction candidate.
    #[test]
    fn prop_get_protects_from_eviction(n in 3usize..10) {
        // Each "kX" + "v" entry weighs 3
        let mut lru = LruCache::new(n * 3, None);
        for i in 0..n {
            lru.add(format!("k{}", i), ByteView::from("v"));
        }

        prop_assert!(lru.get("k0").is_some());
        lru.add("kz", ByteView::from("v"));

        prop_assert!(lru.get("k0").is_some(), "touched key was evicted");
        prop_assert!(lru.get("k1").is_none(), "oldest untouched key survived");
        prop_assert_eq!(Value::len(&ByteView::from("v")), 1);
    }
}
