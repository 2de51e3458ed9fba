mod common;

use chain_table::{ChainedTable, Seeded};
use common::init_test_logger;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

fn arb_key() -> impl Strategy<Value = String> {
    // Short alphabet keeps byte-sum collisions frequent.
    "[a-d]{1,4}"
}

// Property: round trip, overwrite and merge agree with a HashMap model, and
// a final walk visits every key exactly once with its last-written value.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_matches_hashmap_model(
        cap in 1usize..=9,
        ops in proptest::collection::vec((0u8..=3u8, arb_key(), any::<i16>()), 1..100),
    ) {
        init_test_logger();
        let mut t: ChainedTable<i32> = ChainedTable::new(cap).unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();

        for (op, key, v) in ops {
            let v = i32::from(v);
            match op {
                0 => {
                    let prev = t.insert(&key, v).unwrap();
                    prop_assert_eq!(prev, model.insert(key.clone(), v));
                    prop_assert_eq!(t.get(&key), Some(&v));
                }
                1 => {
                    t.insert_merge(&key, v, |a, b| a.wrapping_add(b)).unwrap();
                    let merged = match model.get(&key) {
                        Some(&old) => old.wrapping_add(v),
                        None => v,
                    };
                    model.insert(key.clone(), merged);
                    prop_assert_eq!(t.get(&key), Some(&merged));
                }
                2 => {
                    prop_assert_eq!(t.remove(&key), model.remove(&key));
                    prop_assert_eq!(t.get(&key), None);
                }
                _ => {
                    prop_assert_eq!(t.get(&key), model.get(&key));
                }
            }
            prop_assert_eq!(t.len(), model.len());
        }

        let mut visits: BTreeMap<String, (usize, i32)> = BTreeMap::new();
        t.for_each(|k, v| {
            let e = visits.entry(k.to_string()).or_insert((0, *v));
            e.0 += 1;
        });
        prop_assert_eq!(visits.len(), model.len());
        for (k, (n, v)) in visits {
            prop_assert_eq!(n, 1);
            prop_assert_eq!(Some(&v), model.get(&k));
        }
    }
}

// Property: hashing the same key twice with the same hasher and capacity
// selects the same bucket, and the bucket is always in range.
proptest! {
    #[test]
    fn prop_bucket_is_deterministic_and_in_range(key in "\\PC{0,24}", cap in 1usize..=64) {
        let bytesum: ChainedTable<()> = ChainedTable::new(cap).unwrap();
        let b = bytesum.bucket_of(&key);
        prop_assert!(b < cap);
        prop_assert_eq!(b, bytesum.bucket_of(&key));

        let seeded: ChainedTable<(), _> = ChainedTable::with_hasher(cap, Seeded::random()).unwrap();
        let s = seeded.bucket_of(&key);
        prop_assert!(s < cap);
        prop_assert_eq!(s, seeded.bucket_of(&key));
    }
}

// Property: teardown hands every stored value to destroy exactly once,
// including values that were overwritten in place (only the last write
// survives) and excluding values removed beforehand.
proptest! {
    #[test]
    fn prop_destroy_sees_each_live_value_once(
        cap in 1usize..=8,
        keys in proptest::collection::vec(arb_key(), 0..40),
        removed in proptest::collection::vec(arb_key(), 0..10),
    ) {
        init_test_logger();
        let mut t = ChainedTable::new(cap).unwrap();
        let mut model: HashMap<String, usize> = HashMap::new();
        for (i, k) in keys.iter().enumerate() {
            t.insert(k, i).unwrap();
            model.insert(k.clone(), i);
        }
        for k in &removed {
            prop_assert_eq!(t.remove(k), model.remove(k));
        }

        let mut freed: HashMap<usize, usize> = HashMap::new();
        t.destroy(|v| *freed.entry(v).or_default() += 1);

        prop_assert_eq!(freed.len(), model.len());
        for v in model.values() {
            prop_assert_eq!(freed.get(v), Some(&1));
        }
    }
}
