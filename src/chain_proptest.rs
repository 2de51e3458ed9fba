#![cfg(test)]

// Property tests for the chain layer kept inside the crate so they can
// reach the crate-private `Chains` type directly.

use crate::chain::Chains;
use core::num::NonZeroUsize;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Push(usize, i32),
    Merge(usize, i32),
    Unlink(usize),
    Get(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (1usize..=5, proptest::collection::vec("[a-z]{1,4}", 1..=8)).prop_flat_map(
        |(buckets, pool)| {
            let idx = 0..pool.len();
            let op = prop_oneof![
                (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Push(i, v)),
                (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Merge(i, v)),
                idx.clone().prop_map(OpI::Unlink),
                idx.clone().prop_map(OpI::Get),
                Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..60)
                .prop_map(move |ops| (buckets, pool.clone(), ops))
        },
    )
}

// Bucket choice stays outside this layer; tests pick one by key length.
fn bucket_for(key: &str, buckets: usize) -> usize {
    key.len() % buckets
}

// Property: state-machine equivalence against an ordered map model.
// - `push_front` only for absent keys keeps keys unique.
// - `merge` combines existing and incoming, and hands back incoming when absent.
// - `unlink` returns the owned key/value and the key disappears.
// - Iteration visits each live entry exactly once, grouped by ascending bucket.
// - `len` and the sum of `chain_len` over all buckets match the model.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_chains_state_machine((buckets, pool, ops) in arb_scenario()) {
        let mut sut: Chains<i32> = Chains::with_buckets(NonZeroUsize::new(buckets).unwrap()).unwrap();
        let mut model: BTreeMap<String, i32> = BTreeMap::new();

        for op in ops {
            match op {
                OpI::Push(i, v) => {
                    let k = &pool[i];
                    let b = bucket_for(k, buckets);
                    if !model.contains_key(k) {
                        sut.push_front(b, k, v);
                        model.insert(k.clone(), v);
                    }
                }
                OpI::Merge(i, v) => {
                    let k = &pool[i];
                    let b = bucket_for(k, buckets);
                    match sut.merge(b, k, v, |old, new| old.wrapping_add(new)) {
                        Ok(()) => {
                            let mv = model.get_mut(k).expect("merge only succeeds when present");
                            *mv = mv.wrapping_add(v);
                        }
                        Err(back) => {
                            prop_assert_eq!(back, v);
                            prop_assert!(!model.contains_key(k));
                        }
                    }
                }
                OpI::Unlink(i) => {
                    let k = &pool[i];
                    let b = bucket_for(k, buckets);
                    match sut.unlink(b, k) {
                        Some((kk, vv)) => {
                            prop_assert_eq!(&*kk, k.as_str());
                            prop_assert_eq!(Some(vv), model.remove(k));
                        }
                        None => prop_assert!(!model.contains_key(k)),
                    }
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    let b = bucket_for(k, buckets);
                    prop_assert_eq!(sut.get(b, k).map(|(_, v)| *v), model.get(k).copied());
                }
                OpI::Iterate => {
                    let walked: Vec<(String, i32)> =
                        sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                    let keys: BTreeSet<_> = walked.iter().map(|(k, _)| k.clone()).collect();
                    prop_assert_eq!(keys.len(), walked.len(), "each entry exactly once");
                    let as_map: BTreeMap<_, _> = walked.iter().cloned().collect();
                    prop_assert_eq!(&as_map, &model);
                    let order: Vec<usize> = walked.iter().map(|(k, _)| bucket_for(k, buckets)).collect();
                    prop_assert!(order.windows(2).all(|w| w[0] <= w[1]), "bucket order ascending");
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            let chained: usize = (0..buckets).map(|b| sut.chain_len(b)).sum();
            prop_assert_eq!(chained, model.len());
        }

        let mut drained = Vec::new();
        sut.drain_ordered(|v| drained.push(v));
        prop_assert_eq!(drained.len(), model.len());
        prop_assert_eq!(sut.len(), 0);
    }
}
