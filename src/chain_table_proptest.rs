#![cfg(test)]

// Property tests for ChainTable kept inside the crate so they can be run
// without exposing internals.

use crate::chain_table::ChainTable;
use crate::hashers::{byte_sum, fnv1a};
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length. The pool may
// contain the empty string, which the table must treat as an invalid key.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Delete(usize),
    Lookup(usize),
    Contains(usize),
    Mutate(usize, i32),
    Dump,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            idx.clone().prop_map(OpI::Delete),
            idx.clone().prop_map(OpI::Lookup),
            idx.clone().prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Dump),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Insert succeeds exactly when the key is non-empty and absent; the
//   failed case leaves the table unchanged.
// - lookup/contains_key parity with the model (empty key reads as absent).
// - delete returns the model's value and removes exactly that key.
// - lookup_mut writes are observed by later lookups and deletes.
// - len/is_empty parity with the model after every op; a dump in the
//   middle of a sequence never perturbs subsequent results.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        // Capacity 3 with a real hash: most runs mix per-slot chains of
        // length 0, 1, and more.
        let mut sut: ChainTable<i32> = ChainTable::new(3, fnv1a);
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = &pool[i];
                    let expect_ok = !k.is_empty() && !model.contains_key(k);
                    prop_assert_eq!(sut.insert(k, v), expect_ok);
                    if expect_ok {
                        model.insert(k.clone(), v);
                    }
                }
                OpI::Delete(i) => {
                    let k = &pool[i];
                    let expected = if k.is_empty() { None } else { model.remove(k) };
                    prop_assert_eq!(sut.delete(k), expected);
                }
                OpI::Lookup(i) => {
                    let k = &pool[i];
                    let expected = if k.is_empty() { None } else { model.get(k) };
                    prop_assert_eq!(sut.lookup(k), expected);
                }
                OpI::Contains(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.contains_key(k), model.contains_key(k) && !k.is_empty());
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    match sut.lookup_mut(k) {
                        Some(v) => {
                            prop_assert!(!k.is_empty());
                            *v = v.wrapping_add(d);
                            let m = model.get_mut(k).expect("model has key");
                            *m = m.wrapping_add(d);
                        }
                        None => prop_assert!(k.is_empty() || !model.contains_key(k)),
                    }
                }
                OpI::Dump => {
                    let mut s = String::new();
                    sut.dump(&mut s, true).expect("dump never fails on String");
                }
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }

        // Final sweep: every surviving model entry is observable.
        for (k, v) in &model {
            prop_assert_eq!(sut.lookup(k), Some(v));
        }
    }
}

// Property: Capacity independence. The same op sequence produces identical
// results at capacity 1 (every key shares one chain) and capacity 64; only
// performance may differ, never behavior.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_capacity_independent((pool, ops) in arb_scenario()) {
        let mut one: ChainTable<i32> = ChainTable::new(1, byte_sum);
        let mut many: ChainTable<i32> = ChainTable::new(64, byte_sum);

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    prop_assert_eq!(one.insert(&pool[i], v), many.insert(&pool[i], v));
                }
                OpI::Delete(i) => {
                    prop_assert_eq!(one.delete(&pool[i]), many.delete(&pool[i]));
                }
                OpI::Lookup(i) | OpI::Contains(i) => {
                    prop_assert_eq!(one.lookup(&pool[i]), many.lookup(&pool[i]));
                }
                OpI::Mutate(i, d) => {
                    let a = one.lookup_mut(&pool[i]).map(|v| { *v = v.wrapping_add(d); *v });
                    let b = many.lookup_mut(&pool[i]).map(|v| { *v = v.wrapping_add(d); *v });
                    prop_assert_eq!(a, b);
                }
                OpI::Dump => {}
            }
            prop_assert_eq!(one.len(), many.len());
        }
    }
}

// Property: Cleanup accounting. After a random insert/delete sequence,
// dropping the table invokes the hook exactly once per surviving value,
// and never for values handed back by delete.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_cleanup_sees_exactly_the_survivors((pool, ops) in arb_scenario()) {
        let cleaned: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = cleaned.clone();
        let mut sut: ChainTable<i32> =
            ChainTable::with_cleanup(3, fnv1a, move |v| sink.borrow_mut().push(v));
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    if sut.insert(&pool[i], v) {
                        model.insert(pool[i].clone(), v);
                    }
                }
                OpI::Delete(i) => {
                    let got = sut.delete(&pool[i]);
                    prop_assert_eq!(got, model.remove(&pool[i]));
                    // Nothing reaches the hook while the table is alive.
                    prop_assert!(cleaned.borrow().is_empty());
                }
                _ => {}
            }
        }

        let mut expected: Vec<i32> = model.into_values().collect();
        drop(sut);
        let mut got = cleaned.borrow().clone();
        expected.sort_unstable();
        got.sort_unstable();
        prop_assert_eq!(got, expected);
    }
}
