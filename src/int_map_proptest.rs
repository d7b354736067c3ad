#![cfg(test)]

// Property tests for IntMap kept inside the crate so the table-level
// consistency check (`assert_consistent`) is reachable.

use crate::int_map::IntMap;
use crate::key::MapKey;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations: indices shrink to earlier keys, the pool shrinks,
// and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Take(usize),
    Get(usize),
    Bump(usize, i32),
    Clear,
    Fit(usize),
    Iterate,
}

// Small raw keys pile into a few home slots of a 16..64 slot table, so
// clusters, wraparound and back-shifts happen constantly. Zero is included
// on purpose: it must behave as permanently absent.
fn arb_key() -> impl Strategy<Value = u16> {
    prop_oneof![
        0u16..48,
        (0u16..8).prop_map(|x| x * 16 + 15),
        (0u16..8).prop_map(|x| x * 64 + 1),
    ]
}

fn arb_scenario() -> impl Strategy<Value = (Vec<u16>, Vec<OpI>)> {
    proptest::collection::vec(arb_key(), 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Take),
            2 => idx.clone().prop_map(OpI::Get),
            2 => (idx.clone(), -100i32..100).prop_map(|(i, d)| OpI::Bump(i, d)),
            1 => Just(OpI::Clear),
            1 => (0usize..80).prop_map(OpI::Fit),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap, generic over
// the key width. After every op:
// - `len`/`is_empty` match the model and the load bound of the width holds.
// - Every probe path is hole free (back-shift leaves no gaps).
// - Key zero is absent and `get` of an absent key yields the null value.
fn run_scenario<K>(pool: &[u16], ops: Vec<OpI>) -> Result<(), TestCaseError>
where
    K: MapKey + From<u16> + Ord,
{
    const NULL: i32 = -7;
    let mut sut: IntMap<K, i32> = IntMap::new();
    sut.set_null_value(NULL);
    let mut model: HashMap<K, i32> = HashMap::new();
    let key = |i: usize| K::from(pool[i]);

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key(i);
                prop_assert_eq!(sut.insert(k, v), Ok(()));
                if !k.is_empty() {
                    model.insert(k, v);
                }
            }
            OpI::Remove(i) => {
                let k = key(i);
                prop_assert_eq!(sut.remove(k), model.remove(&k).is_some());
            }
            OpI::Take(i) => {
                let k = key(i);
                prop_assert_eq!(sut.take(k), model.remove(&k));
            }
            OpI::Get(i) => {
                let k = key(i);
                let expected = model.get(&k).copied().unwrap_or(NULL);
                prop_assert_eq!(*sut.get(k), expected);
                prop_assert_eq!(sut.contains_key(k), model.contains_key(&k));
                if let Some(slot) = sut.index_of(k) {
                    prop_assert!(sut.key_at(slot) == k);
                    prop_assert_eq!(sut[slot], expected);
                }
            }
            OpI::Bump(i, d) => {
                let k = key(i);
                match sut.slot_mut(k) {
                    Some(v) => {
                        *v = v.wrapping_add(d);
                        let m = model.entry(k).or_insert(0);
                        *m = m.wrapping_add(d);
                    }
                    None => prop_assert!(k.is_empty()),
                }
            }
            OpI::Clear => {
                let cap = sut.capacity();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), cap);
            }
            OpI::Fit(n) => {
                let before: BTreeMap<_, _> = sut.iter().map(|(k, v)| (k, *v)).collect();
                sut.fit(n);
                prop_assert!(n == 0 || K::fits(n, sut.capacity()));
                let after: BTreeMap<_, _> = sut.iter().map(|(k, v)| (k, *v)).collect();
                prop_assert_eq!(before, after);
            }
            OpI::Iterate => {
                let s: BTreeMap<_, _> = sut.iter().map(|(k, v)| (k, *v)).collect();
                let m: BTreeMap<_, _> = model.iter().map(|(k, v)| (*k, *v)).collect();
                prop_assert_eq!(s, m);
            }
        }

        sut.assert_consistent();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(!sut.contains_key(K::EMPTY));
        prop_assert_eq!(*sut.get(K::EMPTY), NULL);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_32((pool, ops) in arb_scenario()) {
        run_scenario::<u32>(&pool, ops)?;
    }

    #[test]
    fn prop_state_machine_64((pool, ops) in arb_scenario()) {
        run_scenario::<u64>(&pool, ops)?;
    }
}

// Property: removing any subset of keys from any insertion order leaves the
// remaining keys reachable with their values. Exercises back-shift chains
// that wrap past the end of the table.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_remove_subset_keeps_rest(
        keys in proptest::collection::btree_set(1u32..200, 1..60),
        mask in proptest::collection::vec(any::<bool>(), 60),
    ) {
        let keys: Vec<u32> = keys.into_iter().collect();
        let mut sut: IntMap<u32, u32> = IntMap::new();
        for &k in &keys {
            sut.insert(k, k * 3).unwrap();
        }
        for (&k, &drop) in keys.iter().zip(&mask) {
            if drop {
                prop_assert!(sut.remove(k));
                sut.assert_consistent();
            }
        }
        for (&k, &drop) in keys.iter().zip(&mask) {
            prop_assert_eq!(sut.contains_key(k), !drop);
            if !drop {
                prop_assert_eq!(*sut.get(k), k * 3);
            }
        }
    }
}
