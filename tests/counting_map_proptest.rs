// CountingMap property tests.
//
// Property 1: merge adds counters key by key and leaves both inputs alone.
//  - Model: two maps built from random increments over a small key space.
//  - Invariant: merged.get(k) == a.get(k) + b.get(k) for every k in the
//    union; merged.len() == size of the union; a and b compare equal to
//    snapshots taken before the merge.
//
// Property 2: iteration never yields a zero counter and keys stay in
// first-insertion order of the live keys.
//  - Model: Vec of live keys in insertion order; a key is appended on its
//    first increment after being absent and dropped when decremented to 0.
use proptest::prelude::*;
use tally_collections::CountingMap;

fn build(incs: &[(u8, usize)]) -> CountingMap<u8> {
    let mut m = CountingMap::new();
    for &(k, steps) in incs {
        m.increment_by(k, steps).unwrap();
    }
    m
}

proptest! {
    #[test]
    fn prop_merge_is_pointwise_sum(
        a_incs in proptest::collection::vec((0u8..8, 1usize..5), 0..30),
        b_incs in proptest::collection::vec((0u8..8, 1usize..5), 0..30),
    ) {
        let a = build(&a_incs);
        let b = build(&b_incs);
        let (a_before, b_before) = (a.clone(), b.clone());

        let merged = a.merge(&b).unwrap();
        let mut union = 0;
        for k in 0u8..8 {
            prop_assert_eq!(merged.get(&k), a.get(&k) + b.get(&k));
            if a.contains_key(&k) || b.contains_key(&k) {
                union += 1;
            }
        }
        prop_assert_eq!(merged.len(), union);
        prop_assert_eq!(merged.sum(), a.sum() + b.sum());
        prop_assert_eq!(&a, &a_before);
        prop_assert_eq!(&b, &b_before);
        prop_assert_eq!(merged, b.merge(&a).unwrap());
    }

    #[test]
    fn prop_iteration_order_tracks_live_keys(ops in proptest::collection::vec((any::<bool>(), 0u8..6), 1..120)) {
        let mut m = CountingMap::new();
        let mut order: Vec<u8> = Vec::new();

        for (inc, k) in ops {
            if inc {
                if !m.contains_key(&k) {
                    order.push(k);
                }
                m.increment(k).unwrap();
            } else if m.decrement(&k).is_ok() && !m.contains_key(&k) {
                order.retain(|&x| x != k);
            }

            prop_assert_eq!(m.keys().copied().collect::<Vec<_>>(), order.clone());
            prop_assert!(m.values().all(|c| c > 0));
        }
    }
}
