//! Property tests for adtkit-skiplist
//!
//! Every operation sequence is mirrored on a `BTreeSet`.

use adtkit_skiplist::SkipList;
use adtkit_testkit::proptest::strategy_int_vec;
use proptest::prelude::*;
use std::collections::BTreeSet;

proptest! {
    // Iteration is ascending with no duplicates.
    #[test]
    fn prop_iterates_sorted_unique(items in strategy_int_vec(200), seed in any::<u64>()) {
        let mut list = SkipList::with_seed(seed);
        list.extend(items.iter().copied());

        let model: BTreeSet<i64> = items.into_iter().collect();
        let listed: Vec<i64> = list.iter().copied().collect();
        prop_assert_eq!(list.len(), model.len());
        prop_assert_eq!(listed, model.into_iter().collect::<Vec<_>>());
    }

    // Interleaved adds and removes agree with the model.
    #[test]
    fn prop_matches_btreeset(
        ops in prop::collection::vec((any::<bool>(), -50i64..50), 0..300),
        seed in any::<u64>(),
    ) {
        let mut list = SkipList::with_seed(seed);
        let mut model = BTreeSet::new();

        for (insert, item) in ops {
            if insert {
                prop_assert_eq!(list.add(item), model.insert(item));
            } else {
                prop_assert_eq!(list.remove(&item), model.take(&item));
            }
            prop_assert_eq!(list.len(), model.len());
        }

        for probe in -50i64..50 {
            prop_assert_eq!(list.contains(&probe), model.contains(&probe));
        }
        prop_assert!(list.iter().copied().eq(model.iter().copied()));
    }
}
