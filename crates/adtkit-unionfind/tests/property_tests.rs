//! Property tests for adtkit-unionfind
//!
//! Connectivity is checked against a naive label-propagation model.

use adtkit_testkit::proptest::strategy_union_pairs;
use adtkit_unionfind::{SimpleUnionFind, UnionFind, UnionFindError};
use proptest::prelude::*;

const ITEMS: usize = 24;

/// Naive model: every item carries a set label, relabelled on union.
fn model_union(labels: &mut [usize], a: usize, b: usize) -> bool {
    let (la, lb) = (labels[a], labels[b]);
    if la == lb {
        return false;
    }
    for label in labels.iter_mut() {
        if *label == lb {
            *label = la;
        }
    }
    true
}

proptest! {
    // connected agrees with the model and set_count tracks successful unions.
    #[test]
    fn prop_union_find_matches_model(pairs in strategy_union_pairs(ITEMS, 60)) {
        let mut uf: UnionFind<usize> = (0..ITEMS).collect();
        let mut labels: Vec<usize> = (0..ITEMS).collect();
        let mut expected_sets = ITEMS;

        for (a, b) in pairs {
            let joined = model_union(&mut labels, a, b);
            match uf.union(&a, &b) {
                Ok(_) => {
                    prop_assert!(joined);
                    expected_sets -= 1;
                }
                Err(err) => {
                    prop_assert!(!joined);
                    prop_assert_eq!(err, UnionFindError::AlreadyUnified);
                }
            }
            prop_assert_eq!(uf.set_count(), expected_sets);
        }

        for a in 0..ITEMS {
            for b in 0..ITEMS {
                prop_assert_eq!(uf.connected(&a, &b).unwrap(), labels[a] == labels[b]);
            }
        }
    }

    // Both compression strategies produce the same partition.
    #[test]
    fn prop_strategies_agree(pairs in strategy_union_pairs(ITEMS, 60)) {
        let mut full: UnionFind<usize> = (0..ITEMS).collect();
        let mut halving: SimpleUnionFind<usize> = (0..ITEMS).collect();

        for (a, b) in pairs {
            prop_assert_eq!(full.union(&a, &b).is_ok(), halving.union(&a, &b).is_ok());
        }
        for a in 0..ITEMS {
            prop_assert_eq!(full.set_size(&a).unwrap(), halving.set_size(&a).unwrap());
        }
    }

    // After finding every item with full compression, paths have length <= 1.
    #[test]
    fn prop_full_compression_flattens(pairs in strategy_union_pairs(ITEMS, 60)) {
        let mut uf: UnionFind<usize> = (0..ITEMS).collect();
        for (a, b) in pairs {
            let _ = uf.union(&a, &b);
        }
        for item in 0..ITEMS {
            uf.find(&item).unwrap();
        }
        prop_assert!(uf.max_depth() <= 1);
    }
}
