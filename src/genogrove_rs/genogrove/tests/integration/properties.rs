/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Property-based tests for trees and groves using `proptest`.

#[cfg(not(miri))]
mod proptests {
    use genogrove::{Grove, Interval, IntervalTree};
    use proptest::prelude::*;

    use crate::helpers::{brute_force, found, iv, tree_hits};

    fn interval() -> impl Strategy<Value = Interval> {
        (0u64..1_000, 0u64..100).prop_map(|(start, len)| iv(start, start + len))
    }

    proptest! {
        #[test]
        fn prop_intersect_matches_linear_scan(
            order in 2usize..9,
            intervals in proptest::collection::vec(interval(), 0..300),
            queries in proptest::collection::vec(interval(), 1..20),
        ) {
            // `check_tree_invariants` runs after every insert and query under
            // the `unittest` feature.
            let mut tree = IntervalTree::new(order).unwrap();
            for &i in &intervals {
                tree.insert(i);
            }
            prop_assert_eq!(tree.len(), intervals.len());
            for query in &queries {
                prop_assert_eq!(tree_hits(&tree, query), brute_force(&intervals, query));
            }
        }

        #[test]
        fn prop_sorted_and_unsorted_loads_agree(
            order in 2usize..9,
            mut intervals in proptest::collection::vec(interval(), 1..300),
            query in interval(),
        ) {
            let mut shuffled = IntervalTree::new(order).unwrap();
            for &i in &intervals {
                shuffled.insert(i);
            }

            intervals.sort();
            intervals.dedup();
            let mut appended = IntervalTree::new(order).unwrap();
            for &i in &intervals {
                appended.insert_sorted(i).unwrap();
            }
            appended.check_tree_invariants();

            let mut expected = found(&shuffled, &query);
            expected.dedup();
            prop_assert_eq!(found(&appended, &query), expected);
        }

        #[test]
        fn prop_iteration_is_sorted(
            order in 2usize..6,
            intervals in proptest::collection::vec(interval(), 0..200),
        ) {
            let mut tree = IntervalTree::new(order).unwrap();
            for &i in &intervals {
                tree.insert_sorted_or_insert(i);
            }
            let mut expected = intervals.clone();
            expected.sort();
            let stored: Vec<_> = tree.iter().map(|k| *k.value()).collect();
            prop_assert_eq!(stored, expected);
        }

        #[test]
        fn prop_grove_size_is_sum_of_indices(
            records in proptest::collection::vec((0usize..4, interval()), 0..200),
        ) {
            let mut grove = Grove::new(3).unwrap();
            for (chrom, i) in &records {
                grove.insert(&format!("chr{chrom}"), *i);
            }
            prop_assert_eq!(grove.size(), records.len());
            let per_index: usize = grove
                .index_names()
                .map(|n| grove.index(n).unwrap().len())
                .sum();
            prop_assert_eq!(per_index, records.len());

            let covering = Interval::new(0, u64::MAX).unwrap();
            let non_empty = records.iter().filter(|(_, i)| !i.is_empty()).count();
            prop_assert_eq!(grove.intersect(&covering).len(), non_empty);
        }
    }
}
