/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for IntervalTree overlap queries.

use genogrove::{Interval, IntervalTree};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::helpers::{brute_force, build_tree, found, iv, tree_hits};

#[test]
fn test_empty_tree() {
    let tree = IntervalTree::new(3).unwrap();
    assert!(tree.intersect(&iv(0, 100)).is_empty());
}

#[test]
fn test_chromosome_example() {
    let (tree, _) = build_tree(3, &[iv(10, 20), iv(30, 40), iv(15, 25)]);
    let expected = [iv(10, 20), iv(15, 25), iv(30, 40)];
    assert_eq!(found(&tree, &iv(18, 32)), expected);
}

#[rstest]
#[case::ends_at_query_start(iv(20, 30), vec![])]
#[case::starts_at_query_end(iv(0, 10), vec![])]
#[case::one_base_each_side(iv(9, 21), vec![iv(10, 20)])]
#[case::empty_query(iv(15, 15), vec![])]
fn test_half_open_boundaries(#[case] query: Interval, #[case] expected: Vec<Interval>) {
    let (tree, _) = build_tree(3, &[iv(10, 20)]);
    assert_eq!(found(&tree, &query), expected);
}

#[test]
fn test_long_interval_found_from_far_right() {
    // One long interval at the far left must not be pruned by start ordering.
    let mut intervals = vec![iv(0, 1_000_000)];
    intervals.extend((1..500).map(|i| iv(i * 100, i * 100 + 10)));
    let (tree, _) = build_tree(4, &intervals);

    let query = iv(49_950, 49_960);
    assert_eq!(tree_hits(&tree, &query), brute_force(&intervals, &query));
    assert_eq!(tree_hits(&tree, &query), [(iv(0, 1_000_000), 0)]);
}

#[rstest]
fn test_matches_brute_force(#[values(2, 3, 5, 16)] order: usize) {
    let intervals: Vec<_> = (0..400u64)
        .map(|i| {
            let start = (i * 7919) % 1_000;
            iv(start, start + (i * 31) % 50)
        })
        .collect();
    let (tree, _) = build_tree(order, &intervals);

    let queries = [
        iv(0, 1),
        iv(100, 150),
        iv(990, 2_000),
        iv(0, 2_000),
        iv(500, 500),
    ];
    for query in queries {
        assert_eq!(
            tree_hits(&tree, &query),
            brute_force(&intervals, &query),
            "order {order}, query {query}"
        );
    }
}

#[test]
fn test_intersect_into_appends() {
    let (tree, _) = build_tree(3, &[iv(0, 10), iv(5, 15)]);
    let mut hits = Vec::new();
    tree.intersect_into(&iv(0, 1), &mut hits);
    tree.intersect_into(&iv(12, 13), &mut hits);
    let values: Vec<_> = hits.iter().map(|k| *k.value()).collect();
    assert_eq!(values, [iv(0, 10), iv(5, 15)]);
}

#[test]
fn test_queries_do_not_mutate() {
    let (tree, _) = build_tree(3, &[iv(1, 5), iv(3, 9), iv(8, 12)]);
    let first = tree_hits(&tree, &iv(4, 9));
    let second = tree_hits(&tree, &iv(4, 9));
    assert_eq!(first, second);
    tree.check_tree_invariants();
}
