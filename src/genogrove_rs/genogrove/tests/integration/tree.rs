/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for IntervalTree structure: inserts, splits and iteration.

use genogrove::{GroveError, Interval, IntervalTree, TreeNode};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::helpers::{build_tree, iv};

#[test]
fn test_new_tree() {
    let tree = IntervalTree::new(3).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.num_nodes(), 0);
    assert!(tree.first().is_none());
    assert_eq!(tree.iter().count(), 0);
    tree.check_tree_invariants();
}

#[rstest]
#[case(0)]
#[case(1)]
fn test_order_below_two_is_rejected(#[case] order: usize) {
    assert_eq!(
        IntervalTree::new(order).unwrap_err(),
        GroveError::InvalidOrder { order, minimum: 2 }
    );
}

#[test]
fn test_order_three_leaf_split() {
    let (tree, _) = build_tree(3, &[iv(10, 20), iv(30, 40)]);
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.num_leaves(), 1);

    let (tree, _) = build_tree(3, &[iv(10, 20), iv(30, 40), iv(15, 25)]);
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.num_leaves(), 2);
    assert_eq!(tree.num_nodes(), 3);

    let root = tree.node(tree.root_index().unwrap());
    let TreeNode::Internal(root) = root else {
        panic!("a split root must be internal");
    };
    assert_eq!(root.separators, [iv(30, 40)]);
    assert_eq!(root.max_end, 40);
}

#[rstest]
fn test_height_grows_logarithmically(#[values(2, 3, 4, 8, 32)] order: usize) {
    let intervals: Vec<_> = (0..500).map(|i| iv(i * 10, i * 10 + 5)).collect();
    let (tree, _) = build_tree(order, &intervals);
    tree.check_tree_invariants();

    // Leaves hold at least half of max_keys after sorted-order splits.
    let min_fill = (order - 1).div_ceil(2).max(1);
    let max_height = 1 + (500f64.ln() / (min_fill as f64 + 1.0).ln()).ceil() as usize;
    assert!(
        tree.height() <= max_height.max(2) * 2,
        "order {order}: height {} too large",
        tree.height()
    );
}

#[test]
fn test_iteration_is_sorted_with_stable_ties() {
    let intervals = [iv(5, 9), iv(1, 4), iv(5, 9), iv(0, 100), iv(5, 9), iv(2, 3)];
    let (tree, handles) = build_tree(3, &intervals);

    let order: Vec<_> = tree.iter().map(|key| key.handle()).collect();
    let expected: Vec<_> = [3, 1, 5, 0, 2, 4].iter().map(|&i| handles[i]).collect();
    assert_eq!(order, expected);
    assert_eq!(tree.first().unwrap().value(), &iv(0, 100));
    assert_eq!(tree.last().unwrap().handle(), handles[4]);
}

#[test]
fn test_handles_stay_valid_across_splits() {
    let intervals: Vec<_> = (0..200).rev().map(|i| iv(i, i + 3)).collect();
    let (tree, handles) = build_tree(4, &intervals);
    for (interval, handle) in intervals.iter().zip(&handles) {
        let key = tree.get(handle.entry()).unwrap();
        assert_eq!(key.value(), interval);
        assert_eq!(key.handle(), *handle);
    }
}

#[test]
fn test_insert_sorted_builds_same_contents() {
    let intervals: Vec<_> = (0..300).map(|i| iv(i * 3, i * 3 + 7)).collect();
    let (inserted, _) = build_tree(5, &intervals);

    let mut appended = IntervalTree::new(5).unwrap();
    for &interval in &intervals {
        appended.insert_sorted(interval).unwrap();
    }
    appended.check_tree_invariants();

    let a: Vec<_> = inserted.iter().map(|key| *key.value()).collect();
    let b: Vec<_> = appended.iter().map(|key| *key.value()).collect();
    assert_eq!(a, b);
    let query = iv(100, 200);
    assert_eq!(appended.intersect(&query), inserted.intersect(&query));
}

#[rstest]
#[case::smaller(iv(5, 10))]
#[case::equal(iv(10, 20))]
#[case::same_start_shorter(iv(10, 15))]
fn test_insert_sorted_rejects_non_increasing(#[case] interval: Interval) {
    let mut tree = IntervalTree::new(3).unwrap();
    tree.insert_sorted(iv(1, 2)).unwrap();
    tree.insert_sorted(iv(10, 20)).unwrap();

    assert_eq!(
        tree.insert_sorted(interval),
        Err(GroveError::UnsortedInsert {
            interval,
            maximum: iv(10, 20),
        })
    );
    assert_eq!(tree.len(), 2);
    tree.check_tree_invariants();
}

#[test]
fn test_insert_sorted_after_unsorted_inserts() {
    let mut tree = IntervalTree::new(3).unwrap();
    for i in [50, 10, 30, 20, 40] {
        tree.insert(iv(i, i + 5));
    }
    for i in 6..40 {
        tree.insert_sorted(iv(i * 10, i * 10 + 5)).unwrap();
    }
    tree.insert(iv(25, 26));
    tree.insert_sorted(iv(1_000, 1_001)).unwrap();
    tree.check_tree_invariants();
    assert_eq!(tree.len(), 41);
}

#[test]
fn test_insert_sorted_or_insert_falls_back() {
    let mut tree = IntervalTree::new(3).unwrap();
    for i in [1, 2, 3, 0, 4, 2] {
        tree.insert_sorted_or_insert(iv(i, i + 1));
    }
    let values: Vec<_> = tree.iter().map(|key| key.value().start()).collect();
    assert_eq!(values, [0, 1, 2, 2, 3, 4]);
}

#[test]
fn test_mem_usage_grows() {
    let mut tree = IntervalTree::new(4).unwrap();
    let empty = tree.mem_usage();
    for i in 0..100 {
        tree.insert(iv(i, i + 1));
    }
    assert!(tree.mem_usage() > empty);
}
