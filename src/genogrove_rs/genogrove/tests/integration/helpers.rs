/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Shared helpers for the integration tests.

use genogrove::{Interval, IntervalTree, Key, KeyHandle};

/// Shorthand for a valid interval.
pub fn iv(start: u64, end: u64) -> Interval {
    Interval::new(start, end).expect("test intervals are valid")
}

/// Build a tree by inserting `intervals` in the given order.
pub fn build_tree(order: usize, intervals: &[Interval]) -> (IntervalTree, Vec<KeyHandle>) {
    let mut tree = IntervalTree::new(order).expect("test orders are valid");
    let handles = intervals.iter().map(|&i| tree.insert(i)).collect();
    (tree, handles)
}

/// Overlaps found by a linear scan, in the order a tree reports them:
/// ascending interval order, ties in insertion order.
pub fn brute_force(intervals: &[Interval], query: &Interval) -> Vec<(Interval, usize)> {
    let mut hits: Vec<_> = intervals
        .iter()
        .enumerate()
        .filter(|(_, i)| i.overlaps(query))
        .map(|(pos, &i)| (i, pos))
        .collect();
    hits.sort();
    hits
}

/// The insertion position of a key within its tree.
pub fn position(key: &Key) -> usize {
    key.handle().entry().position() as usize
}

/// The `(interval, insertion position)` pairs of a tree query.
pub fn tree_hits(tree: &IntervalTree, query: &Interval) -> Vec<(Interval, usize)> {
    tree.intersect(query)
        .into_iter()
        .map(|key| (*key.value(), position(key)))
        .collect()
}

/// The intervals a tree query reports, in order.
pub fn found(tree: &IntervalTree, query: &Interval) -> Vec<Interval> {
    tree.intersect(query).iter().map(|k| *k.value()).collect()
}
