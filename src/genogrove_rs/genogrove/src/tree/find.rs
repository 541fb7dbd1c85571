/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Read path: overlap queries.
//!
//! Intervals are sorted by start, but an interval starting far to the left of
//! the query can still reach into it. The search therefore cannot descend to
//! a single leaf; it walks the tree in order and uses the cached `max_end` of
//! each node to skip subtrees that end too early.

use super::IntervalTree;
use crate::arena::{EntryArena, NodeArena, NodeIndex};
use crate::{Interval, Key, TreeNode};

impl IntervalTree {
    /// Find every stored interval overlapping `query`.
    ///
    /// Keys come back in ascending interval order, equal intervals in
    /// insertion order, each exactly once. An empty query overlaps nothing.
    ///
    /// # Pruning
    ///
    /// - **Max end**: a subtree whose cached `max_end <= query.start()` holds
    ///   no interval reaching into the query and is skipped.
    /// - **Start cut-off**: once a separator (or a leaf entry) starts at or
    ///   after `query.end()`, everything to its right does too, and the walk
    ///   stops.
    ///
    /// For typical genomic data this visits `O(log N + k)` nodes for `k`
    /// matches. Very long intervals weaken the max-end pruning for the
    /// subtrees they sit in, bounding the worst case by the number of
    /// subtrees whose max end reaches into the query.
    pub fn intersect(&self, query: &Interval) -> Vec<&Key> {
        let mut hits = Vec::new();
        self.intersect_into(query, &mut hits);
        hits
    }

    /// Like [`Self::intersect`], appending the matches to `hits`.
    pub fn intersect_into<'a>(&'a self, query: &Interval, hits: &mut Vec<&'a Key>) {
        let Some(root) = self.root else {
            return;
        };
        if query.is_empty() {
            return;
        }

        #[cfg(all(feature = "unittest", not(miri)))]
        let hits_before = hits.len();

        Self::collect_overlaps(&self.nodes, &self.keys, root, query, hits);

        #[cfg(all(feature = "unittest", not(miri)))]
        self.check_intersect_invariants(query, &hits[hits_before..]);
    }

    /// In-order walk of the subtree at `node_idx`, collecting overlaps.
    fn collect_overlaps<'a>(
        nodes: &'a NodeArena,
        keys: &'a EntryArena,
        node_idx: NodeIndex,
        query: &Interval,
        hits: &mut Vec<&'a Key>,
    ) {
        let node = &nodes[node_idx];
        if node.max_end() <= query.start() {
            return;
        }

        match node {
            TreeNode::Internal(internal) => {
                for (pos, &child) in internal.children.iter().enumerate() {
                    // `children[pos]` only holds intervals >= `separators[pos - 1]`.
                    if pos > 0 && internal.separators[pos - 1].start() >= query.end() {
                        break;
                    }
                    Self::collect_overlaps(nodes, keys, child, query, hits);
                }
            }
            TreeNode::Leaf(leaf) => {
                for entry in &leaf.entries {
                    if entry.interval.start() >= query.end() {
                        break;
                    }
                    if entry.interval.overlaps(query) {
                        hits.push(&keys[entry.id]);
                    }
                }
            }
        }
    }
}
