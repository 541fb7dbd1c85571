/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Invariant checks for the interval tree.
//!
//! With the `unittest` feature these run after every mutation (`insert`,
//! `insert_sorted`) and every query to catch structural violations early.
//! Tests may also call [`IntervalTree::check_tree_invariants`] directly.

use super::{IntervalTree, TreeStats};
use crate::arena::NodeIndex;
use crate::{Interval, Key, TreeNode};

/// What a subtree check learned about the subtree.
struct SubtreeSummary {
    /// Smallest interval stored below.
    min: Interval,
    /// Largest interval stored below.
    max: Interval,
    /// Largest end stored below.
    max_end: u64,
}

impl IntervalTree {
    /// Verify all structural invariants of the tree.
    ///
    /// Panics with a descriptive message if any invariant is violated.
    pub fn check_tree_invariants(&self) {
        let Some(root) = self.root else {
            assert_eq!(self.len(), 0, "an empty tree must not own keys");
            assert_eq!(self.height, 0, "an empty tree has height 0");
            assert!(self.first_leaf.is_none() && self.last_leaf.is_none());
            assert_eq!(self.stats, TreeStats::default());
            return;
        };

        let mut leaves = Vec::with_capacity(self.stats.num_leaves);
        let mut stats = TreeStats::default();
        self.check_node_invariants(root, 1, true, &mut leaves, &mut stats);

        assert_eq!(
            self.stats, stats,
            "memoized node counts {:?} differ from the computed {:?}",
            self.stats, stats,
        );
        assert_eq!(
            stats.num_leaves + stats.num_internal,
            self.nodes.len(),
            "every allocated node must be reachable from the root",
        );

        self.check_leaf_chain(&leaves);
        self.check_keys();

        if let Some(spine) = &self.right_spine {
            assert_eq!(
                *spine,
                self.collect_right_spine(),
                "cached right spine is stale",
            );
        }
    }

    /// Recursively check the subtree rooted at `node_idx`.
    ///
    /// Collects the leaves in left-to-right order into `leaves`.
    fn check_node_invariants(
        &self,
        node_idx: NodeIndex,
        depth: usize,
        is_root: bool,
        leaves: &mut Vec<NodeIndex>,
        stats: &mut TreeStats,
    ) -> SubtreeSummary {
        let node = self.node(node_idx);
        assert!(
            node.num_keys() <= self.max_keys(),
            "node {node_idx:?} holds {} keys, more than the {} allowed by order {}",
            node.num_keys(),
            self.max_keys(),
            self.order,
        );

        match node {
            TreeNode::Leaf(leaf) => {
                stats.num_leaves += 1;
                leaves.push(node_idx);
                assert_eq!(
                    depth, self.height,
                    "leaf {node_idx:?} sits at depth {depth}, tree height is {}",
                    self.height,
                );
                assert!(!leaf.entries.is_empty(), "leaf {node_idx:?} is empty");

                for window in leaf.entries.windows(2) {
                    assert!(
                        window[0].interval <= window[1].interval,
                        "leaf {node_idx:?} is unsorted: {} before {}",
                        window[0].interval,
                        window[1].interval,
                    );
                }

                let max_end = leaf
                    .entries
                    .iter()
                    .map(|entry| entry.interval.end())
                    .max()
                    .unwrap_or(0);
                assert_eq!(
                    leaf.max_end, max_end,
                    "leaf {node_idx:?} caches max_end {}, entries end at {max_end}",
                    leaf.max_end,
                );

                SubtreeSummary {
                    min: leaf.entries[0].interval,
                    max: leaf.entries[leaf.entries.len() - 1].interval,
                    max_end,
                }
            }
            TreeNode::Internal(internal) => {
                stats.num_internal += 1;
                assert_eq!(
                    internal.children.len(),
                    internal.separators.len() + 1,
                    "internal node {node_idx:?} must have one more child than separators",
                );
                if is_root {
                    assert!(
                        internal.children.len() >= 2,
                        "an internal root needs at least two children",
                    );
                }
                for window in internal.separators.windows(2) {
                    assert!(
                        window[0] <= window[1],
                        "separators of {node_idx:?} are unsorted: {} before {}",
                        window[0],
                        window[1],
                    );
                }

                let mut summary: Option<SubtreeSummary> = None;
                for (pos, &child) in internal.children.iter().enumerate() {
                    let child_summary =
                        self.check_node_invariants(child, depth + 1, false, leaves, stats);

                    // Equal intervals may straddle a split, so the upper bound is inclusive.
                    if pos > 0 {
                        let lower = internal.separators[pos - 1];
                        assert!(
                            child_summary.min >= lower,
                            "child {child:?} holds {} below its separator {lower}",
                            child_summary.min,
                        );
                    }
                    if let Some(upper) = internal.separators.get(pos) {
                        assert!(
                            child_summary.max <= *upper,
                            "child {child:?} holds {} above its separator {upper}",
                            child_summary.max,
                        );
                    }

                    summary = Some(match summary {
                        None => child_summary,
                        Some(acc) => SubtreeSummary {
                            min: acc.min,
                            max: child_summary.max,
                            max_end: acc.max_end.max(child_summary.max_end),
                        },
                    });
                }

                let summary = summary.expect("internal nodes have at least one child");
                assert_eq!(
                    internal.max_end, summary.max_end,
                    "internal node {node_idx:?} caches max_end {}, subtree ends at {}",
                    internal.max_end, summary.max_end,
                );
                summary
            }
        }
    }

    /// The leaf chain must visit exactly the in-order leaves.
    fn check_leaf_chain(&self, leaves: &[NodeIndex]) {
        assert_eq!(
            self.first_leaf,
            leaves.first().copied(),
            "first_leaf is wrong"
        );
        assert_eq!(
            self.last_leaf,
            leaves.last().copied(),
            "last_leaf is wrong"
        );

        let mut chained = Vec::with_capacity(leaves.len());
        let mut next = self.first_leaf;
        while let Some(idx) = next {
            chained.push(idx);
            let TreeNode::Leaf(leaf) = self.node(idx) else {
                panic!("leaf chain reaches internal node {idx:?}");
            };
            assert!(
                chained.len() <= leaves.len(),
                "leaf chain is longer than the number of leaves",
            );
            next = leaf.next;
        }
        assert_eq!(chained, leaves, "leaf chain disagrees with the tree order");
    }

    /// Every key is stored in exactly one leaf entry, under its own id.
    fn check_keys(&self) {
        let mut seen = vec![false; self.len()];
        let mut previous: Option<&Key> = None;
        for key in self.iter() {
            let position = key.handle().entry().position() as usize;
            assert!(!seen[position], "key {key} appears twice in the leaves");
            seen[position] = true;
            assert_eq!(
                key.handle().index(),
                self.index,
                "key {key} has a foreign index id"
            );
            if let Some(previous) = previous {
                assert!(previous.value() <= key.value(), "leaf chain is unsorted");
            }
            previous = Some(key);
        }
        assert!(
            seen.iter().all(|&found| found),
            "some keys are not reachable from the leaves",
        );
        for (position, key) in self.keys.iter().enumerate() {
            assert_eq!(
                key.handle().entry().position() as usize,
                position,
                "key {key} is stored under the wrong id",
            );
        }
    }

    /// Verify the keys returned by an intersect call.
    ///
    /// Every key must overlap the query and the keys must be in ascending
    /// interval order.
    #[cfg_attr(
        not(all(feature = "unittest", not(miri))),
        expect(dead_code, reason = "called after each query under unittest")
    )]
    pub(crate) fn check_intersect_invariants(&self, query: &Interval, hits: &[&Key]) {
        for key in hits {
            assert!(
                key.value().overlaps(query),
                "intersect returned {key}, which does not overlap {query}",
            );
        }
        for window in hits.windows(2) {
            assert!(
                window[0].value() <= window[1].value(),
                "intersect results out of order: {} before {}",
                window[0],
                window[1],
            );
        }
    }
}
