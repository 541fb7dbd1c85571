/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Write path: ordered insertion, sorted appends and splitting.
//!
//! Both insert flavours put the new entry into a leaf and then hand the path
//! from the root to that leaf to [`IntervalTree::split_upwards`], which splits
//! overflowing nodes bottom-up and grows a new root when the old one splits.

use tracing::{debug, trace};

use super::IntervalTree;
use crate::arena::NodeIndex;
use crate::node::{InternalNode, LeafEntry, LeafNode};
use crate::{GroveError, Interval, Key, KeyHandle, Result, TreeNode};

impl IntervalTree {
    /// Insert an interval at its sorted position.
    ///
    /// Descends from the root choosing children by separator (binary search
    /// per node), inserts after any equal intervals in the target leaf and
    /// splits on the way back up. Costs `O(log_m N)` node visits.
    pub fn insert(&mut self, interval: Interval) -> KeyHandle {
        #[cfg(all(feature = "unittest", not(miri)))]
        let len_before = self.len();

        let handle = self.insert_unchecked_order(interval);

        #[cfg(all(feature = "unittest", not(miri)))]
        {
            assert_eq!(self.len(), len_before + 1, "insert adds exactly one key");
            self.check_tree_invariants();
        }
        handle
    }

    /// Append an interval that is strictly greater than every stored one.
    ///
    /// The tree is not searched: the entry goes straight to the rightmost
    /// leaf through the cached right spine, and only the spine's cached
    /// `max_end` values are refreshed. A bulk load of sorted records costs
    /// `O(1)` amortized comparisons per interval.
    ///
    /// The precondition is checked against the current maximum in `O(1)`.
    /// When it does not hold, [`GroveError::UnsortedInsert`] is returned and
    /// the tree is left untouched.
    pub fn insert_sorted(&mut self, interval: Interval) -> Result<KeyHandle> {
        if let Some(maximum) = self.last().map(Key::value) {
            if interval <= *maximum {
                debug!(
                    index = self.index.position(),
                    %interval,
                    %maximum,
                    "rejecting out-of-order sorted insert"
                );
                return Err(GroveError::UnsortedInsert {
                    interval,
                    maximum: *maximum,
                });
            }
        }

        #[cfg(all(feature = "unittest", not(miri)))]
        let len_before = self.len();

        let handle = self.append(interval);

        #[cfg(all(feature = "unittest", not(miri)))]
        {
            assert_eq!(self.len(), len_before + 1, "append adds exactly one key");
            self.check_tree_invariants();
        }
        Ok(handle)
    }

    /// Append if the interval sorts after everything stored, otherwise fall
    /// back to [`Self::insert`].
    ///
    /// Suited to input that is sorted most of the time, such as concatenated
    /// sorted files.
    pub fn insert_sorted_or_insert(&mut self, interval: Interval) -> KeyHandle {
        match self.insert_sorted(interval) {
            Ok(handle) => handle,
            Err(_) => self.insert(interval),
        }
    }

    /// Store a new key in the entry arena and build its leaf entry.
    fn allocate_key(&mut self, interval: Interval) -> (KeyHandle, LeafEntry) {
        let id = self.keys.next_id();
        let handle = KeyHandle::new(self.index, id);
        self.keys.insert(Key::new(interval, handle));
        (handle, LeafEntry { interval, id })
    }

    /// Make a single leaf holding `entry` the root of an empty tree.
    fn plant_root(&mut self, entry: LeafEntry) {
        debug_assert!(self.root.is_none());

        let mut leaf = LeafNode::with_capacity(self.order);
        leaf.push(entry);
        let leaf_idx = self.nodes.insert(TreeNode::Leaf(leaf));

        self.root = Some(leaf_idx);
        self.first_leaf = Some(leaf_idx);
        self.last_leaf = Some(leaf_idx);
        self.height = 1;
        self.right_spine = Some(vec![leaf_idx]);
        self.stats.num_leaves = 1;
    }

    fn insert_unchecked_order(&mut self, interval: Interval) -> KeyHandle {
        let (handle, entry) = self.allocate_key(interval);
        let Some(root) = self.root else {
            self.plant_root(entry);
            return handle;
        };

        let mut ancestors = Vec::with_capacity(self.height);
        let mut node_idx = root;
        loop {
            let node = &mut self.nodes[node_idx];
            node.raise_max_end(interval.end());
            match node {
                TreeNode::Internal(internal) => {
                    ancestors.push(node_idx);
                    node_idx = internal.children[internal.child_position(&interval)];
                }
                TreeNode::Leaf(leaf) => {
                    leaf.insert(entry);
                    break;
                }
            }
        }

        self.split_upwards(node_idx, &ancestors);
        handle
    }

    fn append(&mut self, interval: Interval) -> KeyHandle {
        let (handle, entry) = self.allocate_key(interval);
        if self.root.is_none() {
            self.plant_root(entry);
            return handle;
        }

        let spine = match self.right_spine.take() {
            Some(spine) => spine,
            None => self.collect_right_spine(),
        };
        let (&leaf_idx, ancestors) = spine
            .split_last()
            .expect("a non-empty tree has a non-empty right spine");

        for &idx in ancestors {
            self.nodes[idx].raise_max_end(interval.end());
        }
        let TreeNode::Leaf(leaf) = &mut self.nodes[leaf_idx] else {
            unreachable!("the right spine ends at a leaf")
        };
        leaf.push(entry);

        if !self.split_upwards(leaf_idx, ancestors) {
            self.right_spine = Some(spine);
        }
        handle
    }

    /// Walk the rightmost children from the root down to the last leaf.
    pub(super) fn collect_right_spine(&self) -> Vec<NodeIndex> {
        let mut spine = Vec::with_capacity(self.height);
        let mut next = self.root;
        while let Some(idx) = next {
            spine.push(idx);
            next = self.nodes[idx].children().last().copied();
        }
        debug_assert_eq!(spine.last().copied(), self.last_leaf);
        spine
    }

    /// Split `leaf_idx` if it overflows and cascade into its `ancestors`.
    ///
    /// `ancestors` is the root-to-parent path leading to the leaf. Returns
    /// whether any node split.
    fn split_upwards(&mut self, leaf_idx: NodeIndex, ancestors: &[NodeIndex]) -> bool {
        let Some(mut promoted) = self.split_leaf_if_full(leaf_idx) else {
            return false;
        };
        self.right_spine = None;

        let mut child = leaf_idx;
        for &parent_idx in ancestors.iter().rev() {
            let TreeNode::Internal(parent) = &mut self.nodes[parent_idx] else {
                unreachable!("ancestors are internal nodes")
            };
            let pos = parent
                .children
                .iter()
                .position(|&idx| idx == child)
                .expect("the split node is a child of its parent");
            let (separator, right_idx) = promoted;
            parent.separators.insert(pos, separator);
            parent.children.insert(pos + 1, right_idx);

            match self.split_internal_if_full(parent_idx) {
                Some(next) => {
                    promoted = next;
                    child = parent_idx;
                }
                None => return true,
            }
        }

        self.grow_root(promoted);
        true
    }

    /// Split an overflowing leaf, returning the separator and the new right leaf.
    ///
    /// The left half keeps the larger share so that sorted appends leave
    /// leaves as full as possible.
    fn split_leaf_if_full(&mut self, leaf_idx: NodeIndex) -> Option<(Interval, NodeIndex)> {
        let max_keys = self.max_keys();
        let order = self.order;
        let TreeNode::Leaf(leaf) = &mut self.nodes[leaf_idx] else {
            unreachable!("split_leaf_if_full called on an internal node")
        };
        if leaf.entries.len() <= max_keys {
            return None;
        }

        let mid = leaf.entries.len().div_ceil(2);
        let mut entries = Vec::with_capacity(order);
        entries.extend(leaf.entries.drain(mid..));
        leaf.recompute_max_end();

        let separator = entries[0].interval;
        let mut right = LeafNode {
            entries,
            next: leaf.next,
            max_end: 0,
        };
        right.recompute_max_end();

        let right_idx = self.nodes.insert(TreeNode::Leaf(right));
        if let TreeNode::Leaf(leaf) = &mut self.nodes[leaf_idx] {
            leaf.next = Some(right_idx);
        }
        if self.last_leaf == Some(leaf_idx) {
            self.last_leaf = Some(right_idx);
        }
        self.stats.num_leaves += 1;

        trace!(
            index = self.index.position(),
            left = leaf_idx.position(),
            right = right_idx.position(),
            %separator,
            "split leaf"
        );
        Some((separator, right_idx))
    }

    /// Split an overflowing internal node around its median separator.
    fn split_internal_if_full(&mut self, node_idx: NodeIndex) -> Option<(Interval, NodeIndex)> {
        let max_keys = self.max_keys();
        let order = self.order;
        let TreeNode::Internal(internal) = &mut self.nodes[node_idx] else {
            unreachable!("split_internal_if_full called on a leaf")
        };
        if internal.separators.len() <= max_keys {
            return None;
        }

        let mid = internal.separators.len() / 2;
        let mut separators = Vec::with_capacity(order);
        separators.extend(internal.separators.drain(mid + 1..));
        let promoted = internal
            .separators
            .pop()
            .expect("an overflowing node has a median separator");
        let mut children = Vec::with_capacity(order + 1);
        children.extend(internal.children.drain(mid + 1..));

        let left_max_end = self.max_end_of(self.nodes[node_idx].children());
        if let TreeNode::Internal(internal) = &mut self.nodes[node_idx] {
            internal.max_end = left_max_end;
        }

        let right = InternalNode {
            max_end: self.max_end_of(&children),
            separators,
            children,
        };
        let right_idx = self.nodes.insert(TreeNode::Internal(right));
        self.stats.num_internal += 1;

        trace!(
            index = self.index.position(),
            left = node_idx.position(),
            right = right_idx.position(),
            separator = %promoted,
            "split internal node"
        );
        Some((promoted, right_idx))
    }

    /// Put a new root above the old root and the node split off from it.
    fn grow_root(&mut self, (separator, right_idx): (Interval, NodeIndex)) {
        let old_root = self.root.expect("only a non-empty tree can split");
        let max_end = self.max_end_of(&[old_root, right_idx]);
        let root = InternalNode {
            separators: vec![separator],
            children: vec![old_root, right_idx],
            max_end,
        };
        let root_idx = self.nodes.insert(TreeNode::Internal(root));
        self.root = Some(root_idx);
        self.height += 1;
        self.stats.num_internal += 1;

        trace!(
            index = self.index.position(),
            root = root_idx.position(),
            height = self.height,
            "grew new root"
        );
    }

    fn max_end_of(&self, children: &[NodeIndex]) -> u64 {
        children
            .iter()
            .map(|&idx| self.nodes[idx].max_end())
            .max()
            .unwrap_or(0)
    }
}
