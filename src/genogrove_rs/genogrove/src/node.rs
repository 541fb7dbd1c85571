/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tree nodes: leaves holding entries and internal nodes routing by separator.
//!
//! Every node caches `max_end`, the largest `end` coordinate of any interval
//! stored in its subtree. The overlap search relies on it to skip subtrees
//! that finish before the query starts.

use crate::Interval;
use crate::arena::{EntryId, NodeIndex};

/// A stored interval and the arena slot of its [`Key`](crate::Key).
///
/// The interval is kept inline so leaf scans never touch the entry arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafEntry {
    /// The stored interval.
    pub interval: Interval,
    /// Where the owning key lives.
    pub id: EntryId,
}

/// A node in an interval tree.
#[derive(Debug)]
pub enum TreeNode {
    /// A leaf with sorted entries.
    Leaf(LeafNode),
    /// An internal node with separators and children.
    Internal(InternalNode),
}

/// A leaf node.
///
/// Leaves are chained left to right through `next`, so a scan can walk every
/// entry in order without going back up the tree.
#[derive(Debug, Default)]
pub struct LeafNode {
    /// Entries sorted by interval; equal intervals keep insertion order.
    pub entries: Vec<LeafEntry>,
    /// The leaf to the right, if any.
    pub next: Option<NodeIndex>,
    /// Largest `end` among `entries`.
    pub max_end: u64,
}

/// An internal node.
///
/// `children[i]` holds intervals `>= separators[i - 1]` and
/// `<= separators[i]`; equal intervals may straddle a split. There is always
/// one more child than separators.
#[derive(Debug)]
pub struct InternalNode {
    /// Routing keys, sorted.
    pub separators: Vec<Interval>,
    /// Child nodes, one more than `separators`.
    pub children: Vec<NodeIndex>,
    /// Largest `end` in the subtree.
    pub max_end: u64,
}

impl TreeNode {
    /// Whether this is a leaf.
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Number of keys: entries for a leaf, separators for an internal node.
    pub fn num_keys(&self) -> usize {
        match self {
            Self::Leaf(leaf) => leaf.entries.len(),
            Self::Internal(internal) => internal.separators.len(),
        }
    }

    /// The cached largest `end` in the subtree.
    pub const fn max_end(&self) -> u64 {
        match self {
            Self::Leaf(leaf) => leaf.max_end,
            Self::Internal(internal) => internal.max_end,
        }
    }

    /// Raise the cached `max_end` to at least `end`.
    pub(crate) fn raise_max_end(&mut self, end: u64) {
        let max_end = match self {
            Self::Leaf(leaf) => &mut leaf.max_end,
            Self::Internal(internal) => &mut internal.max_end,
        };
        *max_end = (*max_end).max(end);
    }

    /// Children of an internal node; empty for a leaf.
    pub fn children(&self) -> &[NodeIndex] {
        match self {
            Self::Leaf(_) => &[],
            Self::Internal(internal) => &internal.children,
        }
    }

    /// Bytes owned on the heap by this node.
    pub(crate) fn heap_size(&self) -> usize {
        match self {
            Self::Leaf(leaf) => leaf.entries.capacity() * std::mem::size_of::<LeafEntry>(),
            Self::Internal(internal) => {
                internal.separators.capacity() * std::mem::size_of::<Interval>()
                    + internal.children.capacity() * std::mem::size_of::<NodeIndex>()
            }
        }
    }
}

impl LeafNode {
    /// Create an empty leaf able to hold `capacity` entries before splitting.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            next: None,
            max_end: 0,
        }
    }

    /// Position after every entry `<= interval`.
    pub fn upper_bound(&self, interval: &Interval) -> usize {
        self.entries.partition_point(|e| e.interval <= *interval)
    }

    /// Insert `entry` after any equal intervals.
    pub(crate) fn insert(&mut self, entry: LeafEntry) {
        let pos = self.upper_bound(&entry.interval);
        self.entries.insert(pos, entry);
        self.max_end = self.max_end.max(entry.interval.end());
    }

    /// Append `entry`, which the caller guarantees sorts after every entry.
    pub(crate) fn push(&mut self, entry: LeafEntry) {
        debug_assert!(
            self.entries
                .last()
                .is_none_or(|last| last.interval < entry.interval)
        );
        self.entries.push(entry);
        self.max_end = self.max_end.max(entry.interval.end());
    }

    /// Recompute `max_end` from the entries.
    pub(crate) fn recompute_max_end(&mut self) {
        self.max_end = self
            .entries
            .iter()
            .map(|entry| entry.interval.end())
            .max()
            .unwrap_or(0);
    }
}

impl InternalNode {
    /// Index of the child a search for `interval` descends into.
    ///
    /// Intervals equal to a separator route right, which keeps equal
    /// intervals in insertion order across leaves.
    pub fn child_position(&self, interval: &Interval) -> usize {
        self.separators.partition_point(|sep| sep <= interval)
    }
}
