/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! B+ tree of intervals.
//!
//! This module contains the core tree structure. The implementation is split
//! into sub-modules by concern:
//! - [`insert`]: Write path (ordered insert, sorted append, splitting)
//! - [`find`]: Read path (overlap queries)
//! - [`invariants`]: Structural self-checks

mod find;
mod insert;
mod invariants;

use crate::arena::{EntryArena, EntryId, NodeArena, NodeIndex};
use crate::{GroveError, IndexId, Key, KeysIter, Result, TreeNode};

/// Node counters, updated as the tree splits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TreeStats {
    /// Number of leaf nodes.
    pub num_leaves: usize,
    /// Number of internal nodes.
    pub num_internal: usize,
}

/// A B+ tree holding the intervals of one index.
///
/// # Layout
///
/// A tree of order `m` keeps at most `m - 1` keys per node. Leaves hold the
/// stored intervals in sorted order and are linked left to right. Internal
/// nodes hold separator intervals copied from the first entry of the leaf
/// that was split off, and route equal intervals to the right.
///
/// # Arena Storage
///
/// Nodes live in a [`NodeArena`] and keys in an [`EntryArena`]. Children and
/// entries are referenced by index, so a split only moves indices around and a
/// [`Key`] never changes address inside its arena. That is what makes the
/// [`KeyHandle`](crate::KeyHandle)s returned by inserts stable.
///
/// # Overlap Search
///
/// Every node caches the largest `end` in its subtree. Queries skip subtrees
/// whose cached end is at or before the query start, and stop as soon as
/// stored starts reach the query end. See [`IntervalTree::intersect`].
#[derive(Debug)]
pub struct IntervalTree {
    /// The grove index this tree belongs to, stamped into every key handle.
    index: IndexId,
    /// Maximum branching factor.
    order: usize,
    /// `None` until the first insert.
    root: Option<NodeIndex>,
    nodes: NodeArena,
    keys: EntryArena,
    /// Leftmost leaf, where ordered scans start.
    first_leaf: Option<NodeIndex>,
    /// Rightmost leaf, where sorted appends land.
    last_leaf: Option<NodeIndex>,
    /// Number of levels; `0` for an empty tree, `1` when the root is a leaf.
    height: usize,
    /// Path from the root to `last_leaf`, cached for sorted appends.
    ///
    /// Cleared by any split and rebuilt lazily by the next append.
    right_spine: Option<Vec<NodeIndex>>,
    stats: TreeStats,
}

impl IntervalTree {
    /// Smallest accepted order.
    pub const MINIMUM_ORDER: usize = 2;

    /// Order used by [`Default`].
    pub const DEFAULT_ORDER: usize = 3;

    /// Create an empty tree of the given order.
    ///
    /// Returns [`GroveError::InvalidOrder`] if `order` is below
    /// [`Self::MINIMUM_ORDER`].
    pub fn new(order: usize) -> Result<Self> {
        Self::with_index(IndexId::default(), order)
    }

    /// Create an empty tree whose key handles carry `index`.
    pub(crate) fn with_index(index: IndexId, order: usize) -> Result<Self> {
        if order < Self::MINIMUM_ORDER {
            return Err(GroveError::InvalidOrder {
                order,
                minimum: Self::MINIMUM_ORDER,
            });
        }
        Ok(Self {
            index,
            order,
            root: None,
            nodes: NodeArena::new(),
            keys: EntryArena::new(),
            first_leaf: None,
            last_leaf: None,
            height: 0,
            right_spine: None,
            stats: TreeStats::default(),
        })
    }

    /// The grove index this tree belongs to.
    pub const fn index_id(&self) -> IndexId {
        self.index
    }

    /// Maximum branching factor.
    pub const fn order(&self) -> usize {
        self.order
    }

    /// Maximum number of keys in a node.
    pub const fn max_keys(&self) -> usize {
        self.order - 1
    }

    /// Number of stored intervals.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing was inserted yet.
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels, `0` for an empty tree.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of leaf nodes.
    pub const fn num_leaves(&self) -> usize {
        self.stats.num_leaves
    }

    /// Number of nodes, leaves and internal nodes alike.
    pub const fn num_nodes(&self) -> usize {
        self.stats.num_leaves + self.stats.num_internal
    }

    /// The root node index, if the tree is not empty.
    pub const fn root_index(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Resolve a [`NodeIndex`] to the node.
    pub fn node(&self, idx: NodeIndex) -> &TreeNode {
        &self.nodes[idx]
    }

    /// Resolve an [`EntryId`] to its key.
    pub fn get(&self, id: EntryId) -> Option<&Key> {
        self.keys.get(id)
    }

    /// The smallest stored interval's key.
    pub fn first(&self) -> Option<&Key> {
        let TreeNode::Leaf(leaf) = &self.nodes[self.first_leaf?] else {
            unreachable!("first_leaf always points at a leaf")
        };
        leaf.entries.first().map(|entry| &self.keys[entry.id])
    }

    /// The largest stored interval's key.
    pub fn last(&self) -> Option<&Key> {
        let TreeNode::Leaf(leaf) = &self.nodes[self.last_leaf?] else {
            unreachable!("last_leaf always points at a leaf")
        };
        leaf.entries.last().map(|entry| &self.keys[entry.id])
    }

    /// All keys in ascending interval order, following the leaf chain.
    pub fn iter(&self) -> KeysIter<'_> {
        KeysIter::new(&self.nodes, &self.keys, self.first_leaf)
    }

    /// Approximate memory used by the tree, in bytes.
    pub fn mem_usage(&self) -> usize {
        let spine_capacity = self.right_spine.as_ref().map_or(0, Vec::capacity);
        std::mem::size_of::<Self>()
            + self.nodes.mem_usage()
            + self.keys.mem_usage()
            + spine_capacity * std::mem::size_of::<NodeIndex>()
    }
}

impl Default for IntervalTree {
    fn default() -> Self {
        Self {
            index: IndexId::default(),
            order: Self::DEFAULT_ORDER,
            root: None,
            nodes: NodeArena::new(),
            keys: EntryArena::new(),
            first_leaf: None,
            last_leaf: None,
            height: 0,
            right_spine: None,
            stats: TreeStats::default(),
        }
    }
}

impl<'a> IntoIterator for &'a IntervalTree {
    type Item = &'a Key;
    type IntoIter = KeysIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
