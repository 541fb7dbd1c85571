/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Arena storage for interval tree nodes and keys.
//!
//! Nodes and keys live in two append-only vectors and refer to each other by
//! 32-bit indices. Splits move indices between nodes, never the values they
//! point at, so an [`EntryId`] handed out by an insert stays valid for as long
//! as the tree exists.

use std::ops::{Index, IndexMut};

use crate::{Key, TreeNode};

/// Index of a node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeIndex(u32);

impl NodeIndex {
    /// The raw position in the arena.
    pub const fn position(self) -> u32 {
        self.0
    }
}

/// Index of a [`Key`] in an [`EntryArena`].
///
/// Entry ids are dense and follow insertion order: the n-th key inserted into
/// a tree gets id `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EntryId(u32);

impl EntryId {
    /// Build an entry id from its raw position.
    pub const fn from_position(position: u32) -> Self {
        Self(position)
    }

    /// The raw position in the arena.
    pub const fn position(self) -> u32 {
        self.0
    }
}

/// Convert a vector length into a 32-bit arena position.
///
/// # Panics
///
/// Panics if the arena already holds `u32::MAX` items.
fn next_position(len: usize) -> u32 {
    u32::try_from(len).expect("arena holds at most u32::MAX items")
}

/// Arena storage for [`TreeNode`]s.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<TreeNode>,
}

impl NodeArena {
    pub(crate) const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of nodes ever allocated.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Store a node, returning its index.
    pub(crate) fn insert(&mut self, node: TreeNode) -> NodeIndex {
        let idx = NodeIndex(next_position(self.nodes.len()));
        self.nodes.push(node);
        idx
    }

    /// Memory held by the arena, in bytes.
    pub(crate) fn mem_usage(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<TreeNode>()
            + self.nodes.iter().map(TreeNode::heap_size).sum::<usize>()
    }
}

impl Index<NodeIndex> for NodeArena {
    type Output = TreeNode;

    fn index(&self, idx: NodeIndex) -> &Self::Output {
        &self.nodes[idx.0 as usize]
    }
}

impl IndexMut<NodeIndex> for NodeArena {
    fn index_mut(&mut self, idx: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[idx.0 as usize]
    }
}

/// Arena storage for the [`Key`]s of one tree.
#[derive(Debug, Default)]
pub(crate) struct EntryArena {
    keys: Vec<Key>,
}

impl EntryArena {
    pub(crate) const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// The id the next inserted key will receive.
    pub(crate) fn next_id(&self) -> EntryId {
        EntryId(next_position(self.keys.len()))
    }

    /// Store a key. Its handle must already carry [`Self::next_id`].
    pub(crate) fn insert(&mut self, key: Key) -> EntryId {
        let id = self.next_id();
        debug_assert_eq!(key.handle().entry(), id);
        self.keys.push(key);
        id
    }

    pub(crate) fn get(&self, id: EntryId) -> Option<&Key> {
        self.keys.get(id.0 as usize)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Key> {
        self.keys.iter()
    }

    pub(crate) fn mem_usage(&self) -> usize {
        self.keys.capacity() * std::mem::size_of::<Key>()
    }
}

impl Index<EntryId> for EntryArena {
    type Output = Key;

    fn index(&self, id: EntryId) -> &Self::Output {
        &self.keys[id.0 as usize]
    }
}
