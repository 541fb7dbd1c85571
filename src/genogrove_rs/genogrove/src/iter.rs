/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Ordered iteration over a tree's keys.

use std::iter::FusedIterator;

use crate::arena::{EntryArena, NodeArena, NodeIndex};
use crate::{Key, TreeNode};

/// Iterator over the keys of an [`IntervalTree`](crate::IntervalTree) in
/// ascending interval order.
///
/// Walks the leaf chain left to right and never revisits internal nodes.
#[derive(Debug, Clone)]
pub struct KeysIter<'a> {
    nodes: &'a NodeArena,
    keys: &'a EntryArena,
    /// The leaf being read, `None` once exhausted.
    leaf: Option<NodeIndex>,
    /// Next entry to yield in `leaf`.
    pos: usize,
}

impl<'a> KeysIter<'a> {
    pub(crate) const fn new(
        nodes: &'a NodeArena,
        keys: &'a EntryArena,
        first_leaf: Option<NodeIndex>,
    ) -> Self {
        Self {
            nodes,
            keys,
            leaf: first_leaf,
            pos: 0,
        }
    }
}

impl<'a> Iterator for KeysIter<'a> {
    type Item = &'a Key;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let TreeNode::Leaf(leaf) = &self.nodes[self.leaf?] else {
                unreachable!("the leaf chain only links leaves")
            };
            if let Some(entry) = leaf.entries.get(self.pos) {
                self.pos += 1;
                return Some(&self.keys[entry.id]);
            }
            self.leaf = leaf.next;
            self.pos = 0;
        }
    }
}

impl FusedIterator for KeysIter<'_> {}
