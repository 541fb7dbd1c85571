/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Directed edges between stored keys.
//!
//! Used to relate intervals across indices, e.g. exons of one transcript or
//! the two ends of a structural variant.

use std::collections::HashMap;

use crate::KeyHandle;

/// Adjacency lists keyed by the source handle.
///
/// The graph only stores handles; validating that they resolve is the
/// owning [`Grove`](crate::Grove)'s job.
#[derive(Debug, Default, Clone)]
pub(crate) struct KeyGraph {
    edges: HashMap<KeyHandle, Vec<KeyHandle>>,
    num_edges: usize,
}

impl KeyGraph {
    /// Add `source -> target`. Returns `false` if the edge already existed.
    pub(crate) fn add_edge(&mut self, source: KeyHandle, target: KeyHandle) -> bool {
        let targets = self.edges.entry(source).or_default();
        if targets.contains(&target) {
            return false;
        }
        targets.push(target);
        self.num_edges += 1;
        true
    }

    pub(crate) fn has_edge(&self, source: KeyHandle, target: KeyHandle) -> bool {
        self.edges
            .get(&source)
            .is_some_and(|targets| targets.contains(&target))
    }

    /// Targets of `source`, in the order the edges were added.
    pub(crate) fn neighbors(&self, source: KeyHandle) -> &[KeyHandle] {
        self.edges.get(&source).map_or(&[], Vec::as_slice)
    }

    pub(crate) const fn num_edges(&self) -> usize {
        self.num_edges
    }
}
