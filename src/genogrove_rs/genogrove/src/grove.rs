/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! A collection of named interval trees.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::graph::KeyGraph;
use crate::{GroveError, IndexId, Interval, IntervalTree, Key, KeyHandle, QueryResult, Result};

/// Named interval trees sharing one order, typically one per chromosome.
///
/// # Index Lifecycle
///
/// Indices are created on first insert (get-or-create) and never removed.
/// Queries only look indices up: asking for an index that was never
/// populated yields an empty [`QueryResult`], not an error.
///
/// # Ordering
///
/// Indices get an [`IndexId`] in the order their names are first seen.
/// Unscoped queries visit the trees in that order, so results are
/// deterministic regardless of hashing.
///
/// ```
/// use genogrove::{Grove, Interval};
///
/// let mut grove = Grove::new(3)?;
/// grove.insert("chr1", Interval::new(10, 20)?);
/// grove.insert("chr1", Interval::new(30, 40)?);
/// grove.insert("chr2", Interval::new(15, 25)?);
///
/// let result = grove.intersect_index(&Interval::new(18, 32)?, "chr1");
/// assert_eq!(result.len(), 2);
/// assert_eq!(grove.intersect(&Interval::new(18, 32)?).len(), 3);
/// # Ok::<(), genogrove::GroveError>(())
/// ```
#[derive(Debug)]
pub struct Grove {
    /// Branching factor of every tree.
    order: usize,
    /// Trees, positioned by [`IndexId`].
    trees: Vec<IntervalTree>,
    /// Index names, positioned by [`IndexId`].
    names: Vec<String>,
    /// Name lookup.
    ids: HashMap<String, IndexId>,
    /// Edges between stored keys.
    graph: KeyGraph,
}

impl Grove {
    /// Order used by [`Default`].
    pub const DEFAULT_ORDER: usize = IntervalTree::DEFAULT_ORDER;

    /// Create an empty grove whose trees all use `order`.
    ///
    /// Returns [`GroveError::InvalidOrder`] for an order below
    /// [`IntervalTree::MINIMUM_ORDER`].
    pub fn new(order: usize) -> Result<Self> {
        if order < IntervalTree::MINIMUM_ORDER {
            return Err(GroveError::InvalidOrder {
                order,
                minimum: IntervalTree::MINIMUM_ORDER,
            });
        }
        Ok(Self {
            order,
            trees: Vec::new(),
            names: Vec::new(),
            ids: HashMap::new(),
            graph: KeyGraph::default(),
        })
    }

    /// The branching factor shared by every tree.
    pub const fn order(&self) -> usize {
        self.order
    }

    /// Total number of intervals across all indices.
    pub fn size(&self) -> usize {
        self.trees.iter().map(IntervalTree::len).sum()
    }

    /// Whether no interval was inserted yet.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Number of indices created so far.
    pub fn num_indices(&self) -> usize {
        self.trees.len()
    }

    /// Whether an index with this name exists.
    pub fn contains_index(&self, index: &str) -> bool {
        self.ids.contains_key(index)
    }

    /// Index names in the order they were first seen.
    pub fn index_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// The tree behind an index, if it exists.
    pub fn index(&self, index: &str) -> Option<&IntervalTree> {
        self.ids
            .get(index)
            .map(|id| &self.trees[id.position() as usize])
    }

    /// The name of an index id issued by this grove.
    pub fn index_name(&self, id: IndexId) -> Option<&str> {
        self.names.get(id.position() as usize).map(String::as_str)
    }

    /// Resolve a handle to its key.
    ///
    /// Handles are resolved by position only: the grove does not record which
    /// grove issued a handle, so a handle from another grove resolves to
    /// whatever key sits at the same index and entry positions here, if any.
    /// Returns `None` when either position is out of range.
    pub fn key(&self, handle: KeyHandle) -> Option<&Key> {
        self.trees
            .get(handle.index().position() as usize)?
            .get(handle.entry())
    }

    /// Insert an interval into `index`, creating the index if needed.
    pub fn insert(&mut self, index: &str, interval: Interval) -> KeyHandle {
        self.get_or_create(index).insert(interval)
    }

    /// Append an interval to `index`, creating the index if needed.
    ///
    /// The interval must be strictly greater than every interval already in
    /// that index; otherwise [`GroveError::UnsortedInsert`] is returned and
    /// nothing changes. See [`IntervalTree::insert_sorted`].
    pub fn insert_sorted(&mut self, index: &str, interval: Interval) -> Result<KeyHandle> {
        self.get_or_create(index).insert_sorted(interval)
    }

    /// Append to `index` when the interval is in order, otherwise insert it.
    pub fn insert_sorted_or_insert(&mut self, index: &str, interval: Interval) -> KeyHandle {
        self.get_or_create(index).insert_sorted_or_insert(interval)
    }

    /// Find overlapping intervals in every index.
    pub fn intersect(&self, query: &Interval) -> QueryResult<'_> {
        let mut keys = Vec::new();
        for tree in &self.trees {
            tree.intersect_into(query, &mut keys);
        }
        trace!(%query, indices = self.trees.len(), matches = keys.len(), "intersect");
        QueryResult::new(*query, keys)
    }

    /// Find overlapping intervals in one index.
    ///
    /// An unknown index yields an empty result.
    pub fn intersect_index(&self, query: &Interval, index: &str) -> QueryResult<'_> {
        let Some(tree) = self.index(index) else {
            trace!(%query, index, "intersect on unknown index");
            return QueryResult::empty(*query);
        };
        let keys = tree.intersect(query);
        trace!(%query, index, matches = keys.len(), "intersect");
        QueryResult::new(*query, keys)
    }

    /// Add a directed edge between two stored keys.
    ///
    /// Both handles must resolve through [`Grove::key`], otherwise
    /// [`GroveError::UnknownKey`] is returned. Adding an existing edge again
    /// is a no-op.
    pub fn add_edge(&mut self, source: KeyHandle, target: KeyHandle) -> Result<()> {
        for handle in [source, target] {
            if self.key(handle).is_none() {
                return Err(GroveError::UnknownKey(handle));
            }
        }
        self.graph.add_edge(source, target);
        Ok(())
    }

    /// Whether the edge `source -> target` exists.
    pub fn has_edge(&self, source: KeyHandle, target: KeyHandle) -> bool {
        self.graph.has_edge(source, target)
    }

    /// Keys reachable from `source` through one edge, in insertion order.
    pub fn neighbors(&self, source: KeyHandle) -> impl Iterator<Item = &Key> {
        self.graph
            .neighbors(source)
            .iter()
            .filter_map(|&target| self.key(target))
    }

    /// Number of edges in the key graph.
    pub const fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    fn get_or_create(&mut self, index: &str) -> &mut IntervalTree {
        let id = match self.ids.get(index) {
            Some(&id) => id,
            None => self.create_index(index),
        };
        &mut self.trees[id.position() as usize]
    }

    fn create_index(&mut self, index: &str) -> IndexId {
        let position =
            u32::try_from(self.trees.len()).expect("grove holds at most u32::MAX indices");
        let id = IndexId::from_position(position);
        let tree = IntervalTree::with_index(id, self.order)
            .expect("the grove order was validated at construction");

        self.trees.push(tree);
        self.names.push(index.to_owned());
        self.ids.insert(index.to_owned(), id);

        debug!(index, id = position, order = self.order, "created index");
        id
    }
}

impl Default for Grove {
    fn default() -> Self {
        Self {
            order: Self::DEFAULT_ORDER,
            trees: Vec::new(),
            names: Vec::new(),
            ids: HashMap::new(),
            graph: KeyGraph::default(),
        }
    }
}

impl fmt::Display for Grove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grove(size={})", self.size())
    }
}
