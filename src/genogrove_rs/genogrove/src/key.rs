/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Keys stored in interval trees and the handles that name them.

use std::fmt;

use crate::{EntryId, Interval};

/// Position of an index (tree) inside a grove.
///
/// Ids are assigned in the order index names are first seen, which is also
/// the order unscoped queries visit the trees in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct IndexId(u32);

impl IndexId {
    /// Build an index id from its raw position.
    pub const fn from_position(position: u32) -> Self {
        Self(position)
    }

    /// The raw position.
    pub const fn position(self) -> u32 {
        self.0
    }
}

/// A stable, copyable reference to a stored [`Key`].
///
/// Handles are plain integers. They survive any number of later inserts and
/// splits, unlike `&Key` borrows, and can be resolved again through
/// [`Grove::key`](crate::Grove::key) or [`IntervalTree::get`](crate::IntervalTree::get).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyHandle {
    index: IndexId,
    entry: EntryId,
}

impl KeyHandle {
    /// Combine an index id and an entry id.
    pub const fn new(index: IndexId, entry: EntryId) -> Self {
        Self { index, entry }
    }

    /// The tree the key lives in.
    pub const fn index(self) -> IndexId {
        self.index
    }

    /// The key's slot in its tree's entry arena.
    pub const fn entry(self) -> EntryId {
        self.entry
    }
}

/// A stored interval.
///
/// Keys are created and owned by an [`IntervalTree`](crate::IntervalTree).
/// Callers only ever see shared borrows, so a stored interval can not be
/// mutated out from under the tree's ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    value: Interval,
    handle: KeyHandle,
}

impl Key {
    pub(crate) const fn new(value: Interval, handle: KeyHandle) -> Self {
        Self { value, handle }
    }

    /// The wrapped interval.
    pub const fn value(&self) -> &Interval {
        &self.value
    }

    /// The handle that resolves back to this key.
    pub const fn handle(&self) -> KeyHandle {
        self.handle
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
