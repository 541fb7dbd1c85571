/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! The outcome of an overlap query.

use crate::{Interval, Key, KeyHandle};

/// The query interval together with the keys that overlap it.
///
/// Keys are borrowed from the [`Grove`](crate::Grove) that answered the
/// query, so a result cannot outlive the grove or survive a mutation of it.
/// Within one index the keys are in ascending interval order; unscoped
/// queries concatenate the indices in the order they were first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult<'g> {
    query: Interval,
    keys: Vec<&'g Key>,
}

impl<'g> QueryResult<'g> {
    pub(crate) const fn new(query: Interval, keys: Vec<&'g Key>) -> Self {
        Self { query, keys }
    }

    /// A result with no matches.
    pub(crate) const fn empty(query: Interval) -> Self {
        Self::new(query, Vec::new())
    }

    /// The interval that was searched for.
    pub const fn query(&self) -> &Interval {
        &self.query
    }

    /// The matching keys.
    pub fn keys(&self) -> &[&'g Key] {
        &self.keys
    }

    /// Number of matching keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over the matching keys.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'g Key> + '_ {
        self.keys.iter().copied()
    }

    /// Iterate over the handles of the matching keys.
    pub fn handles(&self) -> impl ExactSizeIterator<Item = KeyHandle> + '_ {
        self.keys.iter().map(|key| key.handle())
    }

    /// Iterate over the matching intervals.
    pub fn intervals(&self) -> impl ExactSizeIterator<Item = Interval> + '_ {
        self.keys.iter().map(|key| *key.value())
    }
}

impl<'g> IntoIterator for QueryResult<'g> {
    type Item = &'g Key;
    type IntoIter = std::vec::IntoIter<&'g Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

impl<'r, 'g> IntoIterator for &'r QueryResult<'g> {
    type Item = &'g Key;
    type IntoIter = std::iter::Copied<std::slice::Iter<'r, &'g Key>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter().copied()
    }
}
