/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Error type shared by every fallible grove operation.

use thiserror::Error;

use crate::{Interval, KeyHandle};

/// Result alias defaulting to [`GroveError`].
pub type Result<T, E = GroveError> = std::result::Result<T, E>;

/// Errors reported by intervals, trees and groves.
///
/// Structural tree operations never fail once their inputs are validated, so
/// every variant here describes caller misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroveError {
    /// An interval was built (or mutated) with `start > end`.
    #[error("invalid interval: start {start} is greater than end {end}")]
    InvalidInterval {
        /// The rejected start coordinate.
        start: u64,
        /// The rejected end coordinate.
        end: u64,
    },

    /// A tree or grove was configured with a branching factor below the minimum.
    #[error("invalid order {order}: the order must be at least {minimum}")]
    InvalidOrder {
        /// The rejected order.
        order: usize,
        /// The smallest accepted order.
        minimum: usize,
    },

    /// `insert_sorted` received an interval that does not exceed the current maximum.
    #[error("out-of-order sorted insert: {interval} is not above {maximum}")]
    UnsortedInsert {
        /// The interval the caller tried to append.
        interval: Interval,
        /// The largest interval currently stored in the index.
        maximum: Interval,
    },

    /// A key handle that the grove never issued.
    #[error("unknown key handle {0:?}")]
    UnknownKey(KeyHandle),

    /// Text that is not a `start-end` interval.
    #[error("cannot parse interval from {0:?}")]
    Parse(String),
}
