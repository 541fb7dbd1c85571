/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Half-open genomic intervals.
//!
//! Coordinates are 0-based and half-open, `[start, end)`, matching BED.
//! Intervals order by `start` first and `end` second, which is the order the
//! trees store them in.

use std::fmt;
use std::str::FromStr;

use crate::{GroveError, Result};

/// A half-open range `[start, end)` with `start <= end`.
///
/// The derived ordering compares `start` and then `end`, so the field order
/// below is load-bearing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    start: u64,
    end: u64,
}

impl Interval {
    /// Create an interval, rejecting `start > end`.
    ///
    /// ```
    /// use genogrove::Interval;
    ///
    /// let interval = Interval::new(100, 200)?;
    /// assert_eq!(interval.len(), 100);
    /// assert!(Interval::new(200, 100).is_err());
    /// # Ok::<(), genogrove::GroveError>(())
    /// ```
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(GroveError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// The inclusive start coordinate.
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// The exclusive end coordinate.
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Move the start coordinate. Fails if it would pass `end`.
    pub fn set_start(&mut self, start: u64) -> Result<()> {
        if start > self.end {
            return Err(GroveError::InvalidInterval {
                start,
                end: self.end,
            });
        }
        self.start = start;
        Ok(())
    }

    /// Move the end coordinate. Fails if it would fall before `start`.
    pub fn set_end(&mut self, end: u64) -> Result<()> {
        if self.start > end {
            return Err(GroveError::InvalidInterval {
                start: self.start,
                end,
            });
        }
        self.end = end;
        Ok(())
    }

    /// Number of positions covered.
    pub const fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Whether the interval covers no position at all.
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `a` and `b` share at least one position.
    ///
    /// Touching endpoints do not overlap, and an empty interval overlaps
    /// nothing, not even itself.
    pub const fn overlap(a: &Self, b: &Self) -> bool {
        !a.is_empty() && !b.is_empty() && a.start < b.end && b.start < a.end
    }

    /// Method form of [`Interval::overlap`].
    pub const fn overlaps(&self, other: &Self) -> bool {
        Self::overlap(self, other)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for Interval {
    type Err = GroveError;

    /// Parse the `start-end` form produced by [`Display`](fmt::Display).
    fn from_str(s: &str) -> Result<Self> {
        let parse_error = || GroveError::Parse(s.to_owned());
        let (start, end) = s.trim().split_once('-').ok_or_else(parse_error)?;
        let start = start.trim().parse().map_err(|_| parse_error())?;
        let end = end.trim().parse().map_err(|_| parse_error())?;
        Self::new(start, end)
    }
}

impl TryFrom<std::ops::Range<u64>> for Interval {
    type Error = GroveError;

    fn try_from(range: std::ops::Range<u64>) -> Result<Self> {
        Self::new(range.start, range.end)
    }
}
