/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Genogrove - B+ trees for genomic interval overlap queries.
//!
//! # Overview
//!
//! Genomic features (genes, exons, reads, variants) are half-open intervals
//! `[start, end)` on a named sequence such as a chromosome. A [`Grove`] keeps
//! one [`IntervalTree`] per sequence name and answers "which stored
//! intervals overlap this one?" either on one sequence or on all of them.
//!
//! - [`Interval`]: a validated half-open range with overlap semantics
//! - [`Key`]: a stored interval plus its stable [`KeyHandle`]
//! - [`IntervalTree`]: a B+ tree of order `m` with linked leaves and
//!   max-end pruning for overlap search
//! - [`Grove`]: named trees created on first insert, plus edges between keys
//! - [`QueryResult`]: the query and the overlapping keys
//!
//! # Example
//!
//! ```
//! use genogrove::{Grove, Interval};
//!
//! let mut grove = Grove::new(3)?;
//! grove.insert("chr1", Interval::new(10, 20)?);
//! grove.insert("chr1", Interval::new(30, 40)?);
//! grove.insert("chr1", Interval::new(15, 25)?);
//!
//! let result = grove.intersect_index(&"18-32".parse()?, "chr1");
//! let found: Vec<String> = result.iter().map(ToString::to_string).collect();
//! assert_eq!(found, ["10-20", "15-25", "30-40"]);
//!
//! assert!(grove.intersect_index(&Interval::new(18, 32)?, "chr2").is_empty());
//! # Ok::<(), genogrove::GroveError>(())
//! ```
//!
//! # Sorted Input
//!
//! Sorted files (BED, sorted BAM) can be bulk-loaded with
//! [`Grove::insert_sorted`], which appends to the rightmost leaf without
//! searching the tree. Out-of-order input is rejected with
//! [`GroveError::UnsortedInsert`].

mod arena;
mod error;
mod graph;
mod grove;
mod interval;
mod iter;
mod key;
mod node;
mod query_result;
mod tree;

pub use arena::{EntryId, NodeIndex};
pub use error::{GroveError, Result};
pub use grove::Grove;
pub use interval::Interval;
pub use iter::KeysIter;
pub use key::{IndexId, Key, KeyHandle};
pub use node::{InternalNode, LeafEntry, LeafNode, TreeNode};
pub use query_result::QueryResult;
pub use tree::IntervalTree;
