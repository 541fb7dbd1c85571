/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Synthetic genomic features for the benchmarks.

use genogrove::{Grove, GroveError, Interval};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Length of every synthetic chromosome.
pub const CHROMOSOME_LEN: u64 = 250_000_000;

/// Longest synthetic feature.
pub const MAX_FEATURE_LEN: u64 = 10_000;

/// One feature: the index it belongs to and its coordinates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Record {
    pub index: String,
    pub interval: Interval,
}

/// A reproducible set of features spread over a few chromosomes.
#[derive(Debug, Clone)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    /// Generate `len` random features over `chromosomes` indices.
    ///
    /// The same `seed` always yields the same corpus.
    pub fn random(len: usize, chromosomes: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let names: Vec<String> = (1..=chromosomes.max(1))
            .map(|n| format!("chr{n}"))
            .collect();
        let records = (0..len)
            .map(|_| {
                let index = names[rng.random_range(0..names.len())].clone();
                let start = rng.random_range(0..CHROMOSOME_LEN - MAX_FEATURE_LEN);
                let end = start + rng.random_range(1..=MAX_FEATURE_LEN);
                Record {
                    index,
                    interval: Interval::new(start, end).expect("end is above start"),
                }
            })
            .collect();
        Self { records }
    }

    /// The same features sorted by index then interval, duplicates removed,
    /// so that every record can be appended with `insert_sorted`.
    pub fn sorted(&self) -> Self {
        let mut records = self.records.clone();
        records.sort();
        records.dedup();
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load with the searching insert.
    pub fn load(&self, order: usize) -> Result<Grove, GroveError> {
        let mut grove = Grove::new(order)?;
        for record in &self.records {
            grove.insert(&record.index, record.interval);
        }
        Ok(grove)
    }

    /// Load with sorted appends. Fails on the first out-of-order record.
    pub fn load_sorted(&self, order: usize) -> Result<Grove, GroveError> {
        let mut grove = Grove::new(order)?;
        for record in &self.records {
            grove.insert_sorted(&record.index, record.interval)?;
        }
        Ok(grove)
    }

    /// Query windows of `width` bases starting at random positions.
    pub fn queries(&self, count: usize, width: u64, seed: u64) -> Vec<Interval> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                let start = rng.random_range(0..CHROMOSOME_LEN - width);
                Interval::new(start, start + width).expect("end is above start")
            })
            .collect()
    }
}
