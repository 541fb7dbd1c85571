/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Criterion benchmark groups for loading groves and querying them.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BatchSize, BenchmarkGroup, Criterion, measurement::Measurement};
use genogrove::{Grove, Interval};

use crate::Corpus;

/// A helper struct for benchmarking grove operations on one corpus.
pub struct OperationBencher {
    prefix: String,
    order: usize,
    corpus: Corpus,
    sorted: Corpus,
    grove: Grove,
    measurement_time: Option<Duration>,
}

impl OperationBencher {
    /// Prepare a bencher, loading `corpus` once for the query benchmarks.
    pub fn new(
        prefix: String,
        order: usize,
        corpus: Corpus,
        measurement_time: Option<Duration>,
    ) -> Self {
        let sorted = corpus.sorted();
        let grove = sorted
            .load_sorted(order)
            .expect("a sorted corpus loads with appends");
        Self {
            prefix,
            order,
            corpus,
            sorted,
            grove,
            measurement_time,
        }
    }

    fn benchmark_group<'a>(
        &self,
        c: &'a mut Criterion,
        label: &str,
    ) -> BenchmarkGroup<'a, criterion::measurement::WallTime> {
        let name = format!("{}|order={}|{label}", self.prefix, self.order);
        let mut group = c.benchmark_group(name);
        if let Some(duration) = self.measurement_time {
            group.measurement_time(duration);
        }
        group
    }

    /// Benchmark bulk loading: searching insert on shuffled input against
    /// sorted appends.
    pub fn load_group(&self, c: &mut Criterion) {
        let mut group = self.benchmark_group(c, "Load");
        load_benchmark(
            &mut group,
            "Insert (random order)",
            &self.corpus,
            self.order,
            false,
        );
        load_benchmark(
            &mut group,
            "Insert (sorted order)",
            &self.sorted,
            self.order,
            false,
        );
        load_benchmark(
            &mut group,
            "Insert sorted",
            &self.sorted,
            self.order,
            true,
        );
        group.finish();
    }

    /// Benchmark a batch of queries against one index and against all.
    pub fn intersect_group(&self, c: &mut Criterion, queries: &[Interval], label: &str) {
        let mut group = self.benchmark_group(c, label);
        let grove = &self.grove;
        group.bench_function("Scoped", |b| {
            b.iter(|| {
                queries
                    .iter()
                    .map(|q| grove.intersect_index(black_box(q), "chr1").len())
                    .sum::<usize>()
            })
        });
        group.bench_function("All indices", |b| {
            b.iter(|| {
                queries
                    .iter()
                    .map(|q| grove.intersect(black_box(q)).len())
                    .sum::<usize>()
            })
        });
        group.finish();
    }
}

fn load_benchmark<M: Measurement>(
    group: &mut BenchmarkGroup<'_, M>,
    label: &str,
    corpus: &Corpus,
    order: usize,
    append: bool,
) {
    group.bench_function(label, |b| {
        b.iter_batched(
            || corpus.clone(),
            |corpus| {
                let grove = if append {
                    corpus.load_sorted(order)
                } else {
                    corpus.load(order)
                };
                black_box(grove.map(|grove| grove.size()))
            },
            BatchSize::LargeInput,
        )
    });
}
