/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! A subscriber for the Rust `tracing` ecosystem that writes the events
//! emitted by `genogrove` to standard error.
//!
//! The library itself only emits events; binaries, benchmarks and tests
//! decide whether and how to collect them by calling [`init`] or
//! [`try_init`] once at startup.
//!
//! # Configuring Logging Output
//!
//! Logging output is configured by setting the `RUST_LOG` environment
//! variable to a _filter_, with `info` as the default level. The library
//! logs index creation and rejected sorted inserts at `debug`, node splits
//! and queries at `trace`:
//!
//! ```text
//! RUST_LOG=genogrove=debug
//! RUST_LOG=genogrove::tree=trace,genogrove::grove=debug
//! ```
//!
//! For the directive syntax see the [`tracing_subscriber`] documentation.
//!
//! [`tracing_subscriber`]: https://docs.rs/tracing-subscriber/0.3.20/tracing_subscriber/filter/struct.EnvFilter.html#directives

use std::error::Error;
use std::io;

use tracing_core::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Initializes a global subscriber that writes to standard error.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init() {
    try_init().expect("Unable to install global tracing subscriber")
}

/// Initializes a global subscriber that writes to standard error if one is
/// not already set.
///
/// # Errors
///
/// Returns an Error if the initialization was unsuccessful, likely because
/// a global subscriber was already installed by another call to `try_init`.
pub fn try_init() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .try_init()
}

/// The `RUST_LOG` filter, falling back to `info` for anything it leaves out.
fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}
