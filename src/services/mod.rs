// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - normalization, joining, metrics and batch plumbing.

pub mod decoder;
pub mod derived;
pub mod joiner;
pub mod metrics;
pub mod normalizer;
pub mod pipeline;
pub mod round_id;
pub mod sources;
pub mod store;

pub use decoder::{DecodeBatchResult, DecoderCommand, DecoderService};
pub use derived::build_rounds;
pub use joiner::JoinIndex;
pub use metrics::{compute_all, MetricsOptions, MetricsReport};
pub use sources::{load_dataset, DataLayout};
