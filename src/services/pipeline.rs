// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One batch run: decode, load, join, compute, write.

use crate::config::Config;
use crate::error::Result;
use crate::services::decoder::{DecodeJob, DecoderCommand, DecoderService};
use crate::services::derived::build_rounds;
use crate::services::joiner::JoinIndex;
use crate::services::metrics::compute_all;
use crate::services::round_id::round_id_from_path;
use crate::services::sources::{decoded_rounds, find_fit_files, load_dataset, DataLayout};
use crate::services::store::{write_metrics, write_rounds, METRICS_FILE, ROUNDS_FILE};
use std::path::PathBuf;

/// What a batch run produced.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub decoded: usize,
    pub decode_failures: usize,
    pub rounds: usize,
    pub rounds_path: PathBuf,
    pub metrics_path: PathBuf,
}

/// Decode jobs for FIT files that have no decoded document yet.
pub fn plan_decode_jobs(layout: &DataLayout, output_ext: &str) -> Vec<DecodeJob> {
    let done = decoded_rounds(layout);
    find_fit_files(layout)
        .into_iter()
        .filter_map(|input| {
            let round_id = round_id_from_path(&input)?;
            (!done.contains(&round_id)).then(|| DecodeJob {
                round_id,
                output: layout.decoded_output(&input, output_ext),
                input,
            })
        })
        .collect()
}

pub async fn run(config: &Config) -> Result<RunSummary> {
    let layout = DataLayout::new(&config.data_dir);
    let mut summary = RunSummary::default();

    if let Some(template) = &config.decoder_command {
        let command = DecoderCommand::parse(template)?;
        let jobs = plan_decode_jobs(&layout, &config.decoder_output_ext);
        if !jobs.is_empty() {
            let service = DecoderService::new(command, config.max_concurrent_decodes);
            let batch = service.decode_all(jobs).await;
            if batch.is_complete_failure() {
                tracing::warn!(failed = batch.failures.len(), "Every FIT file failed to decode");
            }
            summary.decoded = batch.decoded.len();
            summary.decode_failures = batch.failures.len();
        }
    }

    let dataset = load_dataset(&layout);
    let index = JoinIndex::build(&dataset);
    let rounds = build_rounds(&dataset, &index);
    let report = compute_all(&dataset, &index, &rounds.rounds, &config.metrics_options());

    summary.rounds = rounds.rounds.len();
    summary.rounds_path = config.output_dir.join(ROUNDS_FILE);
    summary.metrics_path = config.output_dir.join(METRICS_FILE);

    write_rounds(&summary.rounds_path, &rounds)?;
    write_metrics(&summary.metrics_path, &report)?;

    Ok(summary)
}
