// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Golf analytics batch
//!
//! Decodes any new FIT files, joins them with the scorecard export and
//! writes `rounds.json` and `metrics.json`.

use anyhow::Context;
use golf_analytics::{config::Config, services::pipeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        output_dir = %config.output_dir.display(),
        decoder = config.decoder_command.is_some(),
        "Starting golf analytics batch"
    );

    let summary = pipeline::run(&config)
        .await
        .context("Batch run failed")?;

    tracing::info!(
        rounds = summary.rounds,
        decoded = summary.decoded,
        decode_failures = summary.decode_failures,
        rounds_path = %summary.rounds_path.display(),
        metrics_path = %summary.metrics_path.display(),
        "Batch complete"
    );
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("golf_analytics=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
