// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! External FIT decoder batch runner.
//!
//! Each FIT file is decoded by running a configured command (for example
//! FitCSVTool) as a child process. At most `max_concurrent` decoders run
//! at once. A file that fails to decode is recorded and the batch moves on.

use crate::error::DecodeError;
use crate::models::canonical::RoundId;
use crate::services::normalizer::DecodedDocument;
use futures_util::{stream, StreamExt};
use std::path::{Path, PathBuf};
use tokio::process::Command;

const INPUT_PLACEHOLDER: &str = "{input}";
const OUTPUT_PLACEHOLDER: &str = "{output}";

/// A parsed decoder command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderCommand {
    program: String,
    args: Vec<String>,
}

impl DecoderCommand {
    /// Parse a whitespace-separated template such as
    /// `java -jar FitCSVTool.jar -b {input} {output}`.
    ///
    /// Without an `{output}` placeholder the decoder's stdout is saved as
    /// the output file.
    pub fn parse(template: &str) -> Result<Self, DecodeError> {
        let mut parts = template.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| DecodeError::InvalidCommand("empty command".to_string()))?;
        let args: Vec<String> = parts.collect();

        if !args.iter().any(|a| a.contains(INPUT_PLACEHOLDER)) {
            return Err(DecodeError::InvalidCommand(format!(
                "{template:?} has no {INPUT_PLACEHOLDER} placeholder"
            )));
        }

        Ok(Self { program, args })
    }

    pub fn writes_output_file(&self) -> bool {
        self.args.iter().any(|a| a.contains(OUTPUT_PLACEHOLDER))
    }

    /// Arguments with the placeholders filled in.
    pub fn render_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|a| {
                a.replace(INPUT_PLACEHOLDER, &input)
                    .replace(OUTPUT_PLACEHOLDER, &output)
            })
            .collect()
    }
}

/// One FIT file to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeJob {
    pub round_id: RoundId,
    pub input: PathBuf,
    /// Where the decoded document is written; its extension picks the parser.
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DecodedFile {
    pub round_id: RoundId,
    pub path: PathBuf,
    pub document: DecodedDocument,
}

#[derive(Debug, Clone)]
pub struct DecodeFailure {
    pub round_id: RoundId,
    pub input: PathBuf,
    pub error: String,
}

/// Result of a decode batch.
#[derive(Debug, Clone, Default)]
pub struct DecodeBatchResult {
    pub decoded: Vec<DecodedFile>,
    pub failures: Vec<DecodeFailure>,
}

impl DecodeBatchResult {
    /// Returns true if every file was decoded.
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns true if every file failed.
    pub fn is_complete_failure(&self) -> bool {
        self.decoded.is_empty() && !self.failures.is_empty()
    }

    pub fn is_partial_failure(&self) -> bool {
        !self.decoded.is_empty() && !self.failures.is_empty()
    }

    pub fn failed_rounds(&self) -> Vec<RoundId> {
        self.failures.iter().map(|f| f.round_id).collect()
    }
}

/// Runs the decoder command over a batch of files.
pub struct DecoderService {
    command: DecoderCommand,
    max_concurrent: usize,
}

impl DecoderService {
    pub fn new(command: DecoderCommand, max_concurrent: usize) -> Self {
        Self {
            command,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Decode one file and parse the output document.
    pub async fn decode_file(&self, job: &DecodeJob) -> Result<DecodedDocument, DecodeError> {
        if let Some(dir) = job.output.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| DecodeError::OutputMissing(format!("{}: {e}", dir.display())))?;
        }

        let output = Command::new(&self.command.program)
            .args(self.command.render_args(&job.input, &job.output))
            .output()
            .await
            .map_err(|e| DecodeError::Launch(format!("{}: {e}", self.command.program)))?;

        if !output.status.success() {
            return Err(DecodeError::ToolFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !self.command.writes_output_file() {
            tokio::fs::write(&job.output, &output.stdout)
                .await
                .map_err(|e| DecodeError::OutputMissing(format!("{}: {e}", job.output.display())))?;
        }

        let text = tokio::fs::read_to_string(&job.output)
            .await
            .map_err(|e| DecodeError::OutputMissing(format!("{}: {e}", job.output.display())))?;

        parse_decoded(&job.output, &text)
    }

    /// Decode every job with bounded concurrency.
    ///
    /// Failures are logged and collected; they never stop the batch.
    pub async fn decode_all(&self, jobs: Vec<DecodeJob>) -> DecodeBatchResult {
        let requested = jobs.len();

        let outcomes: Vec<(DecodeJob, Result<DecodedDocument, DecodeError>)> = stream::iter(jobs)
            .map(|job| async move {
                let result = self.decode_file(&job).await;
                (job, result)
            })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        let mut result = DecodeBatchResult::default();
        for (job, outcome) in outcomes {
            match outcome {
                Ok(document) => {
                    tracing::debug!(
                        round_id = job.round_id,
                        path = %job.output.display(),
                        "Decoded FIT file"
                    );
                    result.decoded.push(DecodedFile {
                        round_id: job.round_id,
                        path: job.output,
                        document,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        round_id = job.round_id,
                        input = %job.input.display(),
                        error = %e,
                        "Failed to decode FIT file"
                    );
                    result.failures.push(DecodeFailure {
                        round_id: job.round_id,
                        input: job.input,
                        error: e.to_string(),
                    });
                }
            }
        }

        result.decoded.sort_by_key(|d| d.round_id);
        result.failures.sort_by_key(|f| f.round_id);

        tracing::info!(
            requested,
            decoded = result.decoded.len(),
            failed = result.failures.len(),
            "Decoder batch finished"
        );

        result
    }
}

/// Parse decoder output by file extension: `.json` as JSON, anything else
/// as FitCSVTool CSV.
pub fn parse_decoded(path: &Path, text: &str) -> Result<DecodedDocument, DecodeError> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        DecodedDocument::from_json_str(text)
            .ok_or_else(|| DecodeError::Unparseable(path.display().to_string()))
    } else {
        DecodedDocument::from_csv_reader(text.as_bytes())
            .map_err(|e| DecodeError::Unparseable(format!("{}: {e}", path.display())))
    }
}
