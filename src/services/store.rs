// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived-data writer and reader.
//!
//! Documents are written as pretty-printed camelCase JSON. Reading never
//! fails: a missing or malformed document comes back empty.

use crate::error::{AppError, Result};
use crate::models::derived::DerivedRoundsFile;
use crate::services::metrics::MetricsReport;
use serde::Serialize;
use std::path::Path;

pub const ROUNDS_FILE: &str = "rounds.json";
pub const METRICS_FILE: &str = "metrics.json";

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| AppError::io(dir, e))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|e| AppError::io(path, e))?;
    Ok(())
}

pub fn write_rounds(path: &Path, rounds: &DerivedRoundsFile) -> Result<()> {
    write_json(path, rounds)?;
    tracing::info!(
        path = %path.display(),
        rounds = rounds.rounds.len(),
        "Wrote derived rounds"
    );
    Ok(())
}

pub fn write_metrics(path: &Path, report: &MetricsReport) -> Result<()> {
    write_json(path, report)?;
    tracing::info!(path = %path.display(), "Wrote metrics");
    Ok(())
}

/// Parse a rounds document, returning an empty one if it is malformed.
pub fn parse_rounds(json: &str) -> DerivedRoundsFile {
    match serde_json::from_str(json) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed derived rounds document");
            DerivedRoundsFile::default()
        }
    }
}

/// Read `rounds.json`, returning an empty document if it is missing or
/// malformed.
pub fn read_rounds(path: &Path) -> DerivedRoundsFile {
    match std::fs::read_to_string(path) {
        Ok(json) => parse_rounds(&json),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read derived rounds");
            DerivedRoundsFile::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_documents_read_as_empty() {
        assert!(parse_rounds("not json").rounds.is_empty());
        assert!(parse_rounds(r#"{"version": 1, "data": []}"#).rounds.is_empty());
        assert!(parse_rounds(r#"{"rounds": 3}"#).rounds.is_empty());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_rounds(&dir.path().join(ROUNDS_FILE)).rounds.is_empty());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested").join(ROUNDS_FILE);
        write_rounds(&path, &DerivedRoundsFile::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\n  \"rounds\": []\n}");
    }
}
