// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Only the outer batch (file discovery, decoder runs, writing outputs) can
//! fail. Normalization, joining and metrics degrade to empty results instead.

use std::path::PathBuf;

/// Crate-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Decoder error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure to turn one FIT file into a decoded document.
///
/// These are terminal per file: the batch records them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Failed to launch decoder: {0}")]
    Launch(String),

    #[error("Decoder exited with status {code:?}: {stderr}")]
    ToolFailed { code: Option<i32>, stderr: String },

    #[error("Decoder output unreadable: {0}")]
    OutputMissing(String),

    #[error("Decoder output unparseable: {0}")]
    Unparseable(String),

    #[error("Invalid decoder command: {0}")]
    InvalidCommand(String),
}

/// Result type alias for fallible batch operations.
pub type Result<T> = std::result::Result<T, AppError>;
