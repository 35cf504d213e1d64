// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Batch configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local runs.

use crate::services::metrics::{
    DateRange, DistanceUnits, GirThreshold, MetricsOptions, PercentileRange, RoundLengthFilter,
};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use validator::{Validate, ValidationError};

/// Default number of decoder processes allowed to run at once.
pub const DEFAULT_MAX_CONCURRENT_DECODES: usize = 4;

/// Batch configuration, loaded once at startup.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_percentile_order"))]
pub struct Config {
    // --- Locations ---
    /// Root of the DI-GOLF export (scorecards, shots, clubs, FIT files)
    pub data_dir: PathBuf,
    /// Where `rounds.json` and `metrics.json` are written
    pub output_dir: PathBuf,

    // --- External decoder ---
    /// Command template with `{input}` and `{output}` placeholders.
    /// When unset, only pre-decoded documents are used.
    pub decoder_command: Option<String>,
    /// Extension of the file the decoder writes ("csv" or "json")
    pub decoder_output_ext: String,
    #[validate(range(min = 1, max = 64))]
    pub max_concurrent_decodes: usize,

    // --- Metrics ---
    #[validate(range(min = 0.0, max = 100.0))]
    pub percentile_low: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub percentile_high: f64,
    pub distance_units: DistanceUnits,
    pub round_length: RoundLengthFilter,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub ignored_courses: Vec<u64>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/DI-GOLF"),
            output_dir: PathBuf::from("data/DI-GOLF/derived"),
            decoder_command: None,
            decoder_output_ext: "csv".to_string(),
            max_concurrent_decodes: DEFAULT_MAX_CONCURRENT_DECODES,
            percentile_low: PercentileRange::DEFAULT_LOW,
            percentile_high: PercentileRange::DEFAULT_HIGH,
            distance_units: DistanceUnits::Meters,
            round_length: RoundLengthFilter::Eighteen,
            date_from: None,
            date_to: None,
            ignored_courses: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(
            var("GOLF_DATA_DIR")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing("GOLF_DATA_DIR"))?,
        );
        let output_dir = var("GOLF_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("derived"));

        let config = Self {
            data_dir,
            output_dir,
            decoder_command: var("FIT_DECODER_COMMAND")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            decoder_output_ext: var("FIT_DECODER_OUTPUT_EXT")
                .map(|v| v.trim().trim_start_matches('.').to_ascii_lowercase())
                .unwrap_or_else(|| "csv".to_string()),
            max_concurrent_decodes: parse_or(
                &var,
                "MAX_CONCURRENT_DECODES",
                DEFAULT_MAX_CONCURRENT_DECODES,
            )?,
            percentile_low: parse_or(
                &var,
                "DISTANCE_PERCENTILE_LOW",
                PercentileRange::DEFAULT_LOW,
            )?,
            percentile_high: parse_or(
                &var,
                "DISTANCE_PERCENTILE_HIGH",
                PercentileRange::DEFAULT_HIGH,
            )?,
            distance_units: parse_or(&var, "DISTANCE_UNITS", DistanceUnits::Meters)?,
            round_length: parse_or(&var, "PUTTING_ROUND_LENGTH", RoundLengthFilter::Eighteen)?,
            date_from: parse_date(&var, "STATS_DATE_FROM")?,
            date_to: parse_date(&var, "STATS_DATE_TO")?,
            ignored_courses: parse_id_list(&var, "GIR_IGNORED_COURSES")?,
        };

        config
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        Ok(config)
    }

    /// Metrics options derived from this configuration.
    pub fn metrics_options(&self) -> MetricsOptions {
        let date_range = match (self.date_from, self.date_to) {
            (None, None) => None,
            (from, to) => Some(DateRange::from_days(from, to)),
        };

        MetricsOptions {
            percentiles: PercentileRange::clamped(self.percentile_low, self.percentile_high),
            units: self.distance_units,
            round_length: self.round_length,
            date_range,
            ignored_courses: self.ignored_courses.iter().copied().collect::<HashSet<_>>(),
            gir_threshold: GirThreshold::HalfRound,
        }
    }
}

fn parse_or<F, T>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match var(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        _ => Ok(default),
    }
}

fn parse_date<F>(var: &F, name: &'static str) -> Result<Option<NaiveDate>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) if !raw.trim().is_empty() => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        _ => Ok(None),
    }
}

fn parse_id_list<F>(var: &F, name: &'static str) -> Result<Vec<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = var(name) else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>().map_err(|_| ConfigError::Invalid {
                name,
                value: raw.clone(),
            })
        })
        .collect()
}

fn validate_percentile_order(config: &Config) -> Result<(), ValidationError> {
    if config.percentile_low >= config.percentile_high {
        return Err(ValidationError::new("percentile_low_not_below_high"));
    }
    Ok(())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("Configuration rejected: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_vars(lookup(&[("GOLF_DATA_DIR", "/tmp/golf")])).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/golf"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/golf/derived"));
        assert_eq!(config.max_concurrent_decodes, 4);
        assert_eq!(config.percentile_low, 5.0);
        assert_eq!(config.percentile_high, 98.0);
        assert_eq!(config.round_length, RoundLengthFilter::Eighteen);
        assert!(config.decoder_command.is_none());
    }

    #[test]
    fn test_missing_data_dir() {
        let err = Config::from_vars(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GOLF_DATA_DIR")));
    }

    #[test]
    fn test_percentile_order_enforced() {
        let err = Config::from_vars(lookup(&[
            ("GOLF_DATA_DIR", "/tmp/golf"),
            ("DISTANCE_PERCENTILE_LOW", "60"),
            ("DISTANCE_PERCENTILE_HIGH", "40"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_percentile_out_of_range() {
        let err = Config::from_vars(lookup(&[
            ("GOLF_DATA_DIR", "/tmp/golf"),
            ("DISTANCE_PERCENTILE_HIGH", "120"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_invalid_number() {
        let err = Config::from_vars(lookup(&[
            ("GOLF_DATA_DIR", "/tmp/golf"),
            ("MAX_CONCURRENT_DECODES", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "MAX_CONCURRENT_DECODES",
                ..
            }
        ));
    }

    #[test]
    fn test_metrics_options_from_config() {
        let config = Config::from_vars(lookup(&[
            ("GOLF_DATA_DIR", "/tmp/golf"),
            ("DISTANCE_UNITS", "yards"),
            ("PUTTING_ROUND_LENGTH", "9"),
            ("STATS_DATE_FROM", "2024-03-01"),
            ("GIR_IGNORED_COURSES", "101, 202"),
        ]))
        .unwrap();

        let options = config.metrics_options();
        assert_eq!(options.units, DistanceUnits::Yards);
        assert_eq!(options.round_length, RoundLengthFilter::Nine);
        assert!(options.date_range.is_some());
        assert!(options.ignored_courses.contains(&101));
        assert!(options.ignored_courses.contains(&202));
    }
}
