// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Metrics engine.
//!
//! Each metric lives in its own module and is a pure function over the
//! dataset snapshot, the join indices and [`MetricsOptions`]. Percentages
//! over an empty denominator are 0.

pub mod approach;
pub mod distances;
pub mod gir;
pub mod par3;
pub mod putting;

pub use approach::{approach_by_club, ApproachRow};
pub use distances::{club_distances, ClubDistanceRow, DistanceReport, TrimBounds};
pub use gir::{gir_per_round, gir_report, is_gir, GirReport, GirRoundRow};
pub use par3::{par3_by_club, Par3Row};
pub use putting::{putting_report, PuttingReport};

use crate::models::canonical::RoundId;
use crate::models::dataset::Dataset;
use crate::models::derived::DerivedRound;
use crate::models::YARDS_PER_METER;
use crate::services::joiner::JoinIndex;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Display label for the explicit "unknown club" bucket.
pub const UNKNOWN_CLUB_LABEL: &str = "unknown";

/// Options shared by every metrics pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsOptions {
    pub percentiles: PercentileRange,
    pub units: DistanceUnits,
    pub round_length: RoundLengthFilter,
    /// Inclusive range of scorecard start dates; `None` means all rounds.
    pub date_range: Option<DateRange>,
    /// Course global ids left out of GIR tables
    pub ignored_courses: HashSet<u64>,
    /// Minimum complete holes for a round to appear in the GIR table
    pub gir_threshold: GirThreshold,
}

impl Default for MetricsOptions {
    fn default() -> Self {
        Self {
            percentiles: PercentileRange::default(),
            units: DistanceUnits::Meters,
            round_length: RoundLengthFilter::Eighteen,
            date_range: None,
            ignored_courses: HashSet::new(),
            gir_threshold: GirThreshold::HalfRound,
        }
    }
}

impl MetricsOptions {
    /// True when the round passes the date range (always, when none is set).
    ///
    /// With a range set, rounds without a parseable start date are excluded.
    pub fn admits_round(&self, round_id: RoundId, dates: &HashMap<RoundId, NaiveDate>) -> bool {
        match &self.date_range {
            None => true,
            Some(range) => dates.get(&round_id).is_some_and(|d| range.contains(*d)),
        }
    }
}

/// Low/high percentiles (0-100) used to trim club distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PercentileRange {
    low: f64,
    high: f64,
}

impl PercentileRange {
    pub const DEFAULT_LOW: f64 = 5.0;
    pub const DEFAULT_HIGH: f64 = 98.0;

    /// Clamp low to 0-99 and high to 1-100, then keep low below high.
    pub fn clamped(low: f64, high: f64) -> Self {
        let low = if low.is_finite() {
            low.clamp(0.0, 99.0)
        } else {
            Self::DEFAULT_LOW
        };
        let high = if high.is_finite() {
            high.clamp(1.0, 100.0)
        } else {
            Self::DEFAULT_HIGH
        };
        let high = if low < high { high } else { (low + 1.0).min(100.0) };
        Self { low, high }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

impl Default for PercentileRange {
    fn default() -> Self {
        Self {
            low: Self::DEFAULT_LOW,
            high: Self::DEFAULT_HIGH,
        }
    }
}

/// Output distance units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnits {
    Meters,
    Yards,
}

impl DistanceUnits {
    /// Convert a distance in meters to these units.
    pub fn from_meters(&self, meters: f64) -> f64 {
        match self {
            DistanceUnits::Meters => meters,
            DistanceUnits::Yards => meters * YARDS_PER_METER,
        }
    }
}

impl FromStr for DistanceUnits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meters" | "m" => Ok(DistanceUnits::Meters),
            "yards" | "yd" => Ok(DistanceUnits::Yards),
            other => Err(format!("unknown distance unit: {other}")),
        }
    }
}

/// Which round lengths the putting summary considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum RoundLengthFilter {
    All,
    Nine,
    Eighteen,
}

impl RoundLengthFilter {
    pub fn accepts(&self, holes: u32) -> bool {
        match self {
            RoundLengthFilter::All => true,
            RoundLengthFilter::Nine => holes == 9,
            RoundLengthFilter::Eighteen => holes == 18,
        }
    }
}

impl FromStr for RoundLengthFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RoundLengthFilter::All),
            "9" | "nine" => Ok(RoundLengthFilter::Nine),
            "18" | "eighteen" => Ok(RoundLengthFilter::Eighteen),
            other => Err(format!("unknown round length: {other}")),
        }
    }
}

/// Minimum holes with complete data for a round to be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GirThreshold {
    /// Any round with at least one complete hole
    AnyHole,
    /// Full or half rounds: at least nine complete holes
    HalfRound,
}

impl GirThreshold {
    pub fn min_holes(&self) -> u32 {
        match self {
            GirThreshold::AnyHole => 1,
            GirThreshold::HalfRound => 9,
        }
    }
}

/// Inclusive range of calendar dates; an open end is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn from_days(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Percentile by linear interpolation between order statistics at
/// `(n - 1) * p`, with `p` a fraction in 0..=1. Empty input yields 0.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let idx = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = idx - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// `part / total` as a percentage, 0 when `total` is 0.
pub fn pct(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(total) * 100.0
    }
}

/// Every metric table for one set of options (`metrics.json`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub putting: PuttingReport,
    pub gir: GirReport,
    pub distances: DistanceReport,
    pub approach: Vec<ApproachRow>,
    pub par3: Vec<Par3Row>,
}

/// Run every metrics pass.
pub fn compute_all(
    dataset: &Dataset,
    index: &JoinIndex,
    rounds: &[DerivedRound],
    options: &MetricsOptions,
) -> MetricsReport {
    let dates = dataset.round_dates();

    let report = MetricsReport {
        putting: putting_report(&dataset.scorecards, rounds, options),
        gir: gir_report(&dataset.scorecards, index, options),
        distances: club_distances(&dataset.shots, &dataset.clubs, &dates, options),
        approach: approach_by_club(&dataset.shots, &dataset.clubs, &dates, options),
        par3: par3_by_club(index, &dataset.clubs, &dates, options),
    };

    tracing::info!(
        putting_rounds = report.putting.summary.rounds,
        gir_rounds = report.gir.rounds.len(),
        clubs = report.distances.clubs.len(),
        approach_rows = report.approach.len(),
        par3_rows = report.par3.len(),
        "Computed metrics"
    );

    report
}
