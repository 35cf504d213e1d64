// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Club carry distances: percentile-trimmed statistics and histograms on
//! a shared axis.

use crate::models::canonical::{RoundId, Shot};
use crate::models::club::ClubRegistry;
use crate::services::metrics::{percentile, DistanceUnits, MetricsOptions, PercentileRange};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Histogram bin width, in output units.
pub const BIN_SIZE: f64 = 0.5;

/// Percentile used for a wedge's full-swing distance.
pub const FULL_SWING_PERCENTILE: f64 = 0.9;

/// Inclusive distance bounds computed from one club's samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimBounds {
    pub low: f64,
    pub high: f64,
}

impl TrimBounds {
    pub fn from_samples(samples: &[f64], range: &PercentileRange) -> Self {
        Self {
            low: percentile(samples, range.low() / 100.0),
            high: percentile(samples, range.high() / 100.0),
        }
    }

    /// Samples within the bounds, in input order.
    pub fn apply(&self, samples: &[f64]) -> Vec<f64> {
        samples
            .iter()
            .copied()
            .filter(|d| *d >= self.low && *d <= self.high)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ClubDistanceRow {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub club_id: u64,
    pub label: String,
    pub model: Option<String>,
    pub type_name: Option<String>,
    pub p_low: f64,
    pub p_high: f64,
    pub average: f64,
    pub max: f64,
    /// Counts per [`BIN_SIZE`] bin over `0..axis_max`
    pub histogram: Vec<u32>,
    pub is_wedge: bool,
    pub full_swing: Option<f64>,
    /// Shots left after trimming
    pub shots: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct DistanceReport {
    pub units: DistanceUnits,
    pub bin_size: f64,
    /// Largest trimmed distance over every club
    pub axis_max: f64,
    /// Sorted by trimmed average, longest first
    pub clubs: Vec<ClubDistanceRow>,
}

impl Default for DistanceReport {
    fn default() -> Self {
        Self {
            units: DistanceUnits::Meters,
            bin_size: BIN_SIZE,
            axis_max: 0.0,
            clubs: Vec::new(),
        }
    }
}

/// Upper bound on histogram length; covers
/// [`MAX_CARRY_METERS`](crate::models::canonical::MAX_CARRY_METERS) in yards.
pub const MAX_BINS: usize = 4096;

/// Number of bins needed to cover `0..=axis_max`, at most [`MAX_BINS`].
pub fn bin_count(axis_max: f64) -> usize {
    let bins = (axis_max.max(0.0).ceil() / BIN_SIZE).ceil();
    if bins.is_finite() {
        (bins as usize).clamp(1, MAX_BINS)
    } else {
        MAX_BINS
    }
}

/// Bin counts for `samples` on an axis shared by every club.
pub fn histogram(samples: &[f64], axis_max: f64) -> Vec<u32> {
    let bins = bin_count(axis_max);
    let mut counts = vec![0; bins];
    for d in samples {
        let idx = (d.clamp(0.0, axis_max.max(0.0)) / BIN_SIZE).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }
    counts
}

/// Per-club distance rows.
///
/// Only eligible, registered clubs contribute; the unknown club and
/// shots without a carry distance are skipped. Distances are converted
/// to the output units before trimming.
pub fn club_distances(
    shots: &[Shot],
    clubs: &ClubRegistry,
    dates: &HashMap<RoundId, NaiveDate>,
    options: &MetricsOptions,
) -> DistanceReport {
    let mut samples: BTreeMap<u64, Vec<f64>> = BTreeMap::new();
    for shot in shots.iter().filter(|s| options.admits_round(s.round_id, dates)) {
        let (Some(club_id), Some(meters)) = (shot.club_id, shot.carry_meters()) else {
            continue;
        };
        if clubs.eligible(club_id).is_none() {
            continue;
        }
        samples
            .entry(club_id)
            .or_default()
            .push(options.units.from_meters(meters));
    }

    let trimmed: Vec<(u64, TrimBounds, Vec<f64>)> = samples
        .into_iter()
        .filter_map(|(club_id, values)| {
            let bounds = TrimBounds::from_samples(&values, &options.percentiles);
            let kept = bounds.apply(&values);
            (!kept.is_empty()).then_some((club_id, bounds, kept))
        })
        .collect();

    let axis_max = trimmed
        .iter()
        .flat_map(|(_, _, kept)| kept.iter().copied())
        .fold(0.0, f64::max);

    let mut rows: Vec<ClubDistanceRow> = trimmed
        .into_iter()
        .filter_map(|(club_id, bounds, kept)| {
            let club = clubs.get(club_id)?;
            let is_wedge = clubs.is_wedge(club);
            Some(ClubDistanceRow {
                club_id,
                label: clubs.label(club),
                model: club.model.clone(),
                type_name: clubs.type_name(club.club_type_id).map(str::to_string),
                p_low: bounds.low,
                p_high: bounds.high,
                average: kept.iter().sum::<f64>() / kept.len() as f64,
                max: kept.iter().copied().fold(f64::MIN, f64::max),
                histogram: histogram(&kept, axis_max),
                is_wedge,
                full_swing: is_wedge.then(|| percentile(&kept, FULL_SWING_PERCENTILE)),
                shots: kept.len() as u32,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.average.total_cmp(&a.average));

    tracing::debug!(clubs = rows.len(), axis_max, "Computed club distances");

    DistanceReport {
        units: options.units,
        bin_size: BIN_SIZE,
        axis_max,
        clubs: rows,
    }
}
