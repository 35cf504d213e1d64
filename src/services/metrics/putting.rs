// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Putts per round, the putting summary and the putts-per-hole distribution.

use crate::models::canonical::RoundId;
use crate::models::dataset::scorecard_date;
use crate::models::derived::DerivedRound;
use crate::models::export::Scorecard;
use crate::services::metrics::MetricsOptions;
use crate::time_utils::parse_export_datetime;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Fewer putts than this many per hole marks a round as implausible.
pub const MIN_PUTTS_PER_HOLE: f64 = 0.8;

/// One point of a putts-per-round series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct PuttingRound {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: RoundId,
    pub date: String,
    pub holes_count: Option<u32>,
    pub exclude_from_stats: bool,
    pub putts: u32,
}

/// Aggregates over the rounds that pass every summary filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct PuttingSummary {
    pub rounds: u32,
    pub total_putts: u32,
    pub holes: u32,
    pub avg_per_round: f64,
    pub avg_per_hole: f64,
}

/// Holes by putt count: 0 or 1, 2, 3, 4 or more.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct PuttDistribution {
    pub one: u32,
    pub two: u32,
    pub three: u32,
    pub four_plus: u32,
}

impl PuttDistribution {
    pub fn add(&mut self, putts: u32) {
        match putts {
            0 | 1 => self.one += 1,
            2 => self.two += 1,
            3 => self.three += 1,
            _ => self.four_plus += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct PuttingReport {
    /// Every round, oldest first
    pub series: Vec<PuttingRound>,
    /// Putts on GIR holes per round, oldest first
    pub gir_series: Vec<PuttingRound>,
    /// Rounds that count toward the summary, oldest first
    pub included: Vec<PuttingRound>,
    pub summary: PuttingSummary,
    pub distribution: PuttDistribution,
}

/// Total putts per scorecard round.
pub fn putts_per_round(scorecards: &[Scorecard]) -> Vec<PuttingRound> {
    let series = scorecards
        .iter()
        .map(|sc| PuttingRound {
            id: sc.id,
            date: sc.date_label(),
            holes_count: Some(sc.holes_count()),
            exclude_from_stats: sc.exclude_from_stats,
            putts: sc.holes.iter().filter_map(|h| h.putts).sum(),
        })
        .collect();
    sorted_by_date(series)
}

/// Putts on GIR holes per derived round.
pub fn gir_putt_series(rounds: &[DerivedRound]) -> Vec<PuttingRound> {
    let series = rounds
        .iter()
        .map(|r| PuttingRound {
            id: r.id,
            date: r.date.clone(),
            holes_count: r.holes_completed,
            exclude_from_stats: r.exclude_from_stats,
            putts: r
                .holes
                .iter()
                .filter(|h| h.gir == Some(true))
                .filter_map(|h| h.putts)
                .sum(),
        })
        .collect();
    sorted_by_date(series)
}

/// Ascending by parsed date label. Unparseable labels sort last, stably.
fn sorted_by_date(mut series: Vec<PuttingRound>) -> Vec<PuttingRound> {
    series.sort_by_key(|r| {
        let parsed = parse_export_datetime(&r.date);
        (parsed.is_none(), parsed)
    });
    series
}

/// Plausibility: not excluded, a 9 or 18 hole round, and at least
/// [`MIN_PUTTS_PER_HOLE`] putts per hole.
pub fn is_plausible(round: &PuttingRound) -> bool {
    if round.exclude_from_stats {
        return false;
    }
    let holes = round.holes_count.unwrap_or(0);
    if holes != 9 && holes != 18 {
        return false;
    }
    f64::from(round.putts) >= f64::from(holes) * MIN_PUTTS_PER_HOLE
}

pub fn summarize(rounds: &[PuttingRound]) -> PuttingSummary {
    let count = rounds.len() as u32;
    let total_putts: u32 = rounds.iter().map(|r| r.putts).sum();
    let holes: u32 = rounds.iter().filter_map(|r| r.holes_count).sum();

    PuttingSummary {
        rounds: count,
        total_putts,
        holes,
        avg_per_round: if count == 0 { 0.0 } else { f64::from(total_putts) / f64::from(count) },
        avg_per_hole: if holes == 0 { 0.0 } else { f64::from(total_putts) / f64::from(holes) },
    }
}

pub fn putting_report(
    scorecards: &[Scorecard],
    rounds: &[DerivedRound],
    options: &MetricsOptions,
) -> PuttingReport {
    let series = putts_per_round(scorecards);
    let dates: HashMap<RoundId, NaiveDate> = scorecards
        .iter()
        .filter_map(|sc| scorecard_date(sc).map(|d| (sc.id, d)))
        .collect();

    let included: Vec<PuttingRound> = series
        .iter()
        .filter(|r| options.admits_round(r.id, &dates))
        .filter(|r| is_plausible(r))
        .filter(|r| options.round_length.accepts(r.holes_count.unwrap_or(0)))
        .cloned()
        .collect();

    let included_ids: HashSet<RoundId> = included.iter().map(|r| r.id).collect();
    let mut distribution = PuttDistribution::default();
    for sc in scorecards.iter().filter(|sc| included_ids.contains(&sc.id)) {
        sc.holes
            .iter()
            .filter_map(|h| h.putts)
            .for_each(|p| distribution.add(p));
    }

    PuttingReport {
        summary: summarize(&included),
        gir_series: gir_putt_series(rounds),
        series,
        included,
        distribution,
    }
}
