// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Greens in regulation per round.

use crate::models::canonical::RoundId;
use crate::models::dataset::scorecard_date;
use crate::models::export::Scorecard;
use crate::services::joiner::JoinIndex;
use crate::services::metrics::{pct, GirThreshold, MetricsOptions};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A hole is a GIR when the strokes before putting are at most par - 2.
pub fn is_gir(strokes: u32, putts: u32, par: u32) -> bool {
    i64::from(strokes) - i64::from(putts) <= i64::from(par) - 2
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct GirRoundRow {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub scorecard_id: RoundId,
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub course_global_id: Option<u64>,
    pub course_name: Option<String>,
    pub date: String,
    /// Holes with par, strokes and putts all known
    pub holes_considered: u32,
    pub gir_holes: u32,
    pub gir_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct GirReport {
    /// Rounds meeting the configured minimum, by scorecard id
    pub rounds: Vec<GirRoundRow>,
    /// Totals over every round with at least one complete hole
    pub holes_considered: u32,
    pub gir_holes: u32,
    pub gir_pct: f64,
}

/// GIR counts per scorecard round.
///
/// Holes missing par, strokes or putts count toward neither side. Rounds
/// on ignored courses, outside the date range, or below `threshold`
/// complete holes are left out.
pub fn gir_per_round(
    scorecards: &[Scorecard],
    index: &JoinIndex,
    options: &MetricsOptions,
    threshold: GirThreshold,
) -> Vec<GirRoundRow> {
    let dates: HashMap<RoundId, NaiveDate> = scorecards
        .iter()
        .filter_map(|sc| scorecard_date(sc).map(|d| (sc.id, d)))
        .collect();

    let mut rows: Vec<GirRoundRow> = scorecards
        .iter()
        .filter(|sc| {
            sc.course_global_id
                .is_none_or(|id| !options.ignored_courses.contains(&id))
        })
        .filter(|sc| options.admits_round(sc.id, &dates))
        .filter_map(|sc| {
            let (holes_considered, gir_holes) = count_round(sc, index);
            (holes_considered >= threshold.min_holes()).then(|| GirRoundRow {
                scorecard_id: sc.id,
                course_global_id: sc.course_global_id,
                course_name: sc
                    .course_global_id
                    .and_then(|id| index.course_name(id))
                    .map(str::to_string),
                date: sc.date_label(),
                holes_considered,
                gir_holes,
                gir_pct: pct(gir_holes, holes_considered),
            })
        })
        .collect();

    rows.sort_by_key(|r| r.scorecard_id);
    rows
}

/// `(complete holes, GIR holes)` for one round.
fn count_round(scorecard: &Scorecard, index: &JoinIndex) -> (u32, u32) {
    let mut considered = 0;
    let mut gir = 0;
    for hole in &scorecard.holes {
        let key = (scorecard.id, hole.number);
        let Some(par) = index.par(key) else {
            continue;
        };
        let Some((strokes, putts)) = index.score_putts(key).complete() else {
            continue;
        };
        considered += 1;
        if is_gir(strokes, putts, par) {
            gir += 1;
        }
    }
    (considered, gir)
}

pub fn gir_report(scorecards: &[Scorecard], index: &JoinIndex, options: &MetricsOptions) -> GirReport {
    let all = gir_per_round(scorecards, index, options, GirThreshold::AnyHole);
    let holes_considered = all.iter().map(|r| r.holes_considered).sum();
    let gir_holes = all.iter().map(|r| r.gir_holes).sum();

    GirReport {
        rounds: gir_per_round(scorecards, index, options, options.gir_threshold),
        holes_considered,
        gir_holes,
        gir_pct: pct(gir_holes, holes_considered),
    }
}
