// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Where approach shots from the fairway finish, by club.

use crate::models::canonical::{Lie, RoundId, Shot};
use crate::models::club::{ClubRegistry, UNKNOWN_CLUB_ID};
use crate::services::joiner::{resolve_club, ClubResolution};
use crate::services::metrics::{pct, MetricsOptions, UNKNOWN_CLUB_LABEL};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ApproachRow {
    pub club: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub club_id: u64,
    pub model: Option<String>,
    pub total: u32,
    pub green: u32,
    pub fairway: u32,
    /// Rough, bunker, water or no recorded end lie
    pub other: u32,
    pub green_pct: f64,
    pub fairway_pct: f64,
}

impl ApproachRow {
    fn new(club: String, club_id: u64, model: Option<String>) -> Self {
        Self {
            club,
            club_id,
            model,
            total: 0,
            green: 0,
            fairway: 0,
            other: 0,
            green_pct: 0.0,
            fairway_pct: 0.0,
        }
    }

    fn record(&mut self, end_lie: Option<Lie>) {
        self.total += 1;
        match end_lie {
            Some(Lie::Green) => self.green += 1,
            Some(Lie::Fairway) => self.fairway += 1,
            _ => self.other += 1,
        }
    }
}

/// Outcome counts for shots starting on the fairway.
///
/// Club id 0 is reported as its own "unknown" row. Shots with no club
/// recorded, and clubs that are unregistered, retired, deleted or the
/// putter, produce no row.
pub fn approach_by_club(
    shots: &[Shot],
    clubs: &ClubRegistry,
    dates: &HashMap<RoundId, NaiveDate>,
    options: &MetricsOptions,
) -> Vec<ApproachRow> {
    let mut by_club: BTreeMap<u64, ApproachRow> = BTreeMap::new();

    for shot in shots
        .iter()
        .filter(|s| s.start_lie == Some(Lie::Fairway))
        .filter(|s| options.admits_round(s.round_id, dates))
    {
        let row = match resolve_club(shot.club_id, clubs) {
            ClubResolution::NotRecorded | ClubResolution::Excluded => continue,
            ClubResolution::Unknown => by_club.entry(UNKNOWN_CLUB_ID).or_insert_with(|| {
                ApproachRow::new(UNKNOWN_CLUB_LABEL.to_string(), UNKNOWN_CLUB_ID, None)
            }),
            ClubResolution::Known(club) => by_club
                .entry(club.id)
                .or_insert_with(|| ApproachRow::new(clubs.label(club), club.id, club.model.clone())),
        };
        row.record(shot.end_lie);
    }

    let mut rows: Vec<ApproachRow> = by_club
        .into_values()
        .map(|mut row| {
            row.green_pct = pct(row.green, row.total);
            row.fairway_pct = pct(row.fairway, row.total);
            row
        })
        .collect();

    rows.sort_by(|a, b| {
        b.green_pct
            .total_cmp(&a.green_pct)
            .then(b.fairway_pct.total_cmp(&a.fairway_pct))
            .then(b.total.cmp(&a.total))
    });
    rows
}
