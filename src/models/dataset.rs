// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Immutable snapshot of every loaded source for one batch run.

use crate::models::activity::RoundActivity;
use crate::models::canonical::{RoundId, Shot};
use crate::models::club::ClubRegistry;
use crate::models::export::Scorecard;
use crate::time_utils::parse_export_datetime;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Per-round curated par maps (`hole number -> par`).
pub type CuratedPars = BTreeMap<RoundId, BTreeMap<u32, u32>>;

/// All sources, loaded once and read by every join and metrics pass.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub scorecards: Vec<Scorecard>,
    /// Shots from the shot export, in file order
    pub shots: Vec<Shot>,
    pub clubs: ClubRegistry,
    /// Normalized decoder output, one entry per decoded document
    pub activities: Vec<RoundActivity>,
    pub curated_pars: CuratedPars,
}

impl Dataset {
    /// Start date of each scorecard round that has a parseable timestamp.
    pub fn round_dates(&self) -> HashMap<RoundId, NaiveDate> {
        self.scorecards
            .iter()
            .filter_map(|sc| scorecard_date(sc).map(|d| (sc.id, d)))
            .collect()
    }

    /// First decoded activity for a round.
    pub fn activity(&self, round_id: RoundId) -> Option<&RoundActivity> {
        self.activities.iter().find(|a| a.round_id == round_id)
    }
}

/// Parsed start date: formatted start time, then start time.
pub fn scorecard_date(scorecard: &Scorecard) -> Option<NaiveDate> {
    [
        scorecard.formatted_start_time.as_deref(),
        scorecard.start_time.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.trim().is_empty())
    .map(parse_export_datetime)
    .next()
    .flatten()
    .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formatted_start_time_wins() {
        let sc: Scorecard = serde_json::from_value(json!({
            "id": 1,
            "startTime": "2024-04-30T23:30:00Z",
            "formattedStartTime": "2024-05-01T01:30:00"
        }))
        .unwrap();
        assert_eq!(scorecard_date(&sc), NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn unparseable_label_yields_no_date() {
        let sc: Scorecard = serde_json::from_value(json!({
            "id": 1,
            "formattedStartTime": "last tuesday",
            "startTime": "2024-05-01T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(scorecard_date(&sc), None);

        let dataset = Dataset {
            scorecards: vec![sc],
            ..Default::default()
        };
        assert!(dataset.round_dates().is_empty());
    }
}
