// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Par-3 tee shot accuracy by club.

use crate::models::canonical::RoundId;
use crate::models::club::{ClubRegistry, UNKNOWN_CLUB_ID};
use crate::services::joiner::{resolve_club, ClubResolution, JoinIndex};
use crate::services::metrics::{pct, MetricsOptions, UNKNOWN_CLUB_LABEL};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Par3Row {
    pub club: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub club_id: u64,
    pub model: Option<String>,
    pub total: u32,
    pub gir: u32,
    pub pct: f64,
}

/// On a par 3 the green is hit in regulation when at most one stroke
/// precedes the putts.
fn is_par3_gir(strokes: u32, putts: u32) -> bool {
    i64::from(strokes) - i64::from(putts) <= 1
}

/// GIR rate on par-3 holes grouped by the club of the first tee shot.
pub fn par3_by_club(
    index: &JoinIndex,
    clubs: &ClubRegistry,
    dates: &HashMap<RoundId, NaiveDate>,
    options: &MetricsOptions,
) -> Vec<Par3Row> {
    let mut by_club: BTreeMap<u64, Par3Row> = BTreeMap::new();

    for (key, shot) in index.first_tee_shots() {
        if index.par(key) != Some(3) || !options.admits_round(key.0, dates) {
            continue;
        }
        let Some((strokes, putts)) = index.score_putts(key).complete() else {
            continue;
        };

        let (club_id, label, model) = match resolve_club(shot.club_id, clubs) {
            ClubResolution::NotRecorded | ClubResolution::Excluded => continue,
            ClubResolution::Unknown => (UNKNOWN_CLUB_ID, UNKNOWN_CLUB_LABEL.to_string(), None),
            ClubResolution::Known(club) => (club.id, clubs.label(club), club.model.clone()),
        };
        let row = by_club.entry(club_id).or_insert_with(|| Par3Row {
            club: label,
            club_id,
            model,
            total: 0,
            gir: 0,
            pct: 0.0,
        });
        row.total += 1;
        if is_par3_gir(strokes, putts) {
            row.gir += 1;
        }
    }

    let mut rows: Vec<Par3Row> = by_club
        .into_values()
        .map(|mut row| {
            row.pct = pct(row.gir, row.total);
            row
        })
        .collect();

    rows.sort_by(|a, b| b.pct.total_cmp(&a.pct).then(b.total.cmp(&a.total)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::RoundActivity;
    use crate::models::canonical::{Hole, Shot};
    use crate::models::dataset::Dataset;
    use crate::models::export::{Club, ClubType, Scorecard};

    fn tee_shot(hole: u32, order: u32, club: Option<u64>) -> Shot {
        Shot {
            round_id: 3,
            hole_number: hole,
            shot_order: Some(order),
            shot_time: None,
            club_id: club,
            start_lie: None,
            end_lie: None,
            start_position: None,
            end_position: None,
            meters: None,
            yards: None,
        }
    }

    fn dataset(shots: Vec<Shot>) -> Dataset {
        let holes = [(1, 3), (2, 4), (3, 3), (4, 3)]
            .into_iter()
            .map(|(number, par)| Hole {
                round_id: 3,
                hole_number: number,
                distance: None,
                par: Some(par),
                handicap: None,
                position: None,
            })
            .collect();
        let scorecard: Scorecard = serde_json::from_value(serde_json::json!({
            "id": 3,
            "holes": [
                {"number": 1, "strokes": 3, "putts": 2},
                {"number": 2, "strokes": 4, "putts": 2},
                {"number": 3, "strokes": 4, "putts": 2},
                {"number": 4, "strokes": 3}
            ]
        }))
        .unwrap();
        Dataset {
            scorecards: vec![scorecard],
            shots,
            clubs: ClubRegistry::new(
                vec![Club {
                    id: 5,
                    name: None,
                    club_type_id: 8,
                    model: None,
                    retired: false,
                    deleted: false,
                }],
                vec![ClubType { id: 8, name: "8 Iron".to_string() }],
            ),
            activities: vec![RoundActivity {
                round_id: 3,
                holes,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn only_first_tee_shot_on_par_threes() {
        let ds = dataset(vec![
            tee_shot(1, 2, Some(0)),
            tee_shot(1, 1, Some(5)),
            tee_shot(2, 1, Some(5)),
            tee_shot(3, 1, Some(5)),
            tee_shot(4, 1, Some(5)),
        ]);
        let index = JoinIndex::build(&ds);
        let rows = par3_by_club(&index, &ds.clubs, &HashMap::new(), &MetricsOptions::default());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].club, "8 Iron");
        assert_eq!((rows[0].total, rows[0].gir), (2, 1));
        assert_eq!(rows[0].pct, 50.0);
    }

    #[test]
    fn unknown_bucket_and_sorting() {
        let ds = dataset(vec![tee_shot(1, 1, Some(0)), tee_shot(3, 1, Some(5)), tee_shot(4, 1, None)]);
        let index = JoinIndex::build(&ds);
        let rows = par3_by_club(&index, &ds.clubs, &HashMap::new(), &MetricsOptions::default());

        let order: Vec<_> = rows.iter().map(|r| r.club.as_str()).collect();
        assert_eq!(order, vec![UNKNOWN_CLUB_LABEL, "8 Iron"]);
        assert_eq!(rows[0].pct, 100.0);
        assert_eq!(rows[1].pct, 0.0);
    }
}
