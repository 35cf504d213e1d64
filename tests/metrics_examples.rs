// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Worked metric examples and properties, through the public API.

mod common;

use common::{club_registry, scorecard, shot, SAND_WEDGE, SEVEN_IRON};
use golf_analytics::models::dataset::CuratedPars;
use golf_analytics::models::Dataset;
use golf_analytics::services::metrics::putting::{is_plausible, putts_per_round, PuttingRound};
use golf_analytics::services::metrics::{
    approach_by_club, club_distances, gir_per_round, is_gir, percentile, GirThreshold,
    MetricsOptions, PercentileRange, TrimBounds, UNKNOWN_CLUB_LABEL,
};
use golf_analytics::services::JoinIndex;
use std::collections::{BTreeMap, HashMap};

fn curated(round: u64, pars: &[(u32, u32)]) -> CuratedPars {
    BTreeMap::from([(round, pars.iter().copied().collect())])
}

#[test]
fn gir_for_a_two_hole_round() {
    let dataset = Dataset {
        scorecards: vec![scorecard(1, "2024-05-01T08:00:00", &[(1, 4, 2), (2, 3, 1)])],
        curated_pars: curated(1, &[(1, 4), (2, 3)]),
        ..Default::default()
    };
    let index = JoinIndex::build(&dataset);

    assert!(is_gir(4, 2, 4));
    assert!(!is_gir(3, 1, 3));

    let rows = gir_per_round(
        &dataset.scorecards,
        &index,
        &MetricsOptions::default(),
        GirThreshold::AnyHole,
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].holes_considered, 2);
    assert_eq!(rows[0].gir_holes, 1);
    assert_eq!(rows[0].gir_pct, 50.0);
}

#[test]
fn gir_holes_missing_inputs_are_not_counted() {
    let mut card = scorecard(2, "2024-05-01T08:00:00", &[(1, 4, 2), (2, 3, 1), (3, 5, 2)]);
    card.holes[2].putts = None;
    let dataset = Dataset {
        scorecards: vec![card],
        curated_pars: curated(2, &[(1, 4), (3, 5)]),
        ..Default::default()
    };
    let index = JoinIndex::build(&dataset);

    let rows = gir_per_round(
        &dataset.scorecards,
        &index,
        &MetricsOptions::default(),
        GirThreshold::AnyHole,
    );
    assert_eq!(rows[0].holes_considered, 1);
    assert_eq!(rows[0].gir_holes, 1);

    let table = gir_per_round(
        &dataset.scorecards,
        &index,
        &MetricsOptions::default(),
        GirThreshold::HalfRound,
    );
    assert!(table.is_empty(), "one complete hole is below the round-table minimum");
}

#[test]
fn approach_green_rate_for_one_club() {
    let shots = vec![
        shot(1, 1, 2, Some(SEVEN_IRON), "Fairway", "Green", 140.0),
        shot(1, 2, 2, Some(SEVEN_IRON), "Fairway", "Bunker", 135.0),
        shot(1, 3, 2, Some(SEVEN_IRON), "Fairway", "Green", 150.0),
    ];
    let rows = approach_by_club(&shots, &club_registry(), &HashMap::new(), &MetricsOptions::default());

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].club, "7 Iron");
    assert_eq!(rows[0].total, 3);
    assert_eq!(rows[0].green, 2);
    assert_eq!(rows[0].other, 1);
    assert_eq!(rows[0].green_pct.round(), 67.0);
}

#[test]
fn distance_trim_drops_the_long_outlier() {
    let samples = [90.0, 95.0, 100.0, 102.0, 150.0];
    assert_eq!(percentile(&samples, 0.0), 90.0);
    assert!((percentile(&samples, 0.8) - 111.6).abs() < 1e-9);

    let shots: Vec<_> = samples
        .iter()
        .enumerate()
        .map(|(i, m)| shot(1, i as u32 + 1, 1, Some(SEVEN_IRON), "Fairway", "Green", *m))
        .collect();
    let options = MetricsOptions {
        percentiles: PercentileRange::clamped(0.0, 80.0),
        ..Default::default()
    };
    let report = club_distances(&shots, &club_registry(), &HashMap::new(), &options);

    assert_eq!(report.clubs.len(), 1);
    assert_eq!(report.clubs[0].average, 96.75);
    assert_eq!(report.clubs[0].shots, 4);
}

#[test]
fn implausible_nine_hole_round_is_excluded() {
    let round = PuttingRound {
        id: 1,
        date: "2024-05-01".to_string(),
        holes_count: Some(9),
        exclude_from_stats: false,
        putts: 5,
    };
    assert!(!is_plausible(&round));
}

#[test]
fn unknown_club_is_counted_and_absent_club_dropped() {
    let shots = vec![
        shot(1, 1, 2, Some(0), "Fairway", "Green", 120.0),
        shot(1, 2, 2, None, "Fairway", "Green", 120.0),
    ];
    let rows = approach_by_club(&shots, &club_registry(), &HashMap::new(), &MetricsOptions::default());

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].club, UNKNOWN_CLUB_LABEL);
    assert_eq!(rows[0].total, 1);
}

#[test]
fn round_putts_equal_sum_of_hole_putts() {
    let cards = vec![
        scorecard(1, "2024-05-01T08:00:00", &[(1, 4, 2), (2, 3, 1), (3, 6, 3)]),
        scorecard(2, "2024-05-02T08:00:00", &[(1, 5, 0)]),
    ];
    for (card, round) in cards.iter().zip(putts_per_round(&cards)) {
        let expected: u32 = card.holes.iter().filter_map(|h| h.putts).sum();
        assert_eq!(round.putts, expected);
    }
}

#[test]
fn gir_is_monotone_in_strokes() {
    for par in 3..=5 {
        for putts in 0..=4 {
            for strokes in 1..=12u32 {
                if is_gir(strokes, putts, par) {
                    assert!(is_gir(strokes - 1, putts, par), "par {par} putts {putts} strokes {strokes}");
                }
            }
        }
    }
}

#[test]
fn trimming_is_idempotent_for_fixed_bounds() {
    let samples = [40.0, 88.0, 91.5, 93.0, 97.0, 99.0, 250.0];
    for (low, high) in [(5.0, 98.0), (0.0, 80.0), (10.0, 90.0)] {
        let bounds = TrimBounds::from_samples(&samples, &PercentileRange::clamped(low, high));
        let once = bounds.apply(&samples);
        assert_eq!(bounds.apply(&once), once);
    }
}

#[test]
fn wedge_reports_full_swing_distance() {
    let shots: Vec<_> = [60.0, 70.0, 80.0, 90.0]
        .iter()
        .enumerate()
        .map(|(i, m)| shot(1, i as u32 + 1, 1, Some(SAND_WEDGE), "Fairway", "Green", *m))
        .collect();
    let options = MetricsOptions {
        percentiles: PercentileRange::clamped(0.0, 100.0),
        ..Default::default()
    };
    let report = club_distances(&shots, &club_registry(), &HashMap::new(), &options);

    let row = &report.clubs[0];
    assert!(row.is_wedge);
    assert!((row.full_swing.unwrap() - 87.0).abs() < 1e-9);
}
