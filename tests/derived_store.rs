// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived rounds document persistence.

mod common;

use common::ExportFixture;
use golf_analytics::models::{DerivedHole, DerivedRound, DerivedRoundsFile, FitExtras, GirSummary};
use golf_analytics::services::store::{parse_rounds, read_rounds, write_rounds, ROUNDS_FILE};
use golf_analytics::services::{build_rounds, load_dataset, DataLayout, JoinIndex};
use std::collections::BTreeMap;
use std::fs;

fn sparse_round() -> DerivedRound {
    DerivedRound {
        id: 77,
        date: "77".to_string(),
        start_time: None,
        formatted_start_time: None,
        end_time: None,
        formatted_end_time: None,
        holes_completed: None,
        exclude_from_stats: true,
        course_global_id: None,
        strokes: None,
        steps_taken: None,
        distance_walked: Some(4321.5),
        holes: vec![DerivedHole {
            number: 1,
            putts: None,
            strokes: Some(7),
            penalties: Some(1),
            par: None,
            gir: None,
        }],
        fit: Some(FitExtras {
            has_fit: false,
            par_by_hole: Some(BTreeMap::from([(1, 4)])),
            ..Default::default()
        }),
        gir: Some(GirSummary::default()),
    }
}

#[test]
fn round_trip_is_lossless() {
    let fixture = ExportFixture::standard();
    let dataset = load_dataset(&DataLayout::new(fixture.root()));
    let index = JoinIndex::build(&dataset);
    let mut file = build_rounds(&dataset, &index);
    file.rounds.push(sparse_round());

    let path = fixture.root().join("out").join(ROUNDS_FILE);
    write_rounds(&path, &file).unwrap();
    assert_eq!(read_rounds(&path), file);
}

#[test]
fn averages_survive_write_and_read_bit_for_bit() {
    let fixture = ExportFixture::new();
    let path = fixture.root().join("out").join(ROUNDS_FILE);

    let mut rounds = Vec::new();
    for count in 3..=13u32 {
        for sum in (250..=1350u32).step_by(7) {
            let average = f64::from(sum) / f64::from(count);
            let mut round = sparse_round();
            round.id = u64::from(count) * 10_000 + u64::from(sum);
            round.distance_walked = Some(average * 37.0);
            round.fit = Some(FitExtras {
                has_fit: true,
                avg_heart_rate: Some(average),
                total_distance: Some(f64::from(sum) * 1000.0 / 7.0),
                ..Default::default()
            });
            round.gir = Some(GirSummary {
                holes: count,
                putts_total: sum,
                putts_average: Some(average),
            });
            rounds.push(round);
        }
    }
    let file = DerivedRoundsFile { rounds };
    assert_eq!(
        file.rounds[0].fit.as_ref().and_then(|f| f.avg_heart_rate),
        Some(250.0 / 3.0)
    );

    write_rounds(&path, &file).unwrap();
    let read = read_rounds(&path);
    assert_eq!(read.rounds.len(), file.rounds.len());
    for (before, after) in file.rounds.iter().zip(&read.rounds) {
        let bits = |r: &DerivedRound| {
            let fit = r.fit.as_ref().unwrap();
            (
                r.distance_walked.map(f64::to_bits),
                fit.avg_heart_rate.map(f64::to_bits),
                fit.total_distance.map(f64::to_bits),
                r.gir.as_ref().unwrap().putts_average.map(f64::to_bits),
            )
        };
        assert_eq!(bits(before), bits(after), "round {}", before.id);
    }
    assert_eq!(read, file);

    let heart_rate = 304.0 / 3.0;
    let mut single = sparse_round();
    single.fit.as_mut().unwrap().avg_heart_rate = Some(heart_rate);
    let json = serde_json::to_string(&DerivedRoundsFile { rounds: vec![single] }).unwrap();
    let parsed = parse_rounds(&json);
    let fit = parsed.rounds[0].fit.as_ref().unwrap();
    assert_eq!(fit.avg_heart_rate.map(f64::to_bits), Some(heart_rate.to_bits()));
}

#[test]
fn absent_optionals_are_omitted() {
    let file = DerivedRoundsFile {
        rounds: vec![sparse_round()],
    };
    let json = serde_json::to_string(&file).unwrap();

    assert!(json.contains("\"excludeFromStats\":true"));
    assert!(json.contains("\"distanceWalked\":4321.5"));
    assert!(json.contains("\"parByHole\":{\"1\":4}"));
    assert!(!json.contains("startTime"));
    assert!(!json.contains("putts\":null"));
    assert!(!json.contains("avgHeartRate"));
}

#[test]
fn mismatched_documents_read_as_empty() {
    let fixture = ExportFixture::new();
    fixture.write("scorecard.json", r#"{"version": "1", "type": "SCORECARD", "data": []}"#);
    fixture.write("truncated.json", r#"{"rounds": [{"id": 1, "date": "x""#);

    assert_eq!(
        read_rounds(&fixture.root().join("scorecard.json")),
        DerivedRoundsFile::default()
    );
    assert!(read_rounds(&fixture.root().join("truncated.json")).rounds.is_empty());
    assert!(parse_rounds("").rounds.is_empty());
    assert!(fs::metadata(fixture.root().join("missing.json")).is_err());
    assert!(read_rounds(&fixture.root().join("missing.json")).rounds.is_empty());
}
