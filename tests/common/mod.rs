// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use golf_analytics::config::Config;
use golf_analytics::models::{Club, ClubRegistry, ClubType, Scorecard, Shot};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Club ids used across the fixtures.
#[allow(dead_code)]
pub const DRIVER: u64 = 101;
#[allow(dead_code)]
pub const SEVEN_IRON: u64 = 107;
#[allow(dead_code)]
pub const SAND_WEDGE: u64 = 112;
#[allow(dead_code)]
pub const PUTTER: u64 = 123;

/// Wrap records in a `{version, type, data}` export envelope.
#[allow(dead_code)]
pub fn envelope(kind: &str, data: Value) -> Value {
    json!({"version": "1.0", "type": kind, "data": data})
}

/// Build a scorecard from `(hole number, strokes, putts)` triples.
#[allow(dead_code)]
pub fn scorecard(id: u64, date: &str, holes: &[(u32, u32, u32)]) -> Scorecard {
    let holes: Vec<Value> = holes
        .iter()
        .map(|(number, strokes, putts)| json!({"number": number, "strokes": strokes, "putts": putts}))
        .collect();
    serde_json::from_value(json!({
        "id": id,
        "formattedStartTime": date,
        "holesCompleted": holes.len(),
        "courseGlobalId": 9001,
        "holes": holes
    }))
    .expect("valid scorecard fixture")
}

#[allow(dead_code)]
pub fn club_registry() -> ClubRegistry {
    let club = |id: u64, type_id: u32| Club {
        id,
        name: None,
        club_type_id: type_id,
        model: None,
        retired: false,
        deleted: false,
    };
    let kind = |id: u32, name: &str| ClubType {
        id,
        name: name.to_string(),
    };
    ClubRegistry::new(
        vec![club(DRIVER, 1), club(SEVEN_IRON, 7), club(SAND_WEDGE, 12), club(PUTTER, 23)],
        vec![kind(1, "Driver"), kind(7, "7 Iron"), kind(12, "Sand Wedge"), kind(23, "Putter")],
    )
}

/// A shot from `start` to `end` lie with the given carry.
#[allow(dead_code)]
pub fn shot(round: u64, hole: u32, order: u32, club: Option<u64>, start: &str, end: &str, meters: f64) -> Shot {
    let mut raw = json!({
        "scorecardId": round,
        "holeNumber": hole,
        "shotOrder": order,
        "startLoc": {"lie": start},
        "endLoc": {"lie": end},
        "meters": meters
    });
    if let Some(club) = club {
        raw["clubId"] = json!(club);
    }
    let message = golf_analytics::models::RawMessage::from_json_object(
        raw.as_object().expect("shot fixture is an object"),
    );
    golf_analytics::services::normalizer::normalize_shot(&message, None).expect("valid shot fixture")
}

/// A DI-GOLF export directory in a temp dir.
#[allow(dead_code)]
pub struct ExportFixture {
    dir: TempDir,
}

#[allow(dead_code)]
impl ExportFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(path, contents).expect("write fixture");
    }

    pub fn write_json(&self, relative: &str, value: &Value) {
        self.write(relative, &serde_json::to_string_pretty(value).expect("fixture json"));
    }

    /// Config pointing at this export, writing into `<root>/out`.
    pub fn config(&self) -> Config {
        Config {
            data_dir: self.root().to_path_buf(),
            output_dir: self.root().join("out"),
            ..Config::default()
        }
    }

    /// Two 18-hole rounds (ids 1001 and 1002), clubs, shots, one decoded
    /// document per round and a curated par map for round 1001.
    pub fn standard() -> Self {
        let fixture = Self::new();

        let pars: Vec<u32> = vec![4, 3, 5, 4, 4, 3, 4, 5, 4, 4, 3, 5, 4, 4, 3, 4, 5, 4];
        let round = |id: u64, date: &str, putts: u32| {
            let holes: Vec<Value> = pars
                .iter()
                .enumerate()
                .map(|(i, par)| json!({"number": i + 1, "strokes": par + putts - 2, "putts": putts}))
                .collect();
            json!({
                "id": id,
                "startTime": date,
                "formattedStartTime": date,
                "holesCompleted": 18,
                "excludeFromStats": false,
                "courseGlobalId": 9001,
                "strokes": 72,
                "holes": holes
            })
        };
        fixture.write_json(
            "Golf-SCORECARD.json",
            &envelope(
                "SCORECARD",
                json!([round(1001, "2024-05-04T08:00:00", 2), round(1002, "2024-06-15T09:30:00", 1)]),
            ),
        );

        fixture.write_json(
            "Golf-CLUB.json",
            &envelope(
                "CLUB",
                json!([
                    {"id": DRIVER, "clubTypeId": 1, "model": "Stealth"},
                    {"id": SEVEN_IRON, "clubTypeId": 7},
                    {"id": SAND_WEDGE, "clubTypeId": 12, "name": "SW"},
                    {"id": PUTTER, "clubTypeId": 23},
                    {"id": 199, "clubTypeId": 7, "retired": true}
                ]),
            ),
        );
        fixture.write_json(
            "Golf-CLUB_TYPES.json",
            &envelope(
                "CLUB_TYPES",
                json!([
                    {"value": 1, "name": "Driver"},
                    {"value": 7, "name": "7 Iron"},
                    {"value": 12, "name": "Sand Wedge"},
                    {"value": 23, "name": "Putter"}
                ]),
            ),
        );

        fixture.write_json(
            "Golf-SHOT.json",
            &envelope(
                "SHOT",
                json!([
                    {"scorecardId": 1001, "holeNumber": 1, "shotOrder": 1, "clubId": DRIVER,
                     "startLoc": {"lie": "TeeBox"}, "endLoc": {"lie": "Fairway"}, "meters": 230.0},
                    {"scorecardId": 1001, "holeNumber": 1, "shotOrder": 2, "clubId": SEVEN_IRON,
                     "startLoc": {"lie": "Fairway"}, "endLoc": {"lie": "Green"}, "meters": 140.0},
                    {"scorecardId": 1001, "holeNumber": 2, "shotOrder": 1, "clubId": SEVEN_IRON,
                     "startLoc": {"lie": "TeeBox"}, "endLoc": {"lie": "Green"}, "meters": 150.0},
                    {"scorecardId": 1001, "holeNumber": 3, "shotOrder": 2, "clubId": 0,
                     "startLoc": {"lie": "Fairway"}, "endLoc": {"lie": "Rough"}, "meters": 180.0},
                    {"scorecardId": 1001, "holeNumber": 3, "shotOrder": 3,
                     "startLoc": {"lie": "Fairway"}, "endLoc": {"lie": "Green"}, "meters": 60.0},
                    {"scorecardId": 1002, "holeNumber": 2, "shotOrder": 1, "clubId": SAND_WEDGE,
                     "startLoc": {"lie": "TeeBox"}, "endLoc": {"lie": "Green"}, "meters": 95.0},
                    {"scorecardId": 1002, "holeNumber": 4, "shotOrder": 2, "clubId": PUTTER,
                     "startLoc": {"lie": "Fairway"}, "endLoc": {"lie": "Green"}, "meters": 20.0},
                    {"holeNumber": 5, "shotOrder": 1, "clubId": DRIVER, "meters": 240.0}
                ]),
            ),
        );

        let par_objects: Vec<Value> = pars
            .iter()
            .enumerate()
            .map(|(i, par)| json!({"hole_number": i + 1, "par": par}))
            .collect();
        fixture.write_json(
            "fit-json/Golf-SCORECARD_RAWDATA-1002.json",
            &json!({
                "golf_course": [{"name": "Lincoln Park", "total_par": 72}],
                "holes": par_objects,
                "records": [{"heart_rate": 90}, {"heart_rate": 110}],
                "sessions": [{"total_distance": 6123.0}]
            }),
        );
        fixture.write(
            "fit-csv/Golf-SCORECARD_RAWDATA-1001.csv",
            "Type,Local Number,Message,Field 1,Value 1,Units 1,Field 2,Value 2,Units 2\n\
             Data,0,golf_course,name,Lincoln Park,,total par,72,\n\
             Data,1,record,heart_rate,100,bpm,,,\n",
        );

        let curated: serde_json::Map<String, Value> = pars
            .iter()
            .enumerate()
            .map(|(i, par)| ((i + 1).to_string(), json!(par)))
            .collect();
        fixture.write_json(
            "derived/hole-pars/Golf-SCORECARD_RAWDATA-1001.json",
            &Value::Object(curated),
        );

        fixture
    }
}
