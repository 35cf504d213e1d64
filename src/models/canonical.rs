// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Canonical records, independent of decoder field naming.

use crate::models::raw::RawMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Round (scorecard) identifier shared by every source.
pub type RoundId = u64;

/// Message category of a decoded FIT message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    FileInfo,
    Course,
    Hole,
    Score,
    Shot,
}

/// Terrain a ball rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lie {
    Fairway,
    Green,
    Rough,
    /// Anything else (tee, bunker, water, unspecified).
    Other,
}

impl Lie {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fairway" => Lie::Fairway,
            "green" => Lie::Green,
            "rough" => Lie::Rough,
            _ => Lie::Other,
        }
    }
}

/// Tee-shot fairway result recorded on a score message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairwayOutcome {
    Left,
    Right,
    Hit,
    /// A code or label with no known meaning, kept verbatim.
    Unmapped(String),
}

impl FairwayOutcome {
    /// Decode either the numeric code (0/1/2) or its string form.
    pub fn decode(value: &Value) -> Option<Self> {
        let outcome = match value {
            Value::Number(n) => match n.as_i64() {
                Some(0) => FairwayOutcome::Left,
                Some(1) => FairwayOutcome::Right,
                Some(2) => FairwayOutcome::Hit,
                _ => FairwayOutcome::Unmapped(n.to_string()),
            },
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "" => return None,
                "0" | "left" => FairwayOutcome::Left,
                "1" | "right" => FairwayOutcome::Right,
                "2" | "hit" => FairwayOutcome::Hit,
                _ => FairwayOutcome::Unmapped(s.trim().to_string()),
            },
            _ => return None,
        };
        Some(outcome)
    }
}

/// A position in FIT semicircles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub lat: i64,
    pub long: i64,
}

impl Position {
    const SEMICIRCLES_TO_DEGREES: f64 = 180.0 / 2_147_483_648.0;

    pub fn lat_degrees(&self) -> f64 {
        self.lat as f64 * Self::SEMICIRCLES_TO_DEGREES
    }

    pub fn long_degrees(&self) -> f64 {
        self.long as f64 * Self::SEMICIRCLES_TO_DEGREES
    }
}

/// File creation and device metadata (not consumed downstream).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub serial_number: Option<u64>,
    pub time_created: Option<String>,
    /// Every field as decoded.
    pub fields: RawMessage,
}

/// Golf course header message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: Option<u64>,
    pub name: String,
    pub out_par: Option<u32>,
    pub in_par: Option<u32>,
    pub total_par: Option<u32>,
    pub rating: Option<f64>,
    pub slope: Option<u32>,
}

/// Per-hole layout record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub round_id: RoundId,
    pub hole_number: u32,
    /// Meters
    pub distance: Option<f64>,
    pub par: Option<u32>,
    pub handicap: Option<u32>,
    pub position: Option<Position>,
}

/// Per-hole score record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub round_id: RoundId,
    pub hole_number: u32,
    pub strokes: Option<u32>,
    pub putts: Option<u32>,
    pub fairway_outcome: Option<FairwayOutcome>,
    pub penalties: Option<u32>,
}

/// One recorded shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub round_id: RoundId,
    pub hole_number: u32,
    pub shot_order: Option<u32>,
    /// Epoch milliseconds, or the decoder's raw numeric timestamp.
    pub shot_time: Option<i64>,
    /// `Some(0)` is the explicit "unknown club"; `None` means not recorded.
    pub club_id: Option<u64>,
    pub start_lie: Option<Lie>,
    pub end_lie: Option<Lie>,
    pub start_position: Option<Position>,
    pub end_position: Option<Position>,
    pub meters: Option<f64>,
    pub yards: Option<f64>,
}

/// Longest carry accepted as a real shot; larger values are device sentinels.
pub const MAX_CARRY_METERS: f64 = 1000.0;

impl Shot {
    /// Carry distance in meters, converting from yards when only yards exist.
    pub fn carry_meters(&self) -> Option<f64> {
        self.meters
            .or_else(|| self.yards.map(|y| y * crate::models::METERS_PER_YARD))
            .filter(|d| d.is_finite() && (0.0..=MAX_CARRY_METERS).contains(d))
    }
}
