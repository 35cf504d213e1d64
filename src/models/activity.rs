// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! A decoded activity file after normalization.

use crate::models::canonical::{Course, FileInfo, Hole, RoundId, Score, Shot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything recovered from one round's activity file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundActivity {
    /// Scorecard id recovered from the file name
    pub round_id: RoundId,
    pub file_info: Vec<FileInfo>,
    pub courses: Vec<Course>,
    pub holes: Vec<Hole>,
    pub scores: Vec<Score>,
    pub shots: Vec<Shot>,
    pub fitness: FitnessSummary,
    /// Pars found by scanning the whole document for `{hole, par}` objects
    pub scanned_pars: BTreeMap<u32, u32>,
}

impl RoundActivity {
    /// Course name from the first course message.
    pub fn course_name(&self) -> Option<&str> {
        self.courses.first().map(|c| c.name.as_str())
    }
}

/// Heart rate and distance aggregates from record/session messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessSummary {
    pub avg_heart_rate: Option<f64>,
    pub max_heart_rate: Option<f64>,
    /// Meters, from the first session
    pub total_distance: Option<f64>,
}
