// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived rounds document (`rounds.json`) consumed by the presentation layer.

use crate::models::canonical::RoundId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Top-level derived document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DerivedRoundsFile {
    pub rounds: Vec<DerivedRound>,
}

/// One round joined across scorecard, par and fitness data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRound {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: RoundId,
    /// Display label (formatted start time, start time, or id)
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holes_completed: Option<u32>,
    #[serde(default)]
    pub exclude_from_stats: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | undefined"))]
    pub course_global_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strokes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_taken: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_walked: Option<f64>,
    #[serde(default)]
    pub holes: Vec<DerivedHole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<FitExtras>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gir: Option<GirSummary>,
}

/// A scorecard hole with its par and GIR flag attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DerivedHole {
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub putts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strokes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalties: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub par: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gir: Option<bool>,
}

/// Fitness extras recovered from the round's decoded activity file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FitExtras {
    pub has_fit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_heart_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<f64>,
    /// Meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub par_by_hole: Option<BTreeMap<u32, u32>>,
}

/// Per-round GIR summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct GirSummary {
    /// Holes reached in regulation
    pub holes: u32,
    /// Putts taken on GIR holes
    pub putts_total: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub putts_average: Option<f64>,
}
