// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Export envelopes (`{version, type, data}`) and the records they carry.
//!
//! Records are parsed one at a time: a malformed entry is skipped without
//! discarding the rest of the export.

use crate::models::canonical::RoundId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An export document: `{ "version": ..., "type": ..., "data": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub version: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub data: Vec<T>,
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            version: None,
            kind: None,
            data: Vec::new(),
        }
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Parse an envelope, keeping every `data` entry that deserializes.
    ///
    /// Returns `None` when the document is not an object with a `data` array.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let rows = obj.get("data")?.as_array()?;
        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

        let mut skipped = 0usize;
        let data = rows
            .iter()
            .filter_map(|row| match T::deserialize(row) {
                Ok(record) => Some(record),
                Err(_) => {
                    skipped += 1;
                    None
                }
            })
            .collect();

        if skipped > 0 {
            tracing::debug!(skipped, kind = ?text("type"), "Skipped malformed export records");
        }

        Some(Self {
            version: text("version"),
            kind: text("type"),
            data,
        })
    }

    pub fn from_json_str(json: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(json).ok()?;
        Self::from_value(&value)
    }
}

/// One played round from `Golf-SCORECARD.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    #[serde(alias = "scorecardId")]
    pub id: RoundId,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub formatted_start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub formatted_end_time: Option<String>,
    #[serde(default)]
    pub holes_completed: Option<u32>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub exclude_from_stats: bool,
    #[serde(default)]
    pub course_global_id: Option<u64>,
    #[serde(default)]
    pub strokes: Option<u32>,
    #[serde(default)]
    pub steps_taken: Option<u32>,
    #[serde(default)]
    pub distance_walked: Option<f64>,
    #[serde(default, deserialize_with = "lenient_holes")]
    pub holes: Vec<ScorecardHole>,
}

impl Scorecard {
    /// Display label: formatted start time, then start time, then the id.
    pub fn date_label(&self) -> String {
        self.formatted_start_time
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.start_time.as_deref().filter(|s| !s.is_empty()))
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }

    /// Holes played: `holesCompleted`, falling back to the hole list length.
    pub fn holes_count(&self) -> u32 {
        self.holes_completed
            .unwrap_or_else(|| u32::try_from(self.holes.len()).unwrap_or(u32::MAX))
    }
}

/// One hole on a scorecard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardHole {
    #[serde(alias = "hole")]
    pub number: u32,
    #[serde(default, alias = "score")]
    pub strokes: Option<u32>,
    #[serde(default)]
    pub putts: Option<u32>,
    #[serde(default)]
    pub penalties: Option<u32>,
}

/// A club from `Golf-CLUB.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    pub club_type_id: u32,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub retired: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub deleted: bool,
}

/// A club type from `Golf-CLUB_TYPES.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubType {
    #[serde(alias = "value")]
    pub id: u32,
    pub name: String,
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn lenient_holes<'de, D>(deserializer: D) -> Result<Vec<ScorecardHole>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|h| serde_json::from_value(h).ok())
        .collect())
}
