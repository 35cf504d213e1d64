// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Source loader for a DI-GOLF export directory.
//!
//! Missing or malformed inputs load as empty with a warning; only the
//! metrics that need them come out empty.

use crate::models::canonical::{RoundId, Shot};
use crate::models::club::ClubRegistry;
use crate::models::dataset::{CuratedPars, Dataset};
use crate::models::export::{Club, ClubType, Envelope, Scorecard};
use crate::models::raw::{scalar_i64, RawMessage};
use crate::services::decoder::parse_decoded;
use crate::services::normalizer::document::{valid_hole_number, valid_par};
use crate::services::normalizer::{normalize_document, normalize_shot, DecodedDocument};
use crate::services::round_id::round_id_from_path;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// File and directory names inside the export root.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scorecards(&self) -> PathBuf {
        self.root.join("Golf-SCORECARD.json")
    }

    pub fn shots(&self) -> PathBuf {
        self.root.join("Golf-SHOT.json")
    }

    pub fn clubs(&self) -> PathBuf {
        self.root.join("Golf-CLUB.json")
    }

    pub fn club_types(&self) -> PathBuf {
        self.root.join("Golf-CLUB_TYPES.json")
    }

    pub fn fit_json_dir(&self) -> PathBuf {
        self.root.join("fit-json")
    }

    pub fn fit_csv_dir(&self) -> PathBuf {
        self.root.join("fit-csv")
    }

    pub fn hole_pars_dir(&self) -> PathBuf {
        self.root.join("derived").join("hole-pars")
    }

    /// Where the decoder writes its output for `input`: `fit-json/` for
    /// JSON output, `fit-csv/` otherwise, keeping the input's file stem.
    pub fn decoded_output(&self, input: &Path, ext: &str) -> PathBuf {
        let dir = if ext.eq_ignore_ascii_case("json") {
            self.fit_json_dir()
        } else {
            self.fit_csv_dir()
        };
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        dir.join(format!("{stem}.{ext}"))
    }
}

/// Load an export envelope, keeping the records that parse.
pub fn load_envelope<T: DeserializeOwned>(path: &Path) -> Envelope<T> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Export file not readable");
            return Envelope::default();
        }
    };
    match Envelope::from_json_str(&json) {
        Some(envelope) => envelope,
        None => {
            tracing::warn!(path = %path.display(), "Export file is not an envelope");
            Envelope::default()
        }
    }
}

/// Shots from the shot export. Entries without a round id or hole number
/// are dropped.
pub fn load_shots(path: &Path) -> Vec<Shot> {
    let envelope: Envelope<Value> = load_envelope(path);
    envelope
        .data
        .iter()
        .filter_map(Value::as_object)
        .map(RawMessage::from_json_object)
        .filter_map(|msg| normalize_shot(&msg, None))
        .collect()
}

pub fn load_clubs(layout: &DataLayout) -> ClubRegistry {
    let clubs: Envelope<Club> = load_envelope(&layout.clubs());
    let types: Envelope<ClubType> = load_envelope(&layout.club_types());
    ClubRegistry::new(clubs.data, types.data)
}

/// Files under `dir` (recursively) whose extension matches `ext`, sorted.
pub fn find_files(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let path = entry.path();
            if file_type.is_symlink() && path.is_dir() {
                continue;
            }
            if file_type.is_dir() {
                pending.push(path);
            } else if path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(ext))
            {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}

/// Marker in the file name of FIT files that carry a scorecard.
pub const SCORECARD_FIT_MARKER: &str = "SCORECARD_RAWDATA";

/// Scorecard FIT files anywhere under the export root.
pub fn find_fit_files(layout: &DataLayout) -> Vec<PathBuf> {
    find_files(layout.root(), "fit")
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.to_ascii_uppercase().contains(SCORECARD_FIT_MARKER))
        })
        .collect()
}

/// Round ids that already have a decoded document on disk.
pub fn decoded_rounds(layout: &DataLayout) -> HashSet<RoundId> {
    decoded_document_paths(layout)
        .iter()
        .filter_map(|p| round_id_from_path(p))
        .collect()
}

/// JSON documents first, then CSV; the first document for a round wins.
fn decoded_document_paths(layout: &DataLayout) -> Vec<PathBuf> {
    let mut paths = find_files(&layout.fit_json_dir(), "json");
    paths.extend(find_files(&layout.fit_csv_dir(), "csv"));
    paths
}

/// Parse every decoded document on disk, one per round.
pub fn load_decoded_documents(layout: &DataLayout) -> Vec<(RoundId, DecodedDocument)> {
    let mut seen = HashSet::new();
    let mut documents = Vec::new();

    for path in decoded_document_paths(layout) {
        let Some(round_id) = round_id_from_path(&path) else {
            tracing::debug!(path = %path.display(), "No round id in decoded file name");
            continue;
        };
        if seen.contains(&round_id) {
            continue;
        }
        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| parse_decoded(&path, &text).map_err(|e| e.to_string()));
        match parsed {
            Ok(document) => {
                seen.insert(round_id);
                documents.push((round_id, document));
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Skipping decoded document");
            }
        }
    }

    documents.sort_by_key(|(round_id, _)| *round_id);
    documents
}

/// Curated `hole -> par` maps, one JSON object per round.
pub fn load_curated_pars(dir: &Path) -> CuratedPars {
    let mut pars = CuratedPars::new();
    for path in find_files(dir, "json") {
        let Some(round_id) = round_id_from_path(&path) else {
            continue;
        };
        let map = fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str::<serde_json::Map<String, Value>>(&json).ok());
        let Some(map) = map else {
            tracing::warn!(path = %path.display(), "Malformed curated par map");
            continue;
        };
        let holes: BTreeMap<u32, u32> = map
            .iter()
            .filter_map(|(hole, par)| {
                let hole = valid_hole_number(hole.trim().parse().ok()?)?;
                let par = valid_par(scalar_i64(par)?)?;
                Some((hole, par))
            })
            .collect();
        if !holes.is_empty() {
            pars.insert(round_id, holes);
        }
    }
    pars
}

/// Load every source into one snapshot.
///
/// Shots from decoded documents fill in rounds the shot export does not
/// cover.
pub fn load_dataset(layout: &DataLayout) -> Dataset {
    let scorecards: Envelope<Scorecard> = load_envelope(&layout.scorecards());
    let mut shots = load_shots(&layout.shots());

    let activities: Vec<_> = load_decoded_documents(layout)
        .iter()
        .map(|(round_id, document)| normalize_document(*round_id, document))
        .collect();

    let exported_rounds: HashSet<RoundId> = shots.iter().map(|s| s.round_id).collect();
    shots.extend(
        activities
            .iter()
            .filter(|a| !exported_rounds.contains(&a.round_id))
            .flat_map(|a| a.shots.iter().cloned()),
    );

    let dataset = Dataset {
        scorecards: scorecards.data,
        shots,
        clubs: load_clubs(layout),
        activities,
        curated_pars: load_curated_pars(&layout.hole_pars_dir()),
    };

    tracing::info!(
        root = %layout.root().display(),
        scorecards = dataset.scorecards.len(),
        shots = dataset.shots.len(),
        clubs = dataset.clubs.len(),
        activities = dataset.activities.len(),
        curated_rounds = dataset.curated_pars.len(),
        "Loaded sources"
    );

    dataset
}
