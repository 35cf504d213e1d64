// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cross-source joiner: per-`(round, hole)` indices over every source.
//!
//! Each index is built from an explicit source precedence list. A key is
//! filled by the first source that has a value for it; later sources only
//! fill keys (or fields) that are still empty.

use crate::models::canonical::{RoundId, Shot};
use crate::models::club::{ClubRegistry, UNKNOWN_CLUB_ID};
use crate::models::dataset::Dataset;
use crate::models::export::Club;
use std::collections::{BTreeMap, HashMap};

/// `(round id, hole number)`.
pub type HoleKey = (RoundId, u32);

/// Where a hole's par came from, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParSource {
    /// Curated `derived/hole-pars/<round>.json`
    Curated,
    /// Hole messages in the decoded FIT document
    HoleMessage,
    /// `{hole, par}` objects found by scanning the whole document
    DocumentScan,
}

pub const PAR_PRECEDENCE: [ParSource; 3] = [
    ParSource::Curated,
    ParSource::HoleMessage,
    ParSource::DocumentScan,
];

/// Where a hole's strokes and putts came from, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSource {
    /// The scorecard export
    Scorecard,
    /// Score messages in the decoded FIT document
    ScoreMessage,
}

pub const SCORE_PRECEDENCE: [ScoreSource; 2] = [ScoreSource::Scorecard, ScoreSource::ScoreMessage];

/// Strokes and putts for one hole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrokesPutts {
    pub strokes: Option<u32>,
    pub putts: Option<u32>,
}

impl StrokesPutts {
    /// Both values, when known.
    pub fn complete(&self) -> Option<(u32, u32)> {
        Some((self.strokes?, self.putts?))
    }
}

/// How a shot's club reference resolves against the registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClubResolution<'a> {
    /// No club recorded; the shot is left out of club-keyed tables.
    NotRecorded,
    /// Club id 0: counted in its own "unknown" bucket.
    Unknown,
    /// A registered, active, non-putter club.
    Known(&'a Club),
    /// Unregistered, retired, deleted, or the putter.
    Excluded,
}

pub fn resolve_club(club_id: Option<u64>, clubs: &ClubRegistry) -> ClubResolution<'_> {
    match club_id {
        None => ClubResolution::NotRecorded,
        Some(UNKNOWN_CLUB_ID) => ClubResolution::Unknown,
        Some(id) => clubs
            .eligible(id)
            .map_or(ClubResolution::Excluded, ClubResolution::Known),
    }
}

/// True when `candidate` should replace `current` as the first shot of a hole.
///
/// Shot order decides when either side has one (a present order beats an
/// absent one). Otherwise shot time decides, with the same rule. When
/// neither ordering field exists the earlier shot in input order is kept.
pub fn is_earlier(candidate: &Shot, current: &Shot) -> bool {
    match (candidate.shot_order, current.shot_order) {
        (Some(a), Some(b)) => a < b,
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (None, None) => match (candidate.shot_time, current.shot_time) {
            (Some(a), Some(b)) => a < b,
            (Some(_), None) => true,
            _ => false,
        },
    }
}

/// All join indices for one dataset snapshot.
#[derive(Debug, Clone, Default)]
pub struct JoinIndex {
    par: HashMap<HoleKey, (u32, ParSource)>,
    score_putts: HashMap<HoleKey, StrokesPutts>,
    first_tee_shot: HashMap<HoleKey, Shot>,
    course_name_by_round: HashMap<RoundId, String>,
    course_name_by_global_id: HashMap<u64, String>,
}

impl JoinIndex {
    pub fn build(dataset: &Dataset) -> Self {
        let course_name_by_round = course_names_by_round(dataset);
        let course_name_by_global_id = course_names_by_global_id(dataset, &course_name_by_round);

        let index = Self {
            par: par_by_round_hole(dataset),
            score_putts: score_putts_by_round_hole(dataset),
            first_tee_shot: first_tee_shot_by_round_hole(&dataset.shots),
            course_name_by_round,
            course_name_by_global_id,
        };

        tracing::debug!(
            pars = index.par.len(),
            scores = index.score_putts.len(),
            first_shots = index.first_tee_shot.len(),
            courses = index.course_name_by_global_id.len(),
            "Built join indices"
        );

        index
    }

    pub fn par(&self, key: HoleKey) -> Option<u32> {
        self.par.get(&key).map(|(par, _)| *par)
    }

    pub fn par_source(&self, key: HoleKey) -> Option<ParSource> {
        self.par.get(&key).map(|(_, source)| *source)
    }

    /// Every known par for one round.
    pub fn pars_for_round(&self, round_id: RoundId) -> BTreeMap<u32, u32> {
        self.par
            .iter()
            .filter(|((round, _), _)| *round == round_id)
            .map(|((_, hole), (par, _))| (*hole, *par))
            .collect()
    }

    pub fn score_putts(&self, key: HoleKey) -> StrokesPutts {
        self.score_putts.get(&key).copied().unwrap_or_default()
    }

    pub fn first_tee_shot(&self, key: HoleKey) -> Option<&Shot> {
        self.first_tee_shot.get(&key)
    }

    /// First tee shots ordered by `(round, hole)`.
    pub fn first_tee_shots(&self) -> Vec<(HoleKey, &Shot)> {
        let mut shots: Vec<_> = self.first_tee_shot.iter().map(|(k, s)| (*k, s)).collect();
        shots.sort_by_key(|(key, _)| *key);
        shots
    }

    pub fn course_name_for_round(&self, round_id: RoundId) -> Option<&str> {
        self.course_name_by_round.get(&round_id).map(String::as_str)
    }

    pub fn course_name(&self, course_global_id: u64) -> Option<&str> {
        self.course_name_by_global_id
            .get(&course_global_id)
            .map(String::as_str)
    }
}

/// Par per hole, filled in [`PAR_PRECEDENCE`] order.
pub fn par_by_round_hole(dataset: &Dataset) -> HashMap<HoleKey, (u32, ParSource)> {
    let mut index = HashMap::new();
    for source in PAR_PRECEDENCE {
        for (key, par) in par_entries(dataset, source) {
            index.entry(key).or_insert((par, source));
        }
    }
    index
}

fn par_entries(dataset: &Dataset, source: ParSource) -> Vec<(HoleKey, u32)> {
    match source {
        ParSource::Curated => dataset
            .curated_pars
            .iter()
            .flat_map(|(round, pars)| pars.iter().map(move |(hole, par)| ((*round, *hole), *par)))
            .collect(),
        ParSource::HoleMessage => dataset
            .activities
            .iter()
            .flat_map(|a| a.holes.iter())
            .filter_map(|h| h.par.map(|par| ((h.round_id, h.hole_number), par)))
            .collect(),
        ParSource::DocumentScan => dataset
            .activities
            .iter()
            .flat_map(|a| a.scanned_pars.iter().map(move |(hole, par)| ((a.round_id, *hole), *par)))
            .collect(),
    }
}

/// Strokes and putts per hole, each field filled in [`SCORE_PRECEDENCE`] order.
pub fn score_putts_by_round_hole(dataset: &Dataset) -> HashMap<HoleKey, StrokesPutts> {
    let mut index: HashMap<HoleKey, StrokesPutts> = HashMap::new();
    for source in SCORE_PRECEDENCE {
        for (key, entry) in score_entries(dataset, source) {
            let slot = index.entry(key).or_default();
            slot.strokes = slot.strokes.or(entry.strokes);
            slot.putts = slot.putts.or(entry.putts);
        }
    }
    index
}

fn score_entries(dataset: &Dataset, source: ScoreSource) -> Vec<(HoleKey, StrokesPutts)> {
    match source {
        ScoreSource::Scorecard => dataset
            .scorecards
            .iter()
            .flat_map(|sc| {
                sc.holes.iter().map(move |h| {
                    let entry = StrokesPutts {
                        strokes: h.strokes,
                        putts: h.putts,
                    };
                    ((sc.id, h.number), entry)
                })
            })
            .collect(),
        ScoreSource::ScoreMessage => dataset
            .activities
            .iter()
            .flat_map(|a| a.scores.iter())
            .map(|s| {
                let entry = StrokesPutts {
                    strokes: s.strokes,
                    putts: s.putts,
                };
                ((s.round_id, s.hole_number), entry)
            })
            .collect(),
    }
}

/// The first shot of each hole, chosen with [`is_earlier`].
pub fn first_tee_shot_by_round_hole(shots: &[Shot]) -> HashMap<HoleKey, Shot> {
    let mut index: HashMap<HoleKey, Shot> = HashMap::new();
    for shot in shots {
        let key = (shot.round_id, shot.hole_number);
        let replace = index
            .get(&key)
            .map_or(true, |current| is_earlier(shot, current));
        if replace {
            index.insert(key, shot.clone());
        }
    }
    index
}

fn course_names_by_round(dataset: &Dataset) -> HashMap<RoundId, String> {
    let mut names = HashMap::new();
    for activity in &dataset.activities {
        if let Some(name) = activity.course_name() {
            names
                .entry(activity.round_id)
                .or_insert_with(|| name.to_string());
        }
    }
    names
}

fn course_names_by_global_id(
    dataset: &Dataset,
    by_round: &HashMap<RoundId, String>,
) -> HashMap<u64, String> {
    let mut names = HashMap::new();
    for sc in &dataset.scorecards {
        let (Some(course_id), Some(name)) = (sc.course_global_id, by_round.get(&sc.id)) else {
            continue;
        };
        names.entry(course_id).or_insert_with(|| name.clone());
    }
    names
}
