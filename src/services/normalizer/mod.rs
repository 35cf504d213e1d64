// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record normalizer: decoded messages to canonical records.
//!
//! Every function here is total. A message that lacks the required keys for
//! its category yields `None` and is dropped by the caller.

pub mod classify;
pub mod document;
pub mod fields;

pub use classify::classify;
pub use document::{scan_for_pars, DecodedDocument, GenericRow};

use crate::models::activity::{FitnessSummary, RoundActivity};
use crate::models::canonical::{
    Course, FairwayOutcome, FileInfo, Hole, Lie, MessageCategory, Position, RoundId, Score, Shot,
};
use crate::models::raw::{scalar_u64, RawMessage};
use document::{valid_hole_number, valid_par};
use fields::Keys;

/// One canonical record of any category.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalRecord {
    FileInfo(FileInfo),
    Course(Course),
    Hole(Hole),
    Score(Score),
    Shot(Shot),
}

/// What a message cannot tell about itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordContext {
    /// Round id recovered from the source file name
    pub round_id: Option<RoundId>,
    /// Whether the document carries a per-hole par table
    pub has_par_table: bool,
}

/// Normalize one message of a known category.
pub fn normalize(
    category: MessageCategory,
    message: &RawMessage,
    ctx: &RecordContext,
) -> Option<CanonicalRecord> {
    match category {
        MessageCategory::FileInfo => normalize_file_info(message).map(CanonicalRecord::FileInfo),
        MessageCategory::Course => {
            normalize_course(message, ctx.has_par_table).map(CanonicalRecord::Course)
        }
        MessageCategory::Hole => {
            normalize_hole(message, ctx.round_id?).map(CanonicalRecord::Hole)
        }
        MessageCategory::Score => {
            normalize_score(message, ctx.round_id?).map(CanonicalRecord::Score)
        }
        MessageCategory::Shot => normalize_shot(message, ctx.round_id).map(CanonicalRecord::Shot),
    }
}

pub fn normalize_file_info(message: &RawMessage) -> Option<FileInfo> {
    if message.is_empty() {
        return None;
    }
    Some(FileInfo {
        manufacturer: message.text(fields::file_info::MANUFACTURER),
        product: message.text(fields::file_info::PRODUCT),
        serial_number: message.first(fields::file_info::SERIAL_NUMBER, scalar_u64),
        time_created: message.text(fields::file_info::TIME_CREATED),
        fields: message.clone(),
    })
}

/// A course needs a name and either its own par field or a hole par table.
pub fn normalize_course(message: &RawMessage, has_par_table: bool) -> Option<Course> {
    let name = message.text(fields::course::NAME)?;
    let out_par = count(message, fields::course::OUT_PAR);
    let in_par = count(message, fields::course::IN_PAR);
    let total_par = count(message, fields::course::TOTAL_PAR);

    if out_par.is_none() && in_par.is_none() && total_par.is_none() && !has_par_table {
        return None;
    }

    Some(Course {
        course_id: message.first(fields::course::ID, scalar_u64),
        name,
        out_par,
        in_par,
        total_par,
        rating: message.float(fields::course::RATING),
        slope: count(message, fields::course::SLOPE),
    })
}

pub fn normalize_hole(message: &RawMessage, round_id: RoundId) -> Option<Hole> {
    let hole_number = message
        .int(fields::hole::NUMBER)
        .or_else(|| classify::heuristic_hole_number(message))
        .and_then(valid_hole_number)?;

    let par = message
        .int(fields::hole::PAR)
        .or_else(|| classify::heuristic_par(message))
        .and_then(valid_par);

    Some(Hole {
        round_id,
        hole_number,
        distance: message
            .float(fields::hole::DISTANCE)
            .filter(|d| *d >= 0.0),
        par,
        handicap: count(message, fields::hole::HANDICAP),
        position: position(message, fields::hole::LAT, fields::hole::LONG),
    })
}

pub fn normalize_score(message: &RawMessage, round_id: RoundId) -> Option<Score> {
    let hole_number = message
        .int(fields::score::NUMBER)
        .and_then(valid_hole_number)?;

    Some(Score {
        round_id,
        hole_number,
        strokes: count(message, fields::score::STROKES),
        putts: count(message, fields::score::PUTTS),
        fairway_outcome: message.first(fields::score::FAIRWAY, FairwayOutcome::decode),
        penalties: count(message, fields::score::PENALTIES),
    })
}

/// Normalize a shot. The message's own round id wins over `fallback_round`.
pub fn normalize_shot(message: &RawMessage, fallback_round: Option<RoundId>) -> Option<Shot> {
    let round_id = message
        .first(fields::shot::ROUND_ID, scalar_u64)
        .or(fallback_round)?;
    let hole_number = message
        .int(fields::shot::NUMBER)
        .and_then(valid_hole_number)?;

    Some(Shot {
        round_id,
        hole_number,
        shot_order: count(message, fields::shot::ORDER),
        shot_time: message.int(fields::shot::TIME),
        club_id: message.first(fields::shot::CLUB_ID, scalar_u64),
        start_lie: message.text(fields::shot::START_LIE).map(|s| Lie::parse(&s)),
        end_lie: message.text(fields::shot::END_LIE).map(|s| Lie::parse(&s)),
        start_position: position(message, fields::shot::START_LAT, fields::shot::START_LONG),
        end_position: position(message, fields::shot::END_LAT, fields::shot::END_LONG),
        meters: message.float(fields::shot::METERS),
        yards: message.float(fields::shot::YARDS),
    })
}

fn count(message: &RawMessage, keys: Keys) -> Option<u32> {
    message.int(keys).and_then(|n| u32::try_from(n).ok())
}

fn position(message: &RawMessage, lat: Keys, long: Keys) -> Option<Position> {
    Some(Position {
        lat: message.int(lat)?,
        long: message.int(long)?,
    })
}

/// Normalize a whole decoded document for one round.
pub fn normalize_document(round_id: RoundId, document: &DecodedDocument) -> RoundActivity {
    let messages = grouped_messages(document);
    let has_par_table = messages.iter().any(|(category, msg)| {
        *category == MessageCategory::Hole && msg.int(fields::hole::PAR).is_some()
    });
    let ctx = RecordContext {
        round_id: Some(round_id),
        has_par_table,
    };

    let mut activity = RoundActivity {
        round_id,
        ..Default::default()
    };
    let mut dropped = 0usize;

    for (category, message) in &messages {
        match normalize(*category, message, &ctx) {
            Some(CanonicalRecord::FileInfo(r)) => activity.file_info.push(r),
            Some(CanonicalRecord::Course(r)) => activity.courses.push(r),
            Some(CanonicalRecord::Hole(r)) => activity.holes.push(r),
            Some(CanonicalRecord::Score(r)) => activity.scores.push(r),
            Some(CanonicalRecord::Shot(r)) => activity.shots.push(r),
            None => dropped += 1,
        }
    }

    activity.fitness = fitness_summary(document);
    activity.scanned_pars = scan_for_pars(document);

    tracing::debug!(
        round_id,
        holes = activity.holes.len(),
        scores = activity.scores.len(),
        shots = activity.shots.len(),
        dropped,
        "Normalized decoded document"
    );

    activity
}

/// Every categorized message of a document, in document order per category.
fn grouped_messages(document: &DecodedDocument) -> Vec<(MessageCategory, RawMessage)> {
    match document {
        DecodedDocument::Rich(_) => [
            (MessageCategory::FileInfo, fields::groups::FILE_INFO),
            (MessageCategory::Course, fields::groups::COURSE),
            (MessageCategory::Hole, fields::groups::HOLE),
            (MessageCategory::Score, fields::groups::SCORE),
            (MessageCategory::Shot, fields::groups::SHOT),
        ]
        .into_iter()
        .flat_map(|(category, keys)| {
            document
                .rich_group(keys)
                .into_iter()
                .map(move |msg| (category, msg))
        })
        .collect(),
        DecodedDocument::Generic(rows) => rows
            .iter()
            .filter_map(|row| classify(row).map(|category| (category, row.message.clone())))
            .collect(),
    }
}

/// Heart rate from record messages and distance from the first session.
pub fn fitness_summary(document: &DecodedDocument) -> FitnessSummary {
    let (records, sessions) = match document {
        DecodedDocument::Rich(_) => (
            document.rich_group(fields::groups::RECORD),
            document.rich_group(fields::groups::SESSION),
        ),
        DecodedDocument::Generic(_) => (
            document.labeled_rows(&["record"]).cloned().collect(),
            document.labeled_rows(&["session"]).cloned().collect(),
        ),
    };

    let heart_rates: Vec<f64> = records
        .iter()
        .filter_map(|r| r.float(fields::fitness::HEART_RATE))
        .collect();

    let avg_heart_rate =
        (!heart_rates.is_empty()).then(|| heart_rates.iter().sum::<f64>() / heart_rates.len() as f64);
    let max_heart_rate = heart_rates.iter().copied().reduce(f64::max);

    FitnessSummary {
        avg_heart_rate,
        max_heart_rate,
        total_distance: sessions
            .first()
            .and_then(|s| s.float(fields::fitness::TOTAL_DISTANCE)),
    }
}
