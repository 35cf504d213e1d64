// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod canonical;
pub mod club;
pub mod dataset;
pub mod derived;
pub mod export;
pub mod raw;

pub use activity::{FitnessSummary, RoundActivity};
pub use canonical::{
    Course, FairwayOutcome, FileInfo, Hole, Lie, MessageCategory, Position, RoundId, Score, Shot,
};
pub use club::ClubRegistry;
pub use dataset::{CuratedPars, Dataset};
pub use derived::{DerivedHole, DerivedRound, DerivedRoundsFile, FitExtras, GirSummary};
pub use export::{Club, ClubType, Envelope, Scorecard, ScorecardHole};
pub use raw::RawMessage;

/// Yards to meters.
pub const METERS_PER_YARD: f64 = 0.9144;

/// Meters to yards, as displayed.
pub const YARDS_PER_METER: f64 = 1.09361;
