// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Golf analytics: putting, GIR, club distance and approach statistics
//!
//! This crate reconciles a Garmin golf export (scorecards, shots, clubs)
//! with decoded per-round FIT activity files and computes derived round
//! data and performance metrics for a static dashboard.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
