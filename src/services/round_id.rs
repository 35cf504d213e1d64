// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Round id recovery from per-round file names.

use crate::models::canonical::RoundId;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Patterns tried in order, most specific first. Each captures the
/// decimal id immediately before the extension.
const ROUND_ID_PATTERNS: [&str; 3] = [
    r"(?i)SCORECARD[_-]RAWDATA-(\d+)\.[a-z0-9]+$",
    r"(?i)RAWDATA-(\d+)\.[a-z0-9]+$",
    r"(\d+)\.[A-Za-z0-9]+$",
];

fn round_id_res() -> &'static [Regex] {
    static ROUND_ID_RES: OnceLock<Vec<Regex>> = OnceLock::new();
    ROUND_ID_RES.get_or_init(|| {
        ROUND_ID_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("valid round id regex"))
            .collect()
    })
}

/// Round id embedded in a file name such as `Golf-SCORECARD_RAWDATA-123.fit`.
pub fn round_id_from_path(path: &Path) -> Option<RoundId> {
    let name = path.file_name()?.to_str()?;
    round_id_res()
        .iter()
        .find_map(|re| re.captures(name))
        .and_then(|caps| caps[1].parse().ok())
}
