// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Message category classification for generic decoder rows.
//!
//! Rules are evaluated in order and the first match wins. Label rules come
//! first; the key-shape rule catches rows whose decoder omitted a label.

use crate::models::canonical::MessageCategory;
use crate::models::raw::{scalar_i64, RawMessage};
use crate::services::normalizer::document::{normalize_label, GenericRow};
use regex::Regex;
use std::sync::OnceLock;

fn hole_key_re() -> &'static Regex {
    static HOLE_KEY_RE: OnceLock<Regex> = OnceLock::new();
    HOLE_KEY_RE.get_or_init(|| {
        Regex::new(r"(?i)\bhole[ _]?(?:no|num|number)?\b").expect("valid hole key regex")
    })
}

fn par_key_re() -> &'static Regex {
    static PAR_KEY_RE: OnceLock<Regex> = OnceLock::new();
    PAR_KEY_RE.get_or_init(|| Regex::new(r"(?i)(?:^|[ _])par(?:$|[ _])").expect("valid par key regex"))
}

/// A `(predicate, category)` pair.
pub struct Rule {
    pub name: &'static str,
    pub category: MessageCategory,
    pub matches: fn(&GenericRow) -> bool,
}

/// Classification rules, most specific first.
pub const RULES: &[Rule] = &[
    Rule {
        name: "label: file id",
        category: MessageCategory::FileInfo,
        matches: |row| label_contains(row, "file id"),
    },
    Rule {
        name: "label: golf course",
        category: MessageCategory::Course,
        matches: |row| label_contains(row, "golf course"),
    },
    Rule {
        name: "label: shot",
        category: MessageCategory::Shot,
        matches: |row| label_contains(row, "shot"),
    },
    Rule {
        name: "label: score",
        category: MessageCategory::Score,
        matches: |row| label_contains(row, "score"),
    },
    Rule {
        name: "label: hole",
        category: MessageCategory::Hole,
        matches: |row| label_contains(row, "hole"),
    },
    Rule {
        name: "label: golf",
        category: MessageCategory::Hole,
        matches: |row| label_contains(row, "golf"),
    },
    Rule {
        name: "keys: hole number and par",
        category: MessageCategory::Hole,
        matches: |row| has_hole_and_par_keys(&row.message),
    },
];

/// Category of a generic row, or `None` when no rule matches.
pub fn classify(row: &GenericRow) -> Option<MessageCategory> {
    RULES
        .iter()
        .find(|rule| (rule.matches)(row))
        .map(|rule| rule.category)
}

fn label_contains(row: &GenericRow, keyword: &str) -> bool {
    normalize_label(&row.label).contains(keyword)
}

/// True when some key looks like a hole number and another like a par.
pub fn has_hole_and_par_keys(message: &RawMessage) -> bool {
    message.keys().any(is_hole_key) && message.keys().any(is_par_key)
}

pub fn is_hole_key(key: &str) -> bool {
    hole_key_re().is_match(key)
}

pub fn is_par_key(key: &str) -> bool {
    par_key_re().is_match(key)
}

/// First whole-number value among keys shaped like a hole number.
pub fn heuristic_hole_number(message: &RawMessage) -> Option<i64> {
    message
        .iter()
        .filter(|(key, _)| is_hole_key(key))
        .find_map(|(_, value)| scalar_i64(value))
}

/// First whole-number value among keys shaped like a par.
pub fn heuristic_par(message: &RawMessage) -> Option<i64> {
    message
        .iter()
        .filter(|(key, _)| is_par_key(key))
        .find_map(|(_, value)| scalar_i64(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn row(label: &str, fields: Value) -> GenericRow {
        let mut message = RawMessage::from_json_object(fields.as_object().unwrap());
        if !label.is_empty() {
            message.insert("message", json!(label));
        }
        GenericRow::new(message)
    }

    #[test]
    fn file_id_label() {
        assert_eq!(classify(&row("File ID", json!({}))), Some(MessageCategory::FileInfo));
        assert_eq!(classify(&row("file_id", json!({}))), Some(MessageCategory::FileInfo));
    }

    #[test]
    fn golf_course_label_beats_golf() {
        assert_eq!(classify(&row("Golf Course", json!({}))), Some(MessageCategory::Course));
        assert_eq!(classify(&row("golf_stats", json!({}))), Some(MessageCategory::Hole));
    }

    #[test]
    fn shot_and_score_labels() {
        assert_eq!(classify(&row("shot", json!({}))), Some(MessageCategory::Shot));
        assert_eq!(classify(&row("Score", json!({}))), Some(MessageCategory::Score));
    }

    #[test]
    fn hole_label() {
        assert_eq!(classify(&row("HOLE", json!({}))), Some(MessageCategory::Hole));
    }

    #[test]
    fn unlabeled_row_with_hole_and_par_keys() {
        let r = row("", json!({"Hole No": "3", "hole_par": "4"}));
        assert_eq!(classify(&r), Some(MessageCategory::Hole));
        assert_eq!(heuristic_hole_number(&r.message), Some(3));
        assert_eq!(heuristic_par(&r.message), Some(4));
    }

    #[test]
    fn unlabeled_row_needs_both_keys() {
        assert_eq!(classify(&row("", json!({"hole": 3}))), None);
        assert_eq!(classify(&row("", json!({"par": 4}))), None);
        assert_eq!(classify(&row("record", json!({"heart_rate": 120}))), None);
    }

    #[test]
    fn key_patterns() {
        assert!(is_hole_key("hole number"));
        assert!(is_hole_key("holeNumber"));
        assert!(is_hole_key("hole_num"));
        assert!(!is_hole_key("hole_par"));
        assert!(!is_hole_key("pothole"));

        assert!(is_par_key("par"));
        assert!(is_par_key("hole_par"));
        assert!(is_par_key("hole par"));
        assert!(!is_par_key("parking"));
        assert!(!is_par_key("sparse"));
    }
}
