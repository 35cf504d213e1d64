// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Decoded document shapes accepted from external FIT decoders.

use crate::models::raw::RawMessage;
use crate::services::normalizer::fields::{self, Keys};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Read;
use std::sync::OnceLock;

fn field_column_re() -> &'static Regex {
    static FIELD_COLUMN_RE: OnceLock<Regex> = OnceLock::new();
    FIELD_COLUMN_RE.get_or_init(|| Regex::new(r"^Field (\d+)$").expect("valid field column regex"))
}

/// One row of a generic decoder dump.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericRow {
    /// Message label (`"hole"`, `"Golf Course"`), empty when the decoder gave none
    pub label: String,
    pub message: RawMessage,
}

impl GenericRow {
    pub fn new(message: RawMessage) -> Self {
        let label = message.text(fields::LABEL).unwrap_or_default();
        Self { label, message }
    }
}

/// A decoder's output for one FIT file.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedDocument {
    /// Message group key (name or FIT global message number) to messages.
    Rich(Map<String, Value>),
    /// Flat rows, each with an optional message label.
    Generic(Vec<GenericRow>),
}

impl DecodedDocument {
    /// Interpret a JSON document: an object is rich, an array of objects is generic.
    pub fn from_json_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(DecodedDocument::Rich(map)),
            Value::Array(rows) => Some(DecodedDocument::Generic(
                rows.iter()
                    .filter_map(Value::as_object)
                    .map(|obj| GenericRow::new(RawMessage::from_json_object(obj)))
                    .collect(),
            )),
            _ => None,
        }
    }

    pub fn from_json_str(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok().and_then(Self::from_json_value)
    }

    /// Parse FitCSVTool output.
    ///
    /// A row whose first cell is `Type` sets the header for the `Data` rows
    /// that follow; `Definition` rows are ignored. `Field N`/`Value N` column
    /// pairs become `field name -> value` entries.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut header: Option<csv::StringRecord> = None;
        let mut rows = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            let Some(kind) = record.get(0).map(str::trim) else {
                continue;
            };
            if kind.eq_ignore_ascii_case("type") {
                header = Some(record.clone());
            } else if kind.eq_ignore_ascii_case("data") {
                if let Some(header) = &header {
                    rows.push(GenericRow::new(csv_row_message(header, &record)));
                }
            }
        }

        Ok(DecodedDocument::Generic(rows))
    }

    /// Messages of a rich document's first group key that holds a list.
    pub fn rich_group(&self, keys: Keys) -> Vec<RawMessage> {
        let DecodedDocument::Rich(map) = self else {
            return Vec::new();
        };
        keys.iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(RawMessage::from_json_object)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Generic rows whose normalized label is one of `labels`.
    pub fn labeled_rows<'a>(&'a self, labels: &'a [&'a str]) -> impl Iterator<Item = &'a RawMessage> {
        let rows: &[GenericRow] = match self {
            DecodedDocument::Generic(rows) => rows,
            DecodedDocument::Rich(_) => &[],
        };
        rows.iter()
            .filter(move |row| {
                let label = normalize_label(&row.label);
                labels.iter().any(|l| *l == label)
            })
            .map(|row| &row.message)
    }
}

/// Lowercase a label and treat `_` as a space (`"Golf_Course"` -> `"golf course"`).
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace('_', " ")
}

fn csv_row_message(header: &csv::StringRecord, record: &csv::StringRecord) -> RawMessage {
    let cells: BTreeMap<&str, &str> = header
        .iter()
        .zip(record.iter())
        .map(|(h, c)| (h.trim(), c.trim()))
        .filter(|(h, c)| !h.is_empty() && !c.is_empty())
        .collect();

    let mut message = RawMessage::new();
    for (&column, &cell) in &cells {
        if column.eq_ignore_ascii_case("type") {
            continue;
        }
        if let Some(caps) = field_column_re().captures(column) {
            let value_column = format!("Value {}", &caps[1]);
            if let Some(value) = cells.get(value_column.as_str()) {
                message.insert(cell, Value::String((*value).to_string()));
            }
            continue;
        }
        if column.starts_with("Value ") || column.starts_with("Units ") {
            continue;
        }
        message.insert(column, Value::String(cell.to_string()));
    }
    message
}

/// Every `{hole, par}`-shaped object anywhere in a document.
///
/// Only JSON numbers count for rich documents; generic rows accept numeric
/// strings since CSV has no other kind.
pub fn scan_for_pars(document: &DecodedDocument) -> BTreeMap<u32, u32> {
    let mut pars = BTreeMap::new();
    match document {
        DecodedDocument::Rich(map) => {
            for value in map.values() {
                scan_value(value, &mut pars);
            }
        }
        DecodedDocument::Generic(rows) => {
            for row in rows {
                let hole = row.message.int(fields::scan::HOLE);
                let par = row.message.int(fields::scan::PAR);
                if let (Some(hole), Some(par)) = (hole, par) {
                    record_par(&mut pars, hole, par);
                }
            }
        }
    }
    pars
}

fn scan_value(value: &Value, pars: &mut BTreeMap<u32, u32>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| scan_value(item, pars)),
        Value::Object(obj) => {
            let number = |keys: Keys| {
                keys.iter()
                    .find_map(|k| obj.get(*k))
                    .and_then(|v| v.as_f64())
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            };
            if let (Some(hole), Some(par)) = (number(fields::scan::HOLE), number(fields::scan::PAR)) {
                record_par(pars, hole, par);
            }
            obj.values().for_each(|child| scan_value(child, pars));
        }
        _ => {}
    }
}

fn record_par(pars: &mut BTreeMap<u32, u32>, hole: i64, par: i64) {
    if let (Some(hole), Some(par)) = (valid_hole_number(hole), valid_par(par)) {
        pars.insert(hole, par);
    }
}

/// Hole numbers start at 1.
pub fn valid_hole_number(n: i64) -> Option<u32> {
    u32::try_from(n).ok().filter(|n| *n >= 1)
}

/// Par is 3, 4 or 5.
pub fn valid_par(n: i64) -> Option<u32> {
    u32::try_from(n).ok().filter(|p| (3..=5).contains(p))
}
