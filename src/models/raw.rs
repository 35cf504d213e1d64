// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw decoded message: an untyped bag of field key → scalar value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One decoded message as produced by an external decoder.
///
/// Keys are whatever the decoder emitted: human labels (`"hole number"`),
/// snake/camel case names, or decimal field numbers (`"0"`, `"2"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMessage {
    fields: BTreeMap<String, Value>,
}

impl RawMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a message from a JSON object.
    ///
    /// Nested objects are flattened one level with dotted keys, so
    /// `{"startLoc": {"lie": "Fairway"}}` becomes `startLoc.lie`. Arrays are
    /// kept as-is and never match a scalar lookup.
    pub fn from_json_object(obj: &Map<String, Value>) -> Self {
        let mut msg = Self::new();
        for (key, value) in obj {
            match value {
                Value::Object(inner) => {
                    for (inner_key, inner_value) in inner {
                        msg.insert(format!("{key}.{inner_key}"), inner_value.clone());
                    }
                }
                other => msg.insert(key.clone(), other.clone()),
            }
        }
        msg
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First candidate key whose value parses with `parse`.
    pub fn first<T>(&self, candidates: &[&str], parse: impl Fn(&Value) -> Option<T>) -> Option<T> {
        candidates
            .iter()
            .filter_map(|key| self.get(key))
            .find_map(parse)
    }

    /// First candidate parseable as a whole number.
    pub fn int(&self, candidates: &[&str]) -> Option<i64> {
        self.first(candidates, scalar_i64)
    }

    /// First candidate parseable as a finite float.
    pub fn float(&self, candidates: &[&str]) -> Option<f64> {
        self.first(candidates, scalar_f64)
    }

    /// First candidate with a non-empty textual value.
    pub fn text(&self, candidates: &[&str]) -> Option<String> {
        self.first(candidates, scalar_text)
    }
}

impl FromIterator<(String, Value)> for RawMessage {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Parse a scalar as a finite float. Numeric strings are accepted.
pub fn scalar_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Parse a scalar as a whole number. Fractional values are rejected.
pub fn scalar_i64(value: &Value) -> Option<i64> {
    if let Value::Number(n) = value {
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
    }
    if let Value::String(s) = value {
        if let Ok(i) = s.trim().parse::<i64>() {
            return Some(i);
        }
    }
    let f = scalar_f64(value)?;
    (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

/// Parse a scalar as a non-negative whole number.
pub fn scalar_u64(value: &Value) -> Option<u64> {
    scalar_i64(value).and_then(|i| u64::try_from(i).ok())
}

/// Parse a scalar as trimmed, non-empty text. Numbers are stringified.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
