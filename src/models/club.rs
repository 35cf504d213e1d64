// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Club registry: club lookup, display labels and eligibility.

use crate::models::export::{Club, ClubType};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Club type id of the putter in the club-type registry.
pub const PUTTER_CLUB_TYPE_ID: u32 = 23;

/// Club id meaning "a club was recorded but it is unknown".
pub const UNKNOWN_CLUB_ID: u64 = 0;

fn wedge_re() -> &'static Regex {
    static WEDGE_RE: OnceLock<Regex> = OnceLock::new();
    WEDGE_RE.get_or_init(|| Regex::new(r"(?i)wedge").expect("valid wedge regex"))
}

/// Lookup of the player's clubs and club type names.
#[derive(Debug, Clone, Default)]
pub struct ClubRegistry {
    clubs: HashMap<u64, Club>,
    type_names: HashMap<u32, String>,
}

impl ClubRegistry {
    pub fn new(clubs: Vec<Club>, club_types: Vec<ClubType>) -> Self {
        Self {
            clubs: clubs.into_iter().map(|c| (c.id, c)).collect(),
            type_names: club_types.into_iter().map(|t| (t.id, t.name)).collect(),
        }
    }

    pub fn get(&self, id: u64) -> Option<&Club> {
        self.clubs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }

    pub fn type_name(&self, club_type_id: u32) -> Option<&str> {
        self.type_names.get(&club_type_id).map(String::as_str)
    }

    /// A registered club that may appear in club-keyed aggregations.
    pub fn eligible(&self, id: u64) -> Option<&Club> {
        self.get(id)
            .filter(|c| !c.retired && !c.deleted && c.club_type_id != PUTTER_CLUB_TYPE_ID)
    }

    /// Display label: club name, then type name, then `Club <type id>`.
    pub fn label(&self, club: &Club) -> String {
        if let Some(name) = club.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        self.type_name(club.club_type_id)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Club {}", club.club_type_id))
    }

    pub fn is_wedge(&self, club: &Club) -> bool {
        self.type_name(club.club_type_id)
            .is_some_and(|name| wedge_re().is_match(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club(id: u64, type_id: u32, name: Option<&str>) -> Club {
        Club {
            id,
            name: name.map(str::to_string),
            club_type_id: type_id,
            model: None,
            retired: false,
            deleted: false,
        }
    }

    fn registry() -> ClubRegistry {
        let mut retired = club(4, 5, Some("Old 7i"));
        retired.retired = true;
        let mut deleted = club(5, 5, None);
        deleted.deleted = true;
        ClubRegistry::new(
            vec![
                club(1, 1, None),
                club(2, 12, Some("  ")),
                club(3, PUTTER_CLUB_TYPE_ID, Some("Spider")),
                retired,
                deleted,
                club(6, 99, None),
            ],
            vec![
                ClubType { id: 1, name: "Driver".to_string() },
                ClubType { id: 12, name: "Sand Wedge".to_string() },
                ClubType { id: PUTTER_CLUB_TYPE_ID, name: "Putter".to_string() },
            ],
        )
    }

    #[test]
    fn labels_fall_back_to_type_name() {
        let reg = registry();
        assert_eq!(reg.label(reg.get(1).unwrap()), "Driver");
        assert_eq!(reg.label(reg.get(2).unwrap()), "Sand Wedge");
        assert_eq!(reg.label(reg.get(3).unwrap()), "Spider");
        assert_eq!(reg.label(reg.get(6).unwrap()), "Club 99");
    }

    #[test]
    fn putter_retired_and_deleted_are_ineligible() {
        let reg = registry();
        assert!(reg.eligible(1).is_some());
        assert!(reg.eligible(3).is_none());
        assert!(reg.eligible(4).is_none());
        assert!(reg.eligible(5).is_none());
        assert!(reg.eligible(404).is_none());
    }

    #[test]
    fn wedge_detection_uses_type_name() {
        let reg = registry();
        assert!(reg.is_wedge(reg.get(2).unwrap()));
        assert!(!reg.is_wedge(reg.get(1).unwrap()));
        assert!(!reg.is_wedge(reg.get(6).unwrap()));
    }
}
