//! Per-faculty teaching load.
//!
//! Aggregates normalized (not day-expanded) occurrences into one summary
//! per faculty key: units and weekly contact minutes by term.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Units by term | Sum of record units, each record counted once |
//! | Contact minutes by term | Block length × meeting days |
//! | Overload | max(0, total units − regular load) |

use std::collections::{BTreeMap, HashMap, HashSet};

use super::{split_overload_with, LoadPolicy, OverloadSplit};
use crate::models::{Occurrence, RecordId};

/// Teaching load of one faculty member.
#[derive(Debug, Clone, PartialEq)]
pub struct FacultyLoad {
    /// Resolved faculty key.
    pub faculty_key: String,
    /// First non-empty display name seen for this faculty.
    pub faculty_name: String,
    /// Units per normalized term label.
    pub units_by_term: BTreeMap<String, f64>,
    /// Weekly contact minutes per normalized term label.
    pub minutes_by_term: BTreeMap<String, u32>,
    /// Number of distinct source records.
    pub class_count: usize,
}

impl FacultyLoad {
    fn new(faculty_key: &str) -> Self {
        Self {
            faculty_key: faculty_key.to_string(),
            faculty_name: String::new(),
            units_by_term: BTreeMap::new(),
            minutes_by_term: BTreeMap::new(),
            class_count: 0,
        }
    }

    /// Total units across all terms.
    pub fn total_units(&self) -> f64 {
        self.units_by_term.values().sum()
    }

    /// Total weekly contact minutes across all terms.
    pub fn total_minutes(&self) -> u32 {
        self.minutes_by_term.values().sum()
    }

    /// Units above the policy's regular load (never negative).
    pub fn overload_units(&self, policy: &LoadPolicy) -> f64 {
        (self.total_units() - policy.regular_load_units).max(0.0)
    }

    /// Splits this faculty's overload across two terms.
    pub fn overload_split(&self, policy: &LoadPolicy) -> OverloadSplit {
        split_overload_with(self.overload_units(policy), policy.unit_multiple)
    }
}

/// Summarizes teaching load per faculty, sorted by faculty key.
///
/// Occurrences without faculty identity are skipped; a missing term is
/// recorded under the empty label. Day copies of the same record are
/// counted once.
pub fn summarize_loads(occurrences: &[Occurrence]) -> Vec<FacultyLoad> {
    let mut loads: HashMap<&str, FacultyLoad> = HashMap::new();
    let mut seen: HashSet<(&str, &RecordId)> = HashSet::new();

    for occ in occurrences {
        let Some(key) = occ.faculty_key.as_deref() else {
            continue;
        };
        if !seen.insert((key, &occ.id)) {
            continue;
        }

        let load = loads.entry(key).or_insert_with(|| FacultyLoad::new(key));
        if load.faculty_name.is_empty() {
            load.faculty_name = occ.faculty_name.clone();
        }

        let term = occ.term.clone().unwrap_or_default();
        *load.units_by_term.entry(term.clone()).or_insert(0.0) += occ.units.unwrap_or(0.0);
        *load.minutes_by_term.entry(term).or_insert(0) += occ.weekly_minutes();
        load.class_count += 1;
    }

    let mut result: Vec<FacultyLoad> = loads.into_values().collect();
    result.sort_by(|a, b| a.faculty_key.cmp(&b.faculty_key));
    result
}
