//! Conflict detection rules and engine.
//!
//! Provides the nine conflict rules (eight faculty-scoped classifier rules
//! plus the cross-faculty overlap finder), the redundancy reducer, and a
//! composable engine that runs the whole pipeline over raw records.
//!
//! # Usage
//!
//! ```
//! use u_timetable::detection::{rules, ConflictEngine};
//! use u_timetable::models::ScheduleRecord;
//!
//! let engine = ConflictEngine::new()
//!     .with_rule(rules::DoubleBookSection)
//!     .with_rule(rules::TripleBook);
//!
//! let report = engine.run(&[ScheduleRecord::new(1)]);
//! assert!(report.is_clean());
//! ```
//!
//! # Pipeline
//!
//! records → ingest → day expansion → {classifier rules, overlap finder}
//! → redundancy reducer → optional placeholder filter → report.

mod engine;
mod overlap;
mod reducer;
pub mod rules;

pub use engine::{ConflictEngine, ConflictReport, MergedConflict};
pub use overlap::{connected_components, detect_cross_faculty_overlaps, CrossFacultyOverlap};
pub use reducer::{reduce_redundant, retain_groups, PlaceholderFaculty};

use crate::models::{ConflictGroup, ConflictReason, Occurrence};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Which occurrences a rule is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Occurrences with faculty identity, term, time key and day.
    Faculty,
    /// Occurrences with term, day and section; faculty not required.
    Section,
}

impl RuleScope {
    /// Whether an occurrence is eligible under this scope.
    pub fn admits(&self, occurrence: &Occurrence) -> bool {
        match self {
            RuleScope::Faculty => occurrence.is_faculty_scoped(),
            RuleScope::Section => occurrence.is_section_scoped(),
        }
    }
}

/// A conflict rule that flags groups of occurrences.
///
/// `detect` receives day-expanded occurrences already filtered to the
/// rule's [`scope`](ConflictRule::scope). Every returned group must hold
/// at least two items and a key unique within the rule's reason.
pub trait ConflictRule: Send + Sync + Debug {
    /// Reason code attached to every group this rule emits.
    fn reason(&self) -> ConflictReason;

    /// Eligibility filter applied before `detect`.
    fn scope(&self) -> RuleScope {
        RuleScope::Faculty
    }

    /// Flags conflict groups among eligible occurrences.
    fn detect(&self, occurrences: &[Occurrence]) -> Vec<ConflictGroup>;

    /// Rule name (the reason code by default).
    fn name(&self) -> &'static str {
        self.reason().code()
    }

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Groups items by key, keeping groups in order of first appearance.
///
/// Items for which `key_fn` returns `None` are skipped. Order inside each
/// group follows input order. Keys may borrow from the items, so composite
/// keys can be compared field by field without building strings.
pub fn group_by<'a, T, K, F>(items: &'a [T], mut key_fn: F) -> Vec<(K, Vec<&'a T>)>
where
    K: Eq + Hash + Clone,
    F: FnMut(&'a T) -> Option<K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a T>)> = Vec::new();

    for item in items {
        let Some(key) = key_fn(item) else {
            continue;
        };
        match index.get(&key) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![item]));
            }
        }
    }

    groups
}

/// Runs the eight faculty-scoped classifier rules.
///
/// Input is expected to be day-expanded; occurrences lacking faculty,
/// term, time key or day are ignored.
pub fn detect_conflicts(occurrences: &[Occurrence]) -> Vec<ConflictGroup> {
    let eligible: Vec<Occurrence> = occurrences
        .iter()
        .filter(|o| RuleScope::Faculty.admits(o))
        .cloned()
        .collect();

    rules::classifier_rules()
        .iter()
        .flat_map(|rule| rule.detect(&eligible))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{day_expand, ingest, ScheduleRecord};

    #[test]
    fn test_group_by_preserves_discovery_order() {
        let items = vec![3, 1, 4, 1, 5, 9, 2, 6];
        let groups = group_by(&items, |n| Some(n % 3));
        let keys: Vec<i32> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![0, 1, 2]);
        assert_eq!(groups[0].1, vec![&3, &9, &6]);
        assert_eq!(groups[1].1, vec![&1, &4, &1]);
    }

    #[test]
    fn test_group_by_skips_none() {
        let items = vec!["a", "", "b", "a"];
        let groups = group_by(&items, |s| (!s.is_empty()).then(|| s.to_string()));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn test_detect_conflicts_double_book() {
        let records = vec![
            ScheduleRecord::new(1)
                .with_faculty_id(9)
                .with_term("1st")
                .with_days("Mon")
                .with_time("7:30-9AM")
                .with_course("IT 101")
                .with_section("A"),
            ScheduleRecord::new(2)
                .with_faculty_id(9)
                .with_term("1st")
                .with_days("Mon")
                .with_time("7:30-9AM")
                .with_course("IT 101")
                .with_section("B"),
        ];
        let groups = detect_conflicts(&day_expand(&ingest(&records)));

        let double: Vec<&ConflictGroup> = groups
            .iter()
            .filter(|g| g.reason == ConflictReason::DoubleBookSection)
            .collect();
        assert_eq!(double.len(), 1);
        assert_eq!(double[0].record_ids().len(), 2);
        // Identical trigger, separate reason
        assert!(groups
            .iter()
            .any(|g| g.reason == ConflictReason::CrossListing));
    }

    #[test]
    fn test_detect_conflicts_ignores_unscoped() {
        let records = vec![
            ScheduleRecord::new(1).with_term("1st").with_days("Mon").with_time("7-8AM"),
            ScheduleRecord::new(2).with_term("1st").with_days("Mon").with_time("7-8AM"),
        ];
        assert!(detect_conflicts(&day_expand(&ingest(&records))).is_empty());
        assert!(detect_conflicts(&[]).is_empty());
    }
}
