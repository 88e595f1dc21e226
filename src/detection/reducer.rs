//! Redundancy reduction and group filters.
//!
//! Rules overlap by construction, and one conflict often surfaces as
//! several groups of different sizes under the same reason. The reducer
//! keeps the largest group and drops any same-reason group whose record
//! ids it already covers.
//!
//! # Complexity
//! O(g²) subset checks for g groups. Fine for tens to hundreds of groups;
//! revisit before running over institution-wide listings.

use log::debug;
use std::collections::{BTreeSet, HashMap};

use crate::models::{normalize_alnum, ConflictGroup, ConflictReason};

/// Removes same-reason groups whose record ids are covered by a larger
/// kept group, and ranks the survivors by size.
///
/// 1. Each group's id set is its sorted, deduplicated, non-blank record
///    ids; groups with fewer than two ids are discarded.
/// 2. Groups are stably sorted by id-set size, largest first (ties keep
///    discovery order).
/// 3. A group is dropped when its id set is a subset of, or equal to, an
///    already-kept set with the same reason.
///
/// # Examples
///
/// ```
/// use u_timetable::detection::reduce_redundant;
/// use u_timetable::models::{ConflictGroup, ConflictReason, Occurrence, ScheduleRecord};
///
/// let occ = |id: i64| Occurrence::from_record(&ScheduleRecord::new(id));
/// let big = ConflictGroup::new(ConflictReason::TripleBook, "a", vec![occ(1), occ(2), occ(3)]);
/// let small = ConflictGroup::new(ConflictReason::TripleBook, "b", vec![occ(1), occ(2)]);
///
/// let kept = reduce_redundant(vec![small, big]);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].key, "a");
/// ```
pub fn reduce_redundant(groups: Vec<ConflictGroup>) -> Vec<ConflictGroup> {
    let input_len = groups.len();

    let mut ranked: Vec<(BTreeSet<String>, ConflictGroup)> = groups
        .into_iter()
        .map(|g| (g.record_ids(), g))
        .filter(|(ids, _)| ids.len() >= 2)
        .collect();
    ranked.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut kept_by_reason: HashMap<ConflictReason, Vec<BTreeSet<String>>> = HashMap::new();
    let mut kept = Vec::new();

    for (ids, group) in ranked {
        let seen = kept_by_reason.entry(group.reason).or_default();
        if seen.iter().any(|k| ids.is_subset(k)) {
            continue;
        }
        seen.push(ids);
        kept.push(group);
    }

    debug!("reduced {} conflict groups to {}", input_len, kept.len());
    kept
}

/// Keeps only the groups for which `keep` returns `true`.
pub fn retain_groups<F>(groups: Vec<ConflictGroup>, mut keep: F) -> Vec<ConflictGroup>
where
    F: FnMut(&ConflictGroup) -> bool,
{
    groups.into_iter().filter(|g| keep(g)).collect()
}

/// Matcher for placeholder faculty names ("TBA", "Unassigned", ...).
///
/// Names are compared after the same normalization as faculty keys, so
/// `"T.B.A."` matches `"tba"`.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderFaculty {
    names: BTreeSet<String>,
}

impl PlaceholderFaculty {
    /// Creates a matcher from placeholder names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| normalize_alnum(n.as_ref()))
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Whether `name` is a placeholder.
    pub fn matches(&self, name: &str) -> bool {
        self.names.contains(&normalize_alnum(name))
    }

    /// Whether the group's representative faculty is a placeholder.
    ///
    /// Groups without any faculty name count as placeholders.
    pub fn is_placeholder_group(&self, group: &ConflictGroup) -> bool {
        group
            .representative_faculty()
            .map_or(true, |name| self.matches(name))
    }

    /// Drops groups whose representative faculty is a placeholder.
    pub fn filter(&self, groups: Vec<ConflictGroup>) -> Vec<ConflictGroup> {
        retain_groups(groups, |g| !self.is_placeholder_group(g))
    }
}
