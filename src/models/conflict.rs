//! Conflict group model.
//!
//! A conflict group is a set of occurrences that share a rule's grouping
//! key and trip that rule's trigger. Groups are tagged with a
//! [`ConflictReason`] so that consumers can label and merge them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::Occurrence;

/// Why a group of occurrences was flagged.
///
/// Serialized as kebab-case codes (`"double-book-section"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictReason {
    /// Same faculty, slot and course taught to more than one section.
    DoubleBookSection,
    /// Same faculty and slot with more than one course.
    DoubleBookCourse,
    /// Identical faculty, slot, course and section.
    ExactDuplicate,
    /// Same faculty, course and section meeting at overlapping times.
    SelfClash,
    /// Three or more bookings for one faculty slot.
    TripleBook,
    /// Same course offered to more than one section in one slot.
    ///
    /// Triggers exactly like [`DoubleBookSection`](Self::DoubleBookSection);
    /// kept separate for its own label.
    CrossListing,
    /// One section slot booked with more than one course.
    DataQualityMismatch,
    /// Same class recorded under more than one term.
    TermMismatchDuplicate,
    /// Different bookings for one section overlapping in time.
    CrossFacultyOverlap,
}

impl ConflictReason {
    /// All reasons, in rule order.
    pub const ALL: [ConflictReason; 9] = [
        ConflictReason::DoubleBookSection,
        ConflictReason::DoubleBookCourse,
        ConflictReason::ExactDuplicate,
        ConflictReason::SelfClash,
        ConflictReason::TripleBook,
        ConflictReason::CrossListing,
        ConflictReason::DataQualityMismatch,
        ConflictReason::TermMismatchDuplicate,
        ConflictReason::CrossFacultyOverlap,
    ];

    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            ConflictReason::DoubleBookSection => "double-book-section",
            ConflictReason::DoubleBookCourse => "double-book-course",
            ConflictReason::ExactDuplicate => "exact-duplicate",
            ConflictReason::SelfClash => "self-clash",
            ConflictReason::TripleBook => "triple-book",
            ConflictReason::CrossListing => "cross-listing",
            ConflictReason::DataQualityMismatch => "data-quality-mismatch",
            ConflictReason::TermMismatchDuplicate => "term-mismatch-duplicate",
            ConflictReason::CrossFacultyOverlap => "cross-faculty-overlap",
        }
    }
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ConflictReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConflictReason::ALL
            .into_iter()
            .find(|r| r.code() == s.trim())
            .ok_or_else(|| format!("unknown conflict reason: {s}"))
    }
}

/// A flagged group of occurrences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictGroup {
    /// Rule that produced the group.
    pub reason: ConflictReason,
    /// Grouping key; unique within `reason`.
    pub key: String,
    /// Member occurrences (at least two).
    pub items: Vec<Occurrence>,
}

impl ConflictGroup {
    /// Creates a new group.
    pub fn new(reason: ConflictReason, key: impl Into<String>, items: Vec<Occurrence>) -> Self {
        Self {
            reason,
            key: key.into(),
            items,
        }
    }

    /// Sorted, deduplicated source record ids, blank ids discarded.
    ///
    /// Day copies of one record collapse to a single id.
    pub fn record_ids(&self) -> BTreeSet<String> {
        self.items
            .iter()
            .filter(|o| !o.id.is_blank())
            .map(|o| o.id.to_string())
            .collect()
    }

    /// Faculty name of the first member, used for placeholder filtering.
    pub fn representative_faculty(&self) -> Option<&str> {
        self.items
            .first()
            .map(|o| o.faculty_name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Number of member occurrences.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
