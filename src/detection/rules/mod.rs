//! Built-in faculty-scoped classifier rules.
//!
//! # Rules
//!
//! | Rule | Key | Trigger |
//! |------|-----|---------|
//! | [`DoubleBookSection`] | faculty, term, day, time, course | >1 distinct section |
//! | [`DoubleBookCourse`] | faculty, term, day, time | >1 distinct course |
//! | [`ExactDuplicate`] | faculty, term, day, time, course, section | >1 item |
//! | [`SelfClash`] | faculty, term, day, course, section | ≥2 items in a time collision |
//! | [`TripleBook`] | faculty, term, day, time | ≥3 items |
//! | [`CrossListing`] | faculty, term, day, time, course | >1 distinct section |
//! | [`DataQualityMismatch`] | faculty, term, day, time, section | >1 distinct course |
//! | [`TermMismatchDuplicate`] | faculty, day, time, course, section | >1 distinct term |
//!
//! Rules are independent: the same occurrences may be flagged under
//! several reasons. Grouping compares the key fields one by one; the
//! reported group key joins them with `|`.

use std::collections::HashSet;

use super::{group_by, ConflictRule};
use crate::models::{ConflictGroup, ConflictReason, Occurrence};

/// Occurrence field usable in a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Faculty,
    Term,
    Day,
    Time,
    Course,
    Section,
}

fn field(occ: &Occurrence, field: Field) -> Option<&str> {
    match field {
        Field::Faculty => occ.faculty_key.as_deref(),
        Field::Term => occ.term.as_deref(),
        Field::Day => occ.day.map(|d| d.as_str()),
        Field::Time => occ.time_key.as_deref(),
        Field::Course => Some(occ.course_code.as_str()),
        Field::Section => Some(occ.section.as_str()),
    }
}

fn key_parts<'a>(occ: &'a Occurrence, fields: &[Field]) -> Option<Vec<&'a str>> {
    fields.iter().map(|&f| field(occ, f)).collect()
}

fn distinct(items: &[&Occurrence], f: Field) -> usize {
    items
        .iter()
        .filter_map(|o| field(o, f))
        .collect::<HashSet<_>>()
        .len()
}

/// Groups by `fields` and emits every group satisfying `trigger`.
fn keyed_groups<F>(
    occurrences: &[Occurrence],
    reason: ConflictReason,
    fields: &[Field],
    trigger: F,
) -> Vec<ConflictGroup>
where
    F: Fn(&[&Occurrence]) -> bool,
{
    group_by(occurrences, |o| key_parts(o, fields))
        .into_iter()
        .filter(|(_, items)| items.len() > 1 && trigger(items))
        .map(|(parts, items)| {
            ConflictGroup::new(
                reason,
                parts.join("|"),
                items.into_iter().cloned().collect(),
            )
        })
        .collect()
}

const SLOT: &[Field] = &[Field::Faculty, Field::Term, Field::Day, Field::Time];
const SLOT_COURSE: &[Field] = &[
    Field::Faculty,
    Field::Term,
    Field::Day,
    Field::Time,
    Field::Course,
];
const SLOT_SECTION: &[Field] = &[
    Field::Faculty,
    Field::Term,
    Field::Day,
    Field::Time,
    Field::Section,
];
const SLOT_COURSE_SECTION: &[Field] = &[
    Field::Faculty,
    Field::Term,
    Field::Day,
    Field::Time,
    Field::Course,
    Field::Section,
];
const CLASS_DAY: &[Field] = &[
    Field::Faculty,
    Field::Term,
    Field::Day,
    Field::Course,
    Field::Section,
];
const TERMLESS_CLASS_SLOT: &[Field] = &[
    Field::Faculty,
    Field::Day,
    Field::Time,
    Field::Course,
    Field::Section,
];

/// Returns the eight classifier rules in reporting order.
pub fn classifier_rules() -> Vec<Box<dyn ConflictRule>> {
    vec![
        Box::new(DoubleBookSection),
        Box::new(DoubleBookCourse),
        Box::new(ExactDuplicate),
        Box::new(SelfClash),
        Box::new(TripleBook),
        Box::new(CrossListing),
        Box::new(DataQualityMismatch),
        Box::new(TermMismatchDuplicate),
    ]
}

// ======================== Slot rules ========================

/// One faculty slot teaching the same course to several sections.
#[derive(Debug, Clone, Copy)]
pub struct DoubleBookSection;

impl ConflictRule for DoubleBookSection {
    fn reason(&self) -> ConflictReason {
        ConflictReason::DoubleBookSection
    }

    fn detect(&self, occurrences: &[Occurrence]) -> Vec<ConflictGroup> {
        keyed_groups(occurrences, self.reason(), SLOT_COURSE, |items| {
            distinct(items, Field::Section) > 1
        })
    }

    fn description(&self) -> &'static str {
        "Faculty double-booked across sections"
    }
}

/// One faculty slot holding several different courses.
#[derive(Debug, Clone, Copy)]
pub struct DoubleBookCourse;

impl ConflictRule for DoubleBookCourse {
    fn reason(&self) -> ConflictReason {
        ConflictReason::DoubleBookCourse
    }

    fn detect(&self, occurrences: &[Occurrence]) -> Vec<ConflictGroup> {
        keyed_groups(occurrences, self.reason(), SLOT, |items| {
            distinct(items, Field::Course) > 1
        })
    }

    fn description(&self) -> &'static str {
        "Faculty double-booked across courses"
    }
}

/// The same class entered more than once.
#[derive(Debug, Clone, Copy)]
pub struct ExactDuplicate;

impl ConflictRule for ExactDuplicate {
    fn reason(&self) -> ConflictReason {
        ConflictReason::ExactDuplicate
    }

    fn detect(&self, occurrences: &[Occurrence]) -> Vec<ConflictGroup> {
        keyed_groups(occurrences, self.reason(), SLOT_COURSE_SECTION, |_| true)
    }

    fn description(&self) -> &'static str {
        "Duplicate schedule entry"
    }
}

/// Three or more bookings in one faculty slot.
#[derive(Debug, Clone, Copy)]
pub struct TripleBook;

impl ConflictRule for TripleBook {
    fn reason(&self) -> ConflictReason {
        ConflictReason::TripleBook
    }

    fn detect(&self, occurrences: &[Occurrence]) -> Vec<ConflictGroup> {
        keyed_groups(occurrences, self.reason(), SLOT, |items| items.len() >= 3)
    }

    fn description(&self) -> &'static str {
        "Faculty booked three or more times in one slot"
    }
}

/// Same course offered to several sections in one faculty slot.
///
/// Same key and trigger as [`DoubleBookSection`]; reported under its own
/// reason so consumers can label cross-listed offerings separately.
#[derive(Debug, Clone, Copy)]
pub struct CrossListing;

impl ConflictRule for CrossListing {
    fn reason(&self) -> ConflictReason {
        ConflictReason::CrossListing
    }

    fn detect(&self, occurrences: &[Occurrence]) -> Vec<ConflictGroup> {
        keyed_groups(occurrences, self.reason(), SLOT_COURSE, |items| {
            distinct(items, Field::Section) > 1
        })
    }

    fn description(&self) -> &'static str {
        "Possible cross-listed offering"
    }
}

/// One section slot recorded with several different courses.
#[derive(Debug, Clone, Copy)]
pub struct DataQualityMismatch;

impl ConflictRule for DataQualityMismatch {
    fn reason(&self) -> ConflictReason {
        ConflictReason::DataQualityMismatch
    }

    fn detect(&self, occurrences: &[Occurrence]) -> Vec<ConflictGroup> {
        keyed_groups(occurrences, self.reason(), SLOT_SECTION, |items| {
            distinct(items, Field::Course) > 1
        })
    }

    fn description(&self) -> &'static str {
        "Section slot carries conflicting course codes"
    }
}

// ======================== Class rules ========================

/// One class meeting at colliding times on the same day.
///
/// Emits only the members that collide with at least one other member
/// (same time key, or overlapping intervals).
#[derive(Debug, Clone, Copy)]
pub struct SelfClash;

impl ConflictRule for SelfClash {
    fn reason(&self) -> ConflictReason {
        ConflictReason::SelfClash
    }

    fn detect(&self, occurrences: &[Occurrence]) -> Vec<ConflictGroup> {
        let mut groups = Vec::new();
        for (parts, items) in group_by(occurrences, |o| key_parts(o, CLASS_DAY)) {
            if items.len() < 2 {
                continue;
            }
            let clashing: Vec<Occurrence> = items
                .iter()
                .enumerate()
                .filter(|(i, a)| {
                    items
                        .iter()
                        .enumerate()
                        .any(|(j, b)| *i != j && a.time_collides(b))
                })
                .map(|(_, o)| (*o).clone())
                .collect();
            if clashing.len() >= 2 {
                groups.push(ConflictGroup::new(self.reason(), parts.join("|"), clashing));
            }
        }
        groups
    }

    fn description(&self) -> &'static str {
        "Class overlaps itself"
    }
}

/// One class recorded under more than one term.
#[derive(Debug, Clone, Copy)]
pub struct TermMismatchDuplicate;

impl ConflictRule for TermMismatchDuplicate {
    fn reason(&self) -> ConflictReason {
        ConflictReason::TermMismatchDuplicate
    }

    fn detect(&self, occurrences: &[Occurrence]) -> Vec<ConflictGroup> {
        keyed_groups(occurrences, self.reason(), TERMLESS_CLASS_SLOT, |items| {
            distinct(items, Field::Term) > 1
        })
    }

    fn description(&self) -> &'static str {
        "Class duplicated across terms"
    }
}
