//! Conflict engine.
//!
//! Composes conflict rules into the full detection pipeline and collects
//! the surviving groups into a [`ConflictReport`].

use log::{debug, trace, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::rules::{
    CrossListing, DataQualityMismatch, DoubleBookCourse, DoubleBookSection, ExactDuplicate,
    SelfClash, TermMismatchDuplicate, TripleBook,
};
use super::{reduce_redundant, ConflictRule, CrossFacultyOverlap, PlaceholderFaculty, RuleScope};
use crate::config::{self, DetectorConfig};
use crate::models::{day_expand, ingest, ConflictGroup, ConflictReason, Occurrence, ScheduleRecord};

/// Composable conflict-detection pipeline.
///
/// # Example
/// ```
/// use u_timetable::detection::ConflictEngine;
/// use u_timetable::models::ScheduleRecord;
///
/// let records = vec![
///     ScheduleRecord::new(1).with_faculty_id(5).with_term("1st").with_days("Mon")
///         .with_time("7:30-9AM").with_course("IT 101").with_section("A"),
///     ScheduleRecord::new(2).with_faculty_id(5).with_term("1st").with_days("Mon")
///         .with_time("7:30-9AM").with_course("IT 101").with_section("B"),
/// ];
///
/// let report = ConflictEngine::with_all_rules().run(&records);
/// assert!(!report.is_clean());
/// ```
#[derive(Clone, Default)]
pub struct ConflictEngine {
    rules: Vec<Arc<dyn ConflictRule>>,
    placeholders: Option<PlaceholderFaculty>,
}

impl ConflictEngine {
    /// Creates an engine with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine running all nine rules.
    pub fn with_all_rules() -> Self {
        Self::new()
            .with_rule(DoubleBookSection)
            .with_rule(DoubleBookCourse)
            .with_rule(ExactDuplicate)
            .with_rule(SelfClash)
            .with_rule(TripleBook)
            .with_rule(CrossListing)
            .with_rule(DataQualityMismatch)
            .with_rule(TermMismatchDuplicate)
            .with_rule(CrossFacultyOverlap)
    }

    /// Builds an engine from a validated configuration.
    pub fn from_config(config: &DetectorConfig) -> config::Result<Self> {
        config.validate()?;

        let mut engine = Self::with_all_rules();
        engine.rules.retain(|r| config.is_enabled(r.reason()));
        if engine.rules.is_empty() {
            warn!("conflict engine configured with no enabled rules");
        }
        if config.drop_placeholder_faculty {
            engine = engine
                .with_placeholder_filter(PlaceholderFaculty::new(&config.placeholder_faculty));
        }
        Ok(engine)
    }

    /// Adds a rule.
    pub fn with_rule<R: ConflictRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Drops groups whose representative faculty is a placeholder.
    pub fn with_placeholder_filter(mut self, placeholders: PlaceholderFaculty) -> Self {
        self.placeholders = Some(placeholders);
        self
    }

    /// Reasons of the configured rules, in rule order.
    pub fn reasons(&self) -> Vec<ConflictReason> {
        self.rules.iter().map(|r| r.reason()).collect()
    }

    /// Runs the full pipeline over raw records.
    pub fn run(&self, records: &[ScheduleRecord]) -> ConflictReport {
        let occurrences = ingest(records);
        self.run_occurrences(&occurrences)
    }

    /// Runs the pipeline over ingested (not yet day-expanded) occurrences.
    pub fn run_occurrences(&self, occurrences: &[Occurrence]) -> ConflictReport {
        let expanded = day_expand(occurrences);
        let faculty_scoped: Vec<Occurrence> = expanded
            .iter()
            .filter(|o| RuleScope::Faculty.admits(o))
            .cloned()
            .collect();
        let section_scoped: Vec<Occurrence> = expanded
            .iter()
            .filter(|o| RuleScope::Section.admits(o))
            .cloned()
            .collect();
        let excluded_count = expanded
            .iter()
            .filter(|o| !o.is_faculty_scoped() && !o.is_section_scoped())
            .count();

        debug!(
            "expanded {} records into {} occurrences ({} faculty-scoped, {} section-scoped, {} excluded)",
            occurrences.len(),
            expanded.len(),
            faculty_scoped.len(),
            section_scoped.len(),
            excluded_count
        );

        let mut groups = Vec::new();
        for rule in &self.rules {
            let input = match rule.scope() {
                RuleScope::Faculty => &faculty_scoped,
                RuleScope::Section => &section_scoped,
            };
            let found = rule.detect(input);
            trace!("rule {} flagged {} groups", rule.name(), found.len());
            groups.extend(found);
        }

        let mut groups = reduce_redundant(groups);
        if let Some(placeholders) = &self.placeholders {
            let before = groups.len();
            groups = placeholders.filter(groups);
            debug!("placeholder filter removed {} groups", before - groups.len());
        }

        ConflictReport {
            groups,
            record_count: occurrences.len(),
            occurrence_count: expanded.len(),
            excluded_count,
        }
    }
}

impl std::fmt::Debug for ConflictEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConflictEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("placeholders", &self.placeholders)
            .finish()
    }
}

/// Outcome of one engine run.
#[derive(Debug, Clone, Default)]
pub struct ConflictReport {
    /// Surviving groups, largest first.
    pub groups: Vec<ConflictGroup>,
    /// Records received.
    pub record_count: usize,
    /// Occurrences after day expansion.
    pub occurrence_count: usize,
    /// Expanded occurrences no rule could examine.
    pub excluded_count: usize,
}

/// One item set flagged under one or more reasons.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedConflict {
    /// Sorted source record ids.
    pub ids: BTreeSet<String>,
    /// Reasons that flagged exactly this id set, in rule order.
    pub reasons: Vec<ConflictReason>,
}

impl ConflictReport {
    /// Whether no conflicts were found.
    pub fn is_clean(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups per reason.
    pub fn count_by_reason(&self) -> BTreeMap<ConflictReason, usize> {
        let mut counts = BTreeMap::new();
        for g in &self.groups {
            *counts.entry(g.reason).or_insert(0) += 1;
        }
        counts
    }

    /// Groups flagged under `reason`.
    pub fn groups_for(&self, reason: ConflictReason) -> Vec<&ConflictGroup> {
        self.groups.iter().filter(|g| g.reason == reason).collect()
    }

    /// Collapses groups with identical id sets into one entry per set.
    ///
    /// Entries keep the order in which their id set first appears.
    pub fn merge_reasons(&self) -> Vec<MergedConflict> {
        let mut merged: Vec<MergedConflict> = Vec::new();
        for g in &self.groups {
            let ids = g.record_ids();
            match merged.iter_mut().find(|m| m.ids == ids) {
                Some(m) => {
                    if !m.reasons.contains(&g.reason) {
                        m.reasons.push(g.reason);
                        m.reasons.sort();
                    }
                }
                None => merged.push(MergedConflict {
                    ids,
                    reasons: vec![g.reason],
                }),
            }
        }
        merged
    }
}
