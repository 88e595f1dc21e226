//! Occurrence model and ingestion.
//!
//! An occurrence is the unit the conflict rules reason about: one schedule
//! record, normalized once, and after day expansion pinned to a single
//! meeting day.
//!
//! # Normalization
//!
//! | Field | Rule |
//! |-------|------|
//! | `faculty_key` | `id:<faculty_id>`, else `name:<alphanumeric lower-case name>` |
//! | `term` | trimmed, lower-cased; empty → `None` |
//! | `time_key` | `"<start>-<end>"` when parsable, else lower-cased raw text |
//! | `course_code` | trimmed, lower-cased |
//! | `section` | alphanumeric only, lower-cased |

use serde::{Deserialize, Serialize};

use super::{parse_time_block, RecordId, ScheduleRecord, TimeBlock, Weekday};

/// A normalized schedule record, optionally pinned to one meeting day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Source record id. Shared by all day copies of one record.
    pub id: RecordId,
    /// Resolved faculty identity.
    pub faculty_key: Option<String>,
    /// Faculty display name, as supplied.
    pub faculty_name: String,
    /// Normalized term label.
    pub term: Option<String>,
    /// Meeting day, assigned by [`day_expand`].
    pub day: Option<Weekday>,
    /// Canonical meeting days of the source record.
    pub days: Vec<Weekday>,
    /// Canonical time representation for equality tests.
    pub time_key: Option<String>,
    /// Parsed interval, if the time text was parsable.
    pub block: Option<TimeBlock>,
    /// Normalized course code.
    pub course_code: String,
    /// Normalized section label.
    pub section: String,
    /// Room label, as supplied.
    pub room: String,
    /// Teaching units of the source record.
    pub units: Option<f64>,
}

impl Occurrence {
    /// Normalizes a raw record.
    pub fn from_record(record: &ScheduleRecord) -> Self {
        let faculty_name = record
            .faculty_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let raw_time = record.time.as_deref().unwrap_or_default();
        let block = parse_time_block(raw_time);

        Self {
            id: record.id.clone(),
            faculty_key: resolve_faculty_key(record.faculty_id.as_ref(), &faculty_name),
            faculty_name,
            term: record
                .term
                .as_deref()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty()),
            day: None,
            days: record
                .days
                .as_ref()
                .map(|d| d.resolve())
                .unwrap_or_default(),
            time_key: time_key(block.as_ref(), raw_time),
            block,
            course_code: record
                .course_code
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_lowercase(),
            section: normalize_alnum(record.section.as_deref().unwrap_or_default()),
            room: record.room.as_deref().unwrap_or_default().trim().to_string(),
            units: record.units.filter(|u| u.is_finite()),
        }
    }

    /// Copy of this occurrence pinned to `day`.
    pub fn on_day(&self, day: Weekday) -> Self {
        Self {
            day: Some(day),
            ..self.clone()
        }
    }

    /// Whether this occurrence can enter the faculty-scoped rules.
    ///
    /// Requires faculty identity, term, time key and an assigned day.
    pub fn is_faculty_scoped(&self) -> bool {
        self.faculty_key.is_some()
            && self.term.is_some()
            && self.time_key.is_some()
            && self.day.is_some()
    }

    /// Whether this occurrence can enter the cross-faculty overlap finder.
    ///
    /// Requires term, an assigned day and a section; faculty is not needed.
    pub fn is_section_scoped(&self) -> bool {
        self.term.is_some() && self.day.is_some() && !self.section.is_empty()
    }

    /// Whether two occurrences collide in time: equal time keys, or
    /// overlapping parsed intervals.
    pub fn time_collides(&self, other: &Self) -> bool {
        let same_key = matches!(
            (&self.time_key, &other.time_key),
            (Some(a), Some(b)) if a == b
        );
        same_key || super::blocks_overlap(self.block.as_ref(), other.block.as_ref())
    }

    /// Scheduled minutes per week (block length × meeting days).
    pub fn weekly_minutes(&self) -> u32 {
        self.block
            .map(|b| b.duration_minutes() * self.days.len() as u32)
            .unwrap_or(0)
    }
}

/// Normalizes every record.
pub fn ingest(records: &[ScheduleRecord]) -> Vec<Occurrence> {
    records.iter().map(Occurrence::from_record).collect()
}

/// Fans each occurrence out to one copy per canonical meeting day.
///
/// A record with no resolvable days contributes nothing. Input order is
/// preserved; within one record, days follow canonical order.
pub fn day_expand(occurrences: &[Occurrence]) -> Vec<Occurrence> {
    occurrences
        .iter()
        .flat_map(|occ| occ.days.iter().map(move |&day| occ.on_day(day)))
        .collect()
}

/// Lower-cases and strips everything but letters and digits.
pub fn normalize_alnum(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn resolve_faculty_key(faculty_id: Option<&RecordId>, faculty_name: &str) -> Option<String> {
    if let Some(id) = faculty_id.filter(|id| !id.is_blank()) {
        return Some(format!("id:{id}"));
    }
    let name = normalize_alnum(faculty_name);
    (!name.is_empty()).then(|| format!("name:{name}"))
}

fn time_key(block: Option<&TimeBlock>, raw: &str) -> Option<String> {
    match block {
        Some(b) => Some(b.key()),
        None => {
            let raw = raw.trim().to_lowercase();
            (!raw.is_empty()).then_some(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScheduleRecord {
        ScheduleRecord::new(1)
            .with_faculty_name("  Dela Cruz, Juan ")
            .with_term(" 1ST ")
            .with_section("BSIT 1-A")
            .with_course(" IT 101 ")
            .with_time("7:30-9AM")
            .with_days("Wed, Mon")
    }

    #[test]
    fn test_from_record_normalizes() {
        let occ = Occurrence::from_record(&sample());
        assert_eq!(occ.faculty_key.as_deref(), Some("name:delacruzjuan"));
        assert_eq!(occ.faculty_name, "Dela Cruz, Juan");
        assert_eq!(occ.term.as_deref(), Some("1st"));
        assert_eq!(occ.section, "bsit1a");
        assert_eq!(occ.course_code, "it 101");
        assert_eq!(occ.time_key.as_deref(), Some("450-540"));
        assert_eq!(occ.block, Some(TimeBlock::new(450, 540)));
        assert_eq!(occ.days, vec![Weekday::Mon, Weekday::Wed]);
        assert_eq!(occ.day, None);
    }

    #[test]
    fn test_faculty_id_preferred_over_name() {
        let occ = Occurrence::from_record(&sample().with_faculty_id(55));
        assert_eq!(occ.faculty_key.as_deref(), Some("id:55"));

        let blank_id = Occurrence::from_record(&sample().with_faculty_id(""));
        assert_eq!(blank_id.faculty_key.as_deref(), Some("name:delacruzjuan"));
    }

    #[test]
    fn test_missing_identity() {
        let occ = Occurrence::from_record(&ScheduleRecord::new(2).with_faculty_name(" , "));
        assert_eq!(occ.faculty_key, None);
        assert_eq!(occ.term, None);
        assert_eq!(occ.time_key, None);
    }

    #[test]
    fn test_unparsable_time_falls_back_to_raw_key() {
        let occ = Occurrence::from_record(&sample().with_time(" TBA "));
        assert_eq!(occ.block, None);
        assert_eq!(occ.time_key.as_deref(), Some("tba"));
    }

    #[test]
    fn test_day_expand_fans_out() {
        let occs = ingest(&[sample(), sample().with_days("xyz")]);
        let expanded = day_expand(&occs);
        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[0].day, Some(Weekday::Mon));
        assert_eq!(expanded[1].day, Some(Weekday::Wed));
        assert!(expanded.iter().all(|o| o.id == RecordId::Int(1)));
        // Input untouched
        assert!(occs.iter().all(|o| o.day.is_none()));
    }

    #[test]
    fn test_day_expand_empty() {
        assert!(day_expand(&[]).is_empty());
    }

    #[test]
    fn test_scopes() {
        let expanded = day_expand(&ingest(&[sample()]));
        assert!(expanded[0].is_faculty_scoped());
        assert!(expanded[0].is_section_scoped());

        let no_faculty = day_expand(&ingest(&[ScheduleRecord::new(3)
            .with_term("1st")
            .with_section("A")
            .with_days("Mon")]));
        assert!(!no_faculty[0].is_faculty_scoped());
        assert!(no_faculty[0].is_section_scoped());

        // Not yet expanded: no day assigned
        let raw = Occurrence::from_record(&sample());
        assert!(!raw.is_faculty_scoped());
        assert!(!raw.is_section_scoped());
    }

    #[test]
    fn test_time_collides() {
        let a = Occurrence::from_record(&sample());
        let b = Occurrence::from_record(&sample().with_time("8-10AM"));
        let c = Occurrence::from_record(&sample().with_time("9-10AM"));
        let tba1 = Occurrence::from_record(&sample().with_time("TBA"));
        let tba2 = Occurrence::from_record(&sample().with_time("tba"));
        assert!(a.time_collides(&b));
        assert!(!a.time_collides(&c));
        assert!(tba1.time_collides(&tba2));
        assert!(!tba1.time_collides(&a));
    }

    #[test]
    fn test_weekly_minutes() {
        let occ = Occurrence::from_record(&sample());
        assert_eq!(occ.weekly_minutes(), 180); // 90 min × 2 days
    }
}
