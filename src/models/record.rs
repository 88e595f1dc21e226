//! Raw class-schedule record.
//!
//! The shape a schedule listing supplies, before any normalization. Every
//! field except `id` is optional; missing fields only narrow which conflict
//! rules a record can take part in.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DaySpec;

/// Source record identifier (integer or string, as the listing provides).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric database key.
    Int(i64),
    /// Opaque string key.
    Text(String),
}

impl RecordId {
    /// Whether the identifier carries no value (empty or whitespace text).
    pub fn is_blank(&self) -> bool {
        match self {
            RecordId::Int(_) => false,
            RecordId::Text(s) => s.trim().is_empty(),
        }
    }
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s.trim()),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        RecordId::Int(i64::from(n))
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

/// One class-schedule row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleRecord {
    /// Source record identifier.
    pub id: RecordId,
    /// Faculty identifier (preferred identity).
    pub faculty_id: Option<RecordId>,
    /// Faculty display name (fallback identity).
    pub faculty_name: Option<String>,
    /// Term label ("1st", "2nd", "Sem").
    pub term: Option<String>,
    /// Room label.
    pub room: Option<String>,
    /// Section / block label.
    pub section: Option<String>,
    /// Course code or name.
    pub course_code: Option<String>,
    /// Raw time range ("7:30-9AM").
    pub time: Option<String>,
    /// Meeting days.
    pub days: Option<DaySpec>,
    /// Teaching units carried by the class.
    pub units: Option<f64>,
}

impl ScheduleRecord {
    /// Creates an empty record with the given id.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the faculty identifier.
    pub fn with_faculty_id(mut self, faculty_id: impl Into<RecordId>) -> Self {
        self.faculty_id = Some(faculty_id.into());
        self
    }

    /// Sets the faculty display name.
    pub fn with_faculty_name(mut self, name: impl Into<String>) -> Self {
        self.faculty_name = Some(name.into());
        self
    }

    /// Sets the term label.
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    /// Sets the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Sets the section.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Sets the course code.
    pub fn with_course(mut self, course_code: impl Into<String>) -> Self {
        self.course_code = Some(course_code.into());
        self
    }

    /// Sets the raw time range.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Sets the meeting days.
    pub fn with_days(mut self, days: impl Into<DaySpec>) -> Self {
        self.days = Some(days.into());
        self
    }

    /// Sets the teaching units.
    pub fn with_units(mut self, units: f64) -> Self {
        self.units = Some(units);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let r = ScheduleRecord::new(7)
            .with_faculty_id(101)
            .with_faculty_name("Dela Cruz, Juan")
            .with_term("1st")
            .with_room("R-201")
            .with_section("BSIT 1-A")
            .with_course("IT 101")
            .with_time("7:30-9AM")
            .with_days("Mon/Wed")
            .with_units(3.0);

        assert_eq!(r.id, RecordId::Int(7));
        assert_eq!(r.faculty_id, Some(RecordId::Int(101)));
        assert_eq!(r.term.as_deref(), Some("1st"));
        assert_eq!(r.days, Some(DaySpec::Text("Mon/Wed".into())));
        assert_eq!(r.units, Some(3.0));
    }

    #[test]
    fn test_record_id_blank() {
        assert!(RecordId::from("  ").is_blank());
        assert!(RecordId::default().is_blank());
        assert!(!RecordId::from(0).is_blank());
        assert!(!RecordId::from("A1").is_blank());
    }

    #[test]
    fn test_record_deserialize_mixed_ids() {
        let json = r#"[
            {"id": 1, "faculty_name": "Reyes", "days": ["Mon", "Thu"]},
            {"id": "sched-2", "faculty_id": "F-9", "days": "Tue/Fri", "units": 1.5}
        ]"#;
        let records: Vec<ScheduleRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].id, RecordId::Int(1));
        assert_eq!(records[1].id, RecordId::Text("sched-2".into()));
        assert_eq!(records[1].faculty_id, Some(RecordId::Text("F-9".into())));
        assert!(records[0].term.is_none());
        assert_eq!(records[1].units, Some(1.5));
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId::Int(42).to_string(), "42");
        assert_eq!(RecordId::from(" x1 ").to_string(), "x1");
    }
}
