//! Input diagnostics for schedule records.
//!
//! Detection never rejects input: a record missing a field simply drops
//! out of the rules that need it. These checks explain which records will
//! be skipped and why, so a caller can surface data-entry problems before
//! reading the conflict report. Detects:
//! - Duplicate or blank record IDs
//! - Unparsable time ranges
//! - Records with no resolvable meeting day
//! - Missing term, faculty identity or section

use crate::models::{parse_time_block, Occurrence, ScheduleRecord};
use std::collections::HashSet;
use thiserror::Error;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation finding for one record.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("record {record_id}: {message}")]
pub struct ValidationError {
    /// Finding category.
    pub kind: ValidationErrorKind,
    /// Offending record id (display form).
    pub record_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two records share the same ID.
    DuplicateId,
    /// A record has an empty ID; it can never count toward a conflict.
    BlankId,
    /// Time text present but not a recognizable range.
    UnparsableTime,
    /// No day token resolves to a weekday; the record yields no occurrences.
    NoMeetingDays,
    /// Term missing; excluded from every rule.
    MissingTerm,
    /// Neither faculty ID nor name; excluded from faculty-scoped rules.
    MissingFaculty,
    /// Section missing; excluded from the cross-faculty overlap finder.
    MissingSection,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, record_id: String, message: impl Into<String>) -> Self {
        Self {
            kind,
            record_id,
            message: message.into(),
        }
    }
}

/// Checks every record and reports all findings.
///
/// A time of `"TBA"` is accepted as a deliberate placeholder; any other
/// unparsable time text is reported.
///
/// # Returns
/// `Ok(())` if every record can take part in every rule, `Err(findings)`
/// otherwise.
pub fn validate_records(records: &[ScheduleRecord]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for record in records {
        let id = record.id.to_string();

        if record.id.is_blank() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankId,
                id.clone(),
                "Record has no ID",
            ));
        } else if !ids.insert(record.id.clone()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                id.clone(),
                format!("Duplicate record ID: {id}"),
            ));
        }

        let occ = Occurrence::from_record(record);

        if let Some(time) = record.time.as_deref().map(str::trim) {
            let placeholder = time.is_empty() || time.eq_ignore_ascii_case("tba");
            if !placeholder && parse_time_block(time).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnparsableTime,
                    id.clone(),
                    format!("Unrecognized time range '{time}'"),
                ));
            }
        }

        if occ.days.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoMeetingDays,
                id.clone(),
                "No recognizable meeting day",
            ));
        }

        if occ.term.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingTerm,
                id.clone(),
                "Term is missing",
            ));
        }

        if occ.faculty_key.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingFaculty,
                id.clone(),
                "No faculty ID or name",
            ));
        }

        if occ.section.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingSection,
                id,
                "Section is missing",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(id: i64) -> ScheduleRecord {
        ScheduleRecord::new(id)
            .with_faculty_id(3)
            .with_term("1st")
            .with_section("A")
            .with_course("IT 101")
            .with_time("7:30-9AM")
            .with_days("Mon/Wed")
    }

    fn kinds(records: &[ScheduleRecord]) -> Vec<ValidationErrorKind> {
        validate_records(records)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_records() {
        assert!(validate_records(&[complete(1), complete(2)]).is_ok());
        assert!(validate_records(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let errors = validate_records(&[complete(1), complete(1)]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert_eq!(errors[0].to_string(), "record 1: Duplicate record ID: 1");
    }

    #[test]
    fn test_blank_id() {
        let mut r = complete(1);
        r.id = "".into();
        assert_eq!(kinds(&[r]), vec![ValidationErrorKind::BlankId]);
    }

    #[test]
    fn test_unparsable_time() {
        assert_eq!(
            kinds(&[complete(1).with_time("7:30 to 9")]),
            vec![ValidationErrorKind::UnparsableTime]
        );
        // TBA is an accepted placeholder
        assert!(validate_records(&[complete(1).with_time("TBA")]).is_ok());
    }

    #[test]
    fn test_no_meeting_days() {
        assert_eq!(
            kinds(&[complete(1).with_days("M W F")]),
            vec![ValidationErrorKind::NoMeetingDays]
        );
    }

    #[test]
    fn test_missing_fields() {
        let r = ScheduleRecord::new(9).with_time("1-2PM").with_days("Fri");
        assert_eq!(
            kinds(&[r]),
            vec![
                ValidationErrorKind::MissingTerm,
                ValidationErrorKind::MissingFaculty,
                ValidationErrorKind::MissingSection,
            ]
        );
    }

    #[test]
    fn test_multiple_records_all_reported() {
        let errors = validate_records(&[
            complete(1).with_days(""),
            complete(2).with_section("--"),
        ])
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].record_id, "1");
        assert_eq!(errors[1].record_id, "2");
        assert_eq!(errors[1].kind, ValidationErrorKind::MissingSection);
    }
}
