//! Class-schedule conflict detection and faculty load balancing.
//!
//! Takes a flat list of schedule records (faculty, term, section, course,
//! time range, meeting days, units), reports every group of records that
//! collide, and balances faculty overload across two terms.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ScheduleRecord`, `Occurrence`, `TimeBlock`,
//!   `Weekday`, `ConflictReason`, `ConflictGroup`
//! - **`detection`**: The conflict classifier rules, the cross-faculty
//!   overlap finder, the redundancy reducer and the `ConflictEngine` that
//!   runs them
//! - **`load`**: Per-faculty load summaries and the overload splitter
//! - **`config`**: `DetectorConfig` (enabled rules, placeholder faculty,
//!   load policy) loaded from JSON
//! - **`validation`**: Input diagnostics (duplicate IDs, unparsable times,
//!   missing fields)
//!
//! # Pipeline
//!
//! ```text
//! records ─ ingest ─ day_expand ─┬─ classifier rules ───────┬─ reduce ─ report
//!                                └─ cross-faculty overlap ──┘
//! ```
//!
//! ```
//! use u_timetable::detection::ConflictEngine;
//! use u_timetable::models::{ConflictReason, ScheduleRecord};
//!
//! let records = vec![
//!     ScheduleRecord::new(1)
//!         .with_faculty_id(7)
//!         .with_term("1st")
//!         .with_section("A")
//!         .with_course("IT 101")
//!         .with_time("7:30-9AM")
//!         .with_days("Mon"),
//!     ScheduleRecord::new(2)
//!         .with_faculty_id(7)
//!         .with_term("1st")
//!         .with_section("A")
//!         .with_course("IT 102")
//!         .with_time("7:30-9AM")
//!         .with_days("Mon"),
//! ];
//!
//! let report = ConflictEngine::with_all_rules().run(&records);
//! let counts = report.count_by_reason();
//! assert_eq!(counts[&ConflictReason::DoubleBookCourse], 1);
//! assert_eq!(counts[&ConflictReason::DataQualityMismatch], 1);
//! assert_eq!(counts[&ConflictReason::CrossFacultyOverlap], 1);
//! assert_eq!(report.groups.len(), 3);
//! ```

pub mod config;
pub mod detection;
pub mod load;
pub mod models;
pub mod validation;

pub use detection::{detect_conflicts, detect_cross_faculty_overlaps, reduce_redundant};
pub use load::split_overload;
pub use models::{day_expand, expand_days, parse_time_block};
