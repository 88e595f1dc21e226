//! Timetable domain models.
//!
//! Provides the data types the conflict engine reasons about, from the raw
//! schedule row a listing supplies down to the normalized, day-pinned
//! occurrence and the flagged conflict group.
//!
//! # Pipeline Mapping
//!
//! | Stage | Type |
//! |-------|------|
//! | Source row | [`ScheduleRecord`] |
//! | Parsed time | [`TimeBlock`] |
//! | Meeting days | [`Weekday`], [`DaySpec`] |
//! | Normalized / day-expanded | [`Occurrence`] |
//! | Finding | [`ConflictGroup`], [`ConflictReason`] |

mod conflict;
mod occurrence;
mod record;
mod time_block;
mod weekday;

pub use conflict::{ConflictGroup, ConflictReason};
pub use occurrence::{day_expand, ingest, normalize_alnum, Occurrence};
pub use record::{RecordId, ScheduleRecord};
pub use time_block::{blocks_overlap, parse_time_block, TimeBlock, MINUTES_PER_DAY};
pub use weekday::{expand_day_text, expand_days, DaySpec, Weekday};
