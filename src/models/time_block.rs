//! Time-block model and parser.
//!
//! Class times are written the way registrars print them: `"7:30-9AM"`,
//! `"1-2:30PM"`, `"11-12NN"`. A single meridiem suffix applies to both
//! ends of the range.
//!
//! # Time Model
//! Minutes since midnight on a 0..1440 day clock. Intervals are half-open
//! `[start, end)`; no overnight wraparound.
//!
//! # Suffixes
//!
//! | Suffix | Start hour | End hour |
//! |--------|-----------|----------|
//! | `AM` | 12 → 0, else as written | 12 → 0, else as written |
//! | `PM` | 1–11 → +12, 12 stays | 1–11 → +12, 12 stays |
//! | `NN` | read as AM | fixed at 12:00 (720) |

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Noon on the minute clock.
const NOON: u32 = 12 * 60;

static TIME_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*-\s*(\d{1,2})(?::(\d{2}))?\s*(AM|PM|NN)$")
        .expect("time block pattern is valid")
});

/// A class meeting interval `[start, end)` in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBlock {
    /// Start minute (inclusive).
    pub start: u32,
    /// End minute (exclusive).
    pub end: u32,
}

/// Meridiem suffix of a time block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
    Noon,
}

impl TimeBlock {
    /// Creates a new time block.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Parses a time block. See [`parse_time_block`].
    pub fn parse(text: &str) -> Option<Self> {
        parse_time_block(text)
    }

    /// Length of the block in minutes (0 for inverted blocks).
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether two blocks overlap: `max(starts) < min(ends)`.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    /// Canonical key used for cheap equality tests (`"450-540"`).
    pub fn key(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

/// Parses a registrar-style time range into a [`TimeBlock`].
///
/// Input is trimmed and upper-cased before matching. Returns `None` for
/// anything that does not match `H[:MM]-H[:MM](AM|PM|NN)`, including empty
/// text and `"TBA"`.
///
/// # Examples
///
/// ```
/// use u_timetable::models::{parse_time_block, TimeBlock};
///
/// assert_eq!(parse_time_block("7:30-9AM"), Some(TimeBlock::new(450, 540)));
/// assert_eq!(parse_time_block("11-12NN"), Some(TimeBlock::new(660, 720)));
/// assert_eq!(parse_time_block("TBA"), None);
/// ```
pub fn parse_time_block(text: &str) -> Option<TimeBlock> {
    let normalized = text.trim().to_uppercase();
    let caps = TIME_BLOCK.captures(&normalized)?;

    let start_hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let start_min = minute_part(caps.get(2))?;
    let end_hour: u32 = caps.get(3)?.as_str().parse().ok()?;
    let end_min = minute_part(caps.get(4))?;
    let meridiem = match caps.get(5)?.as_str() {
        "AM" => Meridiem::Am,
        "PM" => Meridiem::Pm,
        _ => Meridiem::Noon,
    };

    if !(1..=12).contains(&start_hour) || !(1..=12).contains(&end_hour) {
        return None;
    }

    let start = match meridiem {
        Meridiem::Am | Meridiem::Noon => to_minutes(start_hour, start_min, Meridiem::Am),
        Meridiem::Pm => to_minutes(start_hour, start_min, Meridiem::Pm),
    };
    let end = match meridiem {
        Meridiem::Noon => NOON,
        m => to_minutes(end_hour, end_min, m),
    };

    Some(TimeBlock { start, end })
}

/// Overlap test over optional blocks; a missing block never overlaps.
#[inline]
pub fn blocks_overlap(a: Option<&TimeBlock>, b: Option<&TimeBlock>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.overlaps(b),
        _ => false,
    }
}

fn minute_part(m: Option<regex::Match<'_>>) -> Option<u32> {
    match m {
        None => Some(0),
        Some(m) => {
            let minutes: u32 = m.as_str().parse().ok()?;
            (minutes < 60).then_some(minutes)
        }
    }
}

fn to_minutes(hour: u32, minute: u32, meridiem: Meridiem) -> u32 {
    let hour24 = match meridiem {
        Meridiem::Am | Meridiem::Noon => {
            if hour == 12 {
                0
            } else {
                hour
            }
        }
        Meridiem::Pm => {
            if hour == 12 {
                12
            } else {
                hour + 12
            }
        }
    };
    hour24 * 60 + minute
}
