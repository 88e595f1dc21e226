//! Meeting-day model.
//!
//! Day sets arrive either as token arrays (`["Mon", "Wed"]`) or as
//! delimited strings (`"Mon,Wed/Fri"`, `"Tue & Thu"`). Both resolve to the
//! same canonical, Monday-first subset so that equal sets compare equal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separators accepted between day tokens.
const DAY_SEPARATORS: [char; 5] = [' ', ',', '/', ';', '&'];

/// A face-to-face meeting day. Ordering is calendar order, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All days in canonical order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Matches a token by its case-insensitive three-letter prefix.
    ///
    /// `"monday"`, `"MON"` and `"Mon."` all resolve to `Mon`; `"M"` and
    /// `"Th"` do not resolve.
    pub fn from_token(token: &str) -> Option<Self> {
        let prefix: String = token.trim().chars().take(3).collect();
        match prefix.to_uppercase().as_str() {
            "MON" => Some(Weekday::Mon),
            "TUE" => Some(Weekday::Tue),
            "WED" => Some(Weekday::Wed),
            "THU" => Some(Weekday::Thu),
            "FRI" => Some(Weekday::Fri),
            "SAT" => Some(Weekday::Sat),
            "SUN" => Some(Weekday::Sun),
            _ => None,
        }
    }

    /// Short display label (`"Mon"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw day specification as supplied by a record source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DaySpec {
    /// Explicit token list.
    List(Vec<String>),
    /// Delimited string.
    Text(String),
}

impl DaySpec {
    /// Resolves this specification to the canonical day set.
    pub fn resolve(&self) -> Vec<Weekday> {
        match self {
            DaySpec::List(tokens) => expand_days(tokens),
            DaySpec::Text(text) => expand_day_text(text),
        }
    }
}

impl From<&str> for DaySpec {
    fn from(text: &str) -> Self {
        DaySpec::Text(text.to_string())
    }
}

impl From<Vec<String>> for DaySpec {
    fn from(tokens: Vec<String>) -> Self {
        DaySpec::List(tokens)
    }
}

impl From<&[Weekday]> for DaySpec {
    fn from(days: &[Weekday]) -> Self {
        DaySpec::List(days.iter().map(|d| d.as_str().to_string()).collect())
    }
}

/// Normalizes a list of day tokens into the canonical ordered subset.
///
/// Each element is itself split on the day separators, so `["Mon,Wed"]`
/// and `["Mon", "Wed"]` are equivalent. Unknown tokens are dropped.
///
/// # Examples
///
/// ```
/// use u_timetable::models::{expand_days, Weekday};
///
/// let days = expand_days(&["fri", "Monday", "xyz", "mon"]);
/// assert_eq!(days, vec![Weekday::Mon, Weekday::Fri]);
/// ```
pub fn expand_days<S: AsRef<str>>(tokens: &[S]) -> Vec<Weekday> {
    let mut mask = 0u8;
    for raw in tokens {
        for token in raw.as_ref().split(&DAY_SEPARATORS[..]) {
            if let Some(day) = Weekday::from_token(token) {
                mask |= day.bit();
            }
        }
    }
    from_mask(mask)
}

/// Normalizes a delimited day string (`"Mon,Wed/Fri"`).
pub fn expand_day_text(text: &str) -> Vec<Weekday> {
    expand_days(&[text])
}

fn from_mask(mask: u8) -> Vec<Weekday> {
    Weekday::ALL
        .into_iter()
        .filter(|d| mask & d.bit() != 0)
        .collect()
}
