//! Faculty teaching load and overload balancing.
//!
//! Summarizes each faculty member's units per term and splits the units
//! above the regular load across two terms.
//!
//! # Overload Split
//!
//! The first-term share must be a whole multiple of the unit block (3
//! credit units by default). Among candidates, splits where both terms
//! are whole blocks win, then the most even split, then the one that
//! front-loads the first term.

mod faculty;
mod split;

pub use faculty::{summarize_loads, FacultyLoad};
pub use split::{split_overload, split_overload_with, OverloadSplit, DEFAULT_UNIT_MULTIPLE};

use serde::{Deserialize, Serialize};

/// Regular-load policy used to derive overload units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadPolicy {
    /// Units a faculty member carries before overload starts.
    pub regular_load_units: f64,
    /// Block size the first-term overload share must be a multiple of.
    pub unit_multiple: u32,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            regular_load_units: 18.0,
            unit_multiple: DEFAULT_UNIT_MULTIPLE,
        }
    }
}

impl LoadPolicy {
    /// Sets the regular load.
    pub fn with_regular_load(mut self, units: f64) -> Self {
        self.regular_load_units = units;
        self
    }

    /// Sets the unit block.
    pub fn with_unit_multiple(mut self, multiple: u32) -> Self {
        self.unit_multiple = multiple;
        self
    }
}
