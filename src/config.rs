//! Detector configuration.
//!
//! All fields have defaults, so an empty JSON object is a valid
//! configuration that runs every rule and keeps placeholder-faculty
//! groups.
//!
//! ```
//! use u_timetable::config::DetectorConfig;
//!
//! let config = DetectorConfig::from_json_str(
//!     r#"{"enabled_reasons": ["double-book-section", "self-clash"],
//!         "load": {"regular_load_units": 21}}"#,
//! )
//! .unwrap();
//! assert_eq!(config.enabled_reasons.len(), 2);
//! assert_eq!(config.load.unit_multiple, 3);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::load::LoadPolicy;
use crate::models::ConflictReason;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or checking a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// `load.regular_load_units` is negative or not finite.
    #[error("regular load must be a finite, non-negative unit count (got {0})")]
    InvalidRegularLoad(f64),

    /// `load.unit_multiple` is zero.
    #[error("unit multiple must be at least 1")]
    ZeroUnitMultiple,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Reasons whose rules the engine runs.
    pub enabled_reasons: BTreeSet<ConflictReason>,
    /// Faculty names treated as unassigned.
    pub placeholder_faculty: Vec<String>,
    /// Whether the engine drops groups led by a placeholder faculty.
    pub drop_placeholder_faculty: bool,
    /// Regular-load and split policy.
    pub load: LoadPolicy,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            enabled_reasons: ConflictReason::ALL.into_iter().collect(),
            placeholder_faculty: ["unknown", "unassigned", "tba", "to be announced", "staff"]
                .into_iter()
                .map(String::from)
                .collect(),
            drop_placeholder_faculty: false,
            load: LoadPolicy::default(),
        }
    }
}

impl DetectorConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        let regular = self.load.regular_load_units;
        if !regular.is_finite() || regular < 0.0 {
            return Err(ConfigError::InvalidRegularLoad(regular));
        }
        if self.load.unit_multiple == 0 {
            return Err(ConfigError::ZeroUnitMultiple);
        }
        Ok(())
    }

    /// Restricts the engine to the given reasons.
    pub fn with_reasons<I>(mut self, reasons: I) -> Self
    where
        I: IntoIterator<Item = ConflictReason>,
    {
        self.enabled_reasons = reasons.into_iter().collect();
        self
    }

    /// Enables placeholder-faculty filtering.
    pub fn dropping_placeholders(mut self) -> Self {
        self.drop_placeholder_faculty = true;
        self
    }

    /// Whether a reason is enabled.
    pub fn is_enabled(&self, reason: ConflictReason) -> bool {
        self.enabled_reasons.contains(&reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let config = DetectorConfig::default();
        assert!(ConflictReason::ALL.iter().all(|&r| config.is_enabled(r)));
        assert!(!config.drop_placeholder_faculty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = DetectorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DetectorConfig::default());
    }

    #[test]
    fn test_json_overrides() {
        let config = DetectorConfig::from_json_str(
            r#"{
                "enabled_reasons": ["triple-book"],
                "placeholder_faculty": ["Vacant"],
                "drop_placeholder_faculty": true,
                "load": {"regular_load_units": 24, "unit_multiple": 2}
            }"#,
        )
        .unwrap();
        assert!(config.is_enabled(ConflictReason::TripleBook));
        assert!(!config.is_enabled(ConflictReason::SelfClash));
        assert_eq!(config.placeholder_faculty, vec!["Vacant".to_string()]);
        assert!(config.drop_placeholder_faculty);
        assert_eq!(config.load.regular_load_units, 24.0);
        assert_eq!(config.load.unit_multiple, 2);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = DetectorConfig::from_json_str(r#"{"load": {"regular_load_units": -1}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegularLoad(_)));

        let err = DetectorConfig::from_json_str(r#"{"load": {"unit_multiple": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroUnitMultiple));

        let err = DetectorConfig::from_json_str(r#"{"enabled_reasons": ["nope"]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("invalid configuration JSON"));
    }

    #[test]
    fn test_builder_helpers() {
        let config = DetectorConfig::default()
            .with_reasons([ConflictReason::SelfClash])
            .dropping_placeholders();
        assert_eq!(config.enabled_reasons.len(), 1);
        assert!(config.drop_placeholder_faculty);
    }
}
