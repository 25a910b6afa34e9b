// ABOUTME: Training preferences supplied with each recommendation request
// ABOUTME: Weekly frequency bounds check and training level normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::constants::limits::{MAX_FREQUENCY, MIN_FREQUENCY};
use crate::errors::ValidationError;

/// Training experience level
///
/// Known levels get their own variant; anything else is kept as a normalized
/// free-form label so catalogs with custom difficulty names still match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrainingLevel {
    /// New to structured training
    Beginner,
    /// Some consistent training history
    Intermediate,
    /// Experienced lifter
    Advanced,
    /// Any other label, trimmed and uppercased
    Custom(String),
}

impl TrainingLevel {
    /// Normalize a raw label (trim + uppercase) into a level
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_uppercase();
        match normalized.as_str() {
            "BEGINNER" => Self::Beginner,
            "INTERMEDIATE" => Self::Intermediate,
            "ADVANCED" => Self::Advanced,
            _ => Self::Custom(normalized),
        }
    }

    /// Canonical uppercase label
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Beginner => "BEGINNER",
            Self::Intermediate => "INTERMEDIATE",
            Self::Advanced => "ADVANCED",
            Self::Custom(label) => label,
        }
    }

    /// Whether a catalog difficulty value names this level
    #[must_use]
    pub fn matches(&self, difficulty: &str) -> bool {
        difficulty.trim().to_uppercase() == self.as_str()
    }
}

impl Display for TrainingLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weekly frequency and level requested by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Training days per week, 1 through 7
    pub frequency: i32,
    /// Free-form level label as sent by the client
    #[serde(alias = "lvlOfTraining", default)]
    pub training_level: String,
}

impl Preferences {
    /// Create preferences
    #[must_use]
    pub fn new(frequency: i32, training_level: impl Into<String>) -> Self {
        Self {
            frequency,
            training_level: training_level.into(),
        }
    }

    /// Check frequency range and level presence
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a frequency outside 1..=7 or a blank level
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_FREQUENCY..=MAX_FREQUENCY).contains(&self.frequency) {
            return Err(ValidationError::new(
                "frequency",
                format!(
                    "must be between {MIN_FREQUENCY} and {MAX_FREQUENCY}, got {}",
                    self.frequency
                ),
            ));
        }
        if self.training_level.trim().is_empty() {
            return Err(ValidationError::new("trainingLevel", "must not be blank"));
        }
        Ok(())
    }

    /// Normalized level
    #[must_use]
    pub fn level(&self) -> TrainingLevel {
        TrainingLevel::parse(&self.training_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_bounds() {
        assert!(Preferences::new(1, "BEGINNER").validate().is_ok());
        assert!(Preferences::new(7, "BEGINNER").validate().is_ok());
        let err = Preferences::new(0, "BEGINNER").validate().unwrap_err();
        assert_eq!(err.field, "frequency");
        assert!(Preferences::new(8, "BEGINNER").validate().is_err());
    }

    #[test]
    fn test_blank_level_rejected() {
        let err = Preferences::new(3, "   ").validate().unwrap_err();
        assert_eq!(err.field, "trainingLevel");
    }

    #[test]
    fn test_level_normalization() {
        assert_eq!(TrainingLevel::parse(" intermediate "), TrainingLevel::Intermediate);
        assert_eq!(
            TrainingLevel::parse("elite"),
            TrainingLevel::Custom("ELITE".to_owned())
        );
        assert!(TrainingLevel::Advanced.matches(" advanced"));
    }

    #[test]
    fn test_legacy_field_alias() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"frequency":3,"lvlOfTraining":"BEGINNER"}"#).unwrap();
        assert_eq!(prefs.training_level, "BEGINNER");
    }
}
