// ABOUTME: UserProfile value object and the GoalType category
// ABOUTME: Construction enforces strictly positive measurements and a non-blank gender
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Training goal category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GoalType {
    /// Hypertrophy focus
    BuildMuscle,
    /// Fat loss focus
    LoseWeight,
    /// Strength focus
    IncreaseStrength,
    /// Conditioning focus
    ImproveEndurance,
    /// Keep current shape
    Maintain,
    /// Label not known to this service, kept uppercased
    Other(String),
}

impl GoalType {
    /// Canonical uppercase label
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::BuildMuscle => "BUILD_MUSCLE",
            Self::LoseWeight => "LOSE_WEIGHT",
            Self::IncreaseStrength => "INCREASE_STRENGTH",
            Self::ImproveEndurance => "IMPROVE_ENDURANCE",
            Self::Maintain => "MAINTAIN",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for GoalType {
    fn from(raw: &str) -> Self {
        let normalized = raw.trim().to_uppercase();
        match normalized.as_str() {
            "BUILD_MUSCLE" => Self::BuildMuscle,
            "LOSE_WEIGHT" => Self::LoseWeight,
            "INCREASE_STRENGTH" => Self::IncreaseStrength,
            "IMPROVE_ENDURANCE" => Self::ImproveEndurance,
            "MAINTAIN" => Self::Maintain,
            _ => Self::Other(normalized),
        }
    }
}

impl From<String> for GoalType {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<GoalType> for String {
    fn from(goal: GoalType) -> Self {
        goal.as_str().to_owned()
    }
}

impl Display for GoalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical and goal profile of the caller, always fully populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Subject id
    pub user_id: i64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Age in years
    pub age: u32,
    /// Gender label
    pub gender: String,
    /// Training goal
    pub goal: GoalType,
}

impl UserProfile {
    /// Build a profile, checking the value invariants
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when a measurement is not strictly positive
    /// or the gender is blank
    pub fn new(
        user_id: i64,
        height_cm: f64,
        weight_kg: f64,
        age: u32,
        gender: impl Into<String>,
        goal: GoalType,
    ) -> Result<Self, ValidationError> {
        let gender = gender.into();
        if height_cm.is_nan() || height_cm <= 0.0 {
            return Err(ValidationError::new("height", "must be positive"));
        }
        if weight_kg.is_nan() || weight_kg <= 0.0 {
            return Err(ValidationError::new("weight", "must be positive"));
        }
        if age == 0 {
            return Err(ValidationError::new("age", "must be positive"));
        }
        if gender.trim().is_empty() {
            return Err(ValidationError::new("gender", "must not be blank"));
        }
        Ok(Self {
            user_id,
            height_cm,
            weight_kg,
            age,
            gender,
            goal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_round_trips_through_label() {
        assert_eq!(GoalType::from("build_muscle"), GoalType::BuildMuscle);
        assert_eq!(GoalType::from("Mobility").as_str(), "MOBILITY");
        let json = serde_json::to_string(&GoalType::LoseWeight).unwrap();
        assert_eq!(json, "\"LOSE_WEIGHT\"");
    }

    #[test]
    fn test_profile_rejects_non_positive_measurements() {
        assert!(UserProfile::new(1, 0.0, 70.0, 25, "MALE", GoalType::BuildMuscle).is_err());
        assert!(UserProfile::new(1, 170.0, -1.0, 25, "MALE", GoalType::BuildMuscle).is_err());
        assert!(UserProfile::new(1, f64::NAN, 70.0, 25, "MALE", GoalType::BuildMuscle).is_err());
        assert!(UserProfile::new(1, 170.0, 70.0, 0, "MALE", GoalType::BuildMuscle).is_err());
        let err = UserProfile::new(1, 170.0, 70.0, 25, " ", GoalType::BuildMuscle).unwrap_err();
        assert_eq!(err.field, "gender");
    }
}
