// ABOUTME: RecommendationResult, the structured answer recovered from model output
// ABOUTME: Field names match the JSON schema the model is instructed to emit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use serde::{Deserialize, Deserializer, Serialize};

use super::routine::string_or_number;

/// Routine chosen by the model for the caller
///
/// Absent or null keys deserialize as empty strings so that a missing required field
/// is reported by name through [`Self::first_blank_required_field`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationResult {
    /// Title of the suggested routine
    #[serde(deserialize_with = "null_as_empty")]
    pub suggested_workout_routine: String,
    /// Catalog id of the suggested routine; numeric ids are kept as text
    #[serde(deserialize_with = "string_or_number")]
    pub routine_id: String,
    /// Why the routine fits the caller
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    /// Difficulty level of the routine
    #[serde(deserialize_with = "null_as_empty")]
    pub difficulty_level: String,
    /// Split of the routine (full body, upper/lower, ...)
    #[serde(deserialize_with = "null_as_empty")]
    pub workout_split: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl RecommendationResult {
    /// JSON names of the fields that must be non-blank, in check order
    pub const REQUIRED_FIELDS: [&'static str; 3] =
        ["suggestedWorkoutRoutine", "routineId", "description"];

    /// First required field that is blank, if any
    #[must_use]
    pub fn first_blank_required_field(&self) -> Option<&'static str> {
        [
            &self.suggested_workout_routine,
            &self.routine_id,
            &self.description,
        ]
        .into_iter()
        .zip(Self::REQUIRED_FIELDS)
        .find_map(|(value, name)| value.trim().is_empty().then_some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_numeric_ids() {
        let result: RecommendationResult =
            serde_json::from_str(r#"{"suggestedWorkoutRoutine":"A","routineId":7,"description":"d"}"#)
                .unwrap();
        assert_eq!(result.routine_id, "7");
        assert_eq!(result.first_blank_required_field(), None);

        let result: RecommendationResult =
            serde_json::from_str(r#"{"suggestedWorkoutRoutine":"A","description":"d"}"#).unwrap();
        assert_eq!(result.first_blank_required_field(), Some("routineId"));
    }

    #[test]
    fn test_null_fields_read_as_blank() {
        let result: RecommendationResult = serde_json::from_str(
            r#"{"suggestedWorkoutRoutine":"A","routineId":"1","description":null,"workoutSplit":null}"#,
        )
        .unwrap();
        assert_eq!(result.workout_split, "");
        assert_eq!(result.first_blank_required_field(), Some("description"));
    }
}
