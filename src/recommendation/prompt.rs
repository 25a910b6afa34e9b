// ABOUTME: Deterministic rendering of the user context block and the strict-schema instruction prompt
// ABOUTME: Last validation point before the model call (age eligibility, blank context or candidates)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use crate::constants::limits::MIN_ELIGIBLE_AGE;
use crate::errors::ValidationError;
use crate::models::{Preferences, RoutineSummary, UserProfile};

/// Opening line of every recommendation prompt
const JSON_ONLY_HEADER: &str = "YOU MUST RESPOND WITH ONLY A JSON OBJECT. NO TEXT BEFORE OR AFTER.";

/// Result schema the model must fill in, one field per line
const RESULT_SCHEMA: &str = r#"{
  "suggestedWorkoutRoutine": "exact routine title",
  "routineId": "exact routine id",
  "description": "why this routine suits the user (max 50 words)",
  "difficultyLevel": "exact difficulty from routine",
  "workoutSplit": "exact workout split from routine"
}"#;

/// Closing instruction of every recommendation prompt
const JSON_ONLY_FOOTER: &str =
    "CRITICAL: Output ONLY the JSON object above. No preamble, no explanations, no markdown.";

/// Stateless renderer of recommendation prompts
pub struct PromptBuilder;

impl PromptBuilder {
    /// Three-line user context block
    ///
    /// ```text
    /// User: 30 yrs, MALE, 180 cm, 80 kg
    /// Goal: BUILD_MUSCLE
    /// Training: INTERMEDIATE, 4 days/week
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` on field `age` when the caller is under 18
    pub fn build_context(
        profile: &UserProfile,
        preferences: &Preferences,
    ) -> Result<String, ValidationError> {
        if profile.age < MIN_ELIGIBLE_AGE {
            return Err(ValidationError::new(
                "age",
                format!("must be at least {MIN_ELIGIBLE_AGE} for a recommendation"),
            ));
        }

        Ok(format!(
            "User: {} yrs, {}, {:.0} cm, {:.0} kg\nGoal: {}\nTraining: {}, {} days/week",
            profile.age,
            profile.gender,
            profile.height_cm,
            profile.weight_kg,
            profile.goal,
            preferences.training_level.trim(),
            preferences.frequency,
        ))
    }

    /// Serialize the candidate set as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` on field `routines` if serialization fails
    pub fn render_candidates(
        candidates: &[RoutineSummary],
    ) -> Result<String, ValidationError> {
        serde_json::to_string_pretty(candidates)
            .map_err(|e| ValidationError::new("routines", format!("could not be serialized: {e}")))
    }

    /// Final instruction prompt embedding the context and candidate JSON
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when either input is blank
    pub fn build_prompt(
        context: &str,
        candidates_json: &str,
    ) -> Result<String, ValidationError> {
        if context.trim().is_empty() {
            return Err(ValidationError::new("context", "must not be blank"));
        }
        if candidates_json.trim().is_empty() {
            return Err(ValidationError::new("routines", "must not be blank"));
        }

        let prompt = format!(
            "{JSON_ONLY_HEADER}\n\n{context}\n\nAvailable routines:\n{candidates_json}\n\n\
             Select the BEST routine and respond with ONLY this JSON (no explanations):\n\
             {RESULT_SCHEMA}\n\n{JSON_ONLY_FOOTER}"
        );
        Ok(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GoalType;

    fn profile(age: u32) -> UserProfile {
        UserProfile::new(1, 180.4, 79.6, age, "FEMALE", GoalType::LoseWeight).unwrap()
    }

    #[test]
    fn test_context_block_layout() {
        let context = PromptBuilder::build_context(&profile(30), &Preferences::new(3, " Beginner "))
            .unwrap();
        assert_eq!(
            context,
            "User: 30 yrs, FEMALE, 180 cm, 80 kg\nGoal: LOSE_WEIGHT\nTraining: Beginner, 3 days/week"
        );
    }

    #[test]
    fn test_minor_is_rejected() {
        let err = PromptBuilder::build_context(&profile(17), &Preferences::new(3, "BEGINNER"))
            .unwrap_err();
        assert_eq!(err.field, "age");
    }

    #[test]
    fn test_blank_inputs_are_rejected() {
        assert_eq!(PromptBuilder::build_prompt("  ", "[]").unwrap_err().field, "context");
        assert_eq!(PromptBuilder::build_prompt("ctx", "\n").unwrap_err().field, "routines");
    }

    #[test]
    fn test_prompt_sections_in_order() {
        let prompt = PromptBuilder::build_prompt("CTX", "[ROUTINES]").unwrap();
        let header = prompt.find(JSON_ONLY_HEADER).unwrap();
        let context = prompt.find("CTX").unwrap();
        let routines = prompt.find("Available routines:\n[ROUTINES]").unwrap();
        let schema = prompt.find("\"routineId\": \"exact routine id\"").unwrap();
        let footer = prompt.find(JSON_ONLY_FOOTER).unwrap();
        assert!(header < context && context < routines && routines < schema && schema < footer);
    }
}
