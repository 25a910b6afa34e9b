// ABOUTME: Integration tests for recovering recommendations from model output
// ABOUTME: Fenced, prose-wrapped, malformed and incomplete answers with stage classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use muscledia_ai_service::errors::{AppError, ErrorCode, ParseErrorKind};
use muscledia_ai_service::models::RecommendationResult;
use muscledia_ai_service::recommendation::ResponseParser;

const INNER: &str = r#"{"suggestedWorkoutRoutine":"A","routineId":"1","description":"d","difficultyLevel":"BEGINNER","workoutSplit":"full body"}"#;

fn expected() -> RecommendationResult {
    serde_json::from_str(INNER).unwrap()
}

#[test]
fn test_clean_object_is_accepted() {
    assert_eq!(ResponseParser::parse(INNER).unwrap(), expected());
    assert_eq!(
        ResponseParser::parse(&format!("\n  {INNER}  \n")).unwrap(),
        expected()
    );
}

#[test]
fn test_json_fence_equals_inner_object() {
    let fenced = format!("```json\n{INNER}\n```");
    assert_eq!(ResponseParser::parse(&fenced).unwrap(), expected());
}

#[test]
fn test_bare_fence_is_stripped() {
    let fenced = format!("```\n{INNER}\n```");
    assert_eq!(ResponseParser::parse(&fenced).unwrap(), expected());
}

#[test]
fn test_prose_around_object_is_ignored() {
    let chatty = format!("Based on your profile, here is my pick:\n{INNER}\nEnjoy your training!");
    assert_eq!(ResponseParser::parse(&chatty).unwrap(), expected());
}

#[test]
fn test_fence_after_preamble_uses_pattern_extraction() {
    let raw = format!("Here you go:\n```json\n{INNER}\n```\nLet me know!");
    assert_eq!(ResponseParser::parse(&raw).unwrap(), expected());
}

#[test]
fn test_plain_prose_is_no_json_found() {
    let raw = "I would recommend the Upper Lower routine for you.";
    let err = ResponseParser::parse(raw).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NoJsonFound);
    assert_eq!(err.raw, raw);
    assert!(err.cleaned.is_some());
}

#[test]
fn test_wrong_shape_is_malformed_json() {
    let raw = r#"{"suggestedWorkoutRoutine": ["A", "B"], "routineId": "1"}"#;
    let err = ResponseParser::parse(raw).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::MalformedJson { .. }));
    assert_eq!(err.cleaned.as_deref(), Some(raw));
}

#[test]
fn test_truncated_object_is_malformed_json() {
    let raw = r#"{"suggestedWorkoutRoutine": "A", "routineId": }"#;
    let err = ResponseParser::parse(raw).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::MalformedJson { .. }));
}

#[test]
fn test_empty_routine_id_is_incomplete_result() {
    let raw = r#"{"suggestedWorkoutRoutine":"A","routineId":"","description":"d","difficultyLevel":"BEGINNER","workoutSplit":"full body"}"#;
    let err = ResponseParser::parse(raw).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::IncompleteResult { field: "routineId" }
    );
}

#[test]
fn test_blank_fields_checked_in_order() {
    let raw = r#"{"suggestedWorkoutRoutine":"  ","routineId":"","description":""}"#;
    let err = ResponseParser::parse(raw).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::IncompleteResult {
            field: "suggestedWorkoutRoutine"
        }
    );

    let raw = r#"{"suggestedWorkoutRoutine":"A","routineId":"1","description":" "}"#;
    let err = ResponseParser::parse(raw).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::IncompleteResult {
            field: "description"
        }
    );
}

#[test]
fn test_null_required_fields_are_incomplete_result() {
    let raw = r#"{"suggestedWorkoutRoutine":"A","routineId":"1","description":null,"difficultyLevel":"BEGINNER","workoutSplit":"full body"}"#;
    let err = ResponseParser::parse(raw).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::IncompleteResult {
            field: "description"
        }
    );

    let raw = r#"{"suggestedWorkoutRoutine":null,"routineId":null,"description":"d"}"#;
    let err = ResponseParser::parse(raw).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::IncompleteResult {
            field: "suggestedWorkoutRoutine"
        }
    );
}

#[test]
fn test_null_optional_fields_are_accepted() {
    let raw = r#"{"suggestedWorkoutRoutine":"A","routineId":"1","description":"d","difficultyLevel":null,"workoutSplit":null}"#;
    let result = ResponseParser::parse(raw).unwrap();
    assert_eq!(result.difficulty_level, "");
    assert_eq!(result.workout_split, "");
}

#[test]
fn test_caller_message_names_stage_without_model_text() {
    let raw = "SECRET-MODEL-RAMBLING with no json at all";
    let app_error = AppError::from(ResponseParser::parse(raw).unwrap_err());
    assert_eq!(app_error.code, ErrorCode::ModelOutputInvalid);
    assert!(app_error.message.contains("no_json_found"));
    assert!(!app_error.message.contains("SECRET-MODEL-RAMBLING"));
}
