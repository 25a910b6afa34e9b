// ABOUTME: Recovers a RecommendationResult from free-form model output
// ABOUTME: Layered extraction (direct, fence strip, brace pattern) then schema and blank-field checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! # Response Parser
//!
//! Models wrap JSON in markdown fences or surround it with prose. Extraction
//! tries, first success wins:
//!
//! 1. the trimmed text itself when it starts with `{` and ends with `}`
//! 2. the same test after removing a leading fence (with or without a
//!    language tag) and a trailing fence
//! 3. the first substring matching a brace-balanced object pattern
//!
//! The pattern tolerates one level of nested braces only; deeper nesting can be
//! mis-extracted and then fails deserialization.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::errors::{ParseError, ParseErrorKind};
use crate::logging::preview;
use crate::models::RecommendationResult;

/// Markdown code fence marker
const FENCE: &str = "```";

/// First JSON object with at most one level of nested braces
static JSON_OBJECT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}").ok());

/// Stateless parser of model answers
pub struct ResponseParser;

impl ResponseParser {
    /// Extract, deserialize and validate a recommendation
    ///
    /// # Errors
    ///
    /// Returns `ParseError` naming the failed stage; both the raw and the
    /// cleaned text are retained on the error
    pub fn parse(raw: &str) -> Result<RecommendationResult, ParseError> {
        debug!(raw_len = raw.len(), preview = %preview(raw), "Parsing model response");

        let Some(candidate) = Self::extract_json(raw) else {
            warn!(raw_len = raw.len(), "Model response does not contain a JSON object");
            return Err(ParseError::new(
                ParseErrorKind::NoJsonFound,
                raw,
                Some(Self::strip_fences(raw.trim()).to_owned()),
            ));
        };

        let result: RecommendationResult = serde_json::from_str(candidate).map_err(|e| {
            warn!("Model response JSON does not match the result schema: {e}");
            ParseError::new(
                ParseErrorKind::MalformedJson {
                    cause: e.to_string(),
                },
                raw,
                Some(candidate.to_owned()),
            )
        })?;

        if let Some(field) = result.first_blank_required_field() {
            warn!(field, "Model response is missing a required field");
            return Err(ParseError::new(
                ParseErrorKind::IncompleteResult { field },
                raw,
                Some(candidate.to_owned()),
            ));
        }

        info!(
            routine_id = %result.routine_id,
            "Parsed workout recommendation: {}", result.suggested_workout_routine
        );
        Ok(result)
    }

    /// JSON object candidate within `raw`, if any extraction step finds one
    #[must_use]
    pub fn extract_json(raw: &str) -> Option<&str> {
        let trimmed = raw.trim();
        if Self::is_object_like(trimmed) {
            return Some(trimmed);
        }

        let unfenced = Self::strip_fences(trimmed);
        if Self::is_object_like(unfenced) {
            debug!("Removed markdown fences from model response");
            return Some(unfenced);
        }

        let found = JSON_OBJECT_PATTERN
            .as_ref()
            .and_then(|pattern| pattern.find(trimmed))
            .map(|m| m.as_str());
        if found.is_some() {
            debug!("Extracted JSON object from surrounding text");
        }
        found
    }

    /// Remove a leading fence (and its language tag) and a trailing fence
    #[must_use]
    pub fn strip_fences(text: &str) -> &str {
        let mut rest = text.trim();
        if let Some(after) = rest.strip_prefix(FENCE) {
            rest = after.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        }
        if let Some(before) = rest.trim_end().strip_suffix(FENCE) {
            rest = before;
        }
        rest.trim()
    }

    fn is_object_like(text: &str) -> bool {
        text.starts_with('{') && text.ends_with('}')
    }
}
