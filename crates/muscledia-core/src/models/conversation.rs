// ABOUTME: Request and response payloads of the one-shot Q&A passthrough
// ABOUTME: Question carries user text in, Answer carries model text back verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// A single user question for the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question text
    #[serde(default)]
    pub question: String,
}

impl Question {
    /// Create a question
    #[must_use]
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }

    /// Reject blank questions
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when the text is empty after trimming
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.question.trim().is_empty() {
            return Err(ValidationError::new("question", "must not be blank"));
        }
        Ok(())
    }
}

/// Model answer, returned unmodified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Answer text
    pub answer: String,
}
