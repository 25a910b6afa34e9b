// ABOUTME: System prompts for model interactions loaded at compile time
// ABOUTME: Stateless JSON routine service instruction and the conversational assistant role
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// System instruction for recommendation calls
///
/// Frames the model as a structured data service so the answer stays a bare
/// JSON object.
pub const ROUTINE_SERVICE_PROMPT: &str = include_str!("routine_service.md");

/// System instruction for free-form questions
pub const ASSISTANT_ROLE_PROMPT: &str = include_str!("assistant_role.md");

/// System prompt used by the recommendation pipeline
#[must_use]
pub const fn routine_service_prompt() -> &'static str {
    ROUTINE_SERVICE_PROMPT
}

/// System prompt used by the Q&A passthrough
#[must_use]
pub const fn assistant_role_prompt() -> &'static str {
    ASSISTANT_ROLE_PROMPT
}
