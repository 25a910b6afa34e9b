// ABOUTME: Main library entry point for the Muscledia AI recommendation service
// ABOUTME: Wires token validation, profile lookup, catalog filtering, and LLM parsing into one pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

#![recursion_limit = "256"]
#![deny(unsafe_code)]

//! # Muscledia AI Service
//!
//! Produces a personalized workout routine recommendation by combining the
//! caller's profile and training preferences with a bounded routine catalog,
//! delegating the selection to a local OpenAI-compatible model and parsing
//! its free-text answer back into a validated structure.
//!
//! ## Pipeline
//!
//! token → [`auth::ClaimsExtractor`] → [`profile::ProfileSource`];
//! preferences + [`catalog::CatalogFilter`] → candidates;
//! [`recommendation::PromptBuilder`] → [`llm::ModelInvoker`] →
//! [`recommendation::ResponseParser`].
//!
//! [`recommendation::RecommendationPipeline`] sequences the stages and fails
//! fast with a single classified [`errors::RecommendationError`].

/// Bearer token validation and identity claim extraction
pub mod auth;

/// Routine catalog sources and the candidate filter
pub mod catalog;

/// Environment-based service configuration
pub mod config;

/// Shared constants (re-exported from the core crate)
pub mod constants {
    pub use muscledia_core::constants::*;
}

/// One-shot conversational Q&A passthrough
pub mod conversation;

/// Unified error handling (re-exported from the core crate)
pub mod errors;

/// LLM provider abstraction, OpenAI-compatible client, and model invoker
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Domain models (re-exported from the core crate)
pub mod models {
    pub use muscledia_core::models::*;
}

/// User profile collaborator client and payload mapping
pub mod profile;

/// Prompt construction, model output parsing, and pipeline orchestration
pub mod recommendation;

/// HTTP routes
pub mod routes;

/// Small shared helpers
pub mod utils;
