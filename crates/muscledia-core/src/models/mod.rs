// ABOUTME: Domain models for the recommendation pipeline
// ABOUTME: Per-request value objects: claims, profile, preferences, routines, results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! # Domain Models
//!
//! All entities here are immutable per-request values. The routine catalog is
//! the only process-wide resource and it is owned by the catalog source, not
//! by these types.

/// Identity and role claims decoded from a bearer token
pub mod claims;
/// Q&A passthrough payloads
pub mod conversation;
/// Weekly frequency and training level
pub mod preferences;
/// Caller's physical and goal profile
pub mod profile;
/// Structured model answer
pub mod recommendation;
/// Catalog records and their minimal projection
pub mod routine;

pub use claims::IdentityClaims;
pub use conversation::{Answer, Question};
pub use preferences::{Preferences, TrainingLevel};
pub use profile::{GoalType, UserProfile};
pub use recommendation::RecommendationResult;
pub use routine::{RoutineRecord, RoutineSummary};
