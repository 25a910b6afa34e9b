// ABOUTME: Core types and constants for the Muscledia workout recommendation service
// ABOUTME: Foundation crate with error taxonomy, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

#![deny(unsafe_code)]

//! # Muscledia Core
//!
//! Foundation crate providing the shared types of the recommendation service.
//! It is designed to change infrequently so the service crate can iterate on
//! transport and collaborator wiring without recompiling the domain.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the per-stage recommendation failure taxonomy
//! - **models**: request-scoped value objects (profile, preferences, routines, results)
//! - **constants**: profile defaults, candidate cap, and environment variable names

/// Unified error handling and the classified recommendation failures
pub mod errors;

/// Domain value objects shared by every pipeline stage
pub mod models;

/// Application constants organized by domain
pub mod constants;
