// ABOUTME: Error types re-exported from the core crate
// ABOUTME: Keeps `crate::errors` as the single import path inside the service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! Unified error handling
//!
//! Definitions live in `muscledia-core`; see
//! [`muscledia_core::errors`] for the code table and the stage taxonomy.

pub use muscledia_core::errors::{
    AppError, AppResult, AuthError, AuthErrorKind, ErrorCode, ErrorResponse, ErrorResponseDetails,
    ModelError, ParseError, ParseErrorKind, RecommendationError, UpstreamError, UpstreamErrorKind,
    UpstreamService, ValidationError,
};
