// ABOUTME: Authentication utilities for bearer token extraction and normalization
// ABOUTME: Parses Authorization headers and avoids double "Bearer " prefixes on forwarding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use crate::errors::{AppError, ErrorCode};

/// Authorization scheme prefix
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract bearer token from Authorization header string
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` if the header doesn't start with "Bearer " or the
/// token is empty after trimming
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| {
            AppError::new(
                ErrorCode::AuthRequired,
                "Authorization header must use the Bearer scheme",
            )
        })?
        .trim();

    if token.is_empty() {
        return Err(AppError::new(ErrorCode::AuthRequired, "Empty bearer token"));
    }

    Ok(token)
}

/// Extract bearer token from optional Authorization header
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` if the header is missing or malformed
pub fn extract_bearer_token_from_option(auth_header: Option<&str>) -> Result<&str, AppError> {
    let header = auth_header.ok_or_else(AppError::auth_required)?;
    extract_bearer_token(header)
}

/// Remove a "Bearer " prefix if present and trim
#[must_use]
pub fn strip_bearer_prefix(token: &str) -> &str {
    token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim()
}

/// Authorization header value for forwarding a token, never double-prefixed
#[must_use]
pub fn bearer_header_value(token: &str) -> String {
    format!("{BEARER_PREFIX}{}", strip_bearer_prefix(token))
}
