// ABOUTME: Unified error handling with stable error codes and HTTP status mapping
// ABOUTME: Every failure leaving the service is an AppError with a safe message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! # Unified Error Handling System
//!
//! `AppError` is the single error type that crosses the service boundary. Its
//! `ErrorCode` gives callers a stable machine-readable kind and an HTTP status;
//! its message is always safe to show (no raw model output, no secrets).
//!
//! Stage-level failures of the recommendation pipeline are modelled precisely
//! in [`recommendation`] and converted into `AppError` only at the boundary.

/// Classified failures of the recommendation pipeline
pub mod recommendation;

pub use recommendation::{
    AuthError, AuthErrorKind, ModelError, ParseError, ParseErrorKind, RecommendationError,
    UpstreamError, UpstreamErrorKind, UpstreamService, ValidationError,
};

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

#[cfg(feature = "http-response")]
use axum::{
    response::{IntoResponse, Response},
    Json,
};
#[cfg(feature = "http-response")]
use http::StatusCode;

/// Standard error codes used throughout the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication
    /// No credentials supplied
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired,
    /// Token signature or format rejected
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid,
    /// Token expiry has passed
    #[serde(rename = "AUTH_EXPIRED")]
    AuthExpired,
    /// Token verified but identity claims could not be resolved
    #[serde(rename = "AUTH_MALFORMED")]
    AuthMalformed,

    // Validation
    /// Request payload rejected before any external call
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,

    // Resources
    /// Requested resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound,
    /// Catalog produced no candidate routines
    #[serde(rename = "NO_RECOMMENDATION_POSSIBLE")]
    NoRecommendationPossible,

    // External services
    /// Collaborating service rejected our credentials
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed,
    /// Collaborating service unreachable or returned an unusable payload
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable,
    /// Collaborating service rate limited us
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited,
    /// Generative model call failed
    #[serde(rename = "MODEL_ERROR")]
    ModelError,
    /// Generative model answered but the answer could not be used
    #[serde(rename = "MODEL_OUTPUT_INVALID")]
    ModelOutputInvalid,

    // Internal
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::AuthRequired
            | Self::AuthInvalid
            | Self::AuthExpired
            | Self::AuthMalformed
            | Self::ExternalAuthFailed => 401,
            Self::ResourceNotFound => 404,
            Self::ExternalRateLimited => 429,
            Self::ExternalServiceUnavailable | Self::ModelError | Self::ModelOutputInvalid => 502,
            Self::NoRecommendationPossible => 503,
            Self::InternalError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided authentication credentials are invalid",
            Self::AuthExpired => "The authentication token has expired",
            Self::AuthMalformed => "The authentication token does not identify a user",
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::NoRecommendationPossible => "No recommendation can be produced right now",
            Self::ExternalAuthFailed => "Authentication with an external service failed",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::ModelError => "The AI model could not be reached",
            Self::ModelOutputInvalid => "The AI model returned an unusable answer",
            Self::InternalError => "An internal server error occurred",
        }
    }

    /// Stable serialized name of the code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthRequired => "AUTH_REQUIRED",
            Self::AuthInvalid => "AUTH_INVALID",
            Self::AuthExpired => "AUTH_EXPIRED",
            Self::AuthMalformed => "AUTH_MALFORMED",
            Self::InvalidInput => "INVALID_INPUT",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::NoRecommendationPossible => "NO_RECOMMENDATION_POSSIBLE",
            Self::ExternalAuthFailed => "EXTERNAL_AUTH_FAILED",
            Self::ExternalServiceUnavailable => "EXTERNAL_SERVICE_UNAVAILABLE",
            Self::ExternalRateLimited => "EXTERNAL_RATE_LIMITED",
            Self::ModelError => "MODEL_ERROR",
            Self::ModelOutputInvalid => "MODEL_OUTPUT_INVALID",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the service
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message, safe to return to callers
    pub message: String,
    /// Source error for error chaining (never serialized)
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for diagnostics
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Authentication required
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Body of an error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Stable error code
    pub code: ErrorCode,
    /// Safe, human-readable message
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message.clone(),
            },
        }
    }
}

#[cfg(feature = "http-response")]
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(code = %self.code, error = %self, "Request failed");
        } else {
            tracing::warn!(code = %self.code, error = %self, "Request rejected");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::AuthRequired.http_status(), 401);
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ModelOutputInvalid.http_status(), 502);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
    }

    #[test]
    fn test_error_code_serializes_to_stable_name() {
        let json = serde_json::to_string(&ErrorCode::ModelOutputInvalid).unwrap();
        assert_eq!(json, "\"MODEL_OUTPUT_INVALID\"");
        assert_eq!(ErrorCode::ModelOutputInvalid.as_str(), "MODEL_OUTPUT_INVALID");
    }

    #[test]
    fn test_error_response_carries_code_and_message_only() {
        let error = AppError::invalid_input("frequency must be between 1 and 7");
        let body = serde_json::to_value(ErrorResponse::from(&error)).unwrap();
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert_eq!(
            body["error"]["message"],
            "frequency must be between 1 and 7"
        );
    }
}
