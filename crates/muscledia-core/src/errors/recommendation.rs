// ABOUTME: Tagged failure types for each stage of the recommendation pipeline
// ABOUTME: Lets the orchestrator match on failure kind and map it to a safe AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! # Recommendation Error Taxonomy
//!
//! Every pipeline stage returns either its typed value or exactly one of:
//! - [`ValidationError`] - malformed input, rejected before any external call
//! - [`AuthError`] - token invalid, expired, or without a resolvable subject
//! - [`UpstreamError`] - profile or catalog collaborator failure
//! - [`ModelError`] - the generative model call itself failed
//! - [`ParseError`] - the model answered but its text is not a usable result
//!
//! [`ParseError`] keeps the raw and cleaned model text for diagnostics. That text
//! never reaches the caller: the conversion into [`AppError`] only names the
//! failed stage.

use std::fmt;
use thiserror::Error;

use super::{AppError, ErrorCode};

/// Input rejected before any collaborator is contacted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// Name of the offending input field
    pub field: &'static str,
    /// Why the value was rejected
    pub reason: String,
}

impl ValidationError {
    /// Create a validation error for a named field
    #[must_use]
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Reason a bearer token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Signature, algorithm, or encoding is invalid
    InvalidToken,
    /// Expiry instant has passed
    Expired,
    /// Token verified but no subject id could be resolved
    MissingClaims,
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken => f.write_str("invalid token"),
            Self::Expired => f.write_str("token expired"),
            Self::MissingClaims => f.write_str("missing identity claims"),
        }
    }
}

/// Token validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct AuthError {
    /// Classified reason
    pub kind: AuthErrorKind,
    /// Diagnostic detail, internal only
    pub detail: String,
}

impl AuthError {
    /// Signature or format rejected
    #[must_use]
    pub fn invalid_token(detail: impl Into<String>) -> Self {
        Self {
            kind: AuthErrorKind::InvalidToken,
            detail: detail.into(),
        }
    }

    /// Expiry has passed
    #[must_use]
    pub fn expired(detail: impl Into<String>) -> Self {
        Self {
            kind: AuthErrorKind::Expired,
            detail: detail.into(),
        }
    }

    /// Subject id could not be resolved
    #[must_use]
    pub fn missing_claims(detail: impl Into<String>) -> Self {
        Self {
            kind: AuthErrorKind::MissingClaims,
            detail: detail.into(),
        }
    }
}

/// Collaborator that produced an upstream failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamService {
    /// User profile service
    Profile,
    /// Routine catalog
    Catalog,
}

impl fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile => f.write_str("profile service"),
            Self::Catalog => f.write_str("routine catalog"),
        }
    }
}

/// Classified upstream failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    /// Collaborator answered 401
    Unauthorized,
    /// Requested resource does not exist (or the catalog yielded nothing)
    NotFound,
    /// Transport failure, 5xx, or empty payload
    Unavailable,
    /// Payload arrived but violates the profile invariants
    InvalidPayload,
}

impl fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => f.write_str("unauthorized"),
            Self::NotFound => f.write_str("not found"),
            Self::Unavailable => f.write_str("unavailable"),
            Self::InvalidPayload => f.write_str("invalid payload"),
        }
    }
}

/// Failure of a collaborating data source, with the upstream cause attached
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{service} {kind}: {detail}")]
pub struct UpstreamError {
    /// Which collaborator failed
    pub service: UpstreamService,
    /// Classified reason
    pub kind: UpstreamErrorKind,
    /// Upstream cause, internal only
    pub detail: String,
}

impl UpstreamError {
    /// Create an upstream error
    #[must_use]
    pub fn new(service: UpstreamService, kind: UpstreamErrorKind, detail: impl Into<String>) -> Self {
        Self {
            service,
            kind,
            detail: detail.into(),
        }
    }

    /// Profile service failure
    #[must_use]
    pub fn profile(kind: UpstreamErrorKind, detail: impl Into<String>) -> Self {
        Self::new(UpstreamService::Profile, kind, detail)
    }

    /// Catalog produced no usable candidate routines
    #[must_use]
    pub fn empty_catalog() -> Self {
        Self::new(
            UpstreamService::Catalog,
            UpstreamErrorKind::NotFound,
            "routine catalog yielded no candidates",
        )
    }
}

/// The generative model call failed before producing text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{provider}: {detail}")]
pub struct ModelError {
    /// Provider that was called
    pub provider: String,
    /// Failure detail, internal only
    pub detail: String,
    /// Whether the provider reported rate limiting
    pub rate_limited: bool,
}

impl ModelError {
    /// Create a model error
    #[must_use]
    pub fn new(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            detail: detail.into(),
            rate_limited: false,
        }
    }

    /// Mark the failure as a rate limit rejection
    #[must_use]
    pub const fn rate_limited(mut self) -> Self {
        self.rate_limited = true;
        self
    }
}

/// Extraction or validation stage that rejected the model output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No JSON object candidate found in the text
    NoJsonFound,
    /// A candidate was found but does not deserialize into the result schema
    MalformedJson {
        /// Deserializer message
        cause: String,
    },
    /// Deserialized, but a required field is blank
    IncompleteResult {
        /// JSON name of the blank field
        field: &'static str,
    },
}

impl ParseErrorKind {
    /// Stable stage name used in caller-facing messages
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::NoJsonFound => "no_json_found",
            Self::MalformedJson { .. } => "malformed_json",
            Self::IncompleteResult { .. } => "incomplete_result",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoJsonFound => f.write_str("model response does not contain a JSON object"),
            Self::MalformedJson { cause } => {
                write!(f, "model response JSON does not match the schema: {cause}")
            }
            Self::IncompleteResult { field } => {
                write!(f, "model response is missing required field '{field}'")
            }
        }
    }
}

/// Model output could not be turned into a recommendation
///
/// `Display` omits `raw` and `cleaned`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    /// Failed stage
    pub kind: ParseErrorKind,
    /// Text exactly as returned by the model
    pub raw: String,
    /// Candidate text after cleaning, when a cleaning step ran
    pub cleaned: Option<String>,
}

impl ParseError {
    /// Create a parse error retaining both texts
    #[must_use]
    pub fn new(kind: ParseErrorKind, raw: impl Into<String>, cleaned: Option<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
            cleaned,
        }
    }
}

/// Single classified failure of a recommendation request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendationError {
    /// Malformed input
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Token rejected
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Collaborator failure
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    /// Model call failure
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Model output unusable
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl RecommendationError {
    /// Short name of the failure class, logged at the route boundary
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Auth(_) => "auth",
            Self::Upstream(_) => "upstream",
            Self::Model(_) => "model",
            Self::Parse(_) => "parse",
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_input(error.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        let (code, message) = match error.kind {
            AuthErrorKind::InvalidToken => (ErrorCode::AuthInvalid, "Invalid or malformed token"),
            AuthErrorKind::Expired => (ErrorCode::AuthExpired, "Token has expired"),
            AuthErrorKind::MissingClaims => {
                (ErrorCode::AuthMalformed, "Token does not identify a user")
            }
        };
        Self::new(code, message).with_source(error)
    }
}

impl From<UpstreamError> for AppError {
    fn from(error: UpstreamError) -> Self {
        let (code, message) = match (error.service, error.kind) {
            (UpstreamService::Catalog, _) => (
                ErrorCode::NoRecommendationPossible,
                "No workout routines are available to recommend from",
            ),
            (UpstreamService::Profile, UpstreamErrorKind::Unauthorized) => (
                ErrorCode::ExternalAuthFailed,
                "User service rejected the token",
            ),
            (UpstreamService::Profile, UpstreamErrorKind::NotFound) => {
                (ErrorCode::ResourceNotFound, "User profile not found")
            }
            (
                UpstreamService::Profile,
                UpstreamErrorKind::Unavailable | UpstreamErrorKind::InvalidPayload,
            ) => (
                ErrorCode::ExternalServiceUnavailable,
                "User service is unavailable",
            ),
        };
        Self::new(code, message).with_source(error)
    }
}

impl From<ModelError> for AppError {
    fn from(error: ModelError) -> Self {
        if error.rate_limited {
            return Self::new(
                ErrorCode::ExternalRateLimited,
                "AI model rate limit reached, please try again later",
            )
            .with_source(error);
        }
        Self::new(ErrorCode::ModelError, "AI model request failed").with_source(error)
    }
}

impl From<ParseError> for AppError {
    fn from(error: ParseError) -> Self {
        let message = match &error.kind {
            ParseErrorKind::IncompleteResult { field } => format!(
                "AI model returned an unusable recommendation (stage: {}, field: {field})",
                error.kind.stage()
            ),
            kind => format!(
                "AI model returned an unusable recommendation (stage: {})",
                kind.stage()
            ),
        };
        Self::new(ErrorCode::ModelOutputInvalid, message)
    }
}

impl From<RecommendationError> for AppError {
    fn from(error: RecommendationError) -> Self {
        match error {
            RecommendationError::Validation(e) => e.into(),
            RecommendationError::Auth(e) => e.into(),
            RecommendationError::Upstream(e) => e.into(),
            RecommendationError::Model(e) => e.into(),
            RecommendationError::Parse(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_never_leaks_model_text() {
        let raw = "Sure! Here is my secret chain of thought {broken";
        let error = ParseError::new(
            ParseErrorKind::MalformedJson {
                cause: "EOF while parsing".to_owned(),
            },
            raw,
            Some("{broken".to_owned()),
        );
        assert!(!error.to_string().contains("secret"));

        let app_error = AppError::from(RecommendationError::from(error));
        assert_eq!(app_error.code, ErrorCode::ModelOutputInvalid);
        assert!(app_error.message.contains("malformed_json"));
        assert!(!app_error.message.contains("secret"));
        assert!(!app_error.message.contains("{broken"));
    }

    #[test]
    fn test_incomplete_result_names_field() {
        let error = ParseError::new(
            ParseErrorKind::IncompleteResult { field: "routineId" },
            "{}",
            Some("{}".to_owned()),
        );
        let app_error = AppError::from(error);
        assert!(app_error.message.contains("incomplete_result"));
        assert!(app_error.message.contains("routineId"));
    }

    #[test]
    fn test_auth_kinds_map_to_distinct_codes() {
        assert_eq!(
            AppError::from(AuthError::invalid_token("bad signature")).code,
            ErrorCode::AuthInvalid
        );
        assert_eq!(
            AppError::from(AuthError::expired("exp in past")).code,
            ErrorCode::AuthExpired
        );
        assert_eq!(
            AppError::from(AuthError::missing_claims("no userId")).code,
            ErrorCode::AuthMalformed
        );
    }

    #[test]
    fn test_upstream_mapping() {
        let unauthorized = UpstreamError::profile(UpstreamErrorKind::Unauthorized, "401");
        assert_eq!(AppError::from(unauthorized).code, ErrorCode::ExternalAuthFailed);

        let missing = UpstreamError::profile(UpstreamErrorKind::NotFound, "404");
        assert_eq!(AppError::from(missing).http_status(), 404);

        let down = UpstreamError::profile(UpstreamErrorKind::Unavailable, "connection refused");
        let app_error = AppError::from(down);
        assert_eq!(app_error.code, ErrorCode::ExternalServiceUnavailable);
        assert!(!app_error.message.contains("connection refused"));

        assert_eq!(
            AppError::from(UpstreamError::empty_catalog()).code,
            ErrorCode::NoRecommendationPossible
        );
    }

    #[test]
    fn test_model_rate_limit_is_distinguished() {
        let limited = ModelError::new("ollama", "429").rate_limited();
        assert_eq!(AppError::from(limited).code, ErrorCode::ExternalRateLimited);
        assert_eq!(
            AppError::from(ModelError::new("ollama", "connection refused")).code,
            ErrorCode::ModelError
        );
    }

    #[test]
    fn test_recommendation_error_kind_names() {
        let error: RecommendationError = ValidationError::new("frequency", "out of range").into();
        assert_eq!(error.kind(), "validation");
        assert_eq!(error.to_string(), "frequency: out of range");
    }
}
