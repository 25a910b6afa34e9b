// ABOUTME: JWT validation and identity claim extraction for tokens issued by the user service
// ABOUTME: Verifies the HMAC signature, checks expiry against an explicit instant, resolves the subject id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! # Claims Extraction
//!
//! Tokens are minted by the user service with a shared HMAC secret. The secret
//! is configured either base64-encoded or as raw text; a value that decodes as
//! base64 is used decoded.
//!
//! The subject id is resolved from, in order:
//! 1. `userIdLong` as a JSON number
//! 2. `userId` as a JSON number or a numeric string
//!
//! `sub` carries the username and is kept but never used as the id. Roles come
//! from a `roles` array, else a single `role` string.

use std::collections::HashSet;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::AuthError;
use crate::models::IdentityClaims;

/// Minimum recommended HMAC key length in bytes (HS256)
const MIN_SECRET_BYTES: usize = 32;

/// Claims as they appear on the wire; everything optional so resolution can
/// report precisely what is missing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
    #[serde(default)]
    user_id_long: Option<Value>,
    #[serde(default)]
    user_id: Option<Value>,
    #[serde(default)]
    roles: Option<Value>,
    #[serde(default)]
    role: Option<String>,
}

impl RawClaims {
    fn resolve_user_id(&self) -> Option<i64> {
        if let Some(id) = self.user_id_long.as_ref().and_then(Value::as_i64) {
            return Some(id);
        }
        match self.user_id.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn resolve_roles(&self) -> Vec<String> {
        if let Some(Value::Array(items)) = &self.roles {
            return items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect();
        }
        self.role.iter().cloned().collect()
    }
}

/// Validates bearer tokens and produces [`IdentityClaims`]
///
/// Pure function of (token, key, now); holds only the decoding key.
#[derive(Clone)]
pub struct ClaimsExtractor {
    key: DecodingKey,
    validation: Validation,
}

impl ClaimsExtractor {
    /// Build an extractor from the configured secret
    #[must_use]
    pub fn from_secret(secret: &str) -> Self {
        let key_bytes = STANDARD
            .decode(secret.trim())
            .unwrap_or_else(|_| {
                debug!("JWT secret is not base64 encoded, using raw bytes");
                secret.as_bytes().to_vec()
            });
        if key_bytes.len() < MIN_SECRET_BYTES {
            warn!(
                key_len = key_bytes.len(),
                "JWT secret is shorter than {MIN_SECRET_BYTES} bytes"
            );
        }
        Self::from_key_bytes(&key_bytes)
    }

    /// Build an extractor from raw key bytes
    #[must_use]
    pub fn from_key_bytes(key: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // Expiry is checked against an explicit instant in `extract_at`
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            key: DecodingKey::from_secret(key),
            validation,
        }
    }

    /// Validate a token against the current time
    ///
    /// # Errors
    ///
    /// See [`Self::extract_at`]
    pub fn extract(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        self.extract_at(token, Utc::now())
    }

    /// Validate a token as of `now`
    ///
    /// # Errors
    ///
    /// - `InvalidToken` for a bad signature, malformed token, or missing `exp`
    /// - `Expired` when `now` is past `exp`
    /// - `MissingClaims` when no subject id can be resolved
    pub fn extract_at(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaims, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::invalid_token("empty token"));
        }

        let raw = decode::<RawClaims>(token, &self.key, &self.validation)
            .map_err(|e| {
                let detail = match e.kind() {
                    ErrorKind::InvalidSignature => "signature verification failed",
                    ErrorKind::InvalidAlgorithm => "algorithm not accepted",
                    ErrorKind::Json(_) => "claims are not valid JSON",
                    _ => "token format is invalid",
                };
                warn!(reason = detail, "JWT validation failed");
                AuthError::invalid_token(detail)
            })?
            .claims;

        let expires_at = raw
            .exp
            .and_then(|exp| DateTime::from_timestamp(exp, 0))
            .ok_or_else(|| AuthError::invalid_token("token has no usable exp claim"))?;

        if now > expires_at {
            warn!(expired_at = %expires_at.to_rfc3339(), "JWT token expired");
            return Err(AuthError::expired(format!(
                "expired at {}",
                expires_at.to_rfc3339()
            )));
        }

        let user_id = raw.resolve_user_id().ok_or_else(|| {
            warn!("JWT token carries no resolvable userIdLong/userId claim");
            AuthError::missing_claims("neither userIdLong nor userId resolves to an id")
        })?;

        let roles = raw.resolve_roles();
        Ok(IdentityClaims::new(user_id, raw.sub, roles, expires_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AuthErrorKind;
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &[u8] = b"unit-test-secret-with-enough-length!!";

    fn mint(claims: &Value) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    #[test]
    fn test_string_user_id_is_parsed() {
        let now = Utc::now();
        let token = mint(&json!({
            "sub": "alice",
            "userId": "42",
            "roles": ["user"],
            "exp": (now + Duration::hours(1)).timestamp()
        }));
        let claims = ClaimsExtractor::from_key_bytes(SECRET)
            .extract_at(&token, now)
            .unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username.as_deref(), Some("alice"));
        assert!(claims.has_role("USER"));
    }

    #[test]
    fn test_user_id_long_wins_over_user_id() {
        let now = Utc::now();
        let token = mint(&json!({
            "userIdLong": 7,
            "userId": "99",
            "role": "admin",
            "exp": (now + Duration::hours(1)).timestamp()
        }));
        let claims = ClaimsExtractor::from_key_bytes(SECRET)
            .extract_at(&token, now)
            .unwrap();
        assert_eq!(claims.user_id, 7);
        assert!(claims.is_admin());
    }

    #[test]
    fn test_non_numeric_user_id_is_missing_claims() {
        let now = Utc::now();
        let token = mint(&json!({
            "userId": "abc",
            "exp": (now + Duration::hours(1)).timestamp()
        }));
        let err = ClaimsExtractor::from_key_bytes(SECRET)
            .extract_at(&token, now)
            .unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::MissingClaims);
    }

    #[test]
    fn test_base64_secret_is_decoded() {
        let encoded = STANDARD.encode(SECRET);
        let now = Utc::now();
        let token = mint(&json!({"userId": 1, "exp": (now + Duration::minutes(5)).timestamp()}));
        assert!(ClaimsExtractor::from_secret(&encoded)
            .extract_at(&token, now)
            .is_ok());
    }
}
