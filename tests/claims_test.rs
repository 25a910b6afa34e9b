// ABOUTME: Integration tests for bearer token validation and claim extraction
// ABOUTME: Covers signature, expiry, algorithm, subject id and role resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use muscledia_ai_service::errors::AuthErrorKind;
use serde_json::json;

use common::{mint_token, test_extractor, valid_token, TEST_SECRET};

#[test]
fn test_valid_token_yields_claims() {
    let claims = test_extractor().extract(&valid_token(42)).unwrap();
    assert_eq!(claims.user_id, 42);
    assert_eq!(claims.username.as_deref(), Some("athlete"));
    assert!(claims.has_role("USER"));
    assert!(!claims.is_admin());
}

#[test]
fn test_wrong_secret_is_invalid_token() {
    let token = encode(
        &Header::default(),
        &json!({"userId": 1, "exp": (Utc::now() + Duration::hours(1)).timestamp()}),
        &EncodingKey::from_secret(b"some-other-secret-of-reasonable-length"),
    )
    .unwrap();

    let err = test_extractor().extract(&token).unwrap_err();
    assert_eq!(err.kind, AuthErrorKind::InvalidToken);
}

#[test]
fn test_garbage_and_empty_tokens_are_invalid() {
    let extractor = test_extractor();
    assert_eq!(
        extractor.extract("not.a.jwt").unwrap_err().kind,
        AuthErrorKind::InvalidToken
    );
    assert_eq!(
        extractor.extract("   ").unwrap_err().kind,
        AuthErrorKind::InvalidToken
    );
}

#[test]
fn test_expiry_is_checked_against_given_instant() {
    let exp = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let token = mint_token(&json!({"userId": 5, "exp": exp.timestamp()}));
    let extractor = test_extractor();

    assert!(extractor.extract_at(&token, exp).is_ok());
    let err = extractor
        .extract_at(&token, exp + Duration::seconds(1))
        .unwrap_err();
    assert_eq!(err.kind, AuthErrorKind::Expired);
}

#[test]
fn test_missing_exp_is_invalid_token() {
    let token = mint_token(&json!({"userId": 5}));
    let err = test_extractor().extract(&token).unwrap_err();
    assert_eq!(err.kind, AuthErrorKind::InvalidToken);
}

#[test]
fn test_missing_subject_id_is_missing_claims() {
    let token = mint_token(&json!({
        "sub": "nobody",
        "exp": (Utc::now() + Duration::hours(1)).timestamp(),
    }));
    let err = test_extractor().extract(&token).unwrap_err();
    assert_eq!(err.kind, AuthErrorKind::MissingClaims);
}

#[test]
fn test_hs512_tokens_are_accepted() {
    let token = encode(
        &Header::new(Algorithm::HS512),
        &json!({"userId": "77", "exp": (Utc::now() + Duration::hours(1)).timestamp()}),
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();
    assert_eq!(test_extractor().extract(&token).unwrap().user_id, 77);
}

#[test]
fn test_single_role_claim_is_normalized() {
    let token = mint_token(&json!({
        "userIdLong": 9,
        "role": " admin ",
        "exp": (Utc::now() + Duration::hours(1)).timestamp(),
    }));
    let claims = test_extractor().extract(&token).unwrap();
    assert!(claims.is_admin());
    assert!(claims.username.is_none());
}
