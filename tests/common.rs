// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Quiet logging, token minting, catalog fixtures and counting mock collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `muscledia_ai_service`

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use muscledia_ai_service::{
    auth::ClaimsExtractor,
    catalog::{CatalogFilter, InMemoryCatalog},
    errors::{ModelError, UpstreamError},
    llm::ModelInvoker,
    models::{GoalType, RoutineRecord, UserProfile},
    profile::ProfileSource,
    recommendation::RecommendationPipeline,
};
use serde_json::{json, Value};
use tracing::Level;

/// HMAC secret shared by minted tokens and the extractor under test
pub const TEST_SECRET: &str = "muscledia-test-secret-that-is-long-enough-for-hs256";

/// A model answer selecting routine `i-2`
pub const CLEAN_MODEL_ANSWER: &str = r#"{"suggestedWorkoutRoutine":"Upper Lower","routineId":"i-2","description":"Four days of balanced volume for muscle gain.","difficultyLevel":"INTERMEDIATE","workoutSplit":"Upper/Lower"}"#;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Sign `claims` with [`TEST_SECRET`] using HS256
pub fn mint_token(claims: &Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Token for `user_id` valid for one hour
pub fn valid_token(user_id: i64) -> String {
    mint_token(&json!({
        "sub": "athlete",
        "userId": user_id,
        "roles": ["USER"],
        "exp": (Utc::now() + Duration::hours(1)).timestamp(),
    }))
}

/// Extractor accepting tokens from [`mint_token`]
pub fn test_extractor() -> ClaimsExtractor {
    ClaimsExtractor::from_key_bytes(TEST_SECRET.as_bytes())
}

/// Profile of the end-to-end scenario: 30 yrs, MALE, 180 cm, 80 kg, `BUILD_MUSCLE`
pub fn scenario_profile() -> UserProfile {
    UserProfile::new(7, 180.0, 80.0, 30, "MALE", GoalType::BuildMuscle).unwrap()
}

/// 3 INTERMEDIATE and 2 BEGINNER routines, interleaved
pub fn scenario_catalog() -> Vec<RoutineRecord> {
    vec![
        RoutineRecord::new("b-1", "Full Body Basics", "BEGINNER").with_split("Full Body"),
        RoutineRecord::new("i-1", "Push Pull Legs", "INTERMEDIATE").with_split("Push/Pull/Legs"),
        RoutineRecord::new("i-2", "Upper Lower", "INTERMEDIATE")
            .with_split("Upper/Lower")
            .with_equipment("Barbell")
            .with_plan_count(4),
        RoutineRecord::new("b-2", "Bodyweight Starter", "BEGINNER").with_split("Full Body"),
        RoutineRecord::new("i-3", "Strength 5x5", "INTERMEDIATE").with_split("Full Body"),
    ]
}

/// `count` routines all at `level`
pub fn uniform_catalog(count: usize, level: &str) -> Vec<RoutineRecord> {
    (0..count)
        .map(|i| RoutineRecord::new(format!("r-{i}"), format!("Routine {i}"), level))
        .collect()
}

/// Profile source returning a fixed result and counting calls
pub struct CountingProfileSource {
    pub calls: AtomicUsize,
    pub tokens: Mutex<Vec<String>>,
    result: Result<UserProfile, UpstreamError>,
}

impl CountingProfileSource {
    pub fn returning(result: Result<UserProfile, UpstreamError>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            tokens: Mutex::new(Vec::new()),
            result,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileSource for CountingProfileSource {
    async fn fetch_profile(&self, token: &str) -> Result<UserProfile, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().unwrap().push(token.to_owned());
        self.result.clone()
    }
}

/// Model returning a fixed answer, recording prompts
pub struct CountingModel {
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
    result: Result<String, ModelError>,
}

impl CountingModel {
    pub fn answering(answer: &str) -> Arc<Self> {
        Self::returning(Ok(answer.to_owned()))
    }

    pub fn returning(result: Result<String, ModelError>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            result,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl ModelInvoker for CountingModel {
    async fn invoke(&self, prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.result.clone()
    }
}

/// Pipeline over the given mocks and an in-memory catalog
pub fn pipeline_with(
    profiles: Arc<CountingProfileSource>,
    catalog: Vec<RoutineRecord>,
    model: Arc<CountingModel>,
) -> RecommendationPipeline {
    RecommendationPipeline::new(
        test_extractor(),
        profiles,
        CatalogFilter::new(Arc::new(InMemoryCatalog::new(catalog))),
        model,
    )
}
