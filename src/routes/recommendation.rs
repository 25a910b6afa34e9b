// ABOUTME: Workout recommendation endpoint
// ABOUTME: POST /ollama/getRecommendation with bearer token and training preferences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use tracing::warn;

use super::{bearer_token, invalid_body, ServiceResources};
use crate::errors::AppError;
use crate::models::{Preferences, RecommendationResult};

/// Recommendation routes
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create recommendation routes
    pub fn routes(resources: Arc<ServiceResources>) -> Router {
        Router::new()
            .route("/ollama/getRecommendation", post(Self::get_recommendation))
            .with_state(resources)
    }

    /// Recommend one catalog routine for the caller
    async fn get_recommendation(
        State(resources): State<Arc<ServiceResources>>,
        headers: HeaderMap,
        body: Result<Json<Preferences>, JsonRejection>,
    ) -> Result<Json<RecommendationResult>, AppError> {
        let token = bearer_token(&headers)?;
        let Json(preferences) = body.map_err(|e| invalid_body(&e))?;

        let result = resources
            .pipeline
            .recommend(token, &preferences)
            .await
            .inspect_err(|e| warn!(kind = e.kind(), "Recommendation request failed: {e}"))?;
        Ok(Json(result))
    }
}
