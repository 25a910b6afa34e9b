// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Liveness on /health, readiness with model reachability on /ready
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! Health check routes for load balancers and orchestrators

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use super::ServiceResources;
use crate::constants::service_names::MUSCLEDIA_AI_SERVICE;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServiceResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health_handler))
            .route("/ready", get(Self::ready_handler))
            .with_state(resources)
    }

    async fn health_handler() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "service": MUSCLEDIA_AI_SERVICE,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now().to_rfc3339()
        }))
    }

    async fn ready_handler(
        State(resources): State<Arc<ServiceResources>>,
    ) -> (StatusCode, Json<Value>) {
        let model_ready = resources.model.is_ready().await;
        let (status, label) = if model_ready {
            (StatusCode::OK, "ready")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        };

        (
            status,
            Json(json!({
                "status": label,
                "checks": { "model": model_ready },
                "timestamp": Utc::now().to_rfc3339()
            })),
        )
    }
}
