// ABOUTME: Route module organization for the Muscledia AI service HTTP endpoints
// ABOUTME: Shared request resources, router assembly, CORS and request tracing layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! HTTP transport
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the pipeline or the conversation service.

/// Q&A passthrough routes
pub mod conversation;
/// Health and readiness routes
pub mod health;
/// Recommendation routes
pub mod recommendation;

pub use conversation::ConversationRoutes;
pub use health::HealthRoutes;
pub use recommendation::RecommendationRoutes;

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderMap, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::auth::ClaimsExtractor;
use crate::catalog::{CatalogFilter, JsonFileCatalog};
use crate::config::ServiceConfig;
use crate::conversation::ConversationService;
use crate::errors::AppError;
use crate::llm::{
    prompts, LlmModelInvoker, LlmProvider, ModelInvoker, OpenAiCompatibleConfig,
    OpenAiCompatibleProvider,
};
use crate::profile::{ProfileSource, UserServiceClient};
use crate::recommendation::RecommendationPipeline;
use crate::utils::auth::extract_bearer_token_from_option;

/// Everything a request handler needs, shared behind an `Arc`
#[derive(Clone)]
pub struct ServiceResources {
    /// Recommendation pipeline
    pub pipeline: RecommendationPipeline,
    /// Q&A passthrough
    pub conversation: ConversationService,
    /// Model used for readiness reporting
    pub model: Arc<dyn ModelInvoker>,
}

impl ServiceResources {
    /// Bundle the request-serving components
    #[must_use]
    pub fn new(
        pipeline: RecommendationPipeline,
        conversation: ConversationService,
        model: Arc<dyn ModelInvoker>,
    ) -> Self {
        Self {
            pipeline,
            conversation,
            model,
        }
    }

    /// Wire the production collaborators from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be created
    pub fn from_config(config: &ServiceConfig) -> Result<Self, AppError> {
        let claims = ClaimsExtractor::from_secret(&config.auth.jwt_secret);
        let profiles: Arc<dyn ProfileSource> =
            Arc::new(UserServiceClient::new(&config.user_service)?);
        let catalog = CatalogFilter::new(Arc::new(JsonFileCatalog::new(&config.catalog.path)));

        let provider: Arc<dyn LlmProvider> = Arc::new(OpenAiCompatibleProvider::new(
            OpenAiCompatibleConfig::from(&config.llm),
        )?);
        let recommender: Arc<dyn ModelInvoker> = Arc::new(
            LlmModelInvoker::new(provider.clone(), prompts::routine_service_prompt())
                .with_temperature(config.llm.temperature),
        );
        let assistant: Arc<dyn ModelInvoker> = Arc::new(
            LlmModelInvoker::new(provider, prompts::assistant_role_prompt())
                .with_temperature(config.llm.temperature),
        );

        Ok(Self::new(
            RecommendationPipeline::new(claims, profiles, catalog, recommender.clone()),
            ConversationService::new(assistant),
            recommender,
        ))
    }
}

/// Assemble the full router with CORS and request tracing
#[must_use]
pub fn build_router(resources: Arc<ServiceResources>, cors_origins: &[String]) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(RecommendationRoutes::routes(resources.clone()))
        .merge(ConversationRoutes::routes(resources))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the configured origins; `*` allows any origin
#[must_use]
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin: {e}");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Bearer token from the `Authorization` header
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` when the header is missing or not a bearer token
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    extract_bearer_token_from_option(value)
}

/// Map a JSON body rejection to an `INVALID_INPUT` error
pub(crate) fn invalid_body(rejection: &JsonRejection) -> AppError {
    AppError::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
}
