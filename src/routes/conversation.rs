// ABOUTME: Conversational Q&A endpoint
// ABOUTME: POST /ollama/postConversationWithModel forwarding one question to the model
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
use crate::models::{Answer, Question};

/// Q&A routes
pub struct ConversationRoutes;

impl ConversationRoutes {
    /// Create Q&A routes
    pub fn routes(resources: Arc<ServiceResources>) -> Router {
        Router::new()
            .route(
                "/ollama/postConversationWithModel",
                post(Self::post_conversation),
            )
            .with_state(resources)
    }

    async fn post_conversation(
        State(resources): State<Arc<ServiceResources>>,
        headers: HeaderMap,
        body: Result<Json<Question>, JsonRejection>,
    ) -> Result<Json<Answer>, AppError> {
        bearer_token(&headers)?;
        let Json(question) = body.map_err(|e| invalid_body(&e))?;

        let answer = resources
            .conversation
            .answer(&question)
            .await
            .inspect_err(|e| warn!(kind = e.kind(), "Conversation request failed: {e}"))?;
        Ok(Json(answer))
    }
}
