// ABOUTME: Prompt-in/text-out model contract consumed by the recommendation pipeline
// ABOUTME: Adapts an LlmProvider into a single stateless chat completion per prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::{ChatMessage, ChatRequest, LlmProvider};
use crate::errors::{AppError, ErrorCode, ModelError};

/// Opaque model call: prompt in, raw text out
///
/// No retry and no timeout live here; the provider's HTTP client bounds the call.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Send `prompt` to the model and return its raw answer
    ///
    /// # Errors
    ///
    /// Returns `ModelError` when the model call fails
    async fn invoke(&self, prompt: &str) -> Result<String, ModelError>;

    /// Whether the model endpoint is reachable
    async fn is_ready(&self) -> bool {
        true
    }
}

/// [`ModelInvoker`] backed by a chat completion provider
///
/// Every call is a fresh two-message exchange (system instruction + prompt);
/// nothing is remembered between calls.
#[derive(Clone)]
pub struct LlmModelInvoker {
    provider: Arc<dyn LlmProvider>,
    system_prompt: String,
    temperature: Option<f32>,
}

impl LlmModelInvoker {
    /// Invoker sending `system_prompt` ahead of every prompt
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, system_prompt: impl Into<String>) -> Self {
        Self {
            provider,
            system_prompt: system_prompt.into(),
            temperature: None,
        }
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    fn to_model_error(&self, error: &AppError) -> ModelError {
        let model_error = ModelError::new(self.provider.name(), error.message.clone());
        if error.code == ErrorCode::ExternalRateLimited {
            model_error.rate_limited()
        } else {
            model_error
        }
    }
}

#[async_trait]
impl ModelInvoker for LlmModelInvoker {
    #[instrument(skip(self, prompt), fields(provider = self.provider.name(), prompt_len = prompt.len()))]
    async fn invoke(&self, prompt: &str) -> Result<String, ModelError> {
        let mut request = ChatRequest::new(vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(prompt),
        ]);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }

        let response = self.provider.complete(&request).await.map_err(|e| {
            warn!(code = %e.code, "Model call failed: {}", e.message);
            self.to_model_error(&e)
        })?;

        debug!(raw_len = response.content.len(), model = %response.model, "Model answered");
        Ok(response.content)
    }

    async fn is_ready(&self) -> bool {
        match self.provider.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!("Model health check failed: {}", e.message);
                false
            }
        }
    }
}
