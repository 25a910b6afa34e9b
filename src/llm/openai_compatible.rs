// ABOUTME: OpenAI-compatible chat completion client used as the model collaborator
// ABOUTME: Talks to Ollama, vLLM, LocalAI or any endpoint exposing /chat/completions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! # `OpenAI`-Compatible Provider
//!
//! ## Configuration
//!
//! - `LOCAL_LLM_BASE_URL`: Base URL (default: <http://localhost:11434/v1> for Ollama)
//! - `LOCAL_LLM_MODEL`: Model to use (default: `qwen2.5:14b-instruct`)
//! - `LOCAL_LLM_API_KEY`: API key (optional, empty for local servers)
//!
//! The backend kind is guessed from the port of the base URL and only affects
//! names in logs and health payloads.

use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use crate::config::LlmConfig;
use crate::constants::defaults;
use crate::errors::{AppError, ErrorCode};
use crate::logging::preview;

/// Service label used in error messages
const SERVICE_LABEL: &str = "LocalLLM";

/// Connection timeout for local servers
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Request timeout; local inference of a long prompt takes tens of seconds
const REQUEST_TIMEOUT_SECS: u64 = 300;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <http://localhost:11434/v1>)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Provider name for logging
    pub provider_name: &'static str,
    /// Provider display name
    pub display_name: &'static str,
}

impl OpenAiCompatibleConfig {
    /// Configuration for `base_url`, naming the backend from its port
    #[must_use]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into();
        let (provider_name, display_name) = detect_backend(&base_url);
        Self {
            base_url,
            api_key: api_key.filter(|k| !k.is_empty()),
            default_model: model.into(),
            provider_name,
            display_name,
        }
    }

}

impl Default for OpenAiCompatibleConfig {
    fn default() -> Self {
        Self::new(defaults::LLM_BASE_URL, defaults::LLM_MODEL, None)
    }
}

impl From<&LlmConfig> for OpenAiCompatibleConfig {
    fn from(config: &LlmConfig) -> Self {
        Self::new(&config.base_url, &config.model, config.api_key.clone())
    }
}

impl Debug for OpenAiCompatibleConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatibleConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("default_model", &self.default_model)
            .field("provider_name", &self.provider_name)
            .finish()
    }
}

fn detect_backend(base_url: &str) -> (&'static str, &'static str) {
    if base_url.contains(":11434") {
        ("ollama", "Ollama (Local)")
    } else if base_url.contains(":8000") {
        ("vllm", "vLLM (Local)")
    } else if base_url.contains(":8080") {
        ("localai", "LocalAI")
    } else {
        ("local", "Local LLM")
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible LLM provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        info!(
            "Initializing {} provider: base_url={}, model={}",
            config.display_name, config.base_url, config.default_model
        );

        Ok(Self { client, config })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    fn log_messages_debug(&self, messages: &[OpenAiMessage]) {
        for (i, msg) in messages.iter().enumerate() {
            debug!(
                "Message[{i}] role={}, content_len={}",
                msg.role,
                msg.content.len()
            );
        }
        debug!(
            "Sending chat completion request to {} with {} messages",
            self.config.provider_name,
            messages.len()
        );
    }

    fn connection_error(&self, e: &reqwest::Error, action: &str) -> AppError {
        error!("{} {action} failed: {e}", self.config.provider_name);
        if e.is_connect() {
            AppError::external_service(
                SERVICE_LABEL,
                format!(
                    "Cannot connect to {}. Is the server running at {}?",
                    self.config.display_name, self.config.base_url
                ),
            )
        } else if e.is_timeout() {
            AppError::external_service(SERVICE_LABEL, format!("{action} timed out"))
        } else {
            AppError::external_service(SERVICE_LABEL, format!("{action} failed: {e}"))
        }
    }

    /// Map a non-success response to an `AppError`
    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        if let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(body) {
            let detail = error_response.error.message;
            match status.as_u16() {
                401 | 403 => AppError::new(
                    ErrorCode::ModelError,
                    format!("API authentication failed: {detail}"),
                ),
                429 => AppError::new(
                    ErrorCode::ExternalRateLimited,
                    Self::extract_rate_limit_message(&detail),
                ),
                404 => AppError::new(
                    ErrorCode::ModelError,
                    format!("Model or endpoint not found: {detail}"),
                ),
                503 => AppError::external_service(
                    SERVICE_LABEL,
                    format!("Service unavailable (is the local server running?): {detail}"),
                ),
                _ => {
                    let error_type = error_response
                        .error
                        .error_type
                        .unwrap_or_else(|| "unknown".to_owned());
                    AppError::external_service(SERVICE_LABEL, format!("{error_type} - {detail}"))
                }
            }
        } else {
            match status.as_u16() {
                429 => AppError::new(
                    ErrorCode::ExternalRateLimited,
                    Self::extract_rate_limit_message(body),
                ),
                502..=504 => AppError::external_service(
                    SERVICE_LABEL,
                    "Local LLM server is not responding. Is Ollama/vLLM running?",
                ),
                _ => AppError::external_service(
                    SERVICE_LABEL,
                    format!("API error ({status}): {}", preview(body)),
                ),
            }
        }
    }

    /// Turn a rate limit message into a caller-friendly one, keeping any retry hint
    fn extract_rate_limit_message(message: &str) -> String {
        const HINT: &str = "try again in ";
        let lowered = message.to_lowercase();
        if let Some(pos) = lowered.find(HINT) {
            let after = &lowered[pos + HINT.len()..];
            let number: String = after
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if let Ok(seconds) = number.parse::<f64>() {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let seconds = seconds.ceil() as u64;
                return format!("LLM rate limit reached. Please try again in {seconds} seconds.");
            }
        }
        "LLM rate limit reached. Please wait a moment and try again.".to_owned()
    }

    fn add_auth_header(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.header(AUTHORIZATION, format!("Bearer {api_key}"))
        } else {
            request
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        self.config.provider_name
    }

    #[instrument(skip(self, request), fields(model = %self.config.default_model))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let messages: Vec<OpenAiMessage> = request.messages.iter().map(OpenAiMessage::from).collect();
        self.log_messages_debug(&messages);

        let openai_request = OpenAiRequest {
            model: self.config.default_model.clone(),
            messages,
            temperature: request.temperature,
            stream: false,
        };

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .json(&openai_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.connection_error(&e, "Chat completion"))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read API response: {e}");
            AppError::external_service(SERVICE_LABEL, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            warn!(status = %status, "Chat completion rejected");
            return Err(Self::parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse API response: {e}");
            AppError::external_service(SERVICE_LABEL, format!("Failed to parse response: {e}"))
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(SERVICE_LABEL, "API returned no choices"))?;

        let content = choice.message.content.unwrap_or_default();

        debug!(
            "Received response from {}: {} chars, finish_reason: {:?}",
            self.config.provider_name,
            content.len(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content,
            model: openai_response.model,
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        debug!(
            "Performing {} health check at {}",
            self.config.provider_name, self.config.base_url
        );

        let http_request = self.client.get(self.api_url("models"));
        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.connection_error(&e, "Health check"))?;

        let healthy = response.status().is_success();
        if healthy {
            debug!("{} health check passed", self.config.provider_name);
        } else {
            warn!(
                "{} health check failed with status: {}",
                self.config.provider_name,
                response.status()
            );
        }

        Ok(healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_detected_from_port() {
        assert_eq!(OpenAiCompatibleConfig::default().provider_name, "ollama");
        let vllm = OpenAiCompatibleConfig::new("http://gpu-box:8000/v1", "m", None);
        assert_eq!(vllm.provider_name, "vllm");
        let other = OpenAiCompatibleConfig::new("https://llm.internal/v1", "m", Some(String::new()));
        assert_eq!(other.provider_name, "local");
        assert!(other.api_key.is_none());
    }

    #[test]
    fn test_rate_limit_message_keeps_retry_hint() {
        let message = OpenAiCompatibleProvider::extract_rate_limit_message(
            "Rate limit exceeded. Please try again in 2.4s.",
        );
        assert_eq!(message, "LLM rate limit reached. Please try again in 3 seconds.");
        let fallback = OpenAiCompatibleProvider::extract_rate_limit_message("slow down");
        assert!(fallback.contains("wait a moment"));
    }

    #[test]
    fn test_error_response_classification() {
        let err = OpenAiCompatibleProvider::parse_error_response(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"message":"too many","type":"rate_limit"}}"#,
        );
        assert_eq!(err.code, ErrorCode::ExternalRateLimited);

        let err = OpenAiCompatibleProvider::parse_error_response(
            StatusCode::NOT_FOUND,
            r#"{"error":{"message":"model 'x' not found"}}"#,
        );
        assert_eq!(err.code, ErrorCode::ModelError);

        let err = OpenAiCompatibleProvider::parse_error_response(StatusCode::BAD_GATEWAY, "<html>");
        assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = OpenAiCompatibleConfig::new("http://localhost:11434/v1", "m", Some("sk-123".into()));
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-123"));
    }
}
