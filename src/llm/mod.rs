// ABOUTME: LLM provider abstraction layer for the generative model collaborator
// ABOUTME: Chat message types, the provider contract, and the prompt-in/text-out model invoker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! # Model Collaborator
//!
//! The recommendation pipeline treats the model as an opaque call: prompt in,
//! text out, or failure. That contract is [`ModelInvoker`]. Underneath it sits
//! an [`LlmProvider`] speaking a chat completion protocol; the shipped provider
//! talks to any `OpenAI`-compatible endpoint (Ollama by default).

mod invoker;
mod openai_compatible;
pub mod prompts;

pub use invoker::{LlmModelInvoker, ModelInvoker};
pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};

use async_trait::async_trait;

use crate::errors::AppError;

/// Role of a message in a completion request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// Instruction framing every exchange
    System,
    /// Prompt text
    User,
}

impl MessageRole {
    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// One message of a single-turn exchange
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Sender role
    pub role: MessageRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// System instruction
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// User prompt
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Chat completion request against the provider's configured model
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Messages in send order
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature; the server default applies when unset
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Request over `messages`
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
        }
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Completion returned by a provider
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Generated text
    pub content: String,
    /// Model that answered
    pub model: String,
    /// Token counts, when the server reports them
    pub usage: Option<TokenUsage>,
    /// Why generation stopped
    pub finish_reason: Option<String>,
}

/// Token counts for one completion
#[derive(Debug, Clone, Copy)]
pub struct TokenUsage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Generated tokens
    pub completion_tokens: u32,
    /// Sum of both
    pub total_tokens: u32,
}

/// Chat completion backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Backend identifier used in logs and model errors (e.g. "ollama")
    fn name(&self) -> &'static str;

    /// Perform a chat completion
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;

    /// Check if the provider endpoint is reachable
    async fn health_check(&self) -> Result<bool, AppError>;
}
