// ABOUTME: One-shot conversational Q&A passthrough to the model
// ABOUTME: Sends a single question under the assistant role prompt and returns the text verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::RecommendationError;
use crate::llm::ModelInvoker;
use crate::models::{Answer, Question};

/// Q&A passthrough; keeps no history between calls
#[derive(Clone)]
pub struct ConversationService {
    model: Arc<dyn ModelInvoker>,
}

impl ConversationService {
    /// Service over an invoker configured with the assistant role prompt
    #[must_use]
    pub fn new(model: Arc<dyn ModelInvoker>) -> Self {
        Self { model }
    }

    /// Answer a single question
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank question, or the model error
    #[instrument(skip_all, fields(question_len = question.question.len()))]
    pub async fn answer(&self, question: &Question) -> Result<Answer, RecommendationError> {
        question.validate()?;
        let text = self.model.invoke(question.question.trim()).await?;
        info!(answer_len = text.len(), "Answered user question");
        Ok(Answer { answer: text })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::errors::ModelError;

    struct Echo {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ModelInvoker for Echo {
        async fn invoke(&self, prompt: &str) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("echo: {prompt}"))
        }
    }

    #[tokio::test]
    async fn test_answer_is_returned_verbatim() {
        let echo = Arc::new(Echo {
            calls: AtomicUsize::new(0),
        });
        let service = ConversationService::new(echo.clone());
        let answer = service.answer(&Question::new("  How many sets? ")).await.unwrap();
        assert_eq!(answer.answer, "echo: How many sets?");
        assert_eq!(echo.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_question_never_reaches_model() {
        let echo = Arc::new(Echo {
            calls: AtomicUsize::new(0),
        });
        let service = ConversationService::new(echo.clone());
        let err = service.answer(&Question::new("   ")).await.unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert_eq!(echo.calls.load(Ordering::SeqCst), 0);
    }
}
