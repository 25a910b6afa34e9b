// ABOUTME: Recommendation generation: prompt construction, model output parsing, orchestration
// ABOUTME: Turns a token and training preferences into a validated RecommendationResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

/// Response parsing with layered JSON extraction
pub mod parser;
/// Fail-fast orchestration of the recommendation stages
pub mod pipeline;
/// Context block and instruction prompt rendering
pub mod prompt;

pub use parser::ResponseParser;
pub use pipeline::RecommendationPipeline;
pub use prompt::PromptBuilder;
