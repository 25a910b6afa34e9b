// ABOUTME: Sequences claims, profile, catalog, prompt, model and parser into one recommendation
// ABOUTME: Fail-fast orchestration returning a single classified RecommendationError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! # Recommendation Pipeline
//!
//! `validate -> claims -> profile -> candidates -> prompt -> model -> parse`
//!
//! Input validation runs before any collaborator is touched. Every stage
//! either yields its value or aborts the request; there are no partial
//! results. The catalog fallback to unfiltered routines is the only built-in
//! default.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::{PromptBuilder, ResponseParser};
use crate::auth::ClaimsExtractor;
use crate::catalog::CatalogFilter;
use crate::errors::{RecommendationError, UpstreamError, ValidationError};
use crate::llm::ModelInvoker;
use crate::models::{Preferences, RecommendationResult};
use crate::profile::ProfileSource;
use crate::utils::auth::strip_bearer_prefix;

/// Recommendation pipeline over its four collaborators
#[derive(Clone)]
pub struct RecommendationPipeline {
    claims: ClaimsExtractor,
    profiles: Arc<dyn ProfileSource>,
    catalog: CatalogFilter,
    model: Arc<dyn ModelInvoker>,
}

impl RecommendationPipeline {
    /// Assemble a pipeline
    #[must_use]
    pub fn new(
        claims: ClaimsExtractor,
        profiles: Arc<dyn ProfileSource>,
        catalog: CatalogFilter,
        model: Arc<dyn ModelInvoker>,
    ) -> Self {
        Self {
            claims,
            profiles,
            catalog,
            model,
        }
    }

    /// Produce a recommendation for the bearer of `token`
    ///
    /// # Errors
    ///
    /// Returns the first stage failure, classified as validation, auth,
    /// upstream, model or parse error
    #[instrument(skip_all, fields(frequency = preferences.frequency, level = %preferences.level()))]
    pub async fn recommend(
        &self,
        token: &str,
        preferences: &Preferences,
    ) -> Result<RecommendationResult, RecommendationError> {
        preferences.validate()?;
        let token = strip_bearer_prefix(token).trim();
        if token.is_empty() {
            return Err(ValidationError::new("token", "must not be blank").into());
        }

        let claims = self.claims.extract(token)?;
        info!(user_id = claims.user_id, "Generating workout recommendation");

        let profile = self.profiles.fetch_profile(token).await?;
        if profile.user_id != claims.user_id {
            warn!(
                token_user_id = claims.user_id,
                profile_user_id = profile.user_id,
                "Profile subject differs from token subject"
            );
        }

        let candidates = self.catalog.candidates(&preferences.training_level).await;
        if candidates.is_empty() {
            warn!("No routine candidates available");
            return Err(UpstreamError::empty_catalog().into());
        }

        let context = PromptBuilder::build_context(&profile, preferences)?;
        let routines = PromptBuilder::render_candidates(&candidates)?;
        let prompt = PromptBuilder::build_prompt(&context, &routines)?;
        info!(
            candidates = candidates.len(),
            prompt_len = prompt.len(),
            "Sending recommendation prompt to model"
        );

        let raw = self.model.invoke(&prompt).await?;
        let result = ResponseParser::parse(&raw)?;

        info!(
            user_id = claims.user_id,
            routine_id = %result.routine_id,
            "Recommendation generated"
        );
        Ok(result)
    }
}
