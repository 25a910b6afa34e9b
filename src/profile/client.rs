// ABOUTME: HTTP client for the user service "current user data" endpoint
// ABOUTME: Forwards the caller's bearer token and classifies 401/404/other failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use tracing::{debug, error, info, instrument, warn};

use super::{map_profile, ProfilePayload, ProfileSource};
use crate::config::UserServiceConfig;
use crate::errors::{AppError, UpstreamError, UpstreamErrorKind};
use crate::models::UserProfile;
use crate::utils::auth::bearer_header_value;

/// Connection timeout for the user service
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Request timeout for the user service
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Client for the user service profile endpoint
#[derive(Debug, Clone)]
pub struct UserServiceClient {
    client: Client,
    profile_url: String,
}

impl UserServiceClient {
    /// Create a client with its own HTTP connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new(config: &UserServiceConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self::with_client(client, &config.base_url, &config.profile_path))
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client, base_url: &str, profile_path: &str) -> Self {
        let profile_url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            profile_path.trim_start_matches('/')
        );
        Self {
            client,
            profile_url,
        }
    }

    fn classify_status(status: StatusCode) -> UpstreamError {
        match status {
            StatusCode::UNAUTHORIZED => UpstreamError::profile(
                UpstreamErrorKind::Unauthorized,
                "user service rejected the token",
            ),
            StatusCode::NOT_FOUND => {
                UpstreamError::profile(UpstreamErrorKind::NotFound, "user not found")
            }
            other => UpstreamError::profile(
                UpstreamErrorKind::Unavailable,
                format!("user service responded with {other}"),
            ),
        }
    }
}

#[async_trait]
impl ProfileSource for UserServiceClient {
    #[instrument(skip(self, token), fields(url = %self.profile_url))]
    async fn fetch_profile(&self, token: &str) -> Result<UserProfile, UpstreamError> {
        info!("Fetching user data from user service");

        let response = self
            .client
            .get(&self.profile_url)
            .header(AUTHORIZATION, bearer_header_value(token))
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach user service: {e}");
                UpstreamError::profile(
                    UpstreamErrorKind::Unavailable,
                    format!("request failed: {e}"),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "User service returned an error status");
            return Err(Self::classify_status(status));
        }

        let body = response.text().await.map_err(|e| {
            error!("Failed to read user service response: {e}");
            UpstreamError::profile(
                UpstreamErrorKind::Unavailable,
                format!("failed to read response: {e}"),
            )
        })?;

        let payload: Option<ProfilePayload> = if body.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&body).map_err(|e| {
                warn!("User service payload is not a profile object: {e}");
                UpstreamError::profile(
                    UpstreamErrorKind::InvalidPayload,
                    format!("malformed profile payload: {e}"),
                )
            })?
        };

        let payload = payload.ok_or_else(|| {
            error!("User data is null from user service");
            UpstreamError::profile(UpstreamErrorKind::Unavailable, "response was null")
        })?;

        let profile = map_profile(payload)?;
        debug!(user_id = profile.user_id, "Retrieved user profile");
        Ok(profile)
    }
}
