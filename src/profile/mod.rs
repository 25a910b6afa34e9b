// ABOUTME: User profile collaborator abstraction
// ABOUTME: ProfileSource trait plus the HTTP client and payload mapping for the user service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! # Profile Fetching
//!
//! The caller's profile lives in the user service and is fetched once per
//! request with the caller's own bearer token. Missing optional fields are
//! filled from a fixed default table exactly once, in [`mapper`].

/// HTTP client for the user service
pub mod client;
/// Upstream payload and default application
pub mod mapper;

pub use client::UserServiceClient;
pub use mapper::{map_profile, ProfilePayload};

use async_trait::async_trait;

use crate::errors::UpstreamError;
use crate::models::UserProfile;

/// Source of the caller's physical and goal profile
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the profile belonging to the token's subject
    ///
    /// # Errors
    ///
    /// Returns an `UpstreamError` classified as unauthorized, not found,
    /// unavailable, or invalid payload
    async fn fetch_profile(&self, token: &str) -> Result<UserProfile, UpstreamError>;
}
