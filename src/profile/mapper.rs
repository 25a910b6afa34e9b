// ABOUTME: Maps the user service payload into a fully populated UserProfile
// ABOUTME: Applies the default table once for null optional fields, then enforces profile invariants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use serde::Deserialize;

use crate::constants::profile_defaults;
use crate::errors::{UpstreamError, UpstreamErrorKind};
use crate::models::{GoalType, UserProfile};

/// Profile payload as returned by the user service; unknown fields are ignored
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    /// Subject id (required)
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Height in cm
    #[serde(default)]
    pub height: Option<f64>,
    /// Weight in kg
    #[serde(default)]
    pub weight: Option<f64>,
    /// Goal label
    #[serde(default)]
    pub goal_type: Option<String>,
    /// Gender label
    #[serde(default)]
    pub gender: Option<String>,
    /// Age in years
    #[serde(default)]
    pub age: Option<i64>,
}

/// Apply defaults to null optional fields and validate the result
///
/// Defaults: height 170, weight 70, age 25, gender `MALE`, goal `BUILD_MUSCLE`.
/// Only absent values are defaulted; present but invalid values are rejected.
///
/// # Errors
///
/// Returns `UpstreamError(InvalidPayload)` when `userId` is missing or a
/// value violates the profile invariants
pub fn map_profile(payload: ProfilePayload) -> Result<UserProfile, UpstreamError> {
    let user_id = payload
        .user_id
        .ok_or_else(|| invalid("profile payload has no userId"))?;

    let age = match payload.age {
        None => profile_defaults::AGE_YEARS,
        Some(age) => u32::try_from(age).map_err(|_| invalid(format!("age {age} is out of range")))?,
    };

    UserProfile::new(
        user_id,
        payload.height.unwrap_or(profile_defaults::HEIGHT_CM),
        payload.weight.unwrap_or(profile_defaults::WEIGHT_KG),
        age,
        payload
            .gender
            .unwrap_or_else(|| profile_defaults::GENDER.to_owned()),
        payload
            .goal_type
            .map_or(GoalType::BuildMuscle, GoalType::from),
    )
    .map_err(|e| invalid(e.to_string()))
}

fn invalid(detail: impl Into<String>) -> UpstreamError {
    UpstreamError::profile(UpstreamErrorKind::InvalidPayload, detail)
}
