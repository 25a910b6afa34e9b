// ABOUTME: IdentityClaims value object produced by token validation
// ABOUTME: Subject id, optional username, uppercase role set, and expiry instant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role granting administrative access
pub const ADMIN_ROLE: &str = "ADMIN";

/// Verified identity of the caller
///
/// Created once per request by the claims extractor and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Numeric subject id issued by the user service
    pub user_id: i64,
    /// Username carried in the `sub` claim, if any
    pub username: Option<String>,
    /// Authorities, normalized to uppercase
    pub roles: BTreeSet<String>,
    /// Token expiry instant
    pub expires_at: DateTime<Utc>,
}

impl IdentityClaims {
    /// Build claims, normalizing every role to trimmed uppercase and dropping blanks
    #[must_use]
    pub fn new<I, S>(
        user_id: i64,
        username: Option<String>,
        roles: I,
        expires_at: DateTime<Utc>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roles = roles
            .into_iter()
            .map(|role| role.as_ref().trim().to_uppercase())
            .filter(|role| !role.is_empty())
            .collect();
        Self {
            user_id,
            username,
            roles,
            expires_at,
        }
    }

    /// Case-insensitive role check
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(&role.trim().to_uppercase())
    }

    /// Whether the caller holds the admin role
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.contains(ADMIN_ROLE)
    }

    /// Whether the token has expired at `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
