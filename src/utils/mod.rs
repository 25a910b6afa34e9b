// ABOUTME: Utility module with shared helpers
// ABOUTME: Authorization header parsing used by routes and the profile client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

/// Bearer token helpers
pub mod auth;
