// ABOUTME: Configuration management module for service settings
// ABOUTME: Environment-only configuration with typed sections and a secret-free summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! Configuration module for the Muscledia AI service
//!
//! All settings come from environment variables; there is no configuration
//! file. See [`environment::ServiceConfig::from_env`] for the variable table.

/// Environment and service configuration
pub mod environment;

pub use environment::{
    AuthConfig, CatalogConfig, Environment, LlmConfig, ServiceConfig, UserServiceConfig,
};
