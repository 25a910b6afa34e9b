// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Profile defaults, candidate limits, environment variable names, and network defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! Constants module
//!
//! Constants are grouped into logical domains rather than being kept in a
//! single flat namespace.

/// Defaults substituted for optional profile fields missing upstream
pub mod profile_defaults {
    /// Height in centimeters
    pub const HEIGHT_CM: f64 = 170.0;
    /// Weight in kilograms
    pub const WEIGHT_KG: f64 = 70.0;
    /// Age in years
    pub const AGE_YEARS: u32 = 25;
    /// Gender label
    pub const GENDER: &str = "MALE";
    /// Training goal
    pub const GOAL: &str = "BUILD_MUSCLE";
}

/// Recommendation pipeline limits
pub mod limits {
    /// Maximum number of routines forwarded to the model
    pub const MAX_CANDIDATES: usize = 10;
    /// Lowest accepted weekly training frequency
    pub const MIN_FREQUENCY: i32 = 1;
    /// Highest accepted weekly training frequency
    pub const MAX_FREQUENCY: i32 = 7;
    /// Minimum age for recommendation eligibility
    pub const MIN_ELIGIBLE_AGE: u32 = 18;
    /// Characters of model output kept in log previews
    pub const LOG_PREVIEW_CHARS: usize = 200;
}

/// Environment variable names read at startup
pub mod env_config {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// HMAC secret shared with the user service
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// Base URL of the user service
    pub const USER_SERVICE_URL: &str = "USER_SERVICE_URL";
    /// Path of the profile endpoint on the user service
    pub const USER_SERVICE_PROFILE_PATH: &str = "USER_SERVICE_PROFILE_PATH";
    /// Location of the routine catalog JSON file
    pub const ROUTINE_CATALOG_PATH: &str = "ROUTINE_CATALOG_PATH";
    /// OpenAI-compatible endpoint base URL
    pub const LOCAL_LLM_BASE_URL: &str = "LOCAL_LLM_BASE_URL";
    /// Model served by the endpoint
    pub const LOCAL_LLM_MODEL: &str = "LOCAL_LLM_MODEL";
    /// Optional API key for the endpoint
    pub const LOCAL_LLM_API_KEY: &str = "LOCAL_LLM_API_KEY";
    /// Optional sampling temperature
    pub const LLM_TEMPERATURE: &str = "LLM_TEMPERATURE";
    /// Comma separated CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default values for configuration not provided by the environment
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8085;
    /// Default user service URL
    pub const USER_SERVICE_URL: &str = "http://localhost:8081";
    /// Default profile endpoint path
    pub const USER_SERVICE_PROFILE_PATH: &str = "/api/users/me/data";
    /// Default catalog location
    pub const ROUTINE_CATALOG_PATH: &str = "data/public_routines.json";
    /// Default OpenAI-compatible endpoint (Ollama)
    pub const LLM_BASE_URL: &str = "http://localhost:11434/v1";
    /// Default model for local inference
    pub const LLM_MODEL: &str = "qwen2.5:14b-instruct";
    /// Default CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:8080";
}

/// Service identity used in logs and health payloads
pub mod service_names {
    /// Service name
    pub const MUSCLEDIA_AI_SERVICE: &str = "muscledia-ai-service";
}
