// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads ports, collaborator URLs, JWT secret, and LLM settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! Environment-based configuration management for production deployment

use std::env;
use std::fmt::{self, Debug, Display, Formatter};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{defaults, env_config};

/// Environment type for logging and error detail decisions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Token validation settings
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret shared with the user service (base64 or raw)
    pub jwt_secret: String,
}

impl Debug for AuthConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .finish()
    }
}

/// Profile collaborator location
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Base URL, e.g. `http://localhost:8081`
    pub base_url: String,
    /// Path of the "current user data" endpoint
    pub profile_path: String,
}

/// Routine catalog location
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// JSON file holding the routine array
    pub path: PathBuf,
}

/// OpenAI-compatible model endpoint settings
#[derive(Clone)]
pub struct LlmConfig {
    /// Endpoint base URL including `/v1`
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Optional bearer key
    pub api_key: Option<String>,
    /// Optional sampling temperature
    pub temperature: Option<f32>,
}

impl Debug for LlmConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Complete service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Token validation
    pub auth: AuthConfig,
    /// Profile collaborator
    pub user_service: UserServiceConfig,
    /// Routine catalog
    pub catalog: CatalogConfig,
    /// Model endpoint
    pub llm: LlmConfig,
    /// Allowed CORS origins
    pub cors_origins: Vec<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is missing or a numeric value cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let jwt_secret = env::var(env_config::JWT_SECRET)
            .ok()
            .filter(|secret| !secret.trim().is_empty())
            .ok_or_else(|| anyhow!("{} must be set", env_config::JWT_SECRET))?;

        let http_port = match env::var(env_config::HTTP_PORT) {
            Ok(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("Invalid {} value '{value}': {e}", env_config::HTTP_PORT))?,
            Err(_) => defaults::HTTP_PORT,
        };

        let temperature = match env::var(env_config::LLM_TEMPERATURE) {
            Ok(value) if !value.trim().is_empty() => Some(value.trim().parse::<f32>().map_err(
                |e| anyhow!("Invalid {} value '{value}': {e}", env_config::LLM_TEMPERATURE),
            )?),
            _ => None,
        };

        let config = Self {
            http_port,
            environment: Environment::from_str_or_default(&env_var_or(
                env_config::ENVIRONMENT,
                "development",
            )),
            auth: AuthConfig { jwt_secret },
            user_service: UserServiceConfig {
                base_url: env_var_or(env_config::USER_SERVICE_URL, defaults::USER_SERVICE_URL),
                profile_path: env_var_or(
                    env_config::USER_SERVICE_PROFILE_PATH,
                    defaults::USER_SERVICE_PROFILE_PATH,
                ),
            },
            catalog: CatalogConfig {
                path: PathBuf::from(env_var_or(
                    env_config::ROUTINE_CATALOG_PATH,
                    defaults::ROUTINE_CATALOG_PATH,
                )),
            },
            llm: LlmConfig {
                base_url: env_var_or(env_config::LOCAL_LLM_BASE_URL, defaults::LLM_BASE_URL),
                model: env_var_or(env_config::LOCAL_LLM_MODEL, defaults::LLM_MODEL),
                api_key: env::var(env_config::LOCAL_LLM_API_KEY)
                    .ok()
                    .filter(|key| !key.is_empty()),
                temperature,
            },
            cors_origins: parse_origins(&env_var_or(
                env_config::CORS_ALLOWED_ORIGINS,
                defaults::CORS_ALLOWED_ORIGINS,
            )),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for a zero port or a temperature outside 0.0..=2.0
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow!("{} cannot be 0", env_config::HTTP_PORT));
        }
        if let Some(temperature) = self.llm.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(anyhow!(
                    "{} must be between 0.0 and 2.0, got {temperature}",
                    env_config::LLM_TEMPERATURE
                ));
            }
        }
        if self.cors_origins.is_empty() {
            warn!("No CORS origins configured; browser clients will be rejected");
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Muscledia AI Service Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - User Service: {}{}\n\
             - Routine Catalog: {}\n\
             - LLM Endpoint: {}\n\
             - LLM Model: {}\n\
             - LLM API Key: {}\n\
             - CORS Origins: {}",
            self.http_port,
            self.environment,
            self.user_service.base_url,
            self.user_service.profile_path,
            self.catalog.path.display(),
            self.llm.base_url,
            self.llm.model,
            if self.llm.api_key.is_some() {
                "Configured"
            } else {
                "None"
            },
            self.cors_origins.join(", ")
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(
            parse_origins("http://localhost:3000, http://localhost:8080,"),
            vec!["http://localhost:3000", "http://localhost:8080"]
        );
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("invalid"),
            Environment::Development
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let auth = AuthConfig {
            jwt_secret: "super-secret".to_owned(),
        };
        assert!(!format!("{auth:?}").contains("super-secret"));

        let llm = LlmConfig {
            base_url: defaults::LLM_BASE_URL.to_owned(),
            model: defaults::LLM_MODEL.to_owned(),
            api_key: Some("sk-hidden".to_owned()),
            temperature: None,
        };
        assert!(!format!("{llm:?}").contains("sk-hidden"));
    }
}
