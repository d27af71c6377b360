//! Gateway configuration.
//!
//! Loaded from a TOML file layered under `WFGATE_`-prefixed environment
//! overrides. The signing key and the credential table are deployment
//! inputs, never literals in code.

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::users::StoredUser;

/// Default access-token lifetime in minutes.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    /// Credential table seeding the in-memory user store.
    pub users: Vec<StoredUser>,
}

/// Bind address configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Token signing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret. Supports `env:VAR_NAME` indirection so the
    /// secret itself can live outside the config file.
    pub jwt_secret: Option<String>,

    /// Access-token lifetime in minutes.
    pub token_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins. Empty disables cross-origin access.
    pub allowed_origins: Vec<String>,
}

impl AuthConfig {
    /// Resolve the signing secret, expanding `env:VAR_NAME` syntax.
    pub fn resolve_jwt_secret(&self) -> Result<Option<String>, ConfigValidationError> {
        match &self.jwt_secret {
            None => Ok(None),
            Some(value) => {
                if let Some(var_name) = value.strip_prefix("env:") {
                    match std::env::var(var_name) {
                        Ok(secret) if !secret.is_empty() => Ok(Some(secret)),
                        Ok(_) => Err(ConfigValidationError::EnvVarEmpty(var_name.to_string())),
                        Err(_) => Err(ConfigValidationError::EnvVarNotFound(var_name.to_string())),
                    }
                } else {
                    Ok(Some(value.clone()))
                }
            }
        }
    }

    /// Validate the signing configuration before serving.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let secret = self
            .resolve_jwt_secret()?
            .ok_or(ConfigValidationError::MissingJwtSecret)?;

        if secret == "change-me-before-deploying" {
            return Err(ConfigValidationError::InsecureJwtSecret);
        }
        if secret.len() < 32 {
            return Err(ConfigValidationError::JwtSecretTooShort);
        }
        if self.token_ttl_minutes <= 0 {
            return Err(ConfigValidationError::InvalidTokenTtl(
                self.token_ttl_minutes,
            ));
        }

        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error(
        "JWT secret is required. Set auth.jwt_secret in the config file or \
         the WFGATE_AUTH__JWT_SECRET environment variable."
    )]
    MissingJwtSecret,

    #[error("JWT secret is still the placeholder value; configure a real secret.")]
    InsecureJwtSecret,

    #[error("JWT secret must be at least 32 characters long.")]
    JwtSecretTooShort,

    #[error("auth.token_ttl_minutes must be positive, got {0}.")]
    InvalidTokenTtl(i64),

    #[error("environment variable '{0}' not found (referenced via env:{0} in config)")]
    EnvVarNotFound(String),

    #[error("environment variable '{0}' is empty (referenced via env:{0} in config)")]
    EnvVarEmpty(String),
}

impl GatewayConfig {
    /// Load configuration from an optional file path plus environment
    /// overrides (`WFGATE_SERVER__PORT=9000` style).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("wfgate").required(false)),
        };
        builder = builder.add_source(Environment::with_prefix("WFGATE").separator("__"));

        builder
            .build()
            .context("reading configuration")?
            .try_deserialize()
            .context("parsing configuration")
    }
}
