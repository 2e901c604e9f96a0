// ABOUTME: Environment configuration for deployment-specific settings
// ABOUTME: Loads the token key, sign-in lockout threshold, and bind address from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt;

use anyhow::{anyhow, Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::info;
use verbum_core::constants::{accounts, env_config, network, tokens};

use crate::crypto::TokenKey;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development; a missing token key is generated
    #[default]
    Development,
    /// Production; a token key must be configured
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
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Server configuration resolved at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Bind host for the transport layer
    pub host: String,
    /// Bind port for the transport layer
    pub http_port: u16,
    /// Process-wide token key
    pub token_key: TokenKey,
    /// Lifetime of every issued token
    pub token_lifetime: Duration,
    /// Failed sign-ins tolerated before the account is locked
    pub max_signin_attempts: u32,
}

impl ServerConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed, or if no token
    /// key is configured in production.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        info!("Loading configuration from environment variables");

        let environment = lookup(env_config::ENVIRONMENT)
            .map_or_else(Environment::default, |value| {
                Environment::from_str_or_default(&value)
            });

        let token_key = match lookup(env_config::TOKEN_KEY) {
            Some(encoded) => {
                info!("Loading token key from {}", env_config::TOKEN_KEY);
                TokenKey::from_base64(&encoded)?
            }
            None if environment.is_production() => {
                return Err(anyhow!(
                    "{} must be set in production",
                    env_config::TOKEN_KEY
                ));
            }
            None => TokenKey::generate_for_development(),
        };

        let max_signin_attempts = match lookup(env_config::MAX_SIGNIN_ATTEMPTS) {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid {} value", env_config::MAX_SIGNIN_ATTEMPTS))?,
            None => accounts::DEFAULT_MAX_SIGNIN_ATTEMPTS,
        };

        let http_port = match lookup(env_config::HTTP_PORT) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid {} value", env_config::HTTP_PORT))?,
            None => network::DEFAULT_HTTP_PORT,
        };

        let config = Self {
            environment,
            host: lookup(env_config::HOST).unwrap_or_else(|| network::DEFAULT_HOST.to_owned()),
            http_port,
            token_key,
            token_lifetime: Duration::days(tokens::TOKEN_LIFETIME_DAYS),
            max_signin_attempts,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if the lockout threshold is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_signin_attempts == 0 {
            return Err(anyhow!(
                "{} must be at least 1",
                env_config::MAX_SIGNIN_ATTEMPTS
            ));
        }
        Ok(())
    }

    /// Bind address as `host:port`
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// One-line summary for startup logs; never includes key material
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} bind={} token_lifetime_days={} max_signin_attempts={}",
            self.environment,
            self.bind_address(),
            self.token_lifetime.num_days(),
            self.max_signin_attempts
        )
    }
}
