//! Bot configuration
//!
//! Read from the environment at startup. The gateway token is required;
//! the keep-alive port defaults to 3000.

use std::env;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DISCORD_TOKEN is not set in environment variables")]
    MissingToken,

    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

/// Process configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Gateway credential token
    pub token: String,
    /// Keep-alive HTTP port
    pub port: u16,
}

impl BotConfig {
    /// Load configuration from `DISCORD_TOKEN` and `PORT`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::var("DISCORD_TOKEN").ok(), env::var("PORT").ok())
    }

    fn from_vars(token: Option<String>, port: Option<String>) -> Result<Self, ConfigError> {
        let token = token
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let port = match port {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self { token, port })
    }
}
