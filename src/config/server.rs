// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server configuration
//!
//! Built once at process start from command-line flags and environment
//! variables (a `.env` file is loaded first), then passed to
//! [`crate::api::http_server::start_server`].

use axum::http::HeaderValue;
use clap::{ArgAction, Parser};
use std::net::{SocketAddr, ToSocketAddrs};
use thiserror::Error;

use crate::api::response_formatter::JsonFormat;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("host must not be empty")]
    EmptyHost,

    #[error("cannot resolve listen address {addr}: {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("at least one CORS origin is required (use \"*\" to allow any)")]
    NoCorsOrigins,

    #[error("invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),

    #[error("max body size must be > 0 when set")]
    InvalidBodyLimit,

    #[error("failed to load .env file: {0}")]
    EnvFile(String),
}

/// Image processing node server
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "image-processing-node")]
#[command(version)]
#[command(about = "HTTP endpoint for image and object position processing", long_about = None)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "API_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "API_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Allowed CORS origins, comma separated; "*" allows any origin
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub cors_allowed_origins: Vec<String>,

    /// Maximum request body size in bytes (unlimited when unset)
    #[arg(long, env = "MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,

    /// Pretty-print JSON responses
    #[arg(long, env = "JSON_PRETTY", default_value_t = true, action = ArgAction::Set)]
    pub json_pretty: bool,

    /// Escape non-ASCII characters in JSON responses
    #[arg(long, env = "JSON_ASCII", default_value_t = false, action = ArgAction::Set)]
    pub json_ascii: bool,

    /// Sort object keys in JSON responses
    #[arg(long, env = "JSON_SORT_KEYS", default_value_t = false, action = ArgAction::Set)]
    pub json_sort_keys: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_allowed_origins: vec!["*".to_string()],
            max_body_bytes: None,
            json_pretty: true,
            json_ascii: false,
            json_sort_keys: false,
        }
    }
}

impl ServerConfig {
    /// Load `.env`, parse flags and environment, and validate
    ///
    /// Exits the process with usage output on malformed flags.
    pub fn load() -> Result<Self, ConfigError> {
        env_file_result(dotenv::dotenv().map(|_| ()))?;

        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        if self.cors_allowed_origins.is_empty() {
            return Err(ConfigError::NoCorsOrigins);
        }
        for origin in &self.cors_allowed_origins {
            if origin == "*" {
                continue;
            }
            if origin.is_empty() || HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::InvalidCorsOrigin(origin.clone()));
            }
        }

        if self.max_body_bytes == Some(0) {
            return Err(ConfigError::InvalidBodyLimit);
        }

        Ok(())
    }

    /// Resolve `host:port` to the first matching socket address
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        let invalid = |reason: String| ConfigError::InvalidAddress {
            addr: addr.clone(),
            reason,
        };

        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("no addresses found".to_string()))
    }

    pub fn json_format(&self) -> JsonFormat {
        JsonFormat {
            pretty: self.json_pretty,
            ascii_only: self.json_ascii,
            sort_keys: self.json_sort_keys,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}

/// A missing `.env` is fine; an unreadable or malformed one is not.
fn env_file_result(result: Result<(), dotenv::Error>) -> Result<(), ConfigError> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::EnvFile(e.to_string())),
    }
}
