//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults. Configuration is read once at startup and is read-only after.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use crate::domains::tools::UnknownParameterPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Tools domain configuration.
    pub tools: ToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,

    /// Usage instructions sent to clients on initialize.
    pub instructions: String,
}

/// Configuration for the tools domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Default bound on handler execution, in seconds. 0 disables it.
    pub default_timeout_secs: u64,

    /// Request timeout of the `http_request` tool, in seconds.
    pub http_timeout_secs: u64,

    /// What to do with arguments a tool does not declare.
    pub unknown_parameters: UnknownParameterPolicy,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: 30,
            http_timeout_secs: 15,
            unknown_parameters: UnknownParameterPolicy::Reject,
        }
    }
}

impl ToolsConfig {
    /// The default handler timeout, if any.
    pub fn default_timeout(&self) -> Option<Duration> {
        (self.default_timeout_secs > 0).then(|| Duration::from_secs(self.default_timeout_secs))
    }

    /// The `http_request` tool's timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "MCP Skeleton Server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                instructions: "A generic skeleton MCP server with sample tools. \
                               Customize this for your specific use case."
                    .to_string(),
            },
            tools: ToolsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Some(secs) = env_u64("MCP_TOOL_TIMEOUT_SECS") {
            config.tools.default_timeout_secs = secs;
        }

        if let Some(secs) = env_u64("MCP_HTTP_TOOL_TIMEOUT_SECS") {
            config.tools.http_timeout_secs = secs;
        }

        if let Ok(lenient) = std::env::var("MCP_LENIENT_ARGUMENTS") {
            if matches!(lenient.to_lowercase().as_str(), "true" | "1" | "yes") {
                config.tools.unknown_parameters = UnknownParameterPolicy::Ignore;
                info!("Lenient argument binding enabled: undeclared arguments are ignored");
            }
        }

        config
    }

    /// Check values that would otherwise fail later at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.server.name.trim().is_empty() {
            return Err(Error::config("server name must not be empty"));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "unknown log level '{}', expected one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

fn env_u64(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a non-negative integer", key, raw);
            None
        }
    }
}
