//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type for startup and infrastructure
//! failures. Tool invocations never surface here: the dispatcher turns every
//! invocation failure into a response envelope.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// A tool could not be registered.
    #[error("Registration error: {0}")]
    Registry(#[from] crate::domains::tools::RegistryError),

    /// The transport failed to start or stopped with an error.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::TransportError;
    use crate::domains::tools::{RegistryError, ToolError};

    #[test]
    fn test_from_registry_error() {
        let err: Error = RegistryError::DuplicateTool("calculator".into()).into();
        assert_eq!(
            err.to_string(),
            "Registration error: Tool already registered: calculator"
        );
    }

    #[test]
    fn test_from_transport_error() {
        let err: Error = TransportError::init("stdin closed").into();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(
            err.to_string(),
            "Transport error: Server initialization error: stdin closed"
        );
    }

    #[test]
    fn test_from_tool_error() {
        let err: Error = ToolError::internal("no client").into();
        assert!(matches!(err, Error::Tool(_)));
    }
}
