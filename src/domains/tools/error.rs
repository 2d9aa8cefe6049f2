//! Tool-specific error types.
//!
//! Three error families live here:
//! - [`RegistryError`] - registration-time failures (startup only)
//! - [`ValidationError`] - argument binding failures
//! - [`ToolError`] - everything an invocation can surface to a caller
//!
//! Every [`ToolError`] maps onto exactly one [`ErrorKind`], which is the
//! stable, serialized name a client sees in a failure envelope.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::spec::ParamKind;

/// The error taxonomy exposed in failure envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    #[serde(rename = "UnknownToolError")]
    UnknownTool,
    #[serde(rename = "MissingParameterError")]
    MissingParameter,
    #[serde(rename = "TypeMismatchError")]
    TypeMismatch,
    #[serde(rename = "UnknownParameterError")]
    UnknownParameter,
    /// A failure the handler declared itself (bad operation, division by zero).
    #[serde(rename = "ToolExecutionError")]
    ToolExecution,
    /// An unexpected failure inside a handler or one of its dependencies.
    #[serde(rename = "InternalError")]
    Internal,
    #[serde(rename = "TimeoutError")]
    Timeout,
}

impl ErrorKind {
    /// The wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownTool => "UnknownToolError",
            Self::MissingParameter => "MissingParameterError",
            Self::TypeMismatch => "TypeMismatchError",
            Self::UnknownParameter => "UnknownParameterError",
            Self::ToolExecution => "ToolExecutionError",
            Self::Internal => "InternalError",
            Self::Timeout => "TimeoutError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while registering a tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A tool with this name is already registered.
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// Tool names must not be empty.
    #[error("Tool name must not be empty")]
    EmptyName,

    /// The same parameter name is declared twice.
    #[error("Tool '{tool}' declares parameter '{parameter}' more than once")]
    DuplicateParameter { tool: String, parameter: String },

    /// A declared default does not convert to the parameter's kind.
    #[error("Tool '{tool}' has an invalid default for '{parameter}': {reason}")]
    InvalidDefault {
        tool: String,
        parameter: String,
        reason: String,
    },
}

/// Errors produced by the argument binder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required parameter was not supplied and has no default.
    #[error("Missing required parameter: '{parameter}'")]
    MissingParameter { parameter: String },

    /// A supplied value has the wrong kind.
    #[error("Parameter '{parameter}' expected {expected}, got {actual}")]
    TypeMismatch {
        parameter: String,
        expected: ParamKind,
        actual: &'static str,
    },

    /// The payload carries a key the tool does not declare.
    #[error("Unknown parameter: '{parameter}'")]
    UnknownParameter { parameter: String },
}

impl ValidationError {
    /// Create a new "missing parameter" error.
    pub fn missing(parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            parameter: parameter.into(),
        }
    }

    /// Create a new "type mismatch" error.
    pub fn mismatch(parameter: impl Into<String>, expected: ParamKind, actual: &'static str) -> Self {
        Self::TypeMismatch {
            parameter: parameter.into(),
            expected,
            actual,
        }
    }

    /// Create a new "unknown parameter" error.
    pub fn unknown(parameter: impl Into<String>) -> Self {
        Self::UnknownParameter {
            parameter: parameter.into(),
        }
    }

    /// The name of the offending parameter.
    pub fn parameter(&self) -> &str {
        match self {
            Self::MissingParameter { parameter }
            | Self::TypeMismatch { parameter, .. }
            | Self::UnknownParameter { parameter } => parameter,
        }
    }

    /// The envelope kind for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingParameter { .. } => ErrorKind::MissingParameter,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::UnknownParameter { .. } => ErrorKind::UnknownParameter,
        }
    }
}

/// Errors that can occur during tool operations.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The arguments did not match the tool's parameter schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The handler reported a domain failure.
    #[error("{0}")]
    Execution(String),

    /// The tool timed out during execution.
    #[error("Tool execution timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The envelope kind for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::UnknownTool,
            Self::Validation(e) => e.kind(),
            Self::Execution(_) => ErrorKind::ToolExecution,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names() {
        let json = serde_json::to_value(ErrorKind::ToolExecution).unwrap();
        assert_eq!(json, "ToolExecutionError");
        let back: ErrorKind = serde_json::from_value(json).unwrap();
        assert_eq!(back, ErrorKind::ToolExecution);
        assert_eq!(ErrorKind::UnknownTool.to_string(), "UnknownToolError");
    }

    #[test]
    fn test_tool_error_kinds() {
        assert_eq!(ToolError::not_found("x").kind(), ErrorKind::UnknownTool);
        assert_eq!(ToolError::execution("boom").kind(), ErrorKind::ToolExecution);
        assert_eq!(ToolError::internal("io").kind(), ErrorKind::Internal);
        assert_eq!(
            ToolError::Timeout(Duration::from_secs(1)).kind(),
            ErrorKind::Timeout
        );
        let err: ToolError = ValidationError::missing("a").into();
        assert_eq!(err.kind(), ErrorKind::MissingParameter);
    }

    #[test]
    fn test_execution_message_is_verbatim() {
        let err = ToolError::execution("Division by zero is not allowed");
        assert_eq!(err.to_string(), "Division by zero is not allowed");
    }

    #[test]
    fn test_validation_messages_name_the_parameter() {
        let err = ValidationError::mismatch("a", ParamKind::Float, "string");
        assert_eq!(err.to_string(), "Parameter 'a' expected float, got string");
        assert_eq!(err.parameter(), "a");
        assert_eq!(
            ValidationError::unknown("extra").to_string(),
            "Unknown parameter: 'extra'"
        );
    }
}
