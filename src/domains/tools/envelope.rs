//! Invocation request and response shapes.
//!
//! Every call through the dispatcher ends in a [`ResponseEnvelope`], whether
//! the tool succeeded, refused, timed out or was never found.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{ErrorKind, ToolError};

/// A tool invocation request: `{ "tool": "<name>", "arguments": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// The name of the tool to execute.
    pub tool: String,

    /// The arguments to pass to the tool.
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

/// Structured failure carried by an envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Uniform result of a tool invocation.
///
/// Exactly one of `data` and `error` is populated; the constructors are the
/// only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<EnvelopeError>,
}

impl ResponseEnvelope {
    /// Create a successful envelope.
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create a failed envelope.
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(EnvelopeError {
                kind,
                message: message.into(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&EnvelopeError> {
        self.error.as_ref()
    }

    /// Shortcut for `error().map(|e| e.kind)`.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }

    /// Split into a `Result`.
    pub fn into_result(self) -> Result<Value, EnvelopeError> {
        match (self.data, self.error) {
            (_, Some(error)) => Err(error),
            (data, None) => Ok(data.unwrap_or(Value::Null)),
        }
    }

    /// Serialize to a JSON value.
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("success".into(), Value::Bool(self.success));
        if let Some(data) = &self.data {
            out.insert("data".into(), data.clone());
        }
        if let Some(error) = &self.error {
            let mut err = Map::new();
            err.insert("kind".into(), error.kind.as_str().into());
            err.insert("message".into(), error.message.clone().into());
            out.insert("error".into(), Value::Object(err));
        }
        Value::Object(out)
    }
}

impl From<ToolError> for ResponseEnvelope {
    fn from(err: ToolError) -> Self {
        Self::failure(err.kind(), err.to_string())
    }
}

impl From<Result<Value, ToolError>> for ResponseEnvelope {
    fn from(result: Result<Value, ToolError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let envelope = ResponseEnvelope::success(json!({ "result": 42 }));
        assert!(envelope.is_success());
        assert!(envelope.error().is_none());
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "success": true, "data": { "result": 42 } })
        );
        assert_eq!(envelope.to_json(), serde_json::to_value(&envelope).unwrap());
    }

    #[test]
    fn test_failure_shape() {
        let envelope = ResponseEnvelope::failure(ErrorKind::UnknownTool, "Tool not found: x");
        assert!(!envelope.is_success());
        assert!(envelope.data().is_none());
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "success": false,
                "error": { "kind": "UnknownToolError", "message": "Tool not found: x" }
            })
        );
    }

    #[test]
    fn test_null_data_is_still_present() {
        let envelope = ResponseEnvelope::success(Value::Null);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "success": true, "data": null })
        );
    }

    #[test]
    fn test_from_tool_error() {
        let envelope: ResponseEnvelope = ToolError::execution("Division by zero is not allowed").into();
        let error = envelope.into_result().unwrap_err();
        assert_eq!(error.kind, ErrorKind::ToolExecution);
        assert_eq!(error.message, "Division by zero is not allowed");
    }

    #[test]
    fn test_invocation_defaults_arguments() {
        let invocation: ToolInvocation = serde_json::from_value(json!({ "tool": "get_weather" })).unwrap();
        assert_eq!(invocation.tool, "get_weather");
        assert!(invocation.arguments.is_empty());
    }
}
