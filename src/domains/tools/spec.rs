//! Tool descriptors: parameter schemas, bound arguments and the handler seam.
//!
//! A [`ToolSpec`] is the static description of one invocable operation. It is
//! built once during startup, handed to the registry, and never mutated.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ToolError;

// ============================================================================
// Parameter Schema
// ============================================================================

/// The kinds of value a parameter can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Integer,
    Float,
    Boolean,
    Object,
}

impl ParamKind {
    /// The kind name used in schemas and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Object => "object",
        }
    }

    /// The matching JSON Schema `type` keyword.
    pub fn json_schema_type(&self) -> &'static str {
        match self {
            Self::Float => "number",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptor for a single tool parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParamSpec {
    /// A parameter the caller must supply.
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            default: None,
            description: None,
        }
    }

    /// A parameter the caller may omit; omitted values bind to [`ArgValue::Absent`].
    pub fn optional(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    /// Attach a default value. A defaulted parameter is never required.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self.required = false;
        self
    }

    /// Attach a human-readable description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// ============================================================================
// Bound Arguments
// ============================================================================

/// A concrete, validated argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Object(Map<String, Value>),
    /// The parameter was optional and not provided.
    Absent,
}

impl ArgValue {
    /// Whether the caller (or a default) supplied a value.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Convert back to JSON. `Absent` becomes `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Integer(i) => Value::from(*i),
            Self::Float(f) => Value::from(*f),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Object(map) => Value::Object(map.clone()),
            Self::Absent => Value::Null,
        }
    }
}

/// Arguments bound for a single invocation, keyed by parameter name.
///
/// Every declared parameter has an entry; optional parameters the caller
/// skipped hold [`ArgValue::Absent`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArguments {
    values: HashMap<String, ArgValue>,
}

impl BoundArguments {
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        self.values.insert(name.into(), value);
    }

    /// Raw access. `None` means the tool never declared `name`.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// Whether `name` is declared and carries a value.
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some_and(ArgValue::is_present)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A required string argument.
    pub fn str(&self, name: &str) -> Result<&str, ToolError> {
        require(name, self.opt_str(name)?)
    }

    /// An optional string argument.
    pub fn opt_str(&self, name: &str) -> Result<Option<&str>, ToolError> {
        self.typed(name, ParamKind::String, |v| match v {
            ArgValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// A required integer argument.
    pub fn i64(&self, name: &str) -> Result<i64, ToolError> {
        require(name, self.opt_i64(name)?)
    }

    /// An optional integer argument.
    pub fn opt_i64(&self, name: &str) -> Result<Option<i64>, ToolError> {
        self.typed(name, ParamKind::Integer, |v| match v {
            ArgValue::Integer(i) => Some(*i),
            _ => None,
        })
    }

    /// A required float argument.
    pub fn f64(&self, name: &str) -> Result<f64, ToolError> {
        require(name, self.opt_f64(name)?)
    }

    /// An optional float argument.
    pub fn opt_f64(&self, name: &str) -> Result<Option<f64>, ToolError> {
        self.typed(name, ParamKind::Float, |v| match v {
            ArgValue::Float(f) => Some(*f),
            _ => None,
        })
    }

    /// A required boolean argument.
    pub fn bool(&self, name: &str) -> Result<bool, ToolError> {
        require(name, self.opt_bool(name)?)
    }

    /// An optional boolean argument.
    pub fn opt_bool(&self, name: &str) -> Result<Option<bool>, ToolError> {
        self.typed(name, ParamKind::Boolean, |v| match v {
            ArgValue::Boolean(b) => Some(*b),
            _ => None,
        })
    }

    /// An optional object argument.
    pub fn opt_object(&self, name: &str) -> Result<Option<&Map<String, Value>>, ToolError> {
        self.typed(name, ParamKind::Object, |v| match v {
            ArgValue::Object(map) => Some(map),
            _ => None,
        })
    }

    // Reading an undeclared name or the wrong kind is a handler bug, so both
    // surface as internal errors rather than validation errors.
    fn typed<'a, T>(
        &'a self,
        name: &str,
        kind: ParamKind,
        pick: impl FnOnce(&'a ArgValue) -> Option<T>,
    ) -> Result<Option<T>, ToolError> {
        let value = self
            .get(name)
            .ok_or_else(|| ToolError::internal(format!("parameter '{name}' is not declared")))?;
        if !value.is_present() {
            return Ok(None);
        }
        pick(value)
            .map(Some)
            .ok_or_else(|| ToolError::internal(format!("parameter '{name}' is not a {kind}")))
    }
}

fn require<T>(name: &str, value: Option<T>) -> Result<T, ToolError> {
    value.ok_or_else(|| ToolError::internal(format!("parameter '{name}' has no value")))
}

// ============================================================================
// Handler
// ============================================================================

/// The executable logic behind a tool.
///
/// Return [`ToolError::Execution`] for failures the tool expects (bad input
/// semantics, refused operations). Anything else is reported as-is; a panic
/// is caught by the dispatcher and reported as an internal error.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with validated arguments.
    async fn call(&self, args: BoundArguments) -> Result<Value, ToolError>;
}

#[async_trait]
impl<F, Fut> ToolHandler for F
where
    F: Fn(BoundArguments) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, ToolError>> + Send,
{
    async fn call(&self, args: BoundArguments) -> Result<Value, ToolError> {
        (self)(args).await
    }
}

// ============================================================================
// Tool Spec
// ============================================================================

/// Static descriptor of one invocable tool.
#[derive(Clone)]
pub struct ToolSpec {
    name: String,
    description: String,
    parameters: Vec<ParamSpec>,
    timeout: Option<Duration>,
    handler: Arc<dyn ToolHandler>,
}

impl ToolSpec {
    /// Create a tool with no parameters.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl ToolHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            timeout: None,
            handler: Arc::new(handler),
        }
    }

    /// Append a parameter. Declaration order is binding order.
    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.parameters.push(param);
        self
    }

    /// Bound this tool's execution time, overriding the dispatcher default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &[ParamSpec] {
        &self.parameters
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }

    /// Discovery view of this tool.
    pub fn summary(&self) -> ToolSummary {
        ToolSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameters.clone(),
        }
    }

    /// Render the parameter list as a JSON Schema object (MCP `inputSchema`).
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &self.parameters {
            let mut property = Map::new();
            property.insert("type".into(), param.kind.json_schema_type().into());
            if let Some(description) = &param.description {
                property.insert("description".into(), description.clone().into());
            }
            if let Some(default) = &param.default {
                property.insert("default".into(), default.clone());
            }
            properties.insert(param.name.clone(), Value::Object(property));

            if param.required && param.default.is_none() {
                required.push(Value::String(param.name.clone()));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".into(), "object".into());
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), Value::Array(required));
        }
        schema
    }
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Name, description and parameter schema of a registered tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParamSpec>,
}
