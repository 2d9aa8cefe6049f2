//! Argument binding - turns an untyped JSON payload into [`BoundArguments`].
//!
//! Parameters are processed in declaration order:
//! 1. a supplied value is converted to the declared kind
//! 2. otherwise the default is used
//! 3. otherwise a required parameter fails
//! 4. otherwise the parameter binds to [`ArgValue::Absent`]
//!
//! The only coercion is integer -> float. Keys the tool does not declare are
//! rejected unless the binder runs in [`UnknownParameterPolicy::Ignore`] mode.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::error::ValidationError;
use super::spec::{ArgValue, BoundArguments, ParamKind, ParamSpec, ToolSpec};

/// What to do with payload keys the tool does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownParameterPolicy {
    /// Fail with `UnknownParameterError`.
    #[default]
    Reject,
    /// Drop them silently.
    Ignore,
}

/// Validates raw arguments against a tool's parameter schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentBinder {
    policy: UnknownParameterPolicy,
}

impl ArgumentBinder {
    /// Create a binder with the given unknown-key policy.
    pub fn new(policy: UnknownParameterPolicy) -> Self {
        Self { policy }
    }

    /// A binder that drops undeclared keys.
    pub fn lenient() -> Self {
        Self::new(UnknownParameterPolicy::Ignore)
    }

    pub fn policy(&self) -> UnknownParameterPolicy {
        self.policy
    }

    /// Bind `raw` against `spec`.
    pub fn bind(
        &self,
        spec: &ToolSpec,
        raw: &Map<String, Value>,
    ) -> Result<BoundArguments, ValidationError> {
        let mut bound = BoundArguments::default();

        for param in spec.parameters() {
            let value = match (raw.get(&param.name), &param.default) {
                (Some(value), _) => convert(param, value)?,
                (None, Some(default)) => convert(param, default)?,
                (None, None) if param.required => {
                    return Err(ValidationError::missing(&param.name));
                }
                (None, None) => ArgValue::Absent,
            };
            bound.insert(param.name.clone(), value);
        }

        // Map iteration order depends on serde_json's preserve_order feature,
        // so pick the smallest key to keep the reported name deterministic.
        let unknown = raw
            .keys()
            .filter(|key| !spec.parameters().iter().any(|p| &p.name == *key))
            .min();

        if let Some(key) = unknown {
            match self.policy {
                UnknownParameterPolicy::Reject => return Err(ValidationError::unknown(key)),
                UnknownParameterPolicy::Ignore => {
                    debug!(tool = spec.name(), parameter = %key, "Ignoring undeclared argument");
                }
            }
        }

        Ok(bound)
    }
}

/// Convert one JSON value to the parameter's declared kind.
pub(crate) fn convert(param: &ParamSpec, value: &Value) -> Result<ArgValue, ValidationError> {
    let converted = match (param.kind, value) {
        (ParamKind::String, Value::String(s)) => Some(ArgValue::String(s.clone())),
        (ParamKind::Boolean, Value::Bool(b)) => Some(ArgValue::Boolean(*b)),
        (ParamKind::Object, Value::Object(map)) => Some(ArgValue::Object(map.clone())),
        (ParamKind::Integer, Value::Number(n)) => n.as_i64().map(ArgValue::Integer),
        // Integer literals are accepted for float parameters.
        (ParamKind::Float, Value::Number(n)) => n.as_f64().map(ArgValue::Float),
        _ => None,
    };

    converted.ok_or_else(|| ValidationError::mismatch(&param.name, param.kind, json_kind(value)))
}

/// Name the kind of a raw JSON value for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(_) => "integer out of range",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
