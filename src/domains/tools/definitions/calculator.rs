//! Calculator tool definition.
//!
//! A tool that applies one of four arithmetic operations to two numbers.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::tools::{BoundArguments, ParamKind, ParamSpec, ToolError, ToolHandler, ToolSpec};

// ============================================================================
// Operation
// ============================================================================

/// Supported arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Apply the operation. Division by zero and overflow are refused.
    pub fn apply(&self, a: f64, b: f64) -> Result<f64, ToolError> {
        let result = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide if b == 0.0 => {
                return Err(ToolError::execution("Division by zero is not allowed"));
            }
            Self::Divide => a / b,
        };

        // JSON has no infinity or NaN; serde_json would emit null.
        if result.is_finite() {
            Ok(result)
        } else {
            Err(ToolError::execution("Result is not a finite number"))
        }
    }
}

impl FromStr for Operation {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ToolError::execution(format!("Unsupported operation: {s}")))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Result payload of the calculator.
///
/// Whole numbers serialize as JSON integers (`42`, not `42.0`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub operation: Operation,
    #[serde(serialize_with = "serialize_number")]
    pub operand_a: f64,
    #[serde(serialize_with = "serialize_number")]
    pub operand_b: f64,
    #[serde(serialize_with = "serialize_number")]
    pub result: f64,
}

/// Largest magnitude below which every whole f64 is exact in an i64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn serialize_number<S: serde::Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Calculator tool - add, subtract, multiply or divide two numbers.
pub struct CalculatorTool;

impl CalculatorTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calculator";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Perform mathematical operations. Supports 'add', 'subtract', 'multiply' and 'divide' on two numbers.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(operation = %operation))]
    pub fn execute(operation: &str, a: f64, b: f64) -> Result<Calculation, ToolError> {
        info!("Calculator tool called");
        let operation: Operation = operation.parse()?;
        let result = operation.apply(a, b)?;
        Ok(Calculation {
            operation,
            operand_a: a,
            operand_b: b,
            result,
        })
    }

    /// Build the registry entry for this tool.
    pub fn spec() -> ToolSpec {
        ToolSpec::new(Self::NAME, Self::DESCRIPTION, Self)
            .with_param(
                ParamSpec::required("operation", ParamKind::String)
                    .describe("Type of operation - 'add', 'subtract', 'multiply', or 'divide'"),
            )
            .with_param(ParamSpec::required("a", ParamKind::Float).describe("First number"))
            .with_param(ParamSpec::required("b", ParamKind::Float).describe("Second number"))
    }
}

#[async_trait]
impl ToolHandler for CalculatorTool {
    async fn call(&self, args: BoundArguments) -> Result<Value, ToolError> {
        let calculation = Self::execute(args.str("operation")?, args.f64("a")?, args.f64("b")?)?;
        serde_json::to_value(calculation).map_err(|e| ToolError::internal(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        let calc = CalculatorTool::execute("add", 5.0, 3.0).unwrap();
        assert_eq!(calc.operation, Operation::Add);
        assert_eq!(calc.operand_a, 5.0);
        assert_eq!(calc.operand_b, 3.0);
        assert_eq!(calc.result, 8.0);
    }

    #[test]
    fn test_subtract_multiply_divide() {
        assert_eq!(CalculatorTool::execute("subtract", 10.0, 4.0).unwrap().result, 6.0);
        assert_eq!(CalculatorTool::execute("multiply", 6.0, 7.0).unwrap().result, 42.0);
        assert_eq!(CalculatorTool::execute("divide", 15.0, 3.0).unwrap().result, 5.0);
    }

    #[test]
    fn test_result_is_not_rounded() {
        let calc = CalculatorTool::execute("divide", 1.0, 3.0).unwrap();
        assert_eq!(calc.result, 1.0 / 3.0);
    }

    #[test]
    fn test_divide_by_zero() {
        let err = CalculatorTool::execute("divide", 10.0, 0.0).unwrap_err();
        assert!(matches!(err, ToolError::Execution(_)));
        assert_eq!(err.to_string(), "Division by zero is not allowed");
    }

    #[test]
    fn test_overflow_is_refused() {
        let err = CalculatorTool::execute("multiply", 1e308, 10.0).unwrap_err();
        assert!(matches!(err, ToolError::Execution(_)));
        assert_eq!(err.to_string(), "Result is not a finite number");
        assert!(Operation::Subtract.apply(-f64::MAX, f64::MAX).is_err());
    }

    #[test]
    fn test_whole_numbers_serialize_as_integers() {
        let calc = CalculatorTool::execute("add", 15.0, 27.0).unwrap();
        assert_eq!(
            serde_json::to_value(calc).unwrap(),
            serde_json::json!({"operation": "add", "operand_a": 15, "operand_b": 27, "result": 42})
        );

        let calc = CalculatorTool::execute("divide", 1.0, 4.0).unwrap();
        let json = serde_json::to_value(calc).unwrap();
        assert_eq!(json["result"], serde_json::json!(0.25));
        assert_eq!(json["operand_a"], serde_json::json!(1));
    }

    #[test]
    fn test_unsupported_operation() {
        let err = CalculatorTool::execute("modulo", 10.0, 3.0).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported operation: modulo");
    }

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
        assert!("Add".parse::<Operation>().is_err());
    }

    #[test]
    fn test_spec() {
        let spec = CalculatorTool::spec();
        assert_eq!(spec.name(), "calculator");
        let names: Vec<_> = spec.parameters().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["operation", "a", "b"]);
        assert!(spec.parameters().iter().all(|p| p.required));
    }
}
