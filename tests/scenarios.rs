//! End-to-end invocation scenarios over the public API.

use std::sync::Arc;

use mcp_skeleton_server::core::config::ToolsConfig;
use mcp_skeleton_server::domains::tools::{
    BoundArguments, Dispatcher, ErrorKind, ParamKind, ParamSpec, RegistryError, ResponseEnvelope,
    ToolError, ToolRegistry, ToolSpec, register_builtin_tools,
};
use serde_json::{Map, Value, json};

fn dispatcher() -> Dispatcher {
    let registry = Arc::new(ToolRegistry::new());
    register_builtin_tools(&registry, &ToolsConfig::default()).unwrap();
    Dispatcher::new(registry)
}

fn args(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

async fn invoke(name: &str, arguments: Value) -> ResponseEnvelope {
    dispatcher().invoke(name, &args(arguments)).await
}

#[tokio::test]
async fn calculator_adds() {
    let envelope = invoke("calculator", json!({"operation": "add", "a": 15, "b": 27})).await;
    assert!(envelope.is_success());

    assert_eq!(
        envelope.to_json(),
        json!({
            "success": true,
            "data": {"operation": "add", "operand_a": 15, "operand_b": 27, "result": 42}
        })
    );
}

#[tokio::test]
async fn calculator_refuses_overflow() {
    let envelope = invoke("calculator", json!({"operation": "multiply", "a": 1e308, "b": 10})).await;
    assert_eq!(
        envelope.to_json(),
        json!({
            "success": false,
            "error": {
                "kind": "ToolExecutionError",
                "message": "Result is not a finite number"
            }
        })
    );
}

#[tokio::test]
async fn calculator_refuses_division_by_zero() {
    let envelope = invoke("calculator", json!({"operation": "divide", "a": 10, "b": 0})).await;
    assert_eq!(
        envelope.to_json(),
        json!({
            "success": false,
            "error": {
                "kind": "ToolExecutionError",
                "message": "Division by zero is not allowed"
            }
        })
    );
}

#[tokio::test]
async fn analyze_text_hello_world() {
    let envelope = invoke("analyze_text", json!({"text": "Hello world"})).await;
    let data = envelope.data().unwrap();
    assert_eq!(data["word_count"], 2);
    assert_eq!(data["text_length"], 11);
    assert_eq!(data["characters_no_spaces"], 10);
    assert_eq!(data["sentence_count"], 0);
    assert_eq!(data["average_word_length"].as_f64(), Some(5.0));
    assert_eq!(data["longest_word"], "Hello");
    assert_eq!(data["shortest_word"], "Hello");
}

#[tokio::test]
async fn unknown_tool_is_an_envelope() {
    let envelope = invoke("unknown_tool", json!({})).await;
    assert!(!envelope.is_success());
    assert_eq!(envelope.error_kind(), Some(ErrorKind::UnknownTool));
}

#[tokio::test]
async fn same_arguments_give_same_envelope() {
    let dispatcher = dispatcher();
    let raw = args(json!({"operation": "multiply", "a": 2.5, "b": 4}));
    let first = dispatcher.invoke("calculator", &raw).await;
    let second = dispatcher.invoke("calculator", &raw).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_required_parameter_is_named() {
    let envelope = invoke("calculator", json!({"operation": "add", "a": 1})).await;
    let error = envelope.error().unwrap();
    assert_eq!(error.kind, ErrorKind::MissingParameter);
    assert!(error.message.contains("'b'"));
}

#[tokio::test]
async fn wrong_kind_is_a_type_mismatch() {
    let envelope = invoke("calculator", json!({"operation": "add", "a": "1", "b": 2})).await;
    assert_eq!(envelope.error_kind(), Some(ErrorKind::TypeMismatch));

    let envelope = invoke("analyze_text", json!({"text": 42})).await;
    assert_eq!(envelope.error_kind(), Some(ErrorKind::TypeMismatch));
}

#[tokio::test]
async fn undeclared_argument_is_rejected() {
    let envelope = invoke("get_weather", json!({"city": "Paris", "units": "metric"})).await;
    assert_eq!(envelope.error_kind(), Some(ErrorKind::UnknownParameter));
}

#[tokio::test]
async fn weather_returns_sample_data() {
    let envelope = invoke("get_weather", json!({"city": "Paris"})).await;
    let data = envelope.data().unwrap();
    assert_eq!(data["city"], "Paris");
    assert_eq!(data["temperature"], 72);
}

#[test]
fn lookup_returns_the_registered_spec() {
    let registry = ToolRegistry::new();
    let spec = ToolSpec::new("echo", "Echo the message", |args: BoundArguments| async move {
        Ok::<_, ToolError>(json!(args.str("message")?))
    })
    .with_param(ParamSpec::required("message", ParamKind::String));
    let handler = spec.handler().clone();

    registry.register(spec).unwrap();
    let found = registry.lookup("echo").unwrap();
    assert_eq!(found.description(), "Echo the message");
    assert_eq!(found.parameters().len(), 1);
    assert!(Arc::ptr_eq(found.handler(), &handler));
}

#[test]
fn duplicate_registration_keeps_the_original() {
    let registry = ToolRegistry::new();
    let first = ToolSpec::new("echo", "first", |_: BoundArguments| async {
        Ok::<_, ToolError>(json!(1))
    });
    let second = ToolSpec::new("echo", "second", |_: BoundArguments| async {
        Ok::<_, ToolError>(json!(2))
    });

    registry.register(first).unwrap();
    assert!(matches!(
        registry.register(second),
        Err(RegistryError::DuplicateTool(name)) if name == "echo"
    ));
    assert_eq!(registry.lookup("echo").unwrap().description(), "first");
    assert_eq!(registry.len(), 1);
}
