//! MCP Server implementation and lifecycle management.
//!
//! [`McpServer`] implements the rmcp `ServerHandler` trait by delegating every
//! tool request to the [`Dispatcher`]. The HTTP transport calls the same
//! dispatcher through the helper methods below, so both transports report
//! identical envelopes.
//!
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::tools::{
    Dispatcher, ResponseEnvelope, ToolInvocation, ToolRegistry, ToolSpec, register_builtin_tools,
};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared dispatcher; cloning the server shares its registry.
    dispatcher: Arc<Dispatcher>,
}

impl McpServer {
    /// Create a server exposing the built-in tools.
    pub fn new(config: Config) -> Result<Self> {
        let registry = Arc::new(ToolRegistry::new());
        register_builtin_tools(&registry, &config.tools)?;

        let dispatcher = Dispatcher::new(registry)
            .with_unknown_parameters(config.tools.unknown_parameters)
            .with_default_timeout(config.tools.default_timeout());

        Ok(Self::with_dispatcher(config, dispatcher))
    }

    /// Create a server around an already populated dispatcher.
    pub fn with_dispatcher(config: Config, dispatcher: Dispatcher) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Instructions sent to clients on initialize.
    pub fn instructions(&self) -> &str {
        &self.config.server.instructions
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools in MCP wire shape (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Value> {
        self.dispatcher
            .registry()
            .specs()
            .iter()
            .map(|spec| {
                serde_json::json!({
                    "name": spec.name(),
                    "description": spec.description(),
                    "inputSchema": spec.input_schema(),
                })
            })
            .collect()
    }

    /// Call a tool by name and wrap the envelope as an MCP tool result
    /// (for HTTP transport).
    pub async fn call_tool(&self, name: &str, arguments: &Map<String, Value>) -> Value {
        let envelope = self.dispatcher.invoke(name, arguments).await;
        let json = envelope.to_json();
        serde_json::json!({
            "content": [{ "type": "text", "text": json.to_string() }],
            "isError": !envelope.is_success(),
            "structuredContent": json,
        })
    }

    /// Run a bare invocation request and return its envelope.
    pub async fn invoke(&self, request: &ToolInvocation) -> ResponseEnvelope {
        self.dispatcher.invoke_request(request).await
    }
}

fn to_tool(spec: &ToolSpec) -> Tool {
    Tool::new(
        spec.name().to_string(),
        spec.description().to_string(),
        Arc::new(spec.input_schema()),
    )
}

fn to_call_result(envelope: ResponseEnvelope) -> CallToolResult {
    let json = envelope.to_json();
    let content = vec![Content::text(json.to_string())];
    let mut result = if envelope.is_success() {
        CallToolResult::success(content)
    } else {
        CallToolResult::error(content)
    };
    result.structured_content = Some(json);
    result
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(self.instructions().to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip_all)]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        let tools: Vec<Tool> = self
            .dispatcher
            .registry()
            .specs()
            .iter()
            .map(|spec| to_tool(spec))
            .collect();
        info!("Listing {} tool(s)", tools.len());
        Ok(ListToolsResult {
            tools,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        match self
            .dispatcher
            .invoke_until(&request.name, &arguments, context.ct.cancelled())
            .await
        {
            Some(envelope) => Ok(to_call_result(envelope)),
            None => Err(McpError::internal_error("request cancelled", None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    #[test]
    fn test_get_info_advertises_tools_only() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "MCP Skeleton Server");
    }

    #[test]
    fn test_list_tools_wire_shape() {
        let tools = server().list_tools();
        let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(names, ["get_weather", "calculator", "http_request", "analyze_text"]);

        let calculator = &tools[1];
        assert_eq!(calculator["inputSchema"]["type"], "object");
        assert_eq!(
            calculator["inputSchema"]["properties"]["a"]["type"],
            "number"
        );
    }

    #[test]
    fn test_to_tool_keeps_schema() {
        let server = server();
        let spec = server.dispatcher().registry().lookup("calculator").unwrap();
        let tool = to_tool(&spec);
        assert_eq!(tool.name, "calculator");
        assert!(tool.input_schema.contains_key("properties"));
    }

    #[tokio::test]
    async fn test_call_tool_success() {
        let args = json!({"operation": "multiply", "a": 6, "b": 7});
        let result = server()
            .call_tool("calculator", args.as_object().unwrap())
            .await;
        assert_eq!(result["isError"], false);
        assert_eq!(result["structuredContent"]["success"], true);
        assert_eq!(
            result["structuredContent"]["data"]["result"].as_f64(),
            Some(42.0)
        );
        assert_eq!(result["content"][0]["type"], "text");
    }

    #[tokio::test]
    async fn test_call_tool_failure_is_flagged() {
        let result = server().call_tool("nope", &Map::new()).await;
        assert_eq!(result["isError"], true);
        assert_eq!(
            result["structuredContent"]["error"]["kind"],
            "UnknownToolError"
        );
    }

    #[test]
    fn test_to_call_result_sets_error_flag() {
        let ok = to_call_result(ResponseEnvelope::success(json!(1)));
        assert_eq!(ok.is_error, Some(false));

        let failed = to_call_result(ResponseEnvelope::failure(
            crate::domains::tools::ErrorKind::Internal,
            "boom",
        ));
        assert_eq!(failed.is_error, Some(true));
        assert!(failed.structured_content.is_some());
    }
}
