//! HTTP request tool definition.
//!
//! Proxies a single GET or POST to an external URL and returns the status,
//! final URL and body. JSON bodies are parsed when the server says they are
//! JSON; everything else comes back as text.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::domains::tools::{BoundArguments, ParamKind, ParamSpec, ToolError, ToolHandler, ToolSpec};

/// Methods the tool will send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl FromStr for HttpMethod {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            _ => Err(ToolError::execution(format!("Unsupported HTTP method: {s}"))),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

/// What the caller asked for.
#[derive(Debug, Clone, Copy)]
pub struct HttpRequestParams<'a> {
    pub url: &'a str,
    pub method: &'a str,
    pub headers: Option<&'a Map<String, Value>>,
    pub body: Option<&'a Map<String, Value>>,
}

/// What came back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub url: String,
    pub data: Value,
}

/// HTTP request tool - a thin pass-through to an external API.
pub struct HttpRequestTool {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpRequestTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "http_request";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Make HTTP requests to external APIs. Supports GET and POST; JSON responses are parsed, anything else is returned as text.";

    /// Create the tool with a bounded request timeout.
    pub fn new(timeout: Duration) -> Result<Self, ToolError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ToolError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, timeout })
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(url = %params.url, method = %params.method))]
    pub async fn execute(&self, params: HttpRequestParams<'_>) -> Result<HttpResponse, ToolError> {
        info!("HTTP request tool called");

        let method: HttpMethod = params.method.parse()?;
        let mut request = match method {
            HttpMethod::Get => self.client.get(params.url),
            HttpMethod::Post => self.client.post(params.url),
        };

        for (name, value) in params.headers.into_iter().flatten() {
            let value = value
                .as_str()
                .ok_or_else(|| ToolError::execution(format!("Header '{name}' must be a string")))?;
            request = request.header(name.as_str(), value);
        }

        if let Some(body) = params.body {
            if method != HttpMethod::Post {
                return Err(ToolError::execution("A request body is only allowed with POST"));
            }
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.request_error(e))?;
        let status = response.status();
        if !status.is_success() {
            warn!("Upstream returned {}", status);
            return Err(ToolError::execution(format!(
                "HTTP {} from {}",
                status,
                response.url()
            )));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));
        let url = response.url().to_string();
        let text = response.text().await.map_err(|e| self.request_error(e))?;

        // A body that claims to be JSON but is not falls back to text.
        let data = if is_json {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        } else {
            Value::String(text)
        };

        Ok(HttpResponse {
            status_code: status.as_u16(),
            url,
            data,
        })
    }

    /// Build the registry entry for this tool.
    pub fn spec(self) -> ToolSpec {
        let timeout = self.timeout;
        ToolSpec::new(Self::NAME, Self::DESCRIPTION, self)
            .with_param(ParamSpec::required("url", ParamKind::String).describe("The URL to send the request to"))
            .with_param(
                ParamSpec::optional("method", ParamKind::String)
                    .with_default("GET")
                    .describe("HTTP method (GET or POST), defaults to GET"),
            )
            .with_param(ParamSpec::optional("headers", ParamKind::Object).describe("Optional HTTP headers"))
            .with_param(ParamSpec::optional("body", ParamKind::Object).describe("Optional JSON body (POST only)"))
            .with_timeout(timeout)
    }

    fn request_error(&self, e: reqwest::Error) -> ToolError {
        if e.is_timeout() {
            ToolError::Timeout(self.timeout)
        } else if e.is_builder() {
            ToolError::execution(format!("Invalid request: {e}"))
        } else {
            ToolError::internal(format!("Request failed: {e}"))
        }
    }
}

#[async_trait]
impl ToolHandler for HttpRequestTool {
    async fn call(&self, args: BoundArguments) -> Result<Value, ToolError> {
        let params = HttpRequestParams {
            url: args.str("url")?,
            method: args.str("method")?,
            headers: args.opt_object("headers")?,
            body: args.opt_object("body")?,
        };
        let response = self.execute(params).await?;
        serde_json::to_value(response).map_err(|e| ToolError::internal(e.to_string()))
    }
}
