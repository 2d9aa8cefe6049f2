//! Tool dispatcher - resolves, binds, executes and wraps.
//!
//! [`Dispatcher::invoke`] never fails and never panics because of a tool:
//! every outcome becomes a [`ResponseEnvelope`]. Handlers run as plain
//! futures on the caller's task, so a slow tool only ever occupies its own
//! invocation.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use super::binder::{ArgumentBinder, UnknownParameterPolicy};
use super::envelope::{ResponseEnvelope, ToolInvocation};
use super::error::ToolError;
use super::registry::ToolRegistry;
use super::spec::ToolSummary;

/// Dispatches tool calls against a shared registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    binder: ArgumentBinder,
    default_timeout: Option<Duration>,
}

impl Dispatcher {
    /// Create a dispatcher with strict argument checking and no default timeout.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            binder: ArgumentBinder::default(),
            default_timeout: None,
        }
    }

    /// Set the policy for undeclared argument keys.
    pub fn with_unknown_parameters(mut self, policy: UnknownParameterPolicy) -> Self {
        self.binder = ArgumentBinder::new(policy);
        self
    }

    /// Bound every handler that does not declare its own timeout.
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Discovery metadata for all registered tools.
    pub fn list_tools(&self) -> Vec<ToolSummary> {
        self.registry.list()
    }

    /// Invoke a tool by name.
    #[instrument(skip_all, fields(tool = %name))]
    pub async fn invoke(&self, name: &str, raw: &Map<String, Value>) -> ResponseEnvelope {
        let envelope: ResponseEnvelope = self.run(name, raw).await.into();

        match envelope.error() {
            None => info!("Tool call succeeded"),
            Some(error) => warn!(kind = %error.kind, "Tool call failed: {}", error.message),
        }
        envelope
    }

    /// Invoke from a request value.
    pub async fn invoke_request(&self, request: &ToolInvocation) -> ResponseEnvelope {
        self.invoke(&request.tool, &request.arguments).await
    }

    /// Invoke a tool, abandoning it if `cancelled` completes first.
    ///
    /// On cancellation the handler future is dropped and `None` is returned.
    pub async fn invoke_until<C>(
        &self,
        name: &str,
        raw: &Map<String, Value>,
        cancelled: C,
    ) -> Option<ResponseEnvelope>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            envelope = self.invoke(name, raw) => Some(envelope),
            _ = cancelled => {
                info!(tool = %name, "Tool call cancelled by caller");
                None
            }
        }
    }

    async fn run(&self, name: &str, raw: &Map<String, Value>) -> Result<Value, ToolError> {
        let spec = self
            .registry
            .lookup(name)
            .ok_or_else(|| ToolError::not_found(name))?;

        let args = self.binder.bind(&spec, raw)?;
        debug!("Bound {} argument(s)", args.len());

        // A panicking handler must not take the caller down with it.
        let call = AssertUnwindSafe(spec.handler().call(args)).catch_unwind();

        let outcome = match spec.timeout().or(self.default_timeout) {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| ToolError::Timeout(limit))?,
            None => call.await,
        };

        outcome.unwrap_or_else(|panic| Err(ToolError::internal(panic_message(panic.as_ref()))))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("tool panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("tool panicked: {s}")
    } else {
        "tool panicked".to_string()
    }
}
