//! STDIO transport.
//!
//! rmcp owns the framing (newline-delimited JSON-RPC on stdin/stdout). Logs
//! must stay on stderr or they corrupt the stream.

use rmcp::ServiceExt;
use tracing::{debug, info};

use super::{TransportError, TransportResult};
use crate::core::McpServer;

pub struct StdioTransport;

impl StdioTransport {
    /// Serve one client session; returns when the client closes stdin.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let running = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;
        info!("Client session established on stdin/stdout");

        let quit = running
            .waiting()
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;
        debug!(reason = ?quit, "STDIO session ended");
        Ok(())
    }
}
