//! MCP Skeleton Server Library
//!
//! A Model Context Protocol tool server built around a typed tool registry.
//! Tools declare their parameters once; the dispatcher validates incoming
//! JSON arguments against that declaration, runs the handler under a timeout
//! and always answers with a uniform response envelope.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the rmcp server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Registry, argument binding, dispatch and the built-in tools
//!
//! # Example
//!
//! ```rust,no_run
//! use mcp_skeleton_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = TransportService::new(config.transport.clone());
//!     let server = McpServer::new(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::tools::{Dispatcher, ResponseEnvelope, ToolInvocation, ToolRegistry, ToolSpec};
