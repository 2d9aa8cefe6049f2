//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to perform
//! specific actions or computations.
//!
//! ## Architecture
//!
//! - `spec.rs` - Tool descriptors, parameter schemas and the handler trait
//! - `registry.rs` - Name-unique tool registry
//! - `binder.rs` - Validates raw JSON arguments against a tool's schema
//! - `dispatcher.rs` - Lookup, binding, execution, timeouts
//! - `envelope.rs` - Request and response shapes
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Implement `ToolHandler` and a `spec()` constructor
//! 3. Export in `definitions/mod.rs`
//! 4. Register it in `register_builtin_tools()`
//!
//! **No need to modify `server.rs` or the transports.**

mod binder;
pub mod definitions;
mod dispatcher;
mod envelope;
mod error;
mod registry;
mod spec;

pub use binder::{ArgumentBinder, UnknownParameterPolicy};
pub use definitions::register_builtin_tools;
pub use dispatcher::Dispatcher;
pub use envelope::{EnvelopeError, ResponseEnvelope, ToolInvocation};
pub use error::{ErrorKind, RegistryError, ToolError, ValidationError};
pub use registry::ToolRegistry;
pub use spec::{ArgValue, BoundArguments, ParamKind, ParamSpec, ToolHandler, ToolSpec, ToolSummary};
