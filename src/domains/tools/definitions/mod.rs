//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.
//!
//! The shipped tools are examples; replace them with your own.

pub mod calculator;
pub mod http_request;
pub mod text_analyzer;
pub mod weather;

pub use calculator::{Calculation, CalculatorTool, Operation};
pub use http_request::{HttpMethod, HttpRequestParams, HttpRequestTool, HttpResponse};
pub use text_analyzer::{TextAnalyzerTool, TextStats};
pub use weather::{WeatherReport, WeatherTool};

use crate::core::config::ToolsConfig;
use crate::core::Result;

use super::ToolRegistry;

/// Register every built-in tool.
///
/// This is the central place where tools are registered at startup.
/// When adding a new tool, add it here.
pub fn register_builtin_tools(registry: &ToolRegistry, config: &ToolsConfig) -> Result<()> {
    registry.register(WeatherTool::spec())?;
    registry.register(CalculatorTool::spec())?;
    registry.register(HttpRequestTool::new(config.http_timeout())?.spec())?;
    registry.register(TextAnalyzerTool::spec())?;
    Ok(())
}
