//! MCP Server Entry Point
//!
//! Loads configuration, initializes logging, registers the built-in tools and
//! starts the server with the configured transport.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use mcp_skeleton_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    config.validate().context("invalid configuration")?;

    init_logging(&config.logging.level)?;

    info!("Starting {} v{}", config.server.name, config.server.version);

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config).context("failed to register built-in tools")?;

    info!(
        "Server initialized with tools: {}",
        server.dispatcher().registry().tool_names().join(", ")
    );

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG` directives take precedence over the configured level. Output
/// goes to stderr; stdout belongs to the STDIO transport.
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.to_lowercase()))
        .context("invalid log filter")?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
