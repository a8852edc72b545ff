// Standalone MCP server binary

use anyhow::{Context, Result};
use raindrop_mcp::server::McpServer;
use raindrop_mcp::tools::registry_from_lookup;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries protocol frames only
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "raindrop_mcp=info,raindrop_sdk=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = runtime.block_on(run());

    // A pending stdin read must not hold the process open
    runtime.shutdown_background();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let registry = registry_from_lookup(|key| std::env::var(key).ok())?;
    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry);
    tracing::info!("Raindrop MCP server running on stdio");

    tokio::select! {
        result = server.serve_stdio() => {
            result.context("MCP transport failed")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Raindrop MCP server stopped");
    Ok(())
}
