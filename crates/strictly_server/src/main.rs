//! Strictly Baseball - Unified CLI
//!
//! Number baseball game server with REST and MCP modes of operation.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rmcp::ServiceExt;
use std::path::PathBuf;
use strictly_server::{GameServer, GameService, ServerConfig, SessionStore, router};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,strictly_server=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            session_ttl,
        } => run_http_server(config, host, port, session_ttl).await,
        Command::Mcp { config } => run_mcp_server(config).await,
    }
}

/// Run the REST game server
#[instrument(skip_all, fields(config_path = %config.display()))]
async fn run_http_server(
    config: PathBuf,
    host: Option<String>,
    port: Option<u16>,
    session_ttl: Option<u64>,
) -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    let config = ServerConfig::load(Some(config.as_path()))?.with_overrides(host, port, session_ttl)?;
    info!(?config, "Starting Strictly Baseball REST server");

    let store = SessionStore::new();
    let sweeper = store.spawn_sweeper(config.sweep_interval(), config.session_ttl());
    let app = router(GameService::new(store));

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(
        "Server ready at http://{}:{}/",
        config.host(),
        config.port()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    info!("Server stopped");
    Ok(())
}

/// Run the MCP game server (stdio mode)
#[instrument(skip_all, fields(config_path = %config.display()))]
async fn run_mcp_server(config: PathBuf) -> Result<()> {
    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = ServerConfig::load(Some(config.as_path()))?;
    info!("Starting Strictly Baseball MCP server");

    let store = SessionStore::new();
    let sweeper = store.spawn_sweeper(config.sweep_interval(), config.session_ttl());
    let server = GameServer::with_service(GameService::new(store));

    info!("Server ready - connect via MCP protocol");
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;

    sweeper.abort();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
