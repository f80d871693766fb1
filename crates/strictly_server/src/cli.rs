//! Command-line interface for strictly_baseball.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Baseball - number baseball game server with REST and MCP interfaces
#[derive(Parser, Debug)]
#[command(name = "strictly_baseball")]
#[command(about = "Number baseball game server for humans and LLM agents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the REST game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long, default_value = "strictly_baseball.toml")]
        config: PathBuf,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Seconds of inactivity before a session is evicted (overrides config)
        #[arg(long)]
        session_ttl: Option<u64>,
    },

    /// Run the MCP game server (stdio mode)
    Mcp {
        /// Path to a TOML config file
        #[arg(short, long, default_value = "strictly_baseball.toml")]
        config: PathBuf,
    },
}
