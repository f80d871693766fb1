//! Strictly Baseball server - sessions, REST API and MCP tools
//!
//! Hosts many concurrent number baseball games on top of the
//! [`strictly_baseball`] engine.
//!
//! # Architecture
//!
//! - **Store**: concurrent session registry with idle eviction ([`SessionStore`])
//! - **Service**: transport-neutral game operations ([`GameService`])
//! - **API**: axum REST routes ([`router`])
//! - **MCP**: rmcp tool server for agents ([`GameServer`])
//! - **Config**: TOML-backed settings ([`ServerConfig`])

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod config;
mod error;
mod mcp;
mod service;
mod store;

pub use api::{ApiError, ErrorBody, GuessRequest, HintRequest, router, status_for};
pub use config::{ConfigError, ServerConfig};
pub use error::{ErrorKind, ServiceError};
pub use mcp::{GameServer, RequestHintRequest, SessionRequest, SubmitGuessRequest};
pub use service::{GameService, StartedGame};
pub use store::{SessionStore, SessionSummary};
