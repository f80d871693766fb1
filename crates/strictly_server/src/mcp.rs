//! MCP tool server exposing the game to agents.

use crate::error::{ErrorKind, ServiceError};
use crate::service::GameService;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Request naming a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SessionRequest {
    /// Session ID returned by `start_game`.
    pub session_id: String,
}

/// Request for scoring a guess.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SubmitGuessRequest {
    /// Session ID.
    pub session_id: String,
    /// Four distinct digits, first digit not zero (e.g. "1234").
    pub guess: String,
}

/// Request for a hint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RequestHintRequest {
    /// Session ID.
    pub session_id: String,
    /// Digit position to reveal, 1 (leftmost) through 4.
    pub position: i64,
}

fn to_mcp_error(err: ServiceError) -> McpError {
    let kind = err.kind();
    let data = Some(serde_json::json!({ "kind": kind }));
    match kind {
        ErrorKind::Internal => McpError::internal_error(err.to_string(), data),
        _ => McpError::invalid_params(err.to_string(), data),
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Main MCP handler.
pub struct GameServer {
    service: GameService,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GameServer {
    /// Creates a game server sharing an existing service.
    #[instrument(skip(service))]
    pub fn with_service(service: GameService) -> Self {
        info!("Creating game server with shared service");
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    /// Creates a game server with its own store.
    pub fn new() -> Self {
        Self::with_service(GameService::default())
    }

    /// Starts a new game.
    #[instrument(skip(self))]
    #[tool(
        description = "Start a new number baseball game. Returns a session_id and the initial state. The secret is four distinct digits with no leading zero; you have 10 guesses and 1 hint."
    )]
    pub async fn start_game(&self) -> Result<CallToolResult, McpError> {
        let started = self.service.start_game().map_err(to_mcp_error)?;
        info!(session_id = %started.session_id(), "Game started over MCP");
        json_result(&started)
    }

    /// Scores a guess.
    #[instrument(skip(self, req), fields(session_id = %req.session_id))]
    #[tool(
        description = "Submit a four-digit guess. Strikes are right digits in the right place, balls are right digits in the wrong place."
    )]
    pub async fn submit_guess(
        &self,
        Parameters(req): Parameters<SubmitGuessRequest>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self
            .service
            .submit_guess(&req.session_id, &req.guess)
            .map_err(to_mcp_error)?;
        json_result(&outcome)
    }

    /// Reveals one digit of the secret.
    #[instrument(skip(self, req), fields(session_id = %req.session_id, position = req.position))]
    #[tool(description = "Reveal the secret digit at a position (1-4). Only one hint per game.")]
    pub async fn request_hint(
        &self,
        Parameters(req): Parameters<RequestHintRequest>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self
            .service
            .request_hint(&req.session_id, req.position)
            .map_err(to_mcp_error)?;
        json_result(&outcome)
    }

    /// Current state of a session.
    #[instrument(skip(self, req), fields(session_id = %req.session_id))]
    #[tool(description = "Get the attempts, hint and status of a game.")]
    pub async fn get_state(
        &self,
        Parameters(req): Parameters<SessionRequest>,
    ) -> Result<CallToolResult, McpError> {
        let state = self
            .service
            .get_state(&req.session_id)
            .inspect_err(|e| warn!(error = %e, "State lookup failed"))
            .map_err(to_mcp_error)?;
        json_result(&state)
    }

    /// Lists live sessions.
    #[instrument(skip(self))]
    #[tool(description = "List all active games with their status and attempt count.")]
    pub async fn list_sessions(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.service.list())
    }
}

impl Default for GameServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for GameServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.instructions = Some(
            "Number baseball: guess a secret of four distinct digits in ten tries. \
             Call start_game, then submit_guess until the status is won or lost."
                .into(),
        );
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info
    }
}
