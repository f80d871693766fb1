//! REST interface over the game service.

use crate::error::{ErrorKind, ServiceError};
use crate::service::GameService;
use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State, rejection::JsonRejection},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tracing::{debug, info, warn};

/// Body of `POST /api/game/{id}/guess`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRequest {
    /// Four-digit guess.
    pub guess: String,
}

/// Body of `POST /api/game/{id}/hint`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintRequest {
    /// One-based digit position, 1 through 4.
    pub position: i64,
}

/// JSON error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable category.
    pub error: ErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Failure of a REST handler.
#[derive(Debug, derive_more::Display)]
pub enum ApiError {
    /// The game service rejected the call.
    #[display("{}", _0)]
    Service(ServiceError),
    /// The request body was not the expected JSON.
    #[display("{}", _0)]
    Body(JsonRejection),
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Service(e) => Some(e),
            ApiError::Body(e) => Some(e),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::Body(err)
    }
}

impl ApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Service(e) => e.kind(),
            ApiError::Body(_) => ErrorKind::Validation,
        }
    }
}

/// HTTP status for an error category.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::GameOver | ErrorKind::HintBudgetExceeded => StatusCode::CONFLICT,
        ErrorKind::SessionNotFound => StatusCode::NOT_FOUND,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = status_for(kind);
        if status.is_server_error() {
            warn!(error = %self, "Request failed");
        } else {
            debug!(error = %self, %status, "Request rejected");
        }
        let body = ErrorBody {
            error: kind,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the REST router.
pub fn router(service: GameService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/games", get(list_games))
        .route("/api/game/start", post(start_game))
        .route("/api/game/{id}/guess", post(submit_guess))
        .route("/api/game/{id}/hint", post(request_hint))
        .route("/api/game/{id}/state", get(get_state))
        .route("/api/game/{id}", delete(discard_game))
        .layer(ServiceBuilder::new().map_request(log_request))
        .with_state(service)
}

fn log_request(req: Request<Body>) -> Request<Body> {
    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

async fn health() -> &'static str {
    "ok"
}

async fn list_games(State(service): State<GameService>) -> impl IntoResponse {
    Json(service.list())
}

async fn start_game(State(service): State<GameService>) -> Result<Response, ApiError> {
    let started = service.start_game()?;
    Ok((StatusCode::CREATED, Json(started)).into_response())
}

async fn submit_guess(
    State(service): State<GameService>,
    Path(id): Path<String>,
    body: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body?;
    let outcome = service.submit_guess(&id, &req.guess)?;
    Ok(Json(outcome).into_response())
}

async fn request_hint(
    State(service): State<GameService>,
    Path(id): Path<String>,
    body: Result<Json<HintRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body?;
    let outcome = service.request_hint(&id, req.position)?;
    Ok(Json(outcome).into_response())
}

async fn get_state(
    State(service): State<GameService>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let state = service.get_state(&id)?;
    Ok(Json(state).into_response())
}

async fn discard_game(
    State(service): State<GameService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.discard(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
