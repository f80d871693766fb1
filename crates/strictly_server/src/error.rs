//! Errors surfaced to transport layers.

use serde::{Deserialize, Serialize};
use strictly_baseball::{GameError, SessionId};

/// Error returned by [`GameService`](crate::GameService) operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ServiceError {
    /// Unknown or expired session id; the caller must start a new game.
    #[display("Session {} not found", _0)]
    SessionNotFound(SessionId),

    /// The game engine rejected the operation.
    #[display("{}", _0)]
    Game(GameError),
}

impl ServiceError {
    /// Stable machine-readable category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::SessionNotFound(_) => ErrorKind::SessionNotFound,
            ServiceError::Game(GameError::Validation(_)) => ErrorKind::Validation,
            ServiceError::Game(GameError::GameAlreadyOver(_)) => ErrorKind::GameOver,
            ServiceError::Game(GameError::HintBudgetExceeded) => ErrorKind::HintBudgetExceeded,
            ServiceError::Game(GameError::InvariantViolation(_)) => ErrorKind::Internal,
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Game(e) => Some(e),
            ServiceError::SessionNotFound(_) => None,
        }
    }
}

impl From<GameError> for ServiceError {
    fn from(err: GameError) -> Self {
        ServiceError::Game(err)
    }
}

/// Error categories exposed on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed guess or hint position.
    Validation,
    /// Guess or hint on a finished game.
    GameOver,
    /// Second hint requested.
    HintBudgetExceeded,
    /// Unknown or expired session.
    SessionNotFound,
    /// Engine bug (failed postcondition).
    Internal,
}
