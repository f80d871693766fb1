//! Game operations shared by the REST and MCP front ends.

use crate::error::ServiceError;
use crate::store::{SessionStore, SessionSummary};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strictly_baseball::{GuessOutcome, HintOutcome, SessionId, SessionView};
use tracing::{info, instrument, warn};

/// Response to starting a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StartedGame {
    /// Id to pass on every later call.
    session_id: SessionId,
    /// Initial state of the new session.
    state: SessionView,
}

/// Front door for every game operation.
///
/// Cheap to clone; clones share the same [`SessionStore`].
#[derive(Debug, Clone, Default)]
pub struct GameService {
    store: SessionStore,
}

impl GameService {
    /// Wraps an existing store.
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Starts a new game with a fresh secret.
    #[instrument(skip(self))]
    pub fn start_game(&self) -> Result<StartedGame, ServiceError> {
        let session_id = self.store.create();
        let state = self.store.with_session(session_id.as_str(), |s| s.view())?;
        info!(session_id = %session_id, "Game started");
        Ok(StartedGame { session_id, state })
    }

    /// Scores a guess against the session's secret.
    #[instrument(skip(self, id, guess), fields(session_id = id))]
    pub fn submit_guess(&self, id: &str, guess: &str) -> Result<GuessOutcome, ServiceError> {
        let outcome = self
            .store
            .with_session(id, |s| s.submit_guess(guess))?
            .map_err(ServiceError::from)
            .inspect_err(|e| warn!(session_id = id, error = %e, "Guess rejected"))?;

        info!(
            session_id = id,
            attempt = outcome.attempt().index(),
            result = outcome.attempt().summary(),
            status = %outcome.state().status(),
            "Guess scored"
        );
        Ok(outcome)
    }

    /// Discloses one digit of the secret.
    #[instrument(skip(self, id), fields(session_id = id))]
    pub fn request_hint(&self, id: &str, position: i64) -> Result<HintOutcome, ServiceError> {
        let outcome = self
            .store
            .with_session(id, |s| s.request_hint(position))?
            .map_err(ServiceError::from)
            .inspect_err(|e| warn!(session_id = id, error = %e, "Hint rejected"))?;

        info!(session_id = id, position = %outcome.position(), "Hint disclosed");
        Ok(outcome)
    }

    /// Current state of a session.
    #[instrument(skip(self, id), fields(session_id = id))]
    pub fn get_state(&self, id: &str) -> Result<SessionView, ServiceError> {
        self.store.with_session(id, |s| s.view())
    }

    /// Ends a session early and forgets it.
    #[instrument(skip(self, id), fields(session_id = id))]
    pub fn discard(&self, id: &str) -> Result<(), ServiceError> {
        self.store.discard(id)
    }

    /// Summaries of all live sessions.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<SessionSummary> {
        self.store.list_sessions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::sync::Arc;
    use strictly_baseball::{FixedSecrets, GameStatus, Secret};

    fn service() -> GameService {
        let secret = Secret::parse("1234").unwrap();
        GameService::new(SessionStore::with_secret_source(Arc::new(
            FixedSecrets::new(secret),
        )))
    }

    #[test]
    fn test_start_game_returns_fresh_state() {
        let service = service();
        let started = service.start_game().unwrap();

        assert_eq!(started.state().status(), &GameStatus::InProgress);
        assert_eq!(started.state().id(), started.session_id());
        assert!(started.state().attempts().is_empty());
    }

    #[test]
    fn test_guess_flows_through_store() {
        let service = service();
        let id = service.start_game().unwrap().session_id().clone();

        let outcome = service.submit_guess(id.as_str(), "1243").unwrap();
        assert_eq!(outcome.attempt().summary(), "2S 2B");
        assert_eq!(
            service.get_state(id.as_str()).unwrap().attempt_count(),
            &1
        );
    }

    #[test]
    fn test_error_kinds() {
        let service = service();
        let id = service.start_game().unwrap().session_id().clone();

        let err = service.submit_guess(id.as_str(), "12").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        service.request_hint(id.as_str(), 1).unwrap();
        let err = service.request_hint(id.as_str(), 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HintBudgetExceeded);

        service.submit_guess(id.as_str(), "1234").unwrap();
        let err = service.submit_guess(id.as_str(), "5678").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GameOver);

        let err = service.get_state("missing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SessionNotFound);
    }

    #[test]
    fn test_discard_forgets_session() {
        let service = service();
        let id = service.start_game().unwrap().session_id().clone();
        service.discard(id.as_str()).unwrap();

        assert!(service.list().is_empty());
        assert_eq!(
            service.discard(id.as_str()).unwrap_err().kind(),
            ErrorKind::SessionNotFound
        );
    }
}
