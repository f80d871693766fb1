//! Read-only snapshots handed to callers outside the engine.

use crate::digits::Digits;
use crate::hint::{HintPosition, HintRecord};
use crate::session::{Attempt, GameStatus, MAX_ATTEMPTS, Session, SessionId};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Full state of a session as seen by a client.
///
/// `secret` is only populated once the session is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SessionView {
    /// Session identifier.
    id: SessionId,
    /// Current status.
    status: GameStatus,
    /// Attempts in submission order.
    attempts: Vec<Attempt>,
    /// Number of attempts made.
    attempt_count: usize,
    /// Attempts left before the game is lost.
    remaining_attempts: usize,
    /// Attempt cap for the game.
    max_attempts: usize,
    /// The disclosed hint, if any.
    hint: Option<HintRecord>,
    /// Hints used.
    hint_count: u8,
    /// Hints still available.
    hints_remaining: u8,
    /// Creation time.
    started_at: DateTime<Utc>,
    /// Time the session became terminal.
    finished_at: Option<DateTime<Utc>>,
    /// The answer, revealed after the game ends.
    secret: Option<Digits>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().clone(),
            status: session.status(),
            attempts: session.attempts().to_vec(),
            attempt_count: session.attempt_count(),
            remaining_attempts: session.remaining_attempts(),
            max_attempts: MAX_ATTEMPTS,
            hint: session.hint(),
            hint_count: session.hint_count(),
            hints_remaining: session.hints_remaining(),
            started_at: session.started_at(),
            finished_at: session.finished_at(),
            secret: session.revealed_secret().map(|s| *s.digits()),
        }
    }
}

/// Result of a guess: the new attempt plus the updated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GuessOutcome {
    /// The attempt just recorded.
    attempt: Attempt,
    /// Session state after the guess.
    state: SessionView,
}

impl GuessOutcome {
    pub(crate) fn new(attempt: Attempt, state: SessionView) -> Self {
        Self { attempt, state }
    }
}

/// Result of a hint request as structured data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct HintOutcome {
    /// Position and digit disclosed.
    #[serde(flatten)]
    hint: HintRecord,
    /// Hints used after this request.
    hints_used: u8,
    /// Hints left after this request.
    hints_remaining: u8,
    /// Session state after the hint.
    state: SessionView,
}

impl HintOutcome {
    pub(crate) fn new(
        hint: HintRecord,
        hints_used: u8,
        hints_remaining: u8,
        state: SessionView,
    ) -> Self {
        Self {
            hint,
            hints_used,
            hints_remaining,
            state,
        }
    }

    /// Shortcut for the disclosed position.
    pub fn position(&self) -> HintPosition {
        self.hint.position()
    }

    /// Shortcut for the disclosed digit.
    pub fn digit(&self) -> u8 {
        self.hint.digit()
    }
}
