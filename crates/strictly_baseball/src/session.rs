//! The game session aggregate and its state machine.
//!
//! A [`Session`] starts `InProgress` and moves to `Won` or `Lost` exactly
//! once. Guesses and hints are only accepted while in progress; after
//! that the session is read-only.

use crate::contracts::{Contract, GuessContract, HintAvailable, HintContract, SessionOpen};
use crate::digits::Guess;
use crate::error::GameError;
use crate::hint::{HINT_BUDGET, HintPosition, HintRecord, disclose};
use crate::rules::{Classification, Score, evaluate};
use crate::secret::Secret;
use crate::view::{GuessOutcome, HintOutcome, SessionView};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Guesses allowed per session.
pub const MAX_ATTEMPTS: usize = 10;

/// Opaque session identifier.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for SessionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Lifecycle status of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    /// Accepting guesses and hints.
    InProgress,
    /// Some attempt scored four strikes.
    Won,
    /// Ten attempts without a win.
    Lost,
}

impl GameStatus {
    /// True for `Won` and `Lost`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// One evaluated guess. Never modified after it is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    index: usize,
    guess: Guess,
    #[serde(flatten)]
    score: Score,
    classification: Classification,
    summary: String,
}

impl Attempt {
    fn new(index: usize, guess: Guess, score: Score) -> Self {
        Self {
            index,
            guess,
            score,
            classification: Classification::from(score),
            summary: score.summary(),
        }
    }

    /// 1-based submission order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The guessed digits.
    pub fn guess(&self) -> &Guess {
        &self.guess
    }

    /// Strikes and balls.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Outcome category.
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Short result text such as `"2S 2B"`.
    pub fn summary(&self) -> &str {
        &self.summary
    }
}

/// A single game from start to terminal status.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) id: SessionId,
    pub(crate) secret: Secret,
    pub(crate) attempts: Vec<Attempt>,
    pub(crate) hint: Option<HintRecord>,
    pub(crate) status: GameStatus,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) finished_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Starts a new game around `secret`.
    #[instrument(skip(secret), fields(session_id = %id))]
    pub fn new(id: SessionId, secret: Secret) -> Self {
        info!("Starting new session");
        Self {
            id,
            secret,
            attempts: Vec::with_capacity(MAX_ATTEMPTS),
            hint: None,
            status: GameStatus::InProgress,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Rebuilds a session by submitting `guesses` in order.
    ///
    /// The resulting attempts and status depend only on the secret and the
    /// guess sequence.
    #[instrument(skip(secret, guesses), fields(session_id = %id, guesses = guesses.len()))]
    pub fn replay(id: SessionId, secret: Secret, guesses: &[Guess]) -> Result<Self, GameError> {
        let mut session = Self::new(id, secret);
        for guess in guesses {
            session.submit(*guess)?;
        }
        Ok(session)
    }

    /// Returns the session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True once won or lost.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Attempts in submission order.
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// Number of guesses evaluated so far.
    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }

    /// Guesses left before the game is lost.
    pub fn remaining_attempts(&self) -> usize {
        if self.is_over() {
            0
        } else {
            MAX_ATTEMPTS - self.attempts.len()
        }
    }

    /// The disclosed hint, if one was requested.
    pub fn hint(&self) -> Option<HintRecord> {
        self.hint
    }

    /// Hints used (0 or 1).
    pub fn hint_count(&self) -> u8 {
        u8::from(self.hint.is_some())
    }

    /// Hints still available.
    pub fn hints_remaining(&self) -> u8 {
        if self.is_over() {
            0
        } else {
            HINT_BUDGET - self.hint_count()
        }
    }

    /// When the session was created.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the session reached a terminal status.
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// The secret, but only once the game is over.
    pub fn revealed_secret(&self) -> Option<&Secret> {
        self.is_over().then_some(&self.secret)
    }

    /// Snapshot for callers outside the engine.
    pub fn view(&self) -> SessionView {
        SessionView::from(self)
    }

    /// Parses and submits a guess string.
    ///
    /// A terminal session rejects the call before the input is looked at.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn submit_guess(&mut self, input: &str) -> Result<GuessOutcome, GameError> {
        SessionOpen::check(self)?;
        let guess = Guess::parse(input)?;
        self.submit(guess)
    }

    /// Evaluates a validated guess and records the attempt.
    #[instrument(skip(self, guess), fields(session_id = %self.id, guess = %guess))]
    pub fn submit(&mut self, guess: Guess) -> Result<GuessOutcome, GameError> {
        GuessContract::pre(self, &guess)?;
        let before = cfg!(debug_assertions).then(|| self.clone());

        let score = evaluate(&self.secret, &guess);
        let attempt = Attempt::new(self.attempts.len() + 1, guess, score);
        self.attempts.push(attempt.clone());

        if score.is_win() {
            self.finish(GameStatus::Won);
        } else if self.attempts.len() >= MAX_ATTEMPTS {
            self.finish(GameStatus::Lost);
        }

        if let Some(before) = before {
            if let Err(e) = GuessContract::post(&before, self) {
                *self = before;
                return Err(e);
            }
        }

        info!(
            attempt = attempt.index(),
            result = %attempt.summary(),
            status = %self.status,
            "Guess evaluated"
        );
        Ok(GuessOutcome::new(attempt, self.view()))
    }

    /// Requests the hint for a 1-based position number.
    ///
    /// Gating order: terminal status, then the budget, then the position.
    /// A second request fails with `HintBudgetExceeded` whatever the
    /// position argument.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn request_hint(&mut self, position: i64) -> Result<HintOutcome, GameError> {
        SessionOpen::check(self)?;
        HintAvailable::check(self)?;
        let position = HintPosition::from_number(position)?;
        self.reveal(position)
    }

    /// Discloses the secret digit at `position`, spending the hint.
    #[instrument(skip(self, position), fields(session_id = %self.id, position = position.number()))]
    pub fn reveal(&mut self, position: HintPosition) -> Result<HintOutcome, GameError> {
        HintContract::pre(self, &position)?;
        let before = cfg!(debug_assertions).then(|| self.clone());

        let record = disclose(&self.secret, position);
        self.hint = Some(record);

        if let Some(before) = before {
            if let Err(e) = HintContract::post(&before, self) {
                *self = before;
                return Err(e);
            }
        }

        info!(position = position.number(), "Hint disclosed");
        Ok(HintOutcome::new(
            record,
            self.hint_count(),
            self.hints_remaining(),
            self.view(),
        ))
    }

    fn finish(&mut self, status: GameStatus) {
        debug!(%status, attempts = self.attempts.len(), "Session reached terminal status");
        self.status = status;
        self.finished_at = Some(Utc::now());
    }
}
