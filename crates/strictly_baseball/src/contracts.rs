//! Contract-based validation for session transitions.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P} action {Q}`. Preconditions are always checked. Postconditions run
//! in debug builds after every transition, and a failure rolls the session
//! back to its prior state.

use crate::digits::Guess;
use crate::error::GameError;
use crate::hint::{HINT_BUDGET, HintPosition};
use crate::session::{GameStatus, MAX_ATTEMPTS, Session};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the session has not reached a terminal status.
pub struct SessionOpen;

impl SessionOpen {
    /// Rejects terminal sessions with `GameAlreadyOver`.
    #[instrument(level = "debug", skip(session), fields(session_id = %session.id()))]
    pub fn check(session: &Session) -> Result<(), GameError> {
        if session.is_over() {
            warn!(status = %session.status(), "Rejected: session is terminal");
            Err(GameError::GameAlreadyOver(session.status()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: fewer than [`MAX_ATTEMPTS`] attempts recorded.
pub struct AttemptsRemaining;

impl AttemptsRemaining {
    /// Guards the attempt cap independently of the status field.
    pub fn check(session: &Session) -> Result<(), GameError> {
        if session.attempt_count() >= MAX_ATTEMPTS {
            Err(GameError::GameAlreadyOver(GameStatus::Lost))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the hint budget is not spent.
pub struct HintAvailable;

impl HintAvailable {
    /// Rejects a second hint with `HintBudgetExceeded`.
    #[instrument(level = "debug", skip(session), fields(session_id = %session.id()))]
    pub fn check(session: &Session) -> Result<(), GameError> {
        if session.hint_count() >= HINT_BUDGET {
            warn!("Rejected: hint budget exhausted");
            Err(GameError::HintBudgetExceeded)
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Invariants
// ─────────────────────────────────────────────────────────────

/// A property every session satisfies between transitions.
pub trait Invariant {
    /// Human-readable statement of the property.
    const DESCRIPTION: &'static str;

    /// Returns true when the property holds.
    fn holds(session: &Session) -> bool;
}

/// At most ten attempts.
pub struct AttemptCap;

impl Invariant for AttemptCap {
    const DESCRIPTION: &'static str = "attempt count exceeds the cap";

    fn holds(session: &Session) -> bool {
        session.attempts.len() <= MAX_ATTEMPTS
    }
}

/// Attempt indices are 1, 2, 3, ... in order.
pub struct AttemptOrder;

impl Invariant for AttemptOrder {
    const DESCRIPTION: &'static str = "attempt indices are not sequential";

    fn holds(session: &Session) -> bool {
        session
            .attempts
            .iter()
            .enumerate()
            .all(|(i, a)| a.index() == i + 1)
    }
}

/// Status is `Won` iff some attempt scored four strikes, and only the
/// last attempt can be the winning one.
pub struct WonIffFourStrikes;

impl Invariant for WonIffFourStrikes {
    const DESCRIPTION: &'static str = "won status disagrees with attempt history";

    fn holds(session: &Session) -> bool {
        let wins = session
            .attempts
            .iter()
            .filter(|a| a.score().is_win())
            .count();
        let last_is_win = session.attempts.last().is_some_and(|a| a.score().is_win());
        match session.status {
            GameStatus::Won => wins == 1 && last_is_win,
            _ => wins == 0,
        }
    }
}

/// Status is `Lost` iff ten attempts were made without a win.
pub struct LostIffExhausted;

impl Invariant for LostIffExhausted {
    const DESCRIPTION: &'static str = "lost status disagrees with attempt count";

    fn holds(session: &Session) -> bool {
        let exhausted = session.attempts.len() == MAX_ATTEMPTS
            && !session.attempts.iter().any(|a| a.score().is_win());
        (session.status == GameStatus::Lost) == exhausted
    }
}

/// The disclosed hint matches the secret.
pub struct HintMatchesSecret;

impl Invariant for HintMatchesSecret {
    const DESCRIPTION: &'static str = "hint digit differs from the secret";

    fn holds(session: &Session) -> bool {
        session.hint.is_none_or(|h| {
            session.secret.digits().get(h.position().index()) == Some(h.digit())
        })
    }
}

/// Terminal sessions carry a finish time, open ones do not.
pub struct FinishTimestamp;

impl Invariant for FinishTimestamp {
    const DESCRIPTION: &'static str = "finish time disagrees with status";

    fn holds(session: &Session) -> bool {
        session.status.is_terminal() == session.finished_at.is_some()
    }
}

/// Collects the descriptions of every violated session invariant.
#[instrument(level = "debug", skip(session), fields(session_id = %session.id()))]
pub fn violations(session: &Session) -> Vec<&'static str> {
    fn check<I: Invariant>(session: &Session, out: &mut Vec<&'static str>) {
        if !I::holds(session) {
            warn!(invariant = I::DESCRIPTION, "Session invariant violated");
            out.push(I::DESCRIPTION);
        }
    }

    let mut out = Vec::new();
    check::<AttemptCap>(session, &mut out);
    check::<AttemptOrder>(session, &mut out);
    check::<WonIffFourStrikes>(session, &mut out);
    check::<LostIffExhausted>(session, &mut out);
    check::<HintMatchesSecret>(session, &mut out);
    check::<FinishTimestamp>(session, &mut out);
    out
}

fn invariants_hold(after: &Session) -> Result<(), GameError> {
    let found = violations(after);
    if found.is_empty() {
        Ok(())
    } else {
        Err(GameError::InvariantViolation(format!(
            "Postcondition failed: {}",
            found.join("; ")
        )))
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition Contracts
// ─────────────────────────────────────────────────────────────

/// Contract for guess submission.
///
/// Preconditions:
/// - Session is in progress
/// - Attempt cap not reached
///
/// Postconditions:
/// - Exactly one attempt appended, earlier attempts untouched
/// - Hint unchanged
/// - All session invariants hold
pub struct GuessContract;

impl Contract<Session, Guess> for GuessContract {
    fn pre(session: &Session, _guess: &Guess) -> Result<(), GameError> {
        SessionOpen::check(session)?;
        AttemptsRemaining::check(session)
    }

    fn post(before: &Session, after: &Session) -> Result<(), GameError> {
        let appended = after.attempts.len() == before.attempts.len() + 1
            && after.attempts.starts_with(&before.attempts);
        if !appended {
            return Err(GameError::InvariantViolation(
                "Postcondition failed: attempt history is not append-only".to_string(),
            ));
        }
        if after.hint != before.hint {
            return Err(GameError::InvariantViolation(
                "Postcondition failed: guess changed the hint record".to_string(),
            ));
        }
        invariants_hold(after)
    }
}

/// Contract for hint disclosure.
///
/// Preconditions:
/// - Session is in progress
/// - No hint used yet
///
/// Postconditions:
/// - Attempts and status unchanged
/// - All session invariants hold
pub struct HintContract;

impl Contract<Session, HintPosition> for HintContract {
    fn pre(session: &Session, _position: &HintPosition) -> Result<(), GameError> {
        SessionOpen::check(session)?;
        HintAvailable::check(session)
    }

    fn post(before: &Session, after: &Session) -> Result<(), GameError> {
        if after.attempts != before.attempts || after.status != before.status {
            return Err(GameError::InvariantViolation(
                "Postcondition failed: hint changed the attempt history".to_string(),
            ));
        }
        if after.hint.is_none() {
            return Err(GameError::InvariantViolation(
                "Postcondition failed: hint was not recorded".to_string(),
            ));
        }
        invariants_hold(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::Secret;
    use crate::session::SessionId;

    fn session(secret: &str) -> Session {
        Session::new(SessionId::new("contracts"), Secret::parse(secret).unwrap())
    }

    #[test]
    fn test_fresh_session_satisfies_invariants() {
        assert!(violations(&session("1234")).is_empty());
    }

    #[test]
    fn test_precondition_open_session() {
        let s = session("1234");
        let guess = Guess::parse("5678").unwrap();
        assert!(GuessContract::pre(&s, &guess).is_ok());
    }

    #[test]
    fn test_precondition_rejects_won_session() {
        let mut s = session("1234");
        s.submit_guess("1234").unwrap();
        let guess = Guess::parse("5678").unwrap();
        assert_eq!(
            GuessContract::pre(&s, &guess),
            Err(GameError::GameAlreadyOver(GameStatus::Won))
        );
        assert_eq!(
            HintContract::pre(&s, &HintPosition::First),
            Err(GameError::GameAlreadyOver(GameStatus::Won))
        );
    }

    #[test]
    fn test_postcondition_holds_after_guess() {
        let before = session("1234");
        let mut after = before.clone();
        after.submit_guess("1243").unwrap();
        assert!(GuessContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_rewritten_history() {
        let mut before = session("1234");
        before.submit_guess("5678").unwrap();
        let mut after = before.clone();
        after.submit_guess("1243").unwrap();

        // Rewrite the first attempt
        after.attempts.swap(0, 1);
        assert!(GuessContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_detects_corrupted_status() {
        let mut s = session("1234");
        s.submit_guess("5678").unwrap();
        s.status = GameStatus::Won;
        s.finished_at = Some(chrono::Utc::now());
        assert_eq!(violations(&s), vec![WonIffFourStrikes::DESCRIPTION]);
    }

    #[test]
    fn test_detects_forged_hint() {
        let mut s = session("5721");
        s.request_hint(1).unwrap();
        s.hint = Some(crate::hint::disclose(&Secret::parse("9721").unwrap(), HintPosition::First));
        assert_eq!(violations(&s), vec![HintMatchesSecret::DESCRIPTION]);
    }
}
