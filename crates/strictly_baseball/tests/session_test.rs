//! Tests for the session state machine.

use strictly_baseball::{
    Classification, GameError, GameStatus, Guess, HintPosition, MAX_ATTEMPTS, Secret, Session,
    SessionId, ValidationError,
};

fn session(secret: &str) -> Session {
    Session::new(SessionId::new("s-1"), Secret::parse(secret).expect("valid secret"))
}

/// Ten distinct guesses that never match secret 1234.
const MISSES: [&str; MAX_ATTEMPTS] = [
    "5678", "5679", "5689", "5789", "6789", "1567", "2567", "3567", "4567", "1243",
];

#[test]
fn test_two_strikes_two_balls() {
    let mut s = session("1234");
    let outcome = s.submit_guess("1243").expect("valid guess");

    assert_eq!(outcome.attempt().score().strikes(), 2);
    assert_eq!(outcome.attempt().score().balls(), 2);
    assert_eq!(outcome.attempt().index(), 1);
    assert_eq!(outcome.state().status(), &GameStatus::InProgress);
}

#[test]
fn test_exact_guess_wins() {
    let mut s = session("1234");
    let outcome = s.submit_guess("1234").expect("valid guess");

    assert_eq!(outcome.attempt().score().strikes(), 4);
    assert_eq!(outcome.attempt().score().balls(), 0);
    assert_eq!(s.status(), GameStatus::Won);
    assert_eq!(s.attempt_count(), 1);
    assert_eq!(outcome.state().secret().map(|d| d.to_string()), Some("1234".into()));
}

#[test]
fn test_out_classification() {
    let mut s = session("1234");
    let outcome = s.submit_guess("5678").expect("valid guess");

    assert_eq!(outcome.attempt().classification(), Classification::Out);
    assert_eq!(outcome.attempt().summary(), "OUT");
}

#[test]
fn test_ten_misses_lose() {
    let mut s = session("1234");
    for (i, guess) in MISSES.iter().enumerate() {
        assert_eq!(s.status(), GameStatus::InProgress, "lost early at {}", i);
        s.submit_guess(guess).expect("valid guess");
    }

    assert_eq!(s.status(), GameStatus::Lost);
    assert_eq!(s.remaining_attempts(), 0);
    assert_eq!(
        s.submit_guess("9876"),
        Err(GameError::GameAlreadyOver(GameStatus::Lost))
    );
    assert_eq!(s.attempt_count(), MAX_ATTEMPTS);
}

#[test]
fn test_lost_session_is_locked() {
    let mut s = session("1234");
    for guess in MISSES {
        s.submit_guess(guess).expect("valid guess");
    }
    let before = s.view();

    assert_eq!(
        s.submit_guess("9876"),
        Err(GameError::GameAlreadyOver(GameStatus::Lost))
    );
    assert_eq!(
        s.request_hint(1),
        Err(GameError::GameAlreadyOver(GameStatus::Lost))
    );

    let after = s.view();
    assert_eq!(after, before);
    assert_eq!(after.attempts().len(), MAX_ATTEMPTS);
    assert_eq!(after.hint_count(), &0);
    assert_eq!(after.secret().map(|d| d.to_string()), Some("1234".into()));
}

#[test]
fn test_win_on_last_attempt() {
    let mut s = session("1234");
    for guess in &MISSES[..MAX_ATTEMPTS - 1] {
        s.submit_guess(guess).expect("valid guess");
    }
    s.submit_guess("1234").expect("valid guess");
    assert_eq!(s.status(), GameStatus::Won);
}

#[test]
fn test_hint_then_budget_exhausted() {
    let mut s = session("5721");
    let outcome = s.request_hint(3).expect("first hint");
    assert_eq!(outcome.digit(), 2);
    assert_eq!(outcome.position(), HintPosition::Third);
    assert_eq!(*outcome.hints_used(), 1);

    for position in [1, 2, 3, 4, 0, 17] {
        assert_eq!(s.request_hint(position), Err(GameError::HintBudgetExceeded));
    }
    assert_eq!(s.hint_count(), 1);
}

#[test]
fn test_hint_rejects_bad_position_without_spending_budget() {
    let mut s = session("5721");
    assert_eq!(
        s.request_hint(5),
        Err(GameError::Validation(ValidationError::HintPositionOutOfRange(5)))
    );
    assert_eq!(s.hint_count(), 0);
    assert_eq!(s.request_hint(1).expect("hint").digit(), 5);
}

#[test]
fn test_terminal_lock_keeps_history() {
    let mut s = session("1234");
    s.submit_guess("5678").expect("valid guess");
    s.submit_guess("1234").expect("valid guess");
    let before = s.view();

    assert_eq!(
        s.submit_guess("5678"),
        Err(GameError::GameAlreadyOver(GameStatus::Won))
    );
    assert_eq!(
        s.request_hint(1),
        Err(GameError::GameAlreadyOver(GameStatus::Won))
    );
    assert_eq!(s.view(), before);
    assert_eq!(before.attempts().len(), 2);
}

#[test]
fn test_secret_hidden_while_in_progress() {
    let mut s = session("1234");
    s.submit_guess("5678").expect("valid guess");
    s.request_hint(2).expect("hint");
    let view = s.view();

    assert!(view.secret().is_none());
    let json = serde_json::to_value(&view).expect("serializable");
    assert!(json["secret"].is_null());
}

#[test]
fn test_invalid_guesses_rejected() {
    let mut s = session("1234");
    for bad in ["123", "12345", "12a4", "0123", "1123", " 1243\t", "1243\n"] {
        assert!(
            matches!(s.submit_guess(bad), Err(GameError::Validation(_))),
            "{} should be rejected",
            bad
        );
    }
    assert_eq!(s.attempt_count(), 0);
}

#[test]
fn test_replay_is_deterministic() {
    let secret = Secret::parse("3829").expect("valid secret");
    let guesses: Vec<Guess> = ["1234", "3892", "9823", "3829"]
        .iter()
        .map(|g| Guess::parse(g).expect("valid guess"))
        .collect();

    let a = Session::replay(SessionId::new("a"), secret, &guesses).expect("replay");
    let b = Session::replay(SessionId::new("b"), secret, &guesses).expect("replay");

    assert_eq!(a.attempts(), b.attempts());
    assert_eq!(a.status(), GameStatus::Won);
    assert_eq!(b.status(), GameStatus::Won);
}

#[test]
fn test_replay_stops_at_terminal() {
    let secret = Secret::parse("1234").expect("valid secret");
    let guesses: Vec<Guess> = ["1234", "5678"]
        .iter()
        .map(|g| Guess::parse(g).expect("valid guess"))
        .collect();

    let result = Session::replay(SessionId::new("r"), secret, &guesses);
    assert!(matches!(result, Err(GameError::GameAlreadyOver(GameStatus::Won))));
}

#[test]
fn test_attempt_json_shape() {
    let mut s = session("1234");
    let outcome = s.submit_guess("1243").expect("valid guess");
    let json = serde_json::to_value(outcome.attempt()).expect("serializable");

    assert_eq!(
        json,
        serde_json::json!({
            "index": 1,
            "guess": "1243",
            "strikes": 2,
            "balls": 2,
            "classification": "mixed",
            "summary": "2S 2B",
        })
    );
}
