//! Strictly Baseball - number baseball game logic
//!
//! A player tries to find a hidden four-digit number in at most ten guesses.
//! Each guess is scored in strikes (right digit, right place) and balls
//! (right digit, wrong place), and one hint per game discloses a single
//! digit of the secret.
//!
//! # Architecture
//!
//! - **Digits**: validated four-digit sequences ([`Guess`], [`Secret`])
//! - **Rules**: strike/ball scoring ([`evaluate`])
//! - **Hint**: single-digit disclosure ([`disclose`])
//! - **Session**: the game state machine with contract-checked transitions
//!
//! # Example
//!
//! ```
//! use strictly_baseball::{GameStatus, Secret, Session, SessionId};
//!
//! let secret = Secret::parse("1234").unwrap();
//! let mut session = Session::new(SessionId::new("demo"), secret);
//!
//! let outcome = session.submit_guess("1243").unwrap();
//! assert_eq!(outcome.attempt().summary(), "2S 2B");
//!
//! session.submit_guess("1234").unwrap();
//! assert_eq!(session.status(), GameStatus::Won);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod contracts;
mod digits;
mod error;
mod hint;
mod rules;
mod secret;
mod session;
mod view;

pub use contracts::{
    AttemptCap, AttemptOrder, AttemptsRemaining, Contract, FinishTimestamp, GuessContract,
    HintAvailable, HintContract, HintMatchesSecret, Invariant, LostIffExhausted, SessionOpen,
    WonIffFourStrikes, violations,
};
pub use digits::{DIGIT_COUNT, Digits, Guess};
pub use error::{GameError, ValidationError};
pub use hint::{HINT_BUDGET, HintPosition, HintRecord, disclose};
pub use rules::{Classification, Score, evaluate};
pub use secret::{FixedSecrets, RandomSecrets, SECRET_SPACE, Secret, SecretSource};
pub use session::{Attempt, GameStatus, MAX_ATTEMPTS, Session, SessionId};
pub use view::{GuessOutcome, HintOutcome, SessionView};
