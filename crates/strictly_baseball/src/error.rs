//! Rejections raised by the game engine.
//!
//! Every error here is side-effect free: when an operation returns one of
//! these, the session it was applied to is unchanged.

use crate::session::GameStatus;

/// Malformed caller input: a guess or a hint position.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ValidationError {
    /// The guess does not have exactly four characters.
    #[display("Guess must be exactly 4 digits (got {} characters)", _0)]
    WrongLength(usize),

    /// The guess contains a character that is not a decimal digit.
    #[display("Guess may only contain digits 0-9 (found {:?})", _0)]
    NonDigit(char),

    /// A raw digit value outside 0-9.
    #[display("Digit value {} is out of range 0-9", _0)]
    DigitOutOfRange(u8),

    /// The guess starts with zero.
    #[display("Guess may not start with 0")]
    LeadingZero,

    /// The same digit appears more than once.
    #[display("Digit {} appears more than once; all 4 digits must differ", _0)]
    DuplicateDigit(u8),

    /// Hint positions run from 1 to 4.
    #[display("Hint position must be between 1 and 4 (got {})", _0)]
    HintPositionOutOfRange(i64),
}

impl std::error::Error for ValidationError {}

/// Error returned by a session transition.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The input was malformed; the caller may correct it and retry.
    #[display("Invalid input: {}", _0)]
    Validation(ValidationError),

    /// The session already reached a terminal status.
    #[display("Game is already over ({})", _0)]
    GameAlreadyOver(GameStatus),

    /// The single hint for this session has been used.
    #[display("Hint budget exhausted: only one hint is allowed per game")]
    HintBudgetExceeded,

    /// A postcondition failed after a transition (debug builds only).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for GameError {
    fn from(err: ValidationError) -> Self {
        GameError::Validation(err)
    }
}
