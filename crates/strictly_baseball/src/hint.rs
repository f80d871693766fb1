//! Single-digit hint disclosure.

use crate::error::ValidationError;
use crate::secret::Secret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Hints available per session.
pub const HINT_BUDGET: u8 = 1;

/// A position in the secret, numbered 1-4 from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum HintPosition {
    /// Leftmost digit (position 1).
    First,
    /// Position 2.
    Second,
    /// Position 3.
    Third,
    /// Rightmost digit (position 4).
    Fourth,
}

impl HintPosition {
    /// All four positions, left to right.
    pub const ALL: [HintPosition; 4] = [
        HintPosition::First,
        HintPosition::Second,
        HintPosition::Third,
        HintPosition::Fourth,
    ];

    /// Converts a 1-based position number.
    pub fn from_number(number: i64) -> Result<Self, ValidationError> {
        match number {
            1 => Ok(HintPosition::First),
            2 => Ok(HintPosition::Second),
            3 => Ok(HintPosition::Third),
            4 => Ok(HintPosition::Fourth),
            other => Err(ValidationError::HintPositionOutOfRange(other)),
        }
    }

    /// The 1-based position number.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// The 0-based index into the secret.
    pub fn index(self) -> usize {
        match self {
            HintPosition::First => 0,
            HintPosition::Second => 1,
            HintPosition::Third => 2,
            HintPosition::Fourth => 3,
        }
    }
}

impl std::fmt::Display for HintPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "position {}", self.number())
    }
}

impl TryFrom<i64> for HintPosition {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_number(value)
    }
}

impl From<HintPosition> for u8 {
    fn from(position: HintPosition) -> Self {
        position.number()
    }
}

/// A disclosed digit. At most one exists per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HintRecord {
    position: HintPosition,
    digit: u8,
}

impl HintRecord {
    /// The position that was requested.
    pub fn position(&self) -> HintPosition {
        self.position
    }

    /// The secret digit at that position.
    pub fn digit(&self) -> u8 {
        self.digit
    }
}

/// Reads the secret digit at `position`.
///
/// This is the disclosure itself; budget and status gating live on the
/// session.
#[instrument(level = "debug", skip(secret))]
pub fn disclose(secret: &Secret, position: HintPosition) -> HintRecord {
    HintRecord {
        position,
        digit: secret.digits().as_array()[position.index()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disclose_third_digit() {
        let secret = Secret::parse("5721").unwrap();
        let hint = disclose(&secret, HintPosition::Third);
        assert_eq!(hint.digit(), 2);
        assert_eq!(hint.position().number(), 3);
    }

    #[test]
    fn test_position_bounds() {
        assert!(HintPosition::from_number(0).is_err());
        assert!(HintPosition::from_number(5).is_err());
        assert_eq!(
            HintPosition::from_number(-1),
            Err(ValidationError::HintPositionOutOfRange(-1))
        );
        for (i, pos) in HintPosition::ALL.iter().enumerate() {
            assert_eq!(HintPosition::from_number(i as i64 + 1), Ok(*pos));
            assert_eq!(pos.index(), i);
        }
    }

    #[test]
    fn test_position_serializes_as_number() {
        let hint = disclose(&Secret::parse("5721").unwrap(), HintPosition::Second);
        let json = serde_json::to_value(hint).unwrap();
        assert_eq!(json, serde_json::json!({ "position": 2, "digit": 7 }));
    }
}
