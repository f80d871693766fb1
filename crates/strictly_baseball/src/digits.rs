//! Four-digit sequences shared by secrets and guesses.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of digits in a secret or a guess.
pub const DIGIT_COUNT: usize = 4;

/// Four distinct decimal digits with a non-zero leading digit.
///
/// The only ways to build one are [`Digits::parse`] and
/// [`Digits::from_array`], both of which reject sequences that break
/// either rule. Serializes as a plain string such as `"1234"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digits([u8; DIGIT_COUNT]);

impl Digits {
    /// Parses a 4-character digit string.
    ///
    /// The input is taken as-is, so surrounding whitespace counts toward
    /// the length. Checks run in order: length, non-digit characters,
    /// leading zero, duplicates.
    #[instrument(level = "debug")]
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let count = input.chars().count();
        if count != DIGIT_COUNT {
            return Err(ValidationError::WrongLength(count));
        }

        let mut digits = [0u8; DIGIT_COUNT];
        for (slot, c) in digits.iter_mut().zip(input.chars()) {
            let value = c.to_digit(10).ok_or(ValidationError::NonDigit(c))?;
            *slot = value as u8;
        }

        Self::from_array(digits)
    }

    /// Validates raw digit values.
    pub fn from_array(digits: [u8; DIGIT_COUNT]) -> Result<Self, ValidationError> {
        if let Some(&bad) = digits.iter().find(|&&d| d > 9) {
            return Err(ValidationError::DigitOutOfRange(bad));
        }
        if digits[0] == 0 {
            return Err(ValidationError::LeadingZero);
        }

        let mut seen = 0u16;
        for &d in &digits {
            let bit = 1u16 << d;
            if seen & bit != 0 {
                return Err(ValidationError::DuplicateDigit(d));
            }
            seen |= bit;
        }

        Ok(Self(digits))
    }

    /// Wraps digits already known to be valid.
    pub(crate) fn from_valid(digits: [u8; DIGIT_COUNT]) -> Self {
        debug_assert!(Self::from_array(digits).is_ok(), "invalid digits {digits:?}");
        Self(digits)
    }

    /// Returns the digit at a 0-based index, if in range.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Returns the digits as an array.
    pub fn as_array(&self) -> &[u8; DIGIT_COUNT] {
        &self.0
    }

    /// Iterates the digits in order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    /// Bit set of the digits present (bit `d` set for digit `d`).
    pub fn mask(&self) -> u16 {
        self.0.iter().fold(0u16, |acc, &d| acc | (1 << d))
    }
}

impl std::fmt::Display for Digits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for d in self.0 {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Digits {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Digits {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Digits> for String {
    fn from(digits: Digits) -> Self {
        digits.to_string()
    }
}

/// A player's guess: transient input evaluated against the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guess(Digits);

impl Guess {
    /// Parses and validates a guess string such as `"1243"`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Digits::parse(input).map(Self)
    }

    /// Returns the guessed digits.
    pub fn digits(&self) -> &Digits {
        &self.0
    }
}

impl From<Digits> for Guess {
    fn from(digits: Digits) -> Self {
        Self(digits)
    }
}

impl std::str::FromStr for Guess {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Guess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let digits = Digits::parse("1243").unwrap();
        assert_eq!(digits.as_array(), &[1, 2, 4, 3]);
        assert_eq!(digits.to_string(), "1243");
    }

    #[test]
    fn test_parse_counts_whitespace_toward_length() {
        assert_eq!(Digits::parse(" 1243\t"), Err(ValidationError::WrongLength(6)));
        assert_eq!(Digits::parse("123 "), Err(ValidationError::NonDigit(' ')));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(Digits::parse("123"), Err(ValidationError::WrongLength(3)));
        assert_eq!(Digits::parse("12345"), Err(ValidationError::WrongLength(5)));
        assert_eq!(Digits::parse(""), Err(ValidationError::WrongLength(0)));
    }

    #[test]
    fn test_parse_non_digit() {
        assert_eq!(Digits::parse("12a4"), Err(ValidationError::NonDigit('a')));
        assert_eq!(Digits::parse("1-34"), Err(ValidationError::NonDigit('-')));
    }

    #[test]
    fn test_parse_leading_zero() {
        assert_eq!(Digits::parse("0123"), Err(ValidationError::LeadingZero));
    }

    #[test]
    fn test_parse_duplicate() {
        assert_eq!(Digits::parse("1123"), Err(ValidationError::DuplicateDigit(1)));
        assert_eq!(Digits::parse("1232"), Err(ValidationError::DuplicateDigit(2)));
    }

    #[test]
    fn test_leading_zero_reported_before_duplicates() {
        assert_eq!(Digits::parse("0100"), Err(ValidationError::LeadingZero));
    }

    #[test]
    fn test_from_array_rejects_out_of_range() {
        assert_eq!(
            Digits::from_array([1, 2, 3, 12]),
            Err(ValidationError::DigitOutOfRange(12))
        );
    }

    #[test]
    fn test_mask_marks_each_digit() {
        let digits = Digits::parse("5721").unwrap();
        assert_eq!(digits.mask(), (1 << 5) | (1 << 7) | (1 << 2) | (1 << 1));
    }

    #[test]
    fn test_serde_as_string() {
        let digits = Digits::parse("1234").unwrap();
        let json = serde_json::to_string(&digits).unwrap();
        assert_eq!(json, "\"1234\"");
        assert!(serde_json::from_str::<Digits>("\"1124\"").is_err());
    }
}
