//! Strike/ball scoring.

use crate::digits::{DIGIT_COUNT, Guess};
use crate::secret::Secret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Strikes and balls for one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    strikes: u8,
    balls: u8,
}

impl Score {
    /// Creates a score. `strikes + balls` never exceeds 4 for real guesses.
    pub fn new(strikes: u8, balls: u8) -> Self {
        debug_assert!(usize::from(strikes + balls) <= DIGIT_COUNT);
        Self { strikes, balls }
    }

    /// Digits matching in value and position.
    pub fn strikes(&self) -> u8 {
        self.strikes
    }

    /// Digits present in the secret at a different position.
    pub fn balls(&self) -> u8 {
        self.balls
    }

    /// Guessed digits absent from the secret.
    pub fn outs(&self) -> u8 {
        DIGIT_COUNT as u8 - self.strikes - self.balls
    }

    /// True when every digit is a strike.
    pub fn is_win(&self) -> bool {
        usize::from(self.strikes) == DIGIT_COUNT
    }

    /// Short form used in attempt logs: `"2S 1B"`, `"OUT"`, `"4S"`.
    pub fn summary(&self) -> String {
        match (self.strikes, self.balls) {
            (0, 0) => "OUT".to_string(),
            (s, 0) => format!("{}S", s),
            (0, b) => format!("{}B", b),
            (s, b) => format!("{}S {}B", s, b),
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Outcome category of a single guess.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Classification {
    /// Only strikes, fewer than four.
    StrikeOnly,
    /// Only balls.
    BallOnly,
    /// At least one strike and one ball.
    Mixed,
    /// Nothing matched.
    Out,
    /// Four strikes.
    Win,
}

impl From<Score> for Classification {
    fn from(score: Score) -> Self {
        match (score.strikes, score.balls) {
            _ if score.is_win() => Classification::Win,
            (0, 0) => Classification::Out,
            (_, 0) => Classification::StrikeOnly,
            (0, _) => Classification::BallOnly,
            _ => Classification::Mixed,
        }
    }
}

/// Scores `guess` against `secret`.
///
/// Both sides hold four distinct digits, so every shared digit is either a
/// strike or a ball and `balls = |shared digits| - strikes`.
#[instrument(level = "debug", skip(secret), fields(guess = %guess))]
pub fn evaluate(secret: &Secret, guess: &Guess) -> Score {
    let strikes = secret
        .digits()
        .iter()
        .zip(guess.digits().iter())
        .filter(|(s, g)| s == g)
        .count() as u8;
    let shared = (secret.digits().mask() & guess.digits().mask()).count_ones() as u8;
    Score::new(strikes, shared - strikes)
}
