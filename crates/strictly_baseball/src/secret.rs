//! Secret generation.

use crate::digits::{DIGIT_COUNT, Digits};
use crate::error::ValidationError;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, instrument};

/// Size of the valid secret space: 9 leading digits, then 9 * 8 * 7.
pub const SECRET_SPACE: usize = 9 * 9 * 8 * 7;

/// The hidden number of a session.
///
/// `Debug` is redacted so a secret never ends up in a log line.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Secret(Digits);

impl Secret {
    /// Parses a secret from a digit string (fixtures and replays).
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Digits::parse(input).map(Self)
    }

    /// Draws a secret from the thread-local generator.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Draws a secret uniformly from all [`SECRET_SPACE`] candidates.
    ///
    /// The leading digit is picked from 1-9, then the remaining three
    /// positions are an ordered draw without replacement from the nine
    /// digits left.
    #[instrument(level = "trace", skip(rng))]
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let first = rng.random_range(1..=9u8);
        let mut pool: Vec<u8> = (0..=9).filter(|&d| d != first).collect();
        let (picked, _) = pool.partial_shuffle(rng, DIGIT_COUNT - 1);

        let mut digits = [first; DIGIT_COUNT];
        digits[1..].copy_from_slice(picked);
        Self(Digits::from_valid(digits))
    }

    /// Returns the secret digits.
    pub fn digits(&self) -> &Digits {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(****)")
    }
}

/// Supplies the secret for each new session.
pub trait SecretSource: Send + Sync + std::fmt::Debug {
    /// Returns the secret for the next session.
    fn next_secret(&self) -> Secret;
}

/// Uniformly random secrets.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSecrets;

impl SecretSource for RandomSecrets {
    fn next_secret(&self) -> Secret {
        Secret::generate()
    }
}

/// Cycles through a preset list of secrets.
#[derive(Debug)]
pub struct FixedSecrets {
    secrets: Vec<Secret>,
    next: AtomicUsize,
}

impl FixedSecrets {
    /// Always hands out `secret`.
    pub fn new(secret: Secret) -> Self {
        Self {
            secrets: vec![secret],
            next: AtomicUsize::new(0),
        }
    }

    /// Appends another secret to the rotation.
    pub fn then(mut self, secret: Secret) -> Self {
        self.secrets.push(secret);
        self
    }
}

impl SecretSource for FixedSecrets {
    fn next_secret(&self) -> Secret {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        debug!(slot = n % self.secrets.len(), "Handing out preset secret");
        self.secrets[n % self.secrets.len()]
    }
}
