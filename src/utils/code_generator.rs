//! Random short code generation.
//!
//! Codes are drawn uniformly from `[A-Za-z0-9]`. Callers check each candidate
//! against the store and ask for another on collision; [`CodeGenerator`]
//! bounds that loop and widens the code once collisions start piling up.

use rand::{Rng, distr::Alphanumeric};

/// Length of a freshly generated short code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Generates a random alphanumeric code of `length` characters.
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Bounded retry policy for short code generation.
///
/// Attempts `0..widen_after` use `length` characters; every attempt past that
/// adds one more character. After `max_attempts` candidates the caller gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeGenerator {
    pub length: usize,
    pub max_attempts: usize,
    pub widen_after: usize,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
            max_attempts: 10,
            widen_after: 5,
        }
    }
}

impl CodeGenerator {
    /// Code length used for the zero-based `attempt`.
    pub fn length_for_attempt(&self, attempt: usize) -> usize {
        self.length + (attempt + 1).saturating_sub(self.widen_after)
    }

    /// Yields one candidate per allowed attempt.
    pub fn candidates(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.max_attempts).map(|attempt| generate_code(self.length_for_attempt(attempt)))
    }
}
