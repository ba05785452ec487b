//! Error type for malformed input to the guess-estimation core.
use std::fmt;

/// Describes why a [`crate::matching::Match`] or password could not be scored.
///
/// The core is total on well-formed input (see the crate-level docs); this
/// type only covers the input-violation failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    /// `i > j`, or either index falls outside the password.
    IndexOutOfBounds {
        /// The match's start index.
        i: usize,
        /// The match's end index.
        j: usize,
        /// The password length the match was checked against.
        password_len: usize,
    },
    /// `match.token` does not equal `password[i..=j]`.
    TokenMismatch {
        /// The token carried by the match.
        token: String,
        /// The slice of the password the match's indices select.
        expected: String,
    },
}

impl fmt::Display for GuessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { i, j, password_len } => write!(
                f,
                "match span {i}..={j} is invalid for a password of length {password_len}"
            ),
            Self::TokenMismatch { token, expected } => write!(
                f,
                "match token {token:?} does not match password slice {expected:?}"
            ),
        }
    }
}

impl std::error::Error for GuessError {}
