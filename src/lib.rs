//! Guess-estimation core for a zxcvbn-family password strength estimator.
//!
//! Given a password and a set of overlapping candidate matches — substrings
//! recognized as dictionary words, keyboard walks, repeats, sequences,
//! dates, or regex hits — this crate computes:
//!
//! 1. A per-match **guess count**: the expected number of attempts an
//!    informed attacker must make to enumerate that match's variants
//!    ([`scoring::most_guessable_match_sequence`] memoizes these onto each
//!    [`matching::Match`]).
//! 2. The **optimal non-overlapping cover** of the password by matches that
//!    minimizes total attacker work, including the combinatorial cost of
//!    trying sequences of different lengths and orderings.
//!
//! Producing the candidate matches themselves — dictionary lookup, l33t
//! substitution discovery, date parsing, spatial-walk detection — is out of
//! scope; this crate consumes matches from an external producer and an
//! adjacency-graph table, and returns a [`scoring::GuessCalculation`].
//!
//! ```
//! use guessing::matching::Match;
//! use guessing::scoring::most_guessable_match_sequence_with_reference_year;
//!
//! let result = most_guessable_match_sequence_with_reference_year(
//!     "correcthorsebatterystaple",
//!     &[] as &[Match],
//!     false,
//!     2024,
//! )
//! .unwrap();
//! assert!(result.guesses >= 1.0);
//! ```

#[macro_use]
extern crate lazy_static;

pub mod adjacency_graphs;
pub mod combinatorics;
pub mod error;
pub mod matching;
pub mod scoring;

pub use error::GuessError;
pub use matching::Match;
pub use scoring::{most_guessable_match_sequence, most_guessable_match_sequence_with_reference_year, GuessCalculation};

#[cfg(test)]
mod tests {
    use super::*;
    use matching::{DictionaryAttrs, Pattern};

    #[test]
    fn test_public_api_scores_a_password_with_no_matches() {
        let result = most_guessable_match_sequence("hunter2", &[], false).unwrap();
        assert!(result.guesses >= 1.0);
        assert_eq!(result.password, "hunter2");
    }

    #[test]
    fn test_public_api_rejects_a_malformed_match() {
        let bad = Match::new(5, 1, "xx".to_string(), Pattern::BruteForce);
        assert!(most_guessable_match_sequence("password", &[bad], false).is_err());
    }

    #[test]
    fn test_dictionary_match_is_scored_through_the_public_entry_point() {
        let attrs = DictionaryAttrs {
            rank: 3,
            ..Default::default()
        };
        let m = Match::new(0, 5, "zxcvbn".to_string(), Pattern::Dictionary(attrs));
        let result =
            most_guessable_match_sequence_with_reference_year("zxcvbn", &[m], true, 2024).unwrap();
        assert_eq!(result.guesses, 3.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trips_a_guess_calculation() {
        let result = most_guessable_match_sequence("abc123", &[], true).unwrap();
        let json = serde_json::to_string(&result).expect("serialize");
        let back: GuessCalculation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.guesses, result.guesses);
        assert_eq!(back.sequence.len(), result.sequence.len());
    }
}
