//! The `Match` data model (§3): a recognized substring of a password,
//! tagged by which combinatorial pattern it represents.
//!
//! Producing matches — dictionary lookup, l33t substitution discovery, date
//! parsing, spatial-walk detection — is out of scope here; this module only
//! defines the shape a match producer's output must take to be scored.

use std::collections::HashMap;

use crate::adjacency_graphs::Graph;
use crate::error::GuessError;

/// A single named character class a `regex` match can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharClass {
    AlphaLower,
    AlphaUpper,
    Alpha,
    Alphanumeric,
    Digits,
    Symbols,
}

impl CharClass {
    /// The base cardinality used to raise `base ^ |token|` (§4.2).
    pub fn base(self) -> u64 {
        match self {
            CharClass::AlphaLower => 26,
            CharClass::AlphaUpper => 26,
            CharClass::Alpha => 52,
            CharClass::Alphanumeric => 62,
            CharClass::Digits => 10,
            CharClass::Symbols => 33,
        }
    }
}

/// Which regex a `regex` match fired on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegexPattern {
    CharClass(CharClass),
    /// A four-digit year close to the present, e.g. `2013`.
    RecentYear { year: i32 },
}

/// Pattern-specific attributes, one variant per §3's pattern tag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pattern {
    /// Synthesized by the optimizer; never produced externally.
    BruteForce,
    Dictionary(DictionaryAttrs),
    Spatial(SpatialAttrs),
    Repeat(RepeatAttrs),
    Sequence(SequenceAttrs),
    Regex(RegexAttrs),
    Date(DateAttrs),
}

impl Pattern {
    /// A short name for this pattern, for diagnostics only.
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::BruteForce => "bruteforce",
            Pattern::Dictionary(_) => "dictionary",
            Pattern::Spatial(_) => "spatial",
            Pattern::Repeat(_) => "repeat",
            Pattern::Sequence(_) => "sequence",
            Pattern::Regex(_) => "regex",
            Pattern::Date(_) => "date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "builder", derive(derive_builder::Builder))]
#[cfg_attr(feature = "builder", builder(setter(into), default))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DictionaryAttrs {
    /// 1-based popularity rank in the source word list.
    pub rank: u64,
    pub reversed: bool,
    pub l33t: bool,
    /// Substituted character -> original character, e.g. `'4' -> 'a'`.
    pub sub: Option<HashMap<char, char>>,
    /// Output slot: set by the estimator to `rank`, exposed for reporting.
    pub base_guesses: Option<u64>,
    /// Output slot: set by the estimator, exposed for reporting.
    pub uppercase_variations: Option<u64>,
    /// Output slot: set by the estimator, exposed for reporting.
    pub l33t_variations: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "builder", derive(derive_builder::Builder))]
#[cfg_attr(feature = "builder", builder(setter(into)))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpatialAttrs {
    pub graph: Graph,
    /// Count of direction changes while walking the graph; always >= 1.
    pub turns: usize,
    pub shifted_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "builder", derive(derive_builder::Builder))]
#[cfg_attr(feature = "builder", builder(setter(into)))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepeatAttrs {
    /// Guesses for the single repeating unit.
    pub base_guesses: u64,
    pub repeat_count: u32,
    /// The match(es) that explain the repeating unit itself, kept only for
    /// display. A tree, never a cycle.
    pub base_matches: Vec<Match>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "builder", derive(derive_builder::Builder))]
#[cfg_attr(feature = "builder", builder(setter(into)))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceAttrs {
    pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "builder", derive(derive_builder::Builder))]
#[cfg_attr(feature = "builder", builder(setter(into)))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegexAttrs {
    pub regex_pattern: RegexPattern,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "builder", derive(derive_builder::Builder))]
#[cfg_attr(feature = "builder", builder(setter(into, strip_option), default))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateAttrs {
    pub year: i32,
    pub separator: Option<char>,
}

/// A recognized substring of a password, plus the output slots the core
/// fills in while scoring it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    /// Inclusive start index, in characters.
    pub i: usize,
    /// Inclusive end index, in characters.
    pub j: usize,
    pub token: String,
    pub pattern: Pattern,
    /// Set once by `estimate_guesses`, then memoized.
    pub guesses: Option<f64>,
    pub guesses_log10: Option<f64>,
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::BruteForce
    }
}

impl Default for Match {
    fn default() -> Self {
        Match {
            i: 0,
            j: 0,
            token: String::new(),
            pattern: Pattern::BruteForce,
            guesses: None,
            guesses_log10: None,
        }
    }
}

impl Match {
    /// Validates §3's invariants: `0 <= i <= j < password.len()`, and the
    /// token equals the corresponding slice.
    pub fn validate(&self, password: &str) -> Result<(), GuessError> {
        let n = password.chars().count();
        if self.i > self.j || self.j >= n {
            return Err(GuessError::IndexOutOfBounds {
                i: self.i,
                j: self.j,
                password_len: n,
            });
        }
        let expected: String = password.chars().skip(self.i).take(self.j - self.i + 1).collect();
        if expected != self.token {
            return Err(GuessError::TokenMismatch {
                token: self.token.clone(),
                expected,
            });
        }
        Ok(())
    }

    pub fn bruteforce(i: usize, j: usize, token: String) -> Self {
        Match {
            i,
            j,
            token,
            pattern: Pattern::BruteForce,
            guesses: None,
            guesses_log10: None,
        }
    }

    pub fn new(i: usize, j: usize, token: String, pattern: Pattern) -> Self {
        Match {
            i,
            j,
            token,
            pattern,
            guesses: None,
            guesses_log10: None,
        }
    }
}
