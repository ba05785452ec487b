//! §4.2 per-pattern guess estimators and §4.3 the optimal non-overlapping
//! match cover search.
//!
//! Two collaborating pieces: `estimate_guesses` maps a single match to its
//! guess count (memoized onto the match), and
//! `most_guessable_match_sequence` runs the dynamic program that finds the
//! cheapest-to-enumerate cover of the whole password.

use std::cmp;
use std::collections::HashMap;

use crate::adjacency_graphs::{self, Graph};
use crate::combinatorics::{average_degree, factorial, n_choose_k};
use crate::error::GuessError;
use crate::matching::{Match, Pattern, RegexPattern};

#[doc(hidden)]
pub const MIN_YEAR_SPACE: f64 = 20.0;
#[doc(hidden)]
pub const BRUTEFORCE_CARDINALITY: f64 = 10.0;
#[doc(hidden)]
pub const MIN_GUESSES_BEFORE_GROWING_SEQUENCE: f64 = 10_000.0;
#[doc(hidden)]
pub const MIN_SUBMATCH_GUESSES_SINGLE_CHAR: f64 = 10.0;
#[doc(hidden)]
pub const MIN_SUBMATCH_GUESSES_MULTI_CHAR: f64 = 50.0;

/// The result of scoring a password against a set of candidate matches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuessCalculation {
    pub password: String,
    /// Estimated number of attempts an informed attacker must make.
    pub guesses: f64,
    /// Order of magnitude of `guesses`.
    pub guesses_log10: f64,
    /// The non-overlapping cover the guess count was computed from.
    pub sequence: Vec<Match>,
}

/// Working state of the dynamic program: for every prefix end `k`, and
/// every length `l` that is Pareto-optimal at `k` (see module docs on
/// `update`), the terminal match, the running guess product, and the total
/// attacker work.
#[derive(Debug, Clone)]
struct Optimal {
    m: Vec<HashMap<usize, Match>>,
    pi: Vec<HashMap<usize, f64>>,
    g: Vec<HashMap<usize, f64>>,
}

/// Scores `password` against `matches`, returning the minimum-work
/// non-overlapping cover. `reference_year` stands in for "the current
/// calendar year" in the date and recent-year estimators; callers wanting
/// wall-clock behavior should use [`most_guessable_match_sequence`], which
/// fills this in from the system clock.
pub fn most_guessable_match_sequence_with_reference_year(
    password: &str,
    matches: &[Match],
    exclude_additive: bool,
    reference_year: i32,
) -> Result<GuessCalculation, GuessError> {
    for m in matches {
        m.validate(password)?;
    }

    let chars: Vec<char> = password.chars().collect();
    let n = chars.len();

    if n == 0 {
        return Ok(GuessCalculation {
            password: password.to_string(),
            guesses: 1.0,
            guesses_log10: 0.0,
            sequence: Vec::new(),
        });
    }

    // partition matches into sublists according to ending index j; sort
    // each sublist by i for deterministic output.
    let mut matches_by_j: Vec<Vec<Match>> = (0..n).map(|_| Vec::new()).collect();
    for m in matches {
        matches_by_j[m.j].push(m.clone());
    }
    for lst in &mut matches_by_j {
        lst.sort_by_key(|m| m.i);
    }

    let mut optimal = Optimal {
        m: (0..n).map(|_| HashMap::new()).collect(),
        pi: (0..n).map(|_| HashMap::new()).collect(),
        g: (0..n).map(|_| HashMap::new()).collect(),
    };

    for k in 0..n {
        for m in &matches_by_j[k] {
            if m.i > 0 {
                let lengths: Vec<usize> = optimal.m[m.i - 1].keys().copied().collect();
                for l in lengths {
                    update(m.clone(), l + 1, n, reference_year, &mut optimal, exclude_additive);
                }
            } else {
                update(m.clone(), 1, n, reference_year, &mut optimal, exclude_additive);
            }
        }
        bruteforce_update(k, &chars, reference_year, &mut optimal, exclude_additive);
    }

    let sequence = unwind(n, &optimal);
    let l_star = sequence.len();
    let guesses = optimal.g[n - 1][&l_star];

    Ok(GuessCalculation {
        password: password.to_string(),
        guesses,
        guesses_log10: guesses.log10(),
        sequence,
    })
}

/// Scores `password` against `matches` using the current calendar year as
/// the reference year for date-like patterns. See §6.
pub fn most_guessable_match_sequence(
    password: &str,
    matches: &[Match],
    exclude_additive: bool,
) -> Result<GuessCalculation, GuessError> {
    most_guessable_match_sequence_with_reference_year(
        password,
        matches,
        exclude_additive,
        current_reference_year(),
    )
}

fn current_reference_year() -> i32 {
    time::OffsetDateTime::now_utc().year()
}

/// Considers whether a length-`l` sequence ending in `m` beats every
/// shorter-or-equal-length sequence already recorded for `m.j`, recording it
/// if so. Per §4.3's Open Question, all three tables are written together,
/// after the pruning decision, so `optimal.m` never disagrees with the kept
/// `g`/`pi`.
fn update(
    mut m: Match,
    l: usize,
    password_len: usize,
    reference_year: i32,
    optimal: &mut Optimal,
    exclude_additive: bool,
) {
    let k = m.j;
    let mut pi = estimate_guesses(&mut m, password_len, reference_year);
    if l > 1 {
        pi *= optimal.pi[m.i - 1][&(l - 1)];
    }
    let mut g = factorial(l) * pi;
    if !exclude_additive {
        g += MIN_GUESSES_BEFORE_GROWING_SEQUENCE.powi(l as i32 - 1);
    }

    let beaten_by_shorter_or_equal = optimal.g[k]
        .iter()
        .any(|(&competing_l, &competing_g)| competing_l <= l && competing_g <= g);
    if beaten_by_shorter_or_equal {
        return;
    }

    optimal.g[k].insert(l, g);
    optimal.pi[k].insert(l, pi);
    optimal.m[k].insert(l, m);
}

/// Evaluates brute-force matches ending at `k`: one spanning the whole
/// `[0, k]` prefix, and one extending every surviving non-bruteforce
/// sequence ending at each `i - 1`. Two adjacent bruteforce matches are
/// never considered, since a single longer one always dominates them.
fn bruteforce_update(
    k: usize,
    chars: &[char],
    reference_year: i32,
    optimal: &mut Optimal,
    exclude_additive: bool,
) {
    let whole_prefix = make_bruteforce_match(0, k, chars);
    update(whole_prefix, 1, chars.len(), reference_year, optimal, exclude_additive);

    for i in 1..=k {
        let candidate = make_bruteforce_match(i, k, chars);
        let predecessors: Vec<(usize, Match)> = optimal.m[i - 1]
            .iter()
            .map(|(&l, m)| (l, m.clone()))
            .collect();
        for (l, last_m) in predecessors {
            if matches!(last_m.pattern, Pattern::BruteForce) {
                continue;
            }
            update(
                candidate.clone(),
                l + 1,
                chars.len(),
                reference_year,
                optimal,
                exclude_additive,
            );
        }
    }
}

fn make_bruteforce_match(i: usize, j: usize, chars: &[char]) -> Match {
    let token: String = chars[i..=j].iter().collect();
    Match::bruteforce(i, j, token)
}

/// Walks `optimal.m` backwards from the end of the password, picking the
/// length that minimizes total attacker work at the last index.
fn unwind(n: usize, optimal: &Optimal) -> Vec<Match> {
    let mut k = n - 1;
    let mut l = optimal.g[k]
        .iter()
        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(cmp::Ordering::Equal))
        .map(|(&l, _)| l)
        .expect("every reachable prefix end has at least the bruteforce cover");

    let mut sequence = Vec::with_capacity(l);
    loop {
        let m = optimal.m[k][&l].clone();
        let i = m.i;
        sequence.push(m);
        if i == 0 {
            break;
        }
        k = i - 1;
        l -= 1;
    }
    sequence.reverse();
    sequence
}

/// Computes a match's guess count, memoizing the result (and the reporting
/// side-effects §9 describes) onto the match itself.
fn estimate_guesses(m: &mut Match, password_len: usize, reference_year: i32) -> f64 {
    if let Some(guesses) = m.guesses {
        if m.guesses_log10.is_none() {
            m.guesses_log10 = Some(guesses.log10());
        }
        return guesses;
    }

    let token_len = m.token.chars().count();
    let min_guesses = if token_len < password_len {
        if token_len == 1 {
            MIN_SUBMATCH_GUESSES_SINGLE_CHAR
        } else {
            MIN_SUBMATCH_GUESSES_MULTI_CHAR
        }
    } else {
        1.0
    };

    let raw = match &mut m.pattern {
        Pattern::BruteForce => bruteforce_guesses(token_len),
        Pattern::Dictionary(attrs) => {
            let uppercase_variations = uppercase_variations(&m.token);
            let l33t_variations = l33t_variations(&m.token, attrs.l33t, attrs.sub.as_ref());
            attrs.base_guesses = Some(attrs.rank);
            attrs.uppercase_variations = Some(uppercase_variations);
            attrs.l33t_variations = Some(l33t_variations);
            attrs.rank as f64
                * uppercase_variations as f64
                * l33t_variations as f64
                * if attrs.reversed { 2.0 } else { 1.0 }
        }
        Pattern::Spatial(attrs) => {
            spatial_guesses(&attrs.graph, token_len, attrs.turns, attrs.shifted_count)
        }
        Pattern::Repeat(attrs) => attrs.base_guesses as f64 * attrs.repeat_count as f64,
        Pattern::Sequence(attrs) => sequence_guesses(&m.token, attrs.ascending),
        Pattern::Regex(attrs) => regex_guesses(&attrs.regex_pattern, token_len, reference_year),
        Pattern::Date(attrs) => date_guesses(attrs.year, attrs.separator, reference_year),
    };

    let guesses = raw.max(min_guesses);
    m.guesses = Some(guesses);
    m.guesses_log10 = Some(guesses.log10());
    guesses
}

fn bruteforce_guesses(token_len: usize) -> f64 {
    let guesses = BRUTEFORCE_CARDINALITY.powi(token_len as i32);
    let guesses = if guesses.is_finite() { guesses } else { f64::MAX };
    // one above the submatch floor, so a non-bruteforce submatch over the
    // same span is always preferred when it ties on guesses.
    let min_guesses = if token_len == 1 {
        MIN_SUBMATCH_GUESSES_SINGLE_CHAR + 1.0
    } else {
        MIN_SUBMATCH_GUESSES_MULTI_CHAR + 1.0
    };
    guesses.max(min_guesses)
}

fn uppercase_variations(token: &str) -> u64 {
    let chars: Vec<char> = token.chars().collect();
    if chars.iter().all(|c| !c.is_uppercase()) {
        return 1;
    }
    let len = chars.len();
    let start_only_upper =
        len >= 2 && chars[0].is_uppercase() && chars[1..].iter().all(|c| !c.is_uppercase());
    let end_only_upper = len >= 2
        && chars[len - 1].is_uppercase()
        && chars[..len - 1].iter().all(|c| !c.is_uppercase());
    let all_upper = chars.iter().all(|c| !c.is_lowercase());
    if start_only_upper || end_only_upper || all_upper {
        return 2;
    }
    let upper = chars.iter().filter(|c| c.is_uppercase()).count() as u64;
    let lower = chars.iter().filter(|c| c.is_lowercase()).count() as u64;
    (1..=cmp::min(upper, lower)).map(|i| n_choose_k(upper + lower, i)).sum()
}

fn l33t_variations(token: &str, l33t: bool, sub: Option<&HashMap<char, char>>) -> u64 {
    let sub = match (l33t, sub) {
        (true, Some(sub)) => sub,
        _ => return 1,
    };
    let lower = token.to_lowercase();
    let mut variations = 1u64;
    for (&subbed, &original) in sub {
        let s = lower.chars().filter(|&c| c == subbed).count() as u64;
        let u = lower.chars().filter(|&c| c == original).count() as u64;
        if s == 0 || u == 0 {
            variations *= 2;
        } else {
            let p = cmp::min(s, u);
            let possibilities: u64 = (1..=p).map(|i| n_choose_k(s + u, i)).sum();
            variations *= possibilities;
        }
    }
    variations
}

fn spatial_guesses(graph: &Graph, token_len: usize, turns: usize, shifted_count: usize) -> f64 {
    let (starts, degree) = if graph.is_full_keyboard() {
        (
            adjacency_graphs::QWERTY.len() as f64,
            average_degree(&adjacency_graphs::QWERTY),
        )
    } else {
        (
            adjacency_graphs::KEYPAD.len() as f64,
            average_degree(&adjacency_graphs::KEYPAD),
        )
    };

    let mut guesses = 0.0;
    for i in 2..=token_len {
        let possible_turns = cmp::min(turns, i - 1);
        for j in 1..=possible_turns {
            guesses +=
                n_choose_k((i - 1) as u64, (j - 1) as u64) as f64 * starts * degree.powi(j as i32);
        }
    }

    let unshifted_count = token_len - shifted_count;
    if shifted_count == 0 || unshifted_count == 0 {
        guesses *= 2.0;
    } else {
        let p = cmp::min(shifted_count, unshifted_count);
        let shifted_variations: f64 = (1..=p)
            .map(|i| n_choose_k((shifted_count + unshifted_count) as u64, i as u64) as f64)
            .sum();
        guesses *= shifted_variations;
    }
    guesses
}

fn sequence_guesses(token: &str, ascending: bool) -> f64 {
    let first_chr = token.chars().next().unwrap_or('a');
    let mut base_guesses = if ['a', 'A', 'z', 'Z', '0', '1', '9'].contains(&first_chr) {
        4.0
    } else if first_chr.is_ascii_digit() {
        10.0
    } else {
        26.0
    };
    if !ascending {
        base_guesses *= 2.0;
    }
    base_guesses * token.chars().count() as f64
}

fn regex_guesses(pattern: &RegexPattern, token_len: usize, reference_year: i32) -> f64 {
    match pattern {
        RegexPattern::CharClass(class) => (class.base() as f64).powi(token_len as i32),
        RegexPattern::RecentYear { year } => {
            let year_space = (*year - reference_year).unsigned_abs() as f64;
            year_space.max(MIN_YEAR_SPACE)
        }
    }
}

fn date_guesses(year: i32, separator: Option<char>, reference_year: i32) -> f64 {
    let year_space = (year - reference_year).unsigned_abs() as f64;
    let year_space = year_space.max(MIN_YEAR_SPACE);
    let mut guesses = year_space * 365.0;
    if separator.is_some() {
        guesses *= 4.0;
    }
    guesses
}
