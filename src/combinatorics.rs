//! Small combinatorial helpers shared by the per-pattern estimators and the
//! optimal sequence search: `n choose k`, factorial, and average graph
//! degree.

use std::collections::HashMap;

/// `n choose k`, computed by the multiplicative formula with integer
/// division after each multiplication step (`r = r * n / d`). That division
/// is always exact, since at the point it runs `r` already equals
/// `n * (n-1) * ... * (n-d+2)` divided by `(d-1)!`, a product of `d-1`
/// consecutive integers, which is always divisible by `d`.
///
/// Saturates to `u64::MAX` rather than panicking if the exact value would
/// overflow; that only happens for `n` far larger than any sequence length
/// this crate ever considers.
pub fn n_choose_k(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    if k == 0 {
        return 1;
    }
    let mut r: u64 = 1;
    let mut n = n;
    for d in 1..=k {
        r = match r.checked_mul(n) {
            Some(v) => v,
            None => return u64::MAX,
        };
        r /= d;
        n -= 1;
    }
    r
}

/// `n!` as a double. Returns `1.0` for `n < 2`. Callers must keep `n` small
/// enough not to overflow `f64` — this is only ever invoked on sequence
/// lengths, which rarely exceed single digits.
pub fn factorial(n: usize) -> f64 {
    if n < 2 {
        return 1.0;
    }
    (2..=n).fold(1.0_f64, |acc, x| acc * x as f64)
}

/// Average out-degree of an adjacency graph: the mean number of non-null
/// neighbor slots per key.
pub fn average_degree(graph: &HashMap<char, Vec<Option<char>>>) -> f64 {
    let sum: usize = graph
        .values()
        .map(|neighbors| neighbors.iter().filter(|n| n.is_some()).count())
        .sum();
    sum as f64 / graph.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;

    #[test]
    fn test_n_choose_k() {
        let test_data = [
            (0, 0, 1),
            (1, 0, 1),
            (5, 0, 1),
            (0, 1, 0),
            (0, 5, 0),
            (2, 1, 2),
            (4, 2, 6),
            (33, 7, 4272048),
        ];
        for &(n, k, result) in &test_data {
            assert_eq!(n_choose_k(n, k), result);
        }
    }

    quickcheck! {
        fn test_n_choose_k_mul_overflow(n: u64, k: u64) -> TestResult {
            if n >= 63 {
                n_choose_k(n, k); // must not panic
                TestResult::from_bool(true)
            } else {
                TestResult::discard()
            }
        }

        fn test_n_choose_k_mirror_identity(n: u64, k: u64) -> TestResult {
            if k > n || n >= 63 {
                return TestResult::discard();
            }
            TestResult::from_bool(n_choose_k(n, k) == n_choose_k(n, n - k))
        }

        fn test_n_choose_k_pascals_triangle(n: u64, k: u64) -> TestResult {
            if n == 0 || k == 0 || n >= 63 {
                return TestResult::discard();
            }
            TestResult::from_bool(n_choose_k(n, k) == n_choose_k(n - 1, k - 1) + n_choose_k(n - 1, k))
        }
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(2), 2.0);
        assert_eq!(factorial(5), 120.0);
    }

    #[test]
    fn test_average_degree() {
        let mut graph = HashMap::new();
        graph.insert('a', vec![Some('b'), None, None]);
        graph.insert('b', vec![Some('a'), Some('c'), None]);
        graph.insert('c', vec![Some('b'), None, None]);
        // (1 + 2 + 1) / 3
        assert!((average_degree(&graph) - (4.0 / 3.0)).abs() < 1e-9);
    }
}
