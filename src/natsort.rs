//! Natural (human alphanumeric) ordering
//!
//! Compares strings by alternating runs of digits and non-digits, with
//! digit runs compared as numbers rather than character by character. This
//! is the ordering users expect for category labels: "cluster2" sorts
//! before "cluster10", and "2" before "10".
//!
//! # Example
//!
//! ```rust
//! use dotplot_engine::natsort::natural_cmp;
//! use std::cmp::Ordering;
//!
//! assert_eq!(natural_cmp("cluster2", "cluster10"), Ordering::Less);
//! assert_eq!(natural_cmp("a", "b"), Ordering::Less);
//!
//! let mut labels = vec!["cluster10", "cluster1", "cluster2"];
//! labels.sort_by(|a, b| natural_cmp(a, b));
//! assert_eq!(labels, vec!["cluster1", "cluster2", "cluster10"]);
//! ```

use std::cmp::Ordering;

/// A maximal run of bytes that is either all ASCII digits or digit-free
#[derive(Debug, PartialEq, Eq)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

/// Iterate a string as alternating digit / non-digit runs
fn runs(s: &str) -> impl Iterator<Item = Run<'_>> {
    let bytes = s.as_bytes();
    let mut start = 0;

    std::iter::from_fn(move || {
        if start >= bytes.len() {
            return None;
        }
        let is_digit = bytes[start].is_ascii_digit();
        let mut end = start + 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() == is_digit {
            end += 1;
        }
        let run = &s[start..end];
        start = end;
        Some(if is_digit {
            Run::Digits(run)
        } else {
            Run::Text(run)
        })
    })
}

/// Compare two all-digit runs by numeric value without parsing
///
/// Strips leading zeros, then compares by length and finally digit by
/// digit, so arbitrarily long runs never overflow an integer type.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compare two strings in natural alphanumeric order
///
/// Digit runs compare as unsigned integers, non-digit runs compare
/// lexicographically by byte, and a digit run sorts before a non-digit run
/// at the same position. Strings whose runs all compare equal (for example
/// "07" and "7") fall back to raw lexicographic order so the result is a
/// total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut runs_a = runs(a);
    let mut runs_b = runs(b);

    loop {
        match (runs_a.next(), runs_b.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ra), Some(rb)) => {
                let cmp = match (ra, rb) {
                    (Run::Digits(da), Run::Digits(db)) => cmp_digit_runs(da, db),
                    (Run::Text(ta), Run::Text(tb)) => ta.cmp(tb),
                    (Run::Digits(_), Run::Text(_)) => Ordering::Less,
                    (Run::Text(_), Run::Digits(_)) => Ordering::Greater,
                };
                if cmp != Ordering::Equal {
                    return cmp;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut labels: Vec<&str>) -> Vec<&str> {
        labels.sort_by(|a, b| natural_cmp(a, b));
        labels
    }

    #[test]
    fn test_embedded_numbers() {
        assert_eq!(
            sorted(vec!["cluster2", "cluster10", "cluster1"]),
            vec!["cluster1", "cluster2", "cluster10"]
        );
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(sorted(vec!["10", "2", "1"]), vec!["1", "2", "10"]);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(sorted(vec!["beta", "alpha"]), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_digits_sort_before_text() {
        assert_eq!(natural_cmp("1a", "aa"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros_compare_numerically() {
        assert_eq!(cmp_digit_runs("007", "7"), Ordering::Equal);
        assert_eq!(natural_cmp("x007", "x8"), Ordering::Less);
    }

    #[test]
    fn test_equal_runs_tie_break_lexicographically() {
        // "07" and "7" are numerically equal; raw order decides
        assert_eq!(natural_cmp("07", "7"), Ordering::Less);
        assert_eq!(natural_cmp("7", "07"), Ordering::Greater);
        assert_eq!(natural_cmp("7", "7"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("cluster", "cluster1"), Ordering::Less);
        assert_eq!(natural_cmp("cluster1x", "cluster1"), Ordering::Greater);
    }

    #[test]
    fn test_huge_digit_runs() {
        let a = "id340282366920938463463374607431768211456"; // > u128::MAX
        let b = "id99";
        assert_eq!(natural_cmp(b, a), Ordering::Less);
    }

    #[test]
    fn test_multi_segment() {
        assert_eq!(
            sorted(vec!["t2-b10", "t2-b2", "t10-b1"]),
            vec!["t2-b2", "t2-b10", "t10-b1"]
        );
    }
}
