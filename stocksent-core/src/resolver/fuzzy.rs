//! Indel-distance similarity scores on a 0..=100 scale.
//!
//! `weighted_ratio` combines the plain, partial and token-based ratios the
//! same way the classic fuzzy "WRatio" scorer does: partial matching only
//! kicks in when the two strings differ a lot in length, and every derived
//! score is discounted against the plain ratio.

use std::collections::BTreeSet;

/// Lower-case, replace non-alphanumerics with spaces, collapse whitespace.
pub fn normalize(s: &str) -> String {
    let replaced: String = s
        .chars()
        .flat_map(|c| {
            let keep = if c.is_alphanumeric() { c } else { ' ' };
            keep.to_lowercase()
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Indel similarity `2 * LCS / (|a| + |b|)`, rounded to 0..=100.
///
/// Insertions and deletions cost one each and there is no substitution, so
/// a dropped vowel ("tesla" vs "tsla") costs half what Levenshtein charges.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 0;
    }
    to_score(200.0 * lcs_len(&a, &b) as f64 / total as f64)
}

/// Longest common subsequence length, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// Best `ratio` of the shorter string against every equal-length window of
/// the longer one.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };
    if short.is_empty() {
        return 0;
    }

    let needle: String = short.iter().collect();
    let mut best = 0;
    for window in long.windows(short.len()) {
        let candidate: String = window.iter().collect();
        best = best.max(ratio(&needle, &candidate));
        if best == 100 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

pub fn partial_token_sort_ratio(a: &str, b: &str) -> u8 {
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Compare the shared tokens against each side's leftovers.
fn token_set_with(a: &str, b: &str, scorer: fn(&str, &str) -> u8) -> u8 {
    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();

    let common = join(set_a.intersection(&set_b));
    let only_a = join(set_a.difference(&set_b));
    let only_b = join(set_b.difference(&set_a));

    let combined_a = join_nonempty(&common, &only_a);
    let combined_b = join_nonempty(&common, &only_b);

    scorer(&common, &combined_a)
        .max(scorer(&common, &combined_b))
        .max(scorer(&combined_a, &combined_b))
}

fn join<'a>(tokens: impl Iterator<Item = &'a &'a str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

fn join_nonempty(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{left} {right}"),
    }
}

pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    token_set_with(a, b, ratio)
}

pub fn partial_token_set_ratio(a: &str, b: &str) -> u8 {
    token_set_with(a, b, partial_ratio)
}

/// Weighted similarity of two raw strings (normalised internally).
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let base = f64::from(ratio(&a, &b));
    let (len_a, len_b) = (a.chars().count() as f64, b.chars().count() as f64);
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);

    let best = if len_ratio >= 1.5 {
        let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
        let partial = f64::from(partial_ratio(&a, &b)) * partial_scale;
        let sort = f64::from(partial_token_sort_ratio(&a, &b)) * 0.95 * partial_scale;
        let set = f64::from(partial_token_set_ratio(&a, &b)) * 0.95 * partial_scale;
        base.max(partial).max(sort).max(set)
    } else {
        let sort = f64::from(token_sort_ratio(&a, &b)) * 0.95;
        let set = f64::from(token_set_ratio(&a, &b)) * 0.95;
        base.max(sort).max(set)
    };

    to_score(best)
}

fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  HDFCBANK.NS "), "hdfcbank ns");
        assert_eq!(normalize("Tesla,  Inc."), "tesla inc");
        assert_eq!(normalize("..."), "");
    }

    #[test]
    fn ratio_identical_is_100() {
        assert_eq!(ratio("aapl", "aapl"), 100);
        assert_eq!(ratio("", ""), 0);
    }

    #[test]
    fn ratio_single_deletion() {
        // 2 * 4 / 9
        assert_eq!(ratio("tesla", "tsla"), 89);
        assert_eq!(ratio("amazon", "amzn"), 80);
    }

    #[test]
    fn ratio_substitution_costs_two() {
        // "abcx" and "abcd" share "abc": 2 * 3 / 8
        assert_eq!(ratio("abcx", "abcd"), 75);
        assert_eq!(ratio("abc", "xyz"), 0);
    }

    #[test]
    fn lcs_handles_reordering() {
        let a: Vec<char> = "nvidia".chars().collect();
        let b: Vec<char> = "nvda".chars().collect();
        assert_eq!(lcs_len(&a, &b), 4);
        assert_eq!(lcs_len(&a, &[]), 0);
    }

    #[test]
    fn partial_ratio_finds_substring() {
        assert_eq!(partial_ratio("nflx", "nflx stock news"), 100);
        assert_eq!(partial_ratio("", "abc"), 0);
    }

    #[test]
    fn token_sort_ignores_order() {
        assert_eq!(token_sort_ratio("bank hdfc", "hdfc bank"), 100);
    }

    #[test]
    fn token_set_subset_is_100() {
        assert_eq!(token_set_ratio("tcs", "tcs ns"), 100);
    }

    #[test]
    fn weighted_exact_is_100() {
        assert_eq!(weighted_ratio("hdfcbank.ns", "HDFCBANK.NS"), 100);
        assert_eq!(weighted_ratio("Msft", "MSFT"), 100);
    }

    #[test]
    fn weighted_empty_is_zero() {
        assert_eq!(weighted_ratio("", "AAPL"), 0);
        assert_eq!(weighted_ratio("!!", "AAPL"), 0);
    }

    #[test]
    fn weighted_unrelated_is_low() {
        assert!(weighted_ratio("0123456789", "AAPL") < 30);
    }
}
