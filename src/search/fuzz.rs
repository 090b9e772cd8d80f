//! General-purpose fuzzy string similarity.
//!
//! Scores are on a 0-100 scale. [`weighted_ratio`] is the scorer used for
//! ranking: it picks between whole-string, token-based, and best-substring
//! comparisons depending on how different the two lengths are, so a short
//! query can still score highly against a long rendered record.

use std::collections::{BTreeSet, HashSet};

const UNBASE_SCALE: f64 = 0.95;

/// Length of the longest common subsequence of two char slices.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];

    for lc in long {
        for (j, sc) in short.iter().enumerate() {
            curr[j + 1] = if lc == sc {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[short.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let score = 200.0 * lcs_len(a, b) as f64 / total as f64;
    score
}

/// Normalized indel similarity: `2 * LCS / (len(a) + len(b))`, scaled to 100.
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] of the shorter string against any equally long window of
/// the longer one, including windows clipped at either end.
#[must_use]
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return if a.len() == b.len() { 100.0 } else { 0.0 };
    }
    if a.len() == b.len() {
        return partial_ratio_chars(&a, &b).max(partial_ratio_chars(&b, &a));
    }
    if a.len() < b.len() {
        partial_ratio_chars(&a, &b)
    } else {
        partial_ratio_chars(&b, &a)
    }
}

fn partial_ratio_chars(short: &[char], long: &[char]) -> f64 {
    let present: HashSet<char> = short.iter().copied().collect();
    let width = short.len();
    let mut best = 0.0f64;

    let mut consider = |window: &[char]| {
        let score = ratio_chars(short, window);
        if score > best {
            best = score;
        }
        best >= 100.0
    };

    // Windows clipped at the left edge, anchored on their last char.
    for end in 1..width {
        if present.contains(&long[end - 1]) && consider(&long[..end]) {
            return 100.0;
        }
    }
    // Full-width windows, anchored on their first char.
    for start in 0..=(long.len() - width) {
        if present.contains(&long[start]) && consider(&long[start..start + width]) {
            return 100.0;
        }
    }
    // Windows clipped at the right edge.
    for start in (long.len() - width + 1)..long.len() {
        if present.contains(&long[start]) && consider(&long[start..]) {
            return 100.0;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

/// [`ratio`] after sorting whitespace-separated tokens.
#[must_use]
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a).join(" "), &sorted_tokens(b).join(" "))
}

/// Token-set comparison: shared tokens are compared against each side's
/// shared-plus-remaining tokens. A full subset match scores 100.
#[must_use]
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let shared: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !shared.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let shared = shared.join(" ");
    let only_a = only_a.join(" ");
    let only_b = only_b.join(" ");
    if shared.is_empty() {
        return ratio(&only_a, &only_b);
    }

    let with_a = format!("{shared} {only_a}");
    let with_b = format!("{shared} {only_b}");
    ratio(&with_a, &with_b)
        .max(ratio(&shared, &with_a))
        .max(ratio(&shared, &with_b))
}

/// Best of [`token_sort_ratio`] and [`token_set_ratio`].
#[must_use]
pub fn token_ratio(a: &str, b: &str) -> f64 {
    token_sort_ratio(a, b).max(token_set_ratio(a, b))
}

/// Token-level [`partial_ratio`]; any shared token scores 100.
#[must_use]
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let split_a: Vec<&str> = a.split_whitespace().collect();
    let split_b: Vec<&str> = b.split_whitespace().collect();
    if split_a.is_empty() || split_b.is_empty() {
        return 0.0;
    }
    let tokens_a: BTreeSet<&str> = split_a.iter().copied().collect();
    let tokens_b: BTreeSet<&str> = split_b.iter().copied().collect();
    if tokens_a.intersection(&tokens_b).next().is_some() {
        return 100.0;
    }

    let result = partial_ratio(&sorted_tokens(a).join(" "), &sorted_tokens(b).join(" "));
    // With no shared tokens the differences are the full token sets; only
    // duplicated tokens make them differ from the sorted splits.
    if split_a.len() == tokens_a.len() && split_b.len() == tokens_b.len() {
        return result;
    }
    let only_a: Vec<&str> = tokens_a.into_iter().collect();
    let only_b: Vec<&str> = tokens_b.into_iter().collect();
    result.max(partial_ratio(&only_a.join(" "), &only_b.join(" ")))
}

/// Weighted ratio: the general-purpose scorer used by the ranker.
///
/// Similar lengths compare whole strings and token arrangements; once one
/// side is 1.5x longer, substring and token-substring matches take over,
/// scaled down further when the length gap reaches 8x.
#[must_use]
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let end_ratio = ratio(a, b);

    if len_ratio < 1.5 {
        return end_ratio.max(token_ratio(a, b) * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    let end_ratio = end_ratio.max(partial_ratio(a, b) * partial_scale);
    end_ratio.max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}

/// Lowercase and replace every non-alphanumeric char with a space, then
/// trim. Optional preprocessing before scoring.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}
