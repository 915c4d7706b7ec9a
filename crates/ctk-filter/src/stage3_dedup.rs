//! Stage 3: collapse runs of near-identical consecutive lines.
//!
//! Each run is anchored on its first line: every candidate is compared against
//! the anchor, not its predecessor, so small per-line drift cannot chain a run
//! into unrelated text.

use std::collections::HashMap;

use tracing::trace;

use crate::stage1_normalize::is_blank;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Runs shorter than this are emitted unchanged.
pub const MIN_RUN_TO_COLLAPSE: usize = 4;

/// LCS length by dynamic programming. Quadratic in the slice lengths.
fn lcs_table(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Length of the longest common subsequence of two char slices.
///
/// A shared prefix or suffix is always part of some LCS, so only the
/// differing middle goes through the table.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let suffix = a.iter().rev().zip(b.iter().rev()).take_while(|(x, y)| x == y).count();
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);
    prefix + suffix + lcs_table(a, b)
}

/// Chars the two lines have in common, ignoring order.
fn shared_chars(a: &[char], b: &[char]) -> usize {
    let mut counts: HashMap<char, usize> = HashMap::new();
    for &c in a {
        *counts.entry(c).or_insert(0) += 1;
    }
    b.iter()
        .filter(|&&c| match counts.get_mut(&c) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        })
        .count()
}

fn ratio(matches: usize, total: usize) -> f64 {
    (2 * matches) as f64 / total as f64
}

/// Similarity in [0, 1]: twice the matched chars over the combined length.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    ratio(lcs_len(&a, &b), total)
}

/// Same answer as `similarity_ratio(a, b) >= threshold`.
///
/// Length and shared-char counts are upper bounds on the LCS, so pairs that
/// cannot reach the threshold are rejected without building the table.
pub fn is_similar(a: &str, b: &str, threshold: f64) -> bool {
    if a == b {
        return 1.0 >= threshold;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if ratio(a.len().min(b.len()), total) < threshold {
        return false;
    }
    if ratio(shared_chars(&a, &b), total) < threshold {
        return false;
    }
    ratio(lcs_len(&a, &b), total) >= threshold
}

/// Replace each run of more than three similar lines with its anchor plus a count.
pub fn deduplicate<S: AsRef<str>>(lines: &[S], threshold: f64) -> Vec<String> {
    if lines.len() <= 2 {
        return lines.iter().map(|l| l.as_ref().to_string()).collect();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let anchor = lines[i].as_ref();
        if is_blank(anchor) {
            result.push(anchor.to_string());
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < lines.len() {
            let next = lines[j].as_ref();
            if is_blank(next) || !is_similar(anchor, next, threshold) {
                break;
            }
            j += 1;
        }

        let run_len = j - i;
        if run_len >= MIN_RUN_TO_COLLAPSE {
            trace!(anchor_len = anchor.len(), run_len, "collapsed similar run");
            result.push(format!("{anchor} [... {run_len} similar lines]"));
        } else {
            result.extend(lines[i..j].iter().map(|l| l.as_ref().to_string()));
        }
        i = j;
    }
    result
}
