//! Approximate string matching for palette lookups.
//!
//! [`ratio`] scores two strings on a 0-100 similarity scale using the
//! normalized indel distance: `100 * (1 - (insertions + deletions) / (|a| +
//! |b|))`, which reduces to `100 * 2 * lcs(a, b) / (|a| + |b|)`. Identical
//! strings score 100, disjoint strings 0, and minor spelling variation stays
//! high (`ratio("redd", "red") == 86`).
//!
//! Scoring is case-sensitive; callers normalize case before comparing.

/// Minimum [`ratio`] score for a palette lookup to count as a match.
///
/// Results below the cutoff are "no match", never a low-confidence partial
/// match.
pub const SCORE_CUTOFF: u8 = 80;

/// Normalized indel similarity between two strings, 0-100.
///
/// Two empty strings are identical and score 100.
#[must_use]
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }

    #[expect(clippy::cast_precision_loss, reason = "string lengths are far below 2^52")]
    #[expect(clippy::cast_possible_truncation, reason = "result is 0-100")]
    #[expect(clippy::cast_sign_loss, reason = "result is non-negative")]
    let score = (200.0 * lcs_length(&a, &b) as f64 / total as f64).round() as u8;
    score
}

/// Length of the longest common subsequence, single-row dynamic programming.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}
