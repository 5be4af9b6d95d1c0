//! Matching free-text names against the member roster.
//!
//! Public RSVPs arrive as a typed first and last name. The matcher decides
//! which member, if any, the submitter most likely is, and how sure it is.
//! Classification thresholds downstream are tuned to this exact scoring, so
//! [`similarity`] must stay a positional prefix comparison.

use crate::Member;
use tracing::debug;

/// Best roster candidate for a submitted name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMatch<'a> {
    /// The highest-scoring member, `None` when nothing scored above zero
    pub member: Option<&'a Member>,
    /// Confidence in `[0, 100]`
    pub score: u8,
}

impl<'a> NameMatch<'a> {
    /// No candidate.
    pub const NONE: Self = NameMatch {
        member: None,
        score: 0,
    };

    /// True when a member was found with at least `threshold` confidence.
    pub fn is_confident(&self, threshold: u8) -> bool {
        self.member.is_some() && self.score >= threshold
    }
}

/// Scores submitted names against a roster.
///
/// # Examples
///
/// ```
/// # use trailcall_core::{Member, MemberId, NameMatcher};
/// # use chrono::Utc;
/// # let member = |id, first: &str, last: &str| Member {
/// #     id: MemberId(id),
/// #     membership_number: format!("TC-{id:03}"),
/// #     first_name: first.to_string(),
/// #     last_name: last.to_string(),
/// #     email: None,
/// #     phone: None,
/// #     active: true,
/// #     created_at: Utc::now(),
/// #     updated_at: Utc::now(),
/// # };
/// let roster = vec![member(1, "Jane", "Smith"), member(2, "John", "Doe")];
///
/// let exact = NameMatcher::best_match(&roster, " jane ", "SMITH");
/// assert_eq!(exact.score, 100);
/// assert_eq!(exact.member.unwrap().id, MemberId(1));
///
/// let fuzzy = NameMatcher::best_match(&roster, "Jan", "Smyth");
/// assert_eq!(fuzzy.score, 30);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NameMatcher;

impl NameMatcher {
    /// Returns the roster member that best matches `first_name last_name`.
    ///
    /// An exact match on the normalised first and last names short-circuits
    /// with score 100; the first such member in roster order wins. Otherwise
    /// the member with the highest [`similarity`] wins, earlier members
    /// winning ties. An empty roster yields [`NameMatch::NONE`].
    pub fn best_match<'a>(roster: &'a [Member], first_name: &str, last_name: &str) -> NameMatch<'a> {
        let first = normalize(first_name);
        let last = normalize(last_name);
        let full = format!("{first} {last}");

        let mut best = NameMatch::NONE;
        for member in roster {
            let candidate_first = normalize(&member.first_name);
            let candidate_last = normalize(&member.last_name);

            if candidate_first == first && candidate_last == last {
                debug!(member_id = %member.id, "Exact roster match");
                return NameMatch {
                    member: Some(member),
                    score: 100,
                };
            }

            let score = similarity(&full, &format!("{candidate_first} {candidate_last}"));
            if score > best.score {
                best = NameMatch {
                    member: Some(member),
                    score,
                };
            }
        }

        debug!(
            score = best.score,
            member_id = ?best.member.map(|m| m.id),
            roster_size = roster.len(),
            "Best fuzzy roster match"
        );
        best
    }
}

/// Trims surrounding whitespace and case-folds.
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Positional prefix similarity of two strings, in `[0, 100]`.
///
/// Counts the positions where the shorter string agrees with the start of the
/// longer one, scaled by the longer length with integer division. Identical
/// strings score 100 and an empty side scores 0.
///
/// # Examples
///
/// ```
/// use trailcall_core::similarity;
///
/// assert_eq!(similarity("jane smith", "jane smith"), 100);
/// assert_eq!(similarity("jan smyth", "jane smith"), 30);
/// assert_eq!(similarity("jane smixx", "jane smith"), 80);
/// assert_eq!(similarity("", "jane smith"), 0);
/// ```
pub fn similarity(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() > b.len() { (&b, &a) } else { (&a, &b) };

    let matches = shorter
        .iter()
        .zip(longer.iter())
        .filter(|(x, y)| x == y)
        .count();

    // matches <= longer.len(), so the quotient is at most 100
    ((matches * 100) / longer.len()) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_folds_case() {
        assert_eq!(normalize("  JaNe \t"), "jane");
    }

    #[test]
    fn test_similarity_only_compares_aligned_prefix() {
        // A single leading insertion shifts every position.
        assert_eq!(similarity("xjane smith", "jane smith"), 0);
        // Length difference is penalised even when the prefix matches fully.
        assert_eq!(similarity("jane", "jane smith"), 40);
    }

    #[test]
    fn test_similarity_is_symmetric_for_equal_lengths() {
        assert_eq!(similarity("abcd", "abxd"), similarity("abxd", "abcd"));
        assert_eq!(similarity("abcd", "abxd"), 75);
    }
}
