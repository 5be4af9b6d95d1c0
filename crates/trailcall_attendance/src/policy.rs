//! RSVP classification policy.

use serde::{Deserialize, Serialize};

/// Minimum name-match confidence for an RSVP to be linked to a member.
pub const MEMBER_MATCH_THRESHOLD: u8 = 80;

/// How public RSVP names are classified as member or guest.
///
/// # Examples
///
/// ```
/// use trailcall_attendance::{MatchPolicy, MEMBER_MATCH_THRESHOLD};
///
/// assert_eq!(*MatchPolicy::default().member_threshold(), MEMBER_MATCH_THRESHOLD);
/// assert_eq!(*MatchPolicy::new(90).member_threshold(), 90);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct MatchPolicy {
    /// Scores at or above this are confident member matches
    member_threshold: u8,
}

impl MatchPolicy {
    /// Policy with a custom threshold, clamped to 100.
    pub fn new(member_threshold: u8) -> Self {
        Self {
            member_threshold: member_threshold.min(100),
        }
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::new(MEMBER_MATCH_THRESHOLD)
    }
}
