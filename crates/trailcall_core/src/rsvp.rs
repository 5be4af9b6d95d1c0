//! Pre-registrations and the public RSVP outcome.

use crate::{HikeId, MemberId, RsvpId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who an RSVP is for: a known member or a walk-in guest.
///
/// Exactly one of the two is ever recorded, so the choice is a variant rather
/// than a pair of nullable columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpTarget {
    /// Resolved to a member on the roster
    Member(MemberId),
    /// Unmatched guest, keyed by the literal submitted name
    Guest(String),
}

impl RsvpTarget {
    /// The member, for member-linked RSVPs.
    pub fn member_id(&self) -> Option<MemberId> {
        match self {
            RsvpTarget::Member(id) => Some(*id),
            RsvpTarget::Guest(_) => None,
        }
    }

    /// The guest name, for guest RSVPs.
    pub fn guest_name(&self) -> Option<&str> {
        match self {
            RsvpTarget::Member(_) => None,
            RsvpTarget::Guest(name) => Some(name),
        }
    }

    /// True for guest RSVPs.
    pub fn is_guest(&self) -> bool {
        matches!(self, RsvpTarget::Guest(_))
    }
}

/// An intention to attend a hike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rsvp {
    /// Database key
    pub id: RsvpId,
    /// The hike
    pub hike_id: HikeId,
    /// Member or guest
    pub target: RsvpTarget,
    /// When the RSVP was submitted
    pub created_at: DateTime<Utc>,
    /// Guest check-in time; always `None` for member RSVPs, whose attendance is
    /// a separate [`Checkin`](crate::Checkin) row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
}

/// An RSVP as listed for admins, with display fields resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpEntry {
    /// The RSVP itself
    #[serde(flatten)]
    pub rsvp: Rsvp,
    /// Member "First Last" or the guest name
    pub display_name: String,
    /// Membership number for member RSVPs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_number: Option<String>,
    /// Member has a Checkin row, or guest has `checked_in_at` set
    pub checked_in: bool,
}

/// Result of a public RSVP submission.
///
/// Every variant is a normal response to the submitter; none of them is a
/// system fault.
///
/// # Examples
///
/// ```
/// use trailcall_core::RsvpOutcome;
///
/// let closed = RsvpOutcome::Closed;
/// assert!(!closed.is_success());
/// assert_eq!(closed.message(), "RSVPs are closed for this hike");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RsvpOutcome {
    /// A new RSVP row was created
    Confirmed {
        /// The created RSVP
        rsvp_id: RsvpId,
        /// Matched member name, or the guest name
        matched_name: String,
        /// Membership number when matched to a member
        #[serde(default, skip_serializing_if = "Option::is_none")]
        member_number: Option<String>,
        /// Registered as a guest
        is_guest: bool,
    },
    /// The person already has an RSVP for this hike
    AlreadyRegistered {
        /// Matched member name, when matched to a member
        #[serde(default, skip_serializing_if = "Option::is_none")]
        matched_name: Option<String>,
        /// Membership number when matched to a member
        #[serde(default, skip_serializing_if = "Option::is_none")]
        member_number: Option<String>,
        /// Resolved as a guest
        is_guest: bool,
    },
    /// The hike is not accepting RSVPs
    Closed,
}

impl RsvpOutcome {
    /// True only when a row was created.
    pub fn is_success(&self) -> bool {
        matches!(self, RsvpOutcome::Confirmed { .. })
    }

    /// User-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            RsvpOutcome::Confirmed {
                is_guest: false, ..
            } => "RSVP confirmed!",
            RsvpOutcome::Confirmed { is_guest: true, .. } => "RSVP confirmed as guest",
            RsvpOutcome::AlreadyRegistered { .. } => "You're already registered for this hike",
            RsvpOutcome::Closed => "RSVPs are closed for this hike",
        }
    }
}
