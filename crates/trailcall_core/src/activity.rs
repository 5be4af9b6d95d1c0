//! Activities within a hike and who joined them.

use crate::{ActivityId, CheckinId, HikeId, ParticipantId, RsvpId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trailcall_error::AttendanceError;

/// A named sub-group of one hike, e.g. "summit route".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Database key
    pub id: ActivityId,
    /// Owning hike
    pub hike_id: HikeId,
    /// Display name
    pub name: String,
    /// When the activity was created
    pub created_at: DateTime<Utc>,
    /// Number of participant rows (computed)
    pub participant_count: u32,
}

/// The attendance record a participant row points at.
///
/// Members who checked in join through their check-in; guests (and members
/// not yet checked in) join through their RSVP.
///
/// # Examples
///
/// ```
/// use trailcall_core::{AttendanceRef, CheckinId};
///
/// let by_checkin = AttendanceRef::from_ids(Some(CheckinId(4)), None).unwrap();
/// assert_eq!(by_checkin, AttendanceRef::Checkin(CheckinId(4)));
///
/// assert!(AttendanceRef::from_ids(None, None).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceRef {
    /// A member's check-in
    Checkin(CheckinId),
    /// An RSVP, member or guest
    Rsvp(RsvpId),
}

impl AttendanceRef {
    /// Builds a reference from the two optional ids of a request.
    ///
    /// # Errors
    ///
    /// Returns a Validation error unless exactly one id is supplied.
    pub fn from_ids(
        checkin_id: Option<CheckinId>,
        rsvp_id: Option<RsvpId>,
    ) -> Result<Self, AttendanceError> {
        match (checkin_id, rsvp_id) {
            (Some(id), None) => Ok(AttendanceRef::Checkin(id)),
            (None, Some(id)) => Ok(AttendanceRef::Rsvp(id)),
            (Some(_), Some(_)) => Err(AttendanceError::validation(
                "checkin_id/rsvp_id",
                "supply only one of checkin_id or rsvp_id",
            )),
            (None, None) => Err(AttendanceError::validation(
                "checkin_id/rsvp_id",
                "checkin_id or rsvp_id required",
            )),
        }
    }

    /// The check-in id, if this points at a check-in.
    pub fn checkin_id(self) -> Option<CheckinId> {
        match self {
            AttendanceRef::Checkin(id) => Some(id),
            AttendanceRef::Rsvp(_) => None,
        }
    }

    /// The RSVP id, if this points at an RSVP.
    pub fn rsvp_id(self) -> Option<RsvpId> {
        match self {
            AttendanceRef::Checkin(_) => None,
            AttendanceRef::Rsvp(id) => Some(id),
        }
    }
}

/// One member of an activity's sub-roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityParticipant {
    /// Database key
    pub id: ParticipantId,
    /// The activity joined
    pub activity_id: ActivityId,
    /// The attendance record that joined
    pub attendance: AttendanceRef,
    /// Member "First Last" or guest name
    pub name: String,
    /// Membership number, empty for guests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_number: Option<String>,
    /// Joined through a guest RSVP
    pub is_guest: bool,
}
