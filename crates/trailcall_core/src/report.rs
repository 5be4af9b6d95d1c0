//! Read-side projections over the attendance records.

use crate::{CheckinId, Hike, Member, MemberId, RsvpId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A member and the hikes they checked in to, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberHistory {
    /// The member
    pub member: Member,
    /// Hikes with a check-in for this member
    pub hikes: Vec<Hike>,
}

impl MemberHistory {
    /// Number of hikes attended.
    pub fn total(&self) -> usize {
        self.hikes.len()
    }
}

/// A hike with its checked-in members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HikeDetail {
    /// The hike
    pub hike: Hike,
    /// Members with a check-in, newest first
    pub attendees: Vec<Member>,
}

/// How an attendee's presence is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum AttendeeSource {
    /// A member's check-in row
    Member(CheckinId),
    /// A guest RSVP with its check-in time set
    Guest(RsvpId),
}

/// One line of a hike's attendance sheet.
///
/// The sheet unions both representations of attendance: member check-in rows
/// and checked-in guest RSVPs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// Where the attendance is recorded
    pub source: AttendeeSource,
    /// The member, for member attendees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<MemberId>,
    /// "First Last" or guest name
    pub name: String,
    /// Membership number for members
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_number: Option<String>,
    /// Led the hike
    pub is_leader: bool,
    /// Walked at the back
    pub is_sweeper: bool,
    /// Names of the activities joined
    pub activities: Vec<String>,
}

impl Attendee {
    /// True for checked-in guests.
    pub fn is_guest(&self) -> bool {
        matches!(self.source, AttendeeSource::Guest(_))
    }
}

/// One check-in in the yearly roll-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The check-in
    pub checkin_id: CheckinId,
    /// Date of the hike
    pub hike_date: NaiveDate,
    /// Name of the hike
    pub hike_name: String,
    /// Location of the hike
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hike_location: Option<String>,
    /// Member's membership number
    pub membership_number: String,
    /// Member's given name
    pub first_name: String,
    /// Member's surname
    pub last_name: String,
    /// When the check-in was recorded
    pub checked_in_at: DateTime<Utc>,
    /// Names of the activities joined through this check-in
    pub activities: Vec<String>,
}
