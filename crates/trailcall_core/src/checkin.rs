//! Confirmed physical attendance.

use crate::{CheckinId, HikeId, MemberId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A member's confirmed attendance at a hike.
///
/// At most one exists per (hike, member); recording it again returns the
/// existing row. The display fields are joined from the member for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkin {
    /// Database key
    pub id: CheckinId,
    /// The hike attended
    pub hike_id: HikeId,
    /// The member who attended
    pub member_id: MemberId,
    /// When the check-in was recorded
    pub checked_in_at: DateTime<Utc>,
    /// Led the hike
    pub is_leader: bool,
    /// Walked at the back
    pub is_sweeper: bool,
    /// "First Last" of the member
    pub member_name: String,
    /// Membership number of the member
    pub membership_number: String,
}

/// Post-hoc role flags on a check-in.
///
/// # Examples
///
/// ```
/// use trailcall_core::CheckinRole;
/// use std::str::FromStr;
///
/// assert_eq!(CheckinRole::from_str("sweeper").unwrap(), CheckinRole::Sweeper);
/// assert!(CheckinRole::from_str("driver").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CheckinRole {
    /// Hike leader
    Leader,
    /// Sweeper
    Sweeper,
}

impl CheckinRole {
    /// Reads this role's flag from a check-in.
    pub fn is_set_on(self, checkin: &Checkin) -> bool {
        match self {
            CheckinRole::Leader => checkin.is_leader,
            CheckinRole::Sweeper => checkin.is_sweeper,
        }
    }
}
