//! Row types and their conversions to domain records.

use crate::DatabaseResult;
use crate::schema::{activities, activity_participants, checkins, hikes, members, rsvps};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use std::str::FromStr;
use trailcall_core::{
    Activity, ActivityId, AttendanceRef, Checkin, CheckinId, Hike, HikeId, HikeStatus,
    HikeUpdate, Member, MemberId, MemberUpdate, NewHike, NewMember, ParticipantId, Rsvp, RsvpId,
    RsvpTarget,
};
use trailcall_error::{DatabaseError, DatabaseErrorKind};

/// A row of `members`.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    pub id: i64,
    pub membership_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemberRow {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: MemberId(row.id),
            membership_number: row.membership_number,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert form of a member.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = members)]
pub struct NewMemberRow<'a> {
    pub membership_number: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
}

impl<'a> From<&'a NewMember> for NewMemberRow<'a> {
    fn from(new_member: &'a NewMember) -> Self {
        Self {
            membership_number: new_member.membership_key(),
            first_name: &new_member.first_name,
            last_name: &new_member.last_name,
            email: non_empty(&new_member.email),
            phone: non_empty(&new_member.phone),
        }
    }
}

/// Partial update of a member; `None` columns are left alone.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = members)]
pub struct MemberChangeset {
    pub membership_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl From<&MemberUpdate> for MemberChangeset {
    fn from(update: &MemberUpdate) -> Self {
        Self {
            membership_number: update.membership_key().map(str::to_string),
            first_name: owned_non_empty(&update.first_name),
            last_name: owned_non_empty(&update.last_name),
            email: owned_non_empty(&update.email),
            phone: owned_non_empty(&update.phone),
            active: update.active,
            updated_at: Utc::now(),
        }
    }
}

/// A row of `hikes`, without the computed counters.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = hikes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HikeRow {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub rsvp_open: bool,
    pub created_at: DateTime<Utc>,
}

impl HikeRow {
    /// Attach the counters and parse the status column.
    pub fn into_hike(self, attendee_count: u32, rsvp_count: u32) -> DatabaseResult<Hike> {
        let status = HikeStatus::from_str(&self.status).map_err(|_| {
            DatabaseError::new(DatabaseErrorKind::Query(format!(
                "hike {} has unknown status '{}'",
                self.id, self.status
            )))
        })?;
        Ok(Hike {
            id: HikeId(self.id),
            name: self.name,
            date: self.date,
            location: self.location,
            notes: self.notes,
            status,
            rsvp_open: self.rsvp_open,
            created_at: self.created_at,
            attendee_count,
            rsvp_count,
        })
    }
}

/// Insert form of a hike.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = hikes)]
pub struct NewHikeRow<'a> {
    pub name: &'a str,
    pub date: NaiveDate,
    pub location: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a NewHike> for NewHikeRow<'a> {
    fn from(new_hike: &'a NewHike) -> Self {
        Self {
            name: &new_hike.name,
            date: new_hike.date,
            location: non_empty(&new_hike.location),
            notes: non_empty(&new_hike.notes),
        }
    }
}

/// Partial update of a hike.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = hikes)]
pub struct HikeChangeset {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl HikeChangeset {
    /// True when the update names no column; diesel rejects empty changesets.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.date.is_none() && self.location.is_none() && self.notes.is_none()
    }
}

impl From<&HikeUpdate> for HikeChangeset {
    fn from(update: &HikeUpdate) -> Self {
        Self {
            name: owned_non_empty(&update.name),
            date: update.date,
            location: owned_non_empty(&update.location),
            notes: owned_non_empty(&update.notes),
        }
    }
}

/// A row of `checkins`.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = checkins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CheckinRow {
    pub id: i64,
    pub hike_id: i64,
    pub member_id: i64,
    pub checked_in_at: DateTime<Utc>,
    pub is_leader: bool,
    pub is_sweeper: bool,
}

impl CheckinRow {
    /// Join the member's display fields.
    pub fn into_checkin(self, member: &MemberRow) -> Checkin {
        Checkin {
            id: CheckinId(self.id),
            hike_id: HikeId(self.hike_id),
            member_id: MemberId(self.member_id),
            checked_in_at: self.checked_in_at,
            is_leader: self.is_leader,
            is_sweeper: self.is_sweeper,
            member_name: member.full_name(),
            membership_number: member.membership_number.clone(),
        }
    }
}

/// Insert form of a check-in.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = checkins)]
pub struct NewCheckinRow {
    pub hike_id: i64,
    pub member_id: i64,
}

/// A row of `rsvps`.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = rsvps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RsvpRow {
    pub id: i64,
    pub hike_id: i64,
    pub member_id: Option<i64>,
    pub guest_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl TryFrom<RsvpRow> for Rsvp {
    type Error = DatabaseError;

    fn try_from(row: RsvpRow) -> Result<Self, Self::Error> {
        let target = match (row.member_id, row.guest_name) {
            (Some(member_id), None) => RsvpTarget::Member(MemberId(member_id)),
            (None, Some(name)) => RsvpTarget::Guest(name),
            _ => {
                return Err(DatabaseError::new(DatabaseErrorKind::Query(format!(
                    "RSVP {} must have exactly one of member_id or guest_name",
                    row.id
                ))));
            }
        };
        Ok(Rsvp {
            id: RsvpId(row.id),
            hike_id: HikeId(row.hike_id),
            target,
            created_at: row.created_at,
            checked_in_at: row.checked_in_at,
        })
    }
}

/// Insert form of an RSVP.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rsvps)]
pub struct NewRsvpRow<'a> {
    pub hike_id: i64,
    pub member_id: Option<i64>,
    pub guest_name: Option<&'a str>,
}

impl<'a> NewRsvpRow<'a> {
    /// Split the target into its two nullable columns.
    pub fn new(hike_id: HikeId, target: &'a RsvpTarget) -> Self {
        Self {
            hike_id: hike_id.get(),
            member_id: target.member_id().map(MemberId::get),
            guest_name: target.guest_name(),
        }
    }
}

/// A row of `activities`.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityRow {
    pub id: i64,
    pub hike_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl ActivityRow {
    /// Attach the participant count.
    pub fn into_activity(self, participant_count: u32) -> Activity {
        Activity {
            id: ActivityId(self.id),
            hike_id: HikeId(self.hike_id),
            name: self.name,
            created_at: self.created_at,
            participant_count,
        }
    }
}

/// Insert form of an activity.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activities)]
pub struct NewActivityRow<'a> {
    pub hike_id: i64,
    pub name: &'a str,
}

/// A row of `activity_participants`.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = activity_participants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ParticipantRow {
    pub id: i64,
    pub activity_id: i64,
    pub checkin_id: Option<i64>,
    pub rsvp_id: Option<i64>,
}

impl ParticipantRow {
    /// The typed link held by this row.
    pub fn attendance(&self) -> DatabaseResult<AttendanceRef> {
        AttendanceRef::from_ids(self.checkin_id.map(CheckinId), self.rsvp_id.map(RsvpId)).map_err(
            |e| {
                DatabaseError::new(DatabaseErrorKind::Query(format!(
                    "participant {}: {}",
                    self.id, e.kind
                )))
            },
        )
    }

    /// Typed id of this row.
    pub fn participant_id(&self) -> ParticipantId {
        ParticipantId(self.id)
    }
}

/// Insert form of a participant.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = activity_participants)]
pub struct NewParticipantRow {
    pub activity_id: i64,
    pub checkin_id: Option<i64>,
    pub rsvp_id: Option<i64>,
}

impl NewParticipantRow {
    /// Split the link into its two nullable columns.
    pub fn new(activity_id: ActivityId, attendance: AttendanceRef) -> Self {
        Self {
            activity_id: activity_id.get(),
            checkin_id: attendance.checkin_id().map(CheckinId::get),
            rsvp_id: attendance.rsvp_id().map(RsvpId::get),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn owned_non_empty(value: &Option<String>) -> Option<String> {
    non_empty(value).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rsvp_row(member_id: Option<i64>, guest_name: Option<&str>) -> RsvpRow {
        RsvpRow {
            id: 3,
            hike_id: 1,
            member_id,
            guest_name: guest_name.map(str::to_string),
            created_at: Utc::now(),
            checked_in_at: None,
        }
    }

    #[test]
    fn test_rsvp_row_requires_exactly_one_target() {
        let member = Rsvp::try_from(rsvp_row(Some(7), None)).unwrap();
        assert_eq!(member.target, RsvpTarget::Member(MemberId(7)));

        let guest = Rsvp::try_from(rsvp_row(None, Some("Pat Lee"))).unwrap();
        assert_eq!(guest.target, RsvpTarget::Guest("Pat Lee".to_string()));

        assert!(Rsvp::try_from(rsvp_row(Some(7), Some("Pat Lee"))).is_err());
        assert!(Rsvp::try_from(rsvp_row(None, None)).is_err());
    }

    #[test]
    fn test_new_rsvp_row_splits_target() {
        let guest = RsvpTarget::Guest("Pat Lee".to_string());
        let row = NewRsvpRow::new(HikeId(2), &guest);
        assert_eq!(row.member_id, None);
        assert_eq!(row.guest_name, Some("Pat Lee"));
    }

    #[test]
    fn test_participant_row_round_trips_link() {
        let new_row = NewParticipantRow::new(ActivityId(4), AttendanceRef::Rsvp(RsvpId(9)));
        assert_eq!((new_row.checkin_id, new_row.rsvp_id), (None, Some(9)));

        let row = ParticipantRow {
            id: 1,
            activity_id: 4,
            checkin_id: new_row.checkin_id,
            rsvp_id: new_row.rsvp_id,
        };
        assert_eq!(row.attendance().unwrap(), AttendanceRef::Rsvp(RsvpId(9)));

        let broken = ParticipantRow {
            checkin_id: Some(2),
            ..row
        };
        assert!(broken.attendance().is_err());
    }

    #[test]
    fn test_changesets_skip_blank_fields() {
        let update = MemberUpdate::default()
            .with_first_name("")
            .with_phone("555-0100");
        let changes = MemberChangeset::from(&update);
        assert!(changes.first_name.is_none());
        assert_eq!(changes.phone.as_deref(), Some("555-0100"));

        assert!(HikeChangeset::from(&HikeUpdate::default().with_notes("  ")).is_empty());
    }

    #[test]
    fn test_unknown_hike_status_is_rejected() {
        let row = HikeRow {
            id: 1,
            name: "Ridge".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
            location: None,
            notes: None,
            status: "archived".to_string(),
            rsvp_open: true,
            created_at: Utc::now(),
        };
        assert!(row.into_hike(0, 0).is_err());
    }
}
