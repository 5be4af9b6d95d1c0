//! The durable attendance entity set.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use trailcall_core::{
    Activity, ActivityId, ActivityParticipant, AttendanceRecord, AttendanceRef, Checkin, CheckinId,
    CheckinRole, Hike, HikeId, HikeStatus, HikeUpdate, Member, MemberId, MemberUpdate, NewHike,
    NewMember, Rsvp, RsvpEntry, RsvpId, RsvpTarget,
};
use trailcall_error::TrailcallResult;

/// Persistence for members, hikes, check-ins, RSVPs and activities.
///
/// Implementations own the uniqueness rules of the data model and must apply
/// them atomically, so that concurrent callers need no locking of their own:
///
/// - one member per membership number
/// - one check-in per (hike, member)
/// - one RSVP per (hike, member) and one per (hike, guest name)
/// - one participant row per (activity, check-in) and per (activity, RSVP)
///
/// Lookups of missing rows fail with an attendance `NotFound`; writes that hit
/// a uniqueness rule fail with `Conflict` unless the method documents
/// insert-or-fetch semantics. Deleting an activity, check-in or RSVP also
/// deletes the participant rows that point at it.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    // ---- members ----

    /// Register a member. Conflict on a duplicate membership number.
    async fn create_member(&self, new_member: &NewMember) -> TrailcallResult<Member>;

    /// Members ordered by last name then first name.
    async fn list_members(&self, active_only: bool) -> TrailcallResult<Vec<Member>>;

    /// Load a member by id.
    async fn get_member(&self, id: MemberId) -> TrailcallResult<Member>;

    /// Look a member up by membership number, active or not.
    async fn find_member_by_number(&self, number: &str) -> TrailcallResult<Option<Member>>;

    /// Apply a partial update. Conflict if the new membership number is taken.
    async fn update_member(&self, id: MemberId, update: &MemberUpdate) -> TrailcallResult<Member>;

    /// Clear the member's `active` flag.
    async fn deactivate_member(&self, id: MemberId) -> TrailcallResult<Member>;

    // ---- hikes ----

    /// Schedule a hike, open for check-ins and RSVPs.
    async fn create_hike(&self, new_hike: &NewHike) -> TrailcallResult<Hike>;

    /// Hikes ordered by date then creation time, newest first.
    async fn list_hikes(&self) -> TrailcallResult<Vec<Hike>>;

    /// Load a hike by id, with its counters.
    async fn get_hike(&self, id: HikeId) -> TrailcallResult<Hike>;

    /// The most recently created hike still open for check-in.
    async fn current_open_hike(&self) -> TrailcallResult<Option<Hike>>;

    /// Apply a partial update.
    async fn update_hike(&self, id: HikeId, update: &HikeUpdate) -> TrailcallResult<Hike>;

    /// Set the check-in status.
    async fn set_hike_status(&self, id: HikeId, status: HikeStatus) -> TrailcallResult<Hike>;

    /// Set whether public RSVPs are accepted.
    async fn set_rsvp_open(&self, id: HikeId, open: bool) -> TrailcallResult<Hike>;

    // ---- check-ins ----

    /// Insert a check-in for (hike, member), or return the one already there.
    ///
    /// Never fails with Conflict: concurrent callers for the same pair all
    /// receive the single surviving row.
    async fn insert_checkin_if_absent(
        &self,
        hike_id: HikeId,
        member_id: MemberId,
    ) -> TrailcallResult<Checkin>;

    /// Load a check-in by id.
    async fn get_checkin(&self, id: CheckinId) -> TrailcallResult<Checkin>;

    /// Delete the check-in for (hike, member). Returns false when there was none.
    async fn delete_checkin(&self, hike_id: HikeId, member_id: MemberId) -> TrailcallResult<bool>;

    /// Check-ins of a hike, newest first.
    async fn list_checkins(&self, hike_id: HikeId) -> TrailcallResult<Vec<Checkin>>;

    /// Set or clear one role flag.
    async fn set_checkin_role(
        &self,
        id: CheckinId,
        role: CheckinRole,
        value: bool,
    ) -> TrailcallResult<Checkin>;

    // ---- RSVPs ----

    /// Insert an RSVP. Conflict if the member or guest name already has one
    /// for this hike.
    async fn insert_rsvp(&self, hike_id: HikeId, target: &RsvpTarget) -> TrailcallResult<Rsvp>;

    /// Load an RSVP by id.
    async fn get_rsvp(&self, id: RsvpId) -> TrailcallResult<Rsvp>;

    /// RSVPs of a hike by surname (guest name for guests) then given name.
    async fn list_rsvps(&self, hike_id: HikeId) -> TrailcallResult<Vec<RsvpEntry>>;

    /// Delete an RSVP. Returns false when there was none.
    async fn delete_rsvp(&self, id: RsvpId) -> TrailcallResult<bool>;

    /// Set or clear a guest RSVP's check-in time.
    async fn set_rsvp_checked_in_at(
        &self,
        id: RsvpId,
        checked_in_at: Option<DateTime<Utc>>,
    ) -> TrailcallResult<Rsvp>;

    // ---- activities ----

    /// Create an activity on a hike.
    async fn create_activity(&self, hike_id: HikeId, name: &str) -> TrailcallResult<Activity>;

    /// Load an activity by id, with its participant count.
    async fn get_activity(&self, id: ActivityId) -> TrailcallResult<Activity>;

    /// Activities of a hike ordered by name.
    async fn list_activities(&self, hike_id: HikeId) -> TrailcallResult<Vec<Activity>>;

    /// Delete an activity and its participants. Returns false when there was none.
    async fn delete_activity(&self, id: ActivityId) -> TrailcallResult<bool>;

    /// Join an attendance record to an activity, or return the existing row.
    async fn add_participant(
        &self,
        activity_id: ActivityId,
        attendance: AttendanceRef,
    ) -> TrailcallResult<ActivityParticipant>;

    /// Remove an attendance record from an activity. Returns false when it was
    /// not a participant.
    async fn remove_participant(
        &self,
        activity_id: ActivityId,
        attendance: AttendanceRef,
    ) -> TrailcallResult<bool>;

    /// Participants of an activity ordered by display name.
    async fn list_participants(
        &self,
        activity_id: ActivityId,
    ) -> TrailcallResult<Vec<ActivityParticipant>>;

    /// Names of the activities an attendance record has joined, by name.
    async fn activities_for(&self, attendance: AttendanceRef) -> TrailcallResult<Vec<String>>;

    // ---- reports ----

    /// Members checked in to a hike, newest check-in first.
    async fn attendees_for_hike(&self, hike_id: HikeId) -> TrailcallResult<Vec<Member>>;

    /// Hikes a member checked in to, newest date first.
    async fn member_history(&self, member_id: MemberId) -> TrailcallResult<Vec<Hike>>;

    /// Every check-in on a hike dated in `year`, ordered by hike date, hike
    /// name, surname and given name. `activities` is left empty.
    async fn attendance_for_year(&self, year: i32) -> TrailcallResult<Vec<AttendanceRecord>>;
}
