//! Creating, converting and undoing attendance records.
//!
//! Attendance arrives through two channels: admin check-ins, keyed by an
//! asserted membership number, and public RSVPs, keyed by a typed name that
//! the [`NameMatcher`] resolves to a member or leaves as a guest. Checking in
//! an RSVP converts it asymmetrically: a member RSVP gains a separate
//! [`Checkin`] row, a guest RSVP gets its own `checked_in_at` set, because a
//! check-in row requires a member.

use crate::MatchPolicy;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use trailcall_core::{
    Activity, ActivityId, ActivityParticipant, AttendanceRef, Checkin, CheckinId, CheckinRole,
    HikeId, MemberId, NameMatcher, Rsvp, RsvpEntry, RsvpId, RsvpOutcome, RsvpTarget, membership_key,
};
use trailcall_error::{AttendanceError, Entity, TrailcallResult};
use trailcall_interface::AttendanceStore;

/// Outcome of a bulk check-in: the rows recorded and the entries that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCheckin {
    /// Check-ins recorded or already present
    pub checkins: Vec<Checkin>,
    /// Entries that could not be recorded
    pub errors: Vec<BulkCheckinFailure>,
}

/// One rejected entry of a bulk check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCheckinFailure {
    /// The membership number as submitted
    pub membership_number: String,
    /// Why it was rejected
    pub reason: String,
}

/// The attendance record produced by checking in an RSVP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "record", rename_all = "snake_case")]
pub enum RsvpCheckin {
    /// A member RSVP: the check-in row now recorded for the member
    Member(Checkin),
    /// A guest RSVP: the RSVP with its check-in time set
    Guest(Rsvp),
}

/// Applies the attendance rules on top of an [`AttendanceStore`].
///
/// Every operation is a short independent step against the store; idempotency
/// comes from the store's insert-or-fetch and uniqueness rules, so no locking
/// happens here.
#[derive(Clone)]
pub struct ParticipationReconciler {
    store: Arc<dyn AttendanceStore>,
    policy: MatchPolicy,
}

impl ParticipationReconciler {
    /// Create a reconciler with the default [`MatchPolicy`].
    pub fn new(store: Arc<dyn AttendanceStore>) -> Self {
        Self {
            store,
            policy: MatchPolicy::default(),
        }
    }

    /// Replace the classification policy.
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active classification policy.
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    // ---- check-ins ----

    /// Record that the member holding `membership_number` attended the hike.
    ///
    /// Idempotent: a repeated call returns the existing check-in.
    ///
    /// # Errors
    ///
    /// Validation for a blank number, NotFound for an unknown hike or number.
    #[instrument(skip(self))]
    pub async fn record_checkin(
        &self,
        hike_id: HikeId,
        membership_number: &str,
    ) -> TrailcallResult<Checkin> {
        let number = membership_key(membership_number);
        if number.is_empty() {
            return Err(AttendanceError::validation("membership_number", "is required").into());
        }

        let member = self
            .store
            .find_member_by_number(number)
            .await?
            .ok_or_else(|| AttendanceError::not_found(Entity::Member, number))?;

        let checkin = self.store.insert_checkin_if_absent(hike_id, member.id).await?;
        info!(checkin_id = %checkin.id, member_id = %member.id, "Check-in recorded");
        Ok(checkin)
    }

    /// Record each membership number independently.
    ///
    /// A failing entry is reported in [`BulkCheckin::errors`] and does not stop
    /// the rest.
    #[instrument(skip(self, membership_numbers), fields(count = membership_numbers.len()))]
    pub async fn record_checkins(
        &self,
        hike_id: HikeId,
        membership_numbers: &[String],
    ) -> BulkCheckin {
        let mut result = BulkCheckin::default();
        for number in membership_numbers {
            match self.record_checkin(hike_id, number).await {
                Ok(checkin) => result.checkins.push(checkin),
                Err(e) => {
                    warn!(number = %number, error = %e, "Bulk check-in entry rejected");
                    result.errors.push(BulkCheckinFailure {
                        membership_number: number.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        result
    }

    /// Delete the member's check-in. Absent check-ins are not an error.
    #[instrument(skip(self))]
    pub async fn remove_checkin(&self, hike_id: HikeId, member_id: MemberId) -> TrailcallResult<()> {
        let removed = self.store.delete_checkin(hike_id, member_id).await?;
        debug!(removed, "Check-in removal");
        Ok(())
    }

    /// Check-ins of a hike, newest first.
    pub async fn list_checkins(&self, hike_id: HikeId) -> TrailcallResult<Vec<Checkin>> {
        self.store.get_hike(hike_id).await?;
        self.store.list_checkins(hike_id).await
    }

    /// Set or clear the leader or sweeper flag on a check-in.
    #[instrument(skip(self))]
    pub async fn set_checkin_role(
        &self,
        checkin_id: CheckinId,
        role: CheckinRole,
        value: bool,
    ) -> TrailcallResult<Checkin> {
        self.store.set_checkin_role(checkin_id, role, value).await
    }

    // ---- RSVPs ----

    /// Register a typed name for a hike.
    ///
    /// Closed registration, duplicates and successful registration are all
    /// returned as an [`RsvpOutcome`]; only lookups and store failures are
    /// errors.
    ///
    /// # Errors
    ///
    /// NotFound for an unknown hike, Validation for a blank name on a hike
    /// that is accepting RSVPs.
    #[instrument(skip(self))]
    pub async fn submit_rsvp(
        &self,
        hike_id: HikeId,
        first_name: &str,
        last_name: &str,
    ) -> TrailcallResult<RsvpOutcome> {
        let hike = self.store.get_hike(hike_id).await?;
        if !hike.is_rsvp_open() {
            warn!("RSVP rejected, registration closed");
            return Ok(RsvpOutcome::Closed);
        }

        if first_name.trim().is_empty() {
            return Err(AttendanceError::validation("first_name", "is required").into());
        }
        if last_name.trim().is_empty() {
            return Err(AttendanceError::validation("last_name", "is required").into());
        }

        let roster = self.store.list_members(true).await?;
        let candidate = NameMatcher::best_match(&roster, first_name, last_name);
        let threshold = *self.policy.member_threshold();

        let (target, display_name, member_number) = match candidate.member {
            Some(member) if candidate.is_confident(threshold) => (
                RsvpTarget::Member(member.id),
                member.full_name(),
                Some(member.membership_number.clone()),
            ),
            _ => {
                let guest = format!("{} {}", first_name.trim(), last_name.trim());
                (RsvpTarget::Guest(guest.clone()), guest, None)
            }
        };
        let is_guest = target.is_guest();
        debug!(score = candidate.score, threshold, is_guest, "Classified RSVP");

        match self.store.insert_rsvp(hike_id, &target).await {
            Ok(rsvp) => {
                info!(rsvp_id = %rsvp.id, is_guest, "RSVP created");
                Ok(RsvpOutcome::Confirmed {
                    rsvp_id: rsvp.id,
                    matched_name: display_name,
                    member_number,
                    is_guest,
                })
            }
            Err(e) if e.is_conflict() => {
                warn!(is_guest, "Duplicate RSVP");
                Ok(RsvpOutcome::AlreadyRegistered {
                    matched_name: (!is_guest).then_some(display_name),
                    member_number,
                    is_guest,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// RSVPs of a hike, with their checked-in state.
    pub async fn list_rsvps(&self, hike_id: HikeId) -> TrailcallResult<Vec<RsvpEntry>> {
        self.store.get_hike(hike_id).await?;
        self.store.list_rsvps(hike_id).await
    }

    /// Delete an RSVP and its activity participation.
    ///
    /// # Errors
    ///
    /// NotFound when the RSVP does not exist.
    #[instrument(skip(self))]
    pub async fn delete_rsvp(&self, rsvp_id: RsvpId) -> TrailcallResult<()> {
        if !self.store.delete_rsvp(rsvp_id).await? {
            return Err(AttendanceError::not_found(Entity::Rsvp, rsvp_id).into());
        }
        info!("RSVP deleted");
        Ok(())
    }

    /// Turn an RSVP into attendance.
    ///
    /// Member RSVPs get a check-in row (idempotently) and keep their own
    /// `checked_in_at` unset; guest RSVPs get `checked_in_at` set.
    #[instrument(skip(self))]
    pub async fn check_in_rsvp(&self, rsvp_id: RsvpId) -> TrailcallResult<RsvpCheckin> {
        let rsvp = self.store.get_rsvp(rsvp_id).await?;
        match rsvp.target {
            RsvpTarget::Member(member_id) => {
                let checkin = self
                    .store
                    .insert_checkin_if_absent(rsvp.hike_id, member_id)
                    .await?;
                info!(checkin_id = %checkin.id, "Member RSVP checked in");
                Ok(RsvpCheckin::Member(checkin))
            }
            RsvpTarget::Guest(_) => {
                let rsvp = self
                    .store
                    .set_rsvp_checked_in_at(rsvp_id, Some(Utc::now()))
                    .await?;
                info!("Guest RSVP checked in");
                Ok(RsvpCheckin::Guest(rsvp))
            }
        }
    }

    /// Reverse [`check_in_rsvp`](Self::check_in_rsvp).
    #[instrument(skip(self))]
    pub async fn undo_rsvp_checkin(&self, rsvp_id: RsvpId) -> TrailcallResult<()> {
        let rsvp = self.store.get_rsvp(rsvp_id).await?;
        match rsvp.target {
            RsvpTarget::Member(member_id) => {
                self.store.delete_checkin(rsvp.hike_id, member_id).await?;
            }
            RsvpTarget::Guest(_) => {
                self.store.set_rsvp_checked_in_at(rsvp_id, None).await?;
            }
        }
        info!("RSVP check-in undone");
        Ok(())
    }

    // ---- activities ----

    /// Add a named activity to a hike.
    ///
    /// # Errors
    ///
    /// Validation for a blank name, NotFound for an unknown hike.
    #[instrument(skip(self))]
    pub async fn create_activity(&self, hike_id: HikeId, name: &str) -> TrailcallResult<Activity> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AttendanceError::validation("name", "Activity name is required").into());
        }
        let activity = self.store.create_activity(hike_id, name).await?;
        info!(activity_id = %activity.id, "Activity created");
        Ok(activity)
    }

    /// Load an activity.
    pub async fn get_activity(&self, activity_id: ActivityId) -> TrailcallResult<Activity> {
        self.store.get_activity(activity_id).await
    }

    /// Activities of a hike by name.
    pub async fn list_activities(&self, hike_id: HikeId) -> TrailcallResult<Vec<Activity>> {
        self.store.get_hike(hike_id).await?;
        self.store.list_activities(hike_id).await
    }

    /// Delete an activity with its participants.
    ///
    /// # Errors
    ///
    /// NotFound when the activity does not exist.
    #[instrument(skip(self))]
    pub async fn delete_activity(&self, activity_id: ActivityId) -> TrailcallResult<()> {
        if !self.store.delete_activity(activity_id).await? {
            return Err(AttendanceError::not_found(Entity::Activity, activity_id).into());
        }
        info!("Activity deleted");
        Ok(())
    }

    /// Join a check-in or RSVP to an activity. Re-adding is a no-op.
    #[instrument(skip(self))]
    pub async fn add_participant(
        &self,
        activity_id: ActivityId,
        attendance: AttendanceRef,
    ) -> TrailcallResult<ActivityParticipant> {
        self.store.add_participant(activity_id, attendance).await
    }

    /// Remove a check-in or RSVP from an activity. Absent links are not an
    /// error.
    #[instrument(skip(self))]
    pub async fn remove_participant(
        &self,
        activity_id: ActivityId,
        attendance: AttendanceRef,
    ) -> TrailcallResult<()> {
        let removed = self.store.remove_participant(activity_id, attendance).await?;
        debug!(removed, "Participant removal");
        Ok(())
    }

    /// Participants of an activity by name.
    pub async fn list_participants(
        &self,
        activity_id: ActivityId,
    ) -> TrailcallResult<Vec<ActivityParticipant>> {
        self.store.list_participants(activity_id).await
    }
}
