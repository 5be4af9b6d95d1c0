//! Read-side attendance views.

use std::sync::Arc;
use tracing::{debug, instrument};
use trailcall_core::{
    AttendanceRecord, AttendanceRef, Attendee, AttendeeSource, HikeDetail, HikeId, MemberHistory,
    MemberId, RsvpTarget,
};
use trailcall_error::TrailcallResult;
use trailcall_interface::AttendanceStore;

/// Builds attendance histories, sheets and roll-ups.
#[derive(Clone)]
pub struct AttendanceReports {
    store: Arc<dyn AttendanceStore>,
}

impl AttendanceReports {
    /// Create a report builder over `store`.
    pub fn new(store: Arc<dyn AttendanceStore>) -> Self {
        Self { store }
    }

    /// The hikes a member checked in to, newest first.
    #[instrument(skip(self))]
    pub async fn member_history(&self, member_id: MemberId) -> TrailcallResult<MemberHistory> {
        let member = self.store.get_member(member_id).await?;
        let hikes = self.store.member_history(member_id).await?;
        Ok(MemberHistory { member, hikes })
    }

    /// A hike with its checked-in members.
    #[instrument(skip(self))]
    pub async fn hike_detail(&self, hike_id: HikeId) -> TrailcallResult<HikeDetail> {
        let hike = self.store.get_hike(hike_id).await?;
        let attendees = self.store.attendees_for_hike(hike_id).await?;
        Ok(HikeDetail { hike, attendees })
    }

    /// Everyone who attended a hike: checked-in members with their roles,
    /// then checked-in guests, each with the activities they joined.
    #[instrument(skip(self))]
    pub async fn hike_attendance(&self, hike_id: HikeId) -> TrailcallResult<Vec<Attendee>> {
        self.store.get_hike(hike_id).await?;

        let mut sheet = Vec::new();
        for checkin in self.store.list_checkins(hike_id).await? {
            let activities = self
                .store
                .activities_for(AttendanceRef::Checkin(checkin.id))
                .await?;
            sheet.push(Attendee {
                source: AttendeeSource::Member(checkin.id),
                member_id: Some(checkin.member_id),
                name: checkin.member_name,
                membership_number: Some(checkin.membership_number),
                is_leader: checkin.is_leader,
                is_sweeper: checkin.is_sweeper,
                activities,
            });
        }

        for entry in self.store.list_rsvps(hike_id).await? {
            let RsvpTarget::Guest(name) = &entry.rsvp.target else {
                continue;
            };
            if entry.rsvp.checked_in_at.is_none() {
                continue;
            }
            let activities = self
                .store
                .activities_for(AttendanceRef::Rsvp(entry.rsvp.id))
                .await?;
            sheet.push(Attendee {
                source: AttendeeSource::Guest(entry.rsvp.id),
                member_id: None,
                name: name.clone(),
                membership_number: None,
                is_leader: false,
                is_sweeper: false,
                activities,
            });
        }

        debug!(attendees = sheet.len(), "Built attendance sheet");
        Ok(sheet)
    }

    /// Every member check-in on hikes dated in `year`, with activities.
    #[instrument(skip(self))]
    pub async fn attendance_for_year(&self, year: i32) -> TrailcallResult<Vec<AttendanceRecord>> {
        let mut records = self.store.attendance_for_year(year).await?;
        for record in &mut records {
            record.activities = self
                .store
                .activities_for(AttendanceRef::Checkin(record.checkin_id))
                .await?;
        }
        debug!(records = records.len(), "Built year roll-up");
        Ok(records)
    }
}
