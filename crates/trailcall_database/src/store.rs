//! AttendanceStore trait implementation.
//!
//! Each call checks a connection out of the pool on a blocking thread and runs
//! one query function from [`crate::queries`].

use crate::PgPool;
use crate::queries::{activities, checkins, hikes, members, reports, rsvps};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use tracing::instrument;
use trailcall_core::{
    Activity, ActivityId, ActivityParticipant, AttendanceRecord, AttendanceRef, Checkin,
    CheckinId, CheckinRole, Hike, HikeId, HikeStatus, HikeUpdate, Member, MemberId, MemberUpdate,
    NewHike, NewMember, Rsvp, RsvpEntry, RsvpId, RsvpTarget,
};
use trailcall_error::{DatabaseError, DatabaseErrorKind, TrailcallResult};
use trailcall_interface::AttendanceStore;

/// PostgreSQL-backed attendance store.
#[derive(Clone)]
pub struct PostgresAttendanceStore {
    pool: PgPool,
}

impl PostgresAttendanceStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn run<T, F>(&self, query: F) -> TrailcallResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TrailcallResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;
            query(&mut *conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?
    }
}

#[async_trait]
impl AttendanceStore for PostgresAttendanceStore {
    #[instrument(skip(self, new_member), fields(number = %new_member.membership_number))]
    async fn create_member(&self, new_member: &NewMember) -> TrailcallResult<Member> {
        let new_member = new_member.clone();
        self.run(move |conn| members::create(conn, &new_member)).await
    }

    async fn list_members(&self, active_only: bool) -> TrailcallResult<Vec<Member>> {
        self.run(move |conn| members::list(conn, active_only)).await
    }

    async fn get_member(&self, id: MemberId) -> TrailcallResult<Member> {
        self.run(move |conn| members::get(conn, id)).await
    }

    async fn find_member_by_number(&self, number: &str) -> TrailcallResult<Option<Member>> {
        let number = number.to_string();
        self.run(move |conn| members::find_by_number(conn, &number))
            .await
    }

    #[instrument(skip(self, update))]
    async fn update_member(&self, id: MemberId, update: &MemberUpdate) -> TrailcallResult<Member> {
        let update = update.clone();
        self.run(move |conn| members::update(conn, id, &update)).await
    }

    #[instrument(skip(self))]
    async fn deactivate_member(&self, id: MemberId) -> TrailcallResult<Member> {
        self.run(move |conn| members::deactivate(conn, id)).await
    }

    #[instrument(skip(self, new_hike), fields(name = %new_hike.name, date = %new_hike.date))]
    async fn create_hike(&self, new_hike: &NewHike) -> TrailcallResult<Hike> {
        let new_hike = new_hike.clone();
        self.run(move |conn| hikes::create(conn, &new_hike)).await
    }

    async fn list_hikes(&self) -> TrailcallResult<Vec<Hike>> {
        self.run(hikes::list).await
    }

    async fn get_hike(&self, id: HikeId) -> TrailcallResult<Hike> {
        self.run(move |conn| hikes::get(conn, id)).await
    }

    async fn current_open_hike(&self) -> TrailcallResult<Option<Hike>> {
        self.run(hikes::current_open).await
    }

    #[instrument(skip(self, update))]
    async fn update_hike(&self, id: HikeId, update: &HikeUpdate) -> TrailcallResult<Hike> {
        let update = update.clone();
        self.run(move |conn| hikes::update(conn, id, &update)).await
    }

    #[instrument(skip(self))]
    async fn set_hike_status(&self, id: HikeId, status: HikeStatus) -> TrailcallResult<Hike> {
        self.run(move |conn| hikes::set_status(conn, id, status))
            .await
    }

    #[instrument(skip(self))]
    async fn set_rsvp_open(&self, id: HikeId, open: bool) -> TrailcallResult<Hike> {
        self.run(move |conn| hikes::set_rsvp_open(conn, id, open))
            .await
    }

    #[instrument(skip(self))]
    async fn insert_checkin_if_absent(
        &self,
        hike_id: HikeId,
        member_id: MemberId,
    ) -> TrailcallResult<Checkin> {
        self.run(move |conn| checkins::insert_if_absent(conn, hike_id, member_id))
            .await
    }

    async fn get_checkin(&self, id: CheckinId) -> TrailcallResult<Checkin> {
        self.run(move |conn| checkins::get(conn, id)).await
    }

    #[instrument(skip(self))]
    async fn delete_checkin(&self, hike_id: HikeId, member_id: MemberId) -> TrailcallResult<bool> {
        self.run(move |conn| checkins::delete(conn, hike_id, member_id))
            .await
    }

    async fn list_checkins(&self, hike_id: HikeId) -> TrailcallResult<Vec<Checkin>> {
        self.run(move |conn| checkins::list(conn, hike_id)).await
    }

    #[instrument(skip(self))]
    async fn set_checkin_role(
        &self,
        id: CheckinId,
        role: CheckinRole,
        value: bool,
    ) -> TrailcallResult<Checkin> {
        self.run(move |conn| checkins::set_role(conn, id, role, value))
            .await
    }

    #[instrument(skip(self))]
    async fn insert_rsvp(&self, hike_id: HikeId, target: &RsvpTarget) -> TrailcallResult<Rsvp> {
        let target = target.clone();
        self.run(move |conn| rsvps::insert(conn, hike_id, &target))
            .await
    }

    async fn get_rsvp(&self, id: RsvpId) -> TrailcallResult<Rsvp> {
        self.run(move |conn| rsvps::get(conn, id)).await
    }

    async fn list_rsvps(&self, hike_id: HikeId) -> TrailcallResult<Vec<RsvpEntry>> {
        self.run(move |conn| rsvps::list(conn, hike_id)).await
    }

    #[instrument(skip(self))]
    async fn delete_rsvp(&self, id: RsvpId) -> TrailcallResult<bool> {
        self.run(move |conn| rsvps::delete(conn, id)).await
    }

    #[instrument(skip(self))]
    async fn set_rsvp_checked_in_at(
        &self,
        id: RsvpId,
        at: Option<DateTime<Utc>>,
    ) -> TrailcallResult<Rsvp> {
        self.run(move |conn| rsvps::set_checked_in_at(conn, id, at))
            .await
    }

    #[instrument(skip(self))]
    async fn create_activity(&self, hike_id: HikeId, name: &str) -> TrailcallResult<Activity> {
        let name = name.to_string();
        self.run(move |conn| activities::create(conn, hike_id, &name))
            .await
    }

    async fn get_activity(&self, id: ActivityId) -> TrailcallResult<Activity> {
        self.run(move |conn| activities::get(conn, id)).await
    }

    async fn list_activities(&self, hike_id: HikeId) -> TrailcallResult<Vec<Activity>> {
        self.run(move |conn| activities::list(conn, hike_id)).await
    }

    #[instrument(skip(self))]
    async fn delete_activity(&self, id: ActivityId) -> TrailcallResult<bool> {
        self.run(move |conn| activities::delete(conn, id)).await
    }

    #[instrument(skip(self))]
    async fn add_participant(
        &self,
        activity_id: ActivityId,
        attendance: AttendanceRef,
    ) -> TrailcallResult<ActivityParticipant> {
        self.run(move |conn| activities::add_participant(conn, activity_id, attendance))
            .await
    }

    #[instrument(skip(self))]
    async fn remove_participant(
        &self,
        activity_id: ActivityId,
        attendance: AttendanceRef,
    ) -> TrailcallResult<bool> {
        self.run(move |conn| activities::remove_participant(conn, activity_id, attendance))
            .await
    }

    async fn list_participants(
        &self,
        activity_id: ActivityId,
    ) -> TrailcallResult<Vec<ActivityParticipant>> {
        self.run(move |conn| activities::list_participants(conn, activity_id))
            .await
    }

    async fn activities_for(&self, attendance: AttendanceRef) -> TrailcallResult<Vec<String>> {
        self.run(move |conn| activities::activities_for(conn, attendance))
            .await
    }

    async fn attendees_for_hike(&self, hike_id: HikeId) -> TrailcallResult<Vec<Member>> {
        self.run(move |conn| reports::attendees_for_hike(conn, hike_id))
            .await
    }

    async fn member_history(&self, member_id: MemberId) -> TrailcallResult<Vec<Hike>> {
        self.run(move |conn| reports::member_history(conn, member_id))
            .await
    }

    #[instrument(skip(self))]
    async fn attendance_for_year(&self, year: i32) -> TrailcallResult<Vec<AttendanceRecord>> {
        self.run(move |conn| reports::attendance_for_year(conn, year))
            .await
    }
}
