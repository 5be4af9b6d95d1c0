//! In-memory implementation of AttendanceStore.
//!
//! Every table lives behind one `RwLock`, so each trait method is a single
//! atomic step and the uniqueness rules hold under concurrent callers exactly
//! as the SQL constraints do. All data is lost when the store is dropped.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use trailcall_core::{
    Activity, ActivityId, ActivityParticipant, AttendanceRecord, AttendanceRef, Checkin, CheckinId,
    CheckinRole, Hike, HikeId, HikeStatus, HikeUpdate, Member, MemberId, MemberUpdate, NewHike,
    NewMember, ParticipantId, Rsvp, RsvpEntry, RsvpId, RsvpTarget, membership_key,
};
use trailcall_error::{AttendanceError, Entity, TrailcallResult};
use trailcall_interface::AttendanceStore;

/// In-memory attendance store.
///
/// Used by the test suites and for trying the CLI without a database.
///
/// # Example
/// ```
/// use trailcall_attendance::InMemoryAttendanceStore;
/// use trailcall_core::NewMember;
/// use trailcall_interface::AttendanceStore;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = InMemoryAttendanceStore::new();
/// let new_member = NewMember::builder()
///     .membership_number("TC-001")
///     .first_name("Jane")
///     .last_name("Smith")
///     .build()
///     .unwrap();
/// let member = store.create_member(&new_member).await.unwrap();
/// assert!(member.active);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttendanceStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryAttendanceStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of check-in rows across all hikes (for testing).
    pub async fn checkin_count(&self) -> usize {
        self.tables.read().await.checkins.len()
    }

    /// Number of RSVP rows across all hikes (for testing).
    pub async fn rsvp_count(&self) -> usize {
        self.tables.read().await.rsvps.len()
    }

    /// Number of participant rows across all activities (for testing).
    pub async fn participant_count(&self) -> usize {
        self.tables.read().await.participants.len()
    }
}

#[derive(Debug, Clone)]
struct CheckinRow {
    id: CheckinId,
    hike_id: HikeId,
    member_id: MemberId,
    checked_in_at: DateTime<Utc>,
    is_leader: bool,
    is_sweeper: bool,
}

#[derive(Debug, Clone)]
struct ActivityRow {
    id: ActivityId,
    hike_id: HikeId,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct ParticipantRow {
    id: ParticipantId,
    activity_id: ActivityId,
    attendance: AttendanceRef,
}

#[derive(Debug, Default)]
struct Tables {
    members: BTreeMap<MemberId, Member>,
    hikes: BTreeMap<HikeId, Hike>,
    checkins: BTreeMap<CheckinId, CheckinRow>,
    rsvps: BTreeMap<RsvpId, Rsvp>,
    activities: BTreeMap<ActivityId, ActivityRow>,
    participants: BTreeMap<ParticipantId, ParticipantRow>,
    last_id: i64,
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn member(&self, id: MemberId) -> Result<&Member, AttendanceError> {
        self.members
            .get(&id)
            .ok_or_else(|| AttendanceError::not_found(Entity::Member, id))
    }

    fn member_mut(&mut self, id: MemberId) -> Result<&mut Member, AttendanceError> {
        self.members
            .get_mut(&id)
            .ok_or_else(|| AttendanceError::not_found(Entity::Member, id))
    }

    fn number_taken(&self, number: &str, except: Option<MemberId>) -> bool {
        self.members
            .values()
            .any(|m| m.membership_number == number && Some(m.id) != except)
    }

    fn hike(&self, id: HikeId) -> Result<Hike, AttendanceError> {
        self.hikes
            .get(&id)
            .map(|hike| self.with_counts(hike))
            .ok_or_else(|| AttendanceError::not_found(Entity::Hike, id))
    }

    fn hike_mut(&mut self, id: HikeId) -> Result<&mut Hike, AttendanceError> {
        self.hikes
            .get_mut(&id)
            .ok_or_else(|| AttendanceError::not_found(Entity::Hike, id))
    }

    fn with_counts(&self, hike: &Hike) -> Hike {
        let mut hike = hike.clone();
        hike.attendee_count = count(self.checkins.values().filter(|c| c.hike_id == hike.id).count());
        hike.rsvp_count = count(self.rsvps.values().filter(|r| r.hike_id == hike.id).count());
        hike
    }

    fn checkin(&self, row: &CheckinRow) -> Checkin {
        let member = self.members.get(&row.member_id);
        Checkin {
            id: row.id,
            hike_id: row.hike_id,
            member_id: row.member_id,
            checked_in_at: row.checked_in_at,
            is_leader: row.is_leader,
            is_sweeper: row.is_sweeper,
            member_name: member.map(Member::full_name).unwrap_or_default(),
            membership_number: member
                .map(|m| m.membership_number.clone())
                .unwrap_or_default(),
        }
    }

    fn find_checkin(&self, hike_id: HikeId, member_id: MemberId) -> Option<&CheckinRow> {
        self.checkins
            .values()
            .find(|c| c.hike_id == hike_id && c.member_id == member_id)
    }

    fn rsvp(&self, id: RsvpId) -> Result<&Rsvp, AttendanceError> {
        self.rsvps
            .get(&id)
            .ok_or_else(|| AttendanceError::not_found(Entity::Rsvp, id))
    }

    fn activity(&self, row: &ActivityRow) -> Activity {
        Activity {
            id: row.id,
            hike_id: row.hike_id,
            name: row.name.clone(),
            created_at: row.created_at,
            participant_count: count(
                self.participants
                    .values()
                    .filter(|p| p.activity_id == row.id)
                    .count(),
            ),
        }
    }

    fn activity_row(&self, id: ActivityId) -> Result<&ActivityRow, AttendanceError> {
        self.activities
            .get(&id)
            .ok_or_else(|| AttendanceError::not_found(Entity::Activity, id))
    }

    fn participant(&self, row: &ParticipantRow) -> ActivityParticipant {
        let member_fields = |member: Option<&Member>| {
            (
                member.map(Member::full_name).unwrap_or_default(),
                member.map(|m| m.membership_number.clone()),
                false,
            )
        };

        let (name, membership_number, is_guest) = match row.attendance {
            AttendanceRef::Checkin(id) => member_fields(
                self.checkins
                    .get(&id)
                    .and_then(|c| self.members.get(&c.member_id)),
            ),
            AttendanceRef::Rsvp(id) => match self.rsvps.get(&id).map(|r| &r.target) {
                Some(RsvpTarget::Member(member_id)) => member_fields(self.members.get(member_id)),
                Some(RsvpTarget::Guest(name)) => (name.clone(), None, true),
                None => (String::new(), None, false),
            },
        };

        ActivityParticipant {
            id: row.id,
            activity_id: row.activity_id,
            attendance: row.attendance,
            name,
            membership_number,
            is_guest,
        }
    }

    fn attendance_exists(&self, attendance: AttendanceRef) -> Result<(), AttendanceError> {
        match attendance {
            AttendanceRef::Checkin(id) if !self.checkins.contains_key(&id) => {
                Err(AttendanceError::not_found(Entity::Checkin, id))
            }
            AttendanceRef::Rsvp(id) if !self.rsvps.contains_key(&id) => {
                Err(AttendanceError::not_found(Entity::Rsvp, id))
            }
            _ => Ok(()),
        }
    }

    fn drop_participation(&mut self, attendance: AttendanceRef) {
        self.participants.retain(|_, p| p.attendance != attendance);
    }
}

#[async_trait]
impl AttendanceStore for InMemoryAttendanceStore {
    #[instrument(skip(self, new_member), fields(number = %new_member.membership_number))]
    async fn create_member(&self, new_member: &NewMember) -> TrailcallResult<Member> {
        let mut tables = self.tables.write().await;
        let number = new_member.membership_key();
        if tables.number_taken(number, None) {
            return Err(AttendanceError::conflict(Entity::Member, number).into());
        }

        let now = Utc::now();
        let member = Member {
            id: MemberId(tables.next_id()),
            membership_number: number.to_string(),
            first_name: new_member.first_name.clone(),
            last_name: new_member.last_name.clone(),
            email: new_member.email.clone(),
            phone: new_member.phone.clone(),
            active: true,
            created_at: now,
            updated_at: now,
        };
        tables.members.insert(member.id, member.clone());
        debug!(member_id = %member.id, "Stored member");
        Ok(member)
    }

    async fn list_members(&self, active_only: bool) -> TrailcallResult<Vec<Member>> {
        let tables = self.tables.read().await;
        let mut members: Vec<Member> = tables
            .members
            .values()
            .filter(|m| !active_only || m.active)
            .cloned()
            .collect();
        members.sort_by(|a, b| {
            (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
        });
        Ok(members)
    }

    async fn get_member(&self, id: MemberId) -> TrailcallResult<Member> {
        Ok(self.tables.read().await.member(id)?.clone())
    }

    async fn find_member_by_number(&self, number: &str) -> TrailcallResult<Option<Member>> {
        let number = membership_key(number);
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .values()
            .find(|m| m.membership_number == number)
            .cloned())
    }

    #[instrument(skip(self, update))]
    async fn update_member(&self, id: MemberId, update: &MemberUpdate) -> TrailcallResult<Member> {
        let mut tables = self.tables.write().await;
        if let Some(number) = update.membership_key()
            && tables.number_taken(number, Some(id))
        {
            return Err(AttendanceError::conflict(Entity::Member, number).into());
        }

        let member = tables.member_mut(id)?;
        update.apply_to(member);
        member.updated_at = Utc::now();
        Ok(member.clone())
    }

    #[instrument(skip(self))]
    async fn deactivate_member(&self, id: MemberId) -> TrailcallResult<Member> {
        let mut tables = self.tables.write().await;
        let member = tables.member_mut(id)?;
        member.active = false;
        member.updated_at = Utc::now();
        Ok(member.clone())
    }

    #[instrument(skip(self, new_hike), fields(name = %new_hike.name))]
    async fn create_hike(&self, new_hike: &NewHike) -> TrailcallResult<Hike> {
        let mut tables = self.tables.write().await;
        let hike = Hike {
            id: HikeId(tables.next_id()),
            name: new_hike.name.clone(),
            date: new_hike.date,
            location: new_hike.location.clone(),
            notes: new_hike.notes.clone(),
            status: HikeStatus::Open,
            rsvp_open: true,
            created_at: Utc::now(),
            attendee_count: 0,
            rsvp_count: 0,
        };
        tables.hikes.insert(hike.id, hike.clone());
        Ok(hike)
    }

    async fn list_hikes(&self) -> TrailcallResult<Vec<Hike>> {
        let tables = self.tables.read().await;
        let mut hikes: Vec<Hike> = tables.hikes.values().map(|h| tables.with_counts(h)).collect();
        hikes.sort_by(|a, b| {
            (b.date, b.created_at, b.id).cmp(&(a.date, a.created_at, a.id))
        });
        Ok(hikes)
    }

    async fn get_hike(&self, id: HikeId) -> TrailcallResult<Hike> {
        Ok(self.tables.read().await.hike(id)?)
    }

    async fn current_open_hike(&self) -> TrailcallResult<Option<Hike>> {
        let tables = self.tables.read().await;
        Ok(tables
            .hikes
            .values()
            .filter(|h| h.is_open())
            .max_by_key(|h| (h.created_at, h.id))
            .map(|h| tables.with_counts(h)))
    }

    #[instrument(skip(self, update))]
    async fn update_hike(&self, id: HikeId, update: &HikeUpdate) -> TrailcallResult<Hike> {
        let mut tables = self.tables.write().await;
        update.apply_to(tables.hike_mut(id)?);
        Ok(tables.hike(id)?)
    }

    #[instrument(skip(self))]
    async fn set_hike_status(&self, id: HikeId, status: HikeStatus) -> TrailcallResult<Hike> {
        let mut tables = self.tables.write().await;
        tables.hike_mut(id)?.status = status;
        Ok(tables.hike(id)?)
    }

    #[instrument(skip(self))]
    async fn set_rsvp_open(&self, id: HikeId, open: bool) -> TrailcallResult<Hike> {
        let mut tables = self.tables.write().await;
        tables.hike_mut(id)?.rsvp_open = open;
        Ok(tables.hike(id)?)
    }

    #[instrument(skip(self))]
    async fn insert_checkin_if_absent(
        &self,
        hike_id: HikeId,
        member_id: MemberId,
    ) -> TrailcallResult<Checkin> {
        let mut tables = self.tables.write().await;
        tables.hike(hike_id)?;
        tables.member(member_id)?;

        if let Some(existing) = tables.find_checkin(hike_id, member_id) {
            debug!(checkin_id = %existing.id, "Check-in already present");
            return Ok(tables.checkin(existing));
        }

        let row = CheckinRow {
            id: CheckinId(tables.next_id()),
            hike_id,
            member_id,
            checked_in_at: Utc::now(),
            is_leader: false,
            is_sweeper: false,
        };
        let checkin = tables.checkin(&row);
        tables.checkins.insert(row.id, row);
        Ok(checkin)
    }

    async fn get_checkin(&self, id: CheckinId) -> TrailcallResult<Checkin> {
        let tables = self.tables.read().await;
        let row = tables
            .checkins
            .get(&id)
            .ok_or_else(|| AttendanceError::not_found(Entity::Checkin, id))?;
        Ok(tables.checkin(row))
    }

    #[instrument(skip(self))]
    async fn delete_checkin(&self, hike_id: HikeId, member_id: MemberId) -> TrailcallResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(id) = tables.find_checkin(hike_id, member_id).map(|c| c.id) else {
            return Ok(false);
        };
        tables.checkins.remove(&id);
        tables.drop_participation(AttendanceRef::Checkin(id));
        Ok(true)
    }

    async fn list_checkins(&self, hike_id: HikeId) -> TrailcallResult<Vec<Checkin>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<&CheckinRow> = tables
            .checkins
            .values()
            .filter(|c| c.hike_id == hike_id)
            .collect();
        rows.sort_by(|a, b| (b.checked_in_at, b.id).cmp(&(a.checked_in_at, a.id)));
        Ok(rows.into_iter().map(|row| tables.checkin(row)).collect())
    }

    #[instrument(skip(self))]
    async fn set_checkin_role(
        &self,
        id: CheckinId,
        role: CheckinRole,
        value: bool,
    ) -> TrailcallResult<Checkin> {
        let mut tables = self.tables.write().await;
        let row = tables
            .checkins
            .get_mut(&id)
            .ok_or_else(|| AttendanceError::not_found(Entity::Checkin, id))?;
        match role {
            CheckinRole::Leader => row.is_leader = value,
            CheckinRole::Sweeper => row.is_sweeper = value,
        }
        let row = row.clone();
        Ok(tables.checkin(&row))
    }

    #[instrument(skip(self))]
    async fn insert_rsvp(&self, hike_id: HikeId, target: &RsvpTarget) -> TrailcallResult<Rsvp> {
        let mut tables = self.tables.write().await;
        tables.hike(hike_id)?;
        if let RsvpTarget::Member(member_id) = target {
            tables.member(*member_id)?;
        }

        if tables
            .rsvps
            .values()
            .any(|r| r.hike_id == hike_id && &r.target == target)
        {
            let key = match target {
                RsvpTarget::Member(id) => format!("hike {hike_id}, member {id}"),
                RsvpTarget::Guest(name) => format!("hike {hike_id}, guest {name}"),
            };
            return Err(AttendanceError::conflict(Entity::Rsvp, key).into());
        }

        let rsvp = Rsvp {
            id: RsvpId(tables.next_id()),
            hike_id,
            target: target.clone(),
            created_at: Utc::now(),
            checked_in_at: None,
        };
        tables.rsvps.insert(rsvp.id, rsvp.clone());
        Ok(rsvp)
    }

    async fn get_rsvp(&self, id: RsvpId) -> TrailcallResult<Rsvp> {
        Ok(self.tables.read().await.rsvp(id)?.clone())
    }

    async fn list_rsvps(&self, hike_id: HikeId) -> TrailcallResult<Vec<RsvpEntry>> {
        let tables = self.tables.read().await;
        let mut keyed: Vec<((String, String), RsvpEntry)> = tables
            .rsvps
            .values()
            .filter(|r| r.hike_id == hike_id)
            .map(|rsvp| {
                let (sort_key, display_name, membership_number, checked_in) = match &rsvp.target {
                    RsvpTarget::Member(member_id) => {
                        let member = tables.members.get(member_id);
                        (
                            member
                                .map(|m| (m.last_name.clone(), m.first_name.clone()))
                                .unwrap_or_default(),
                            member.map(Member::full_name).unwrap_or_default(),
                            member.map(|m| m.membership_number.clone()),
                            tables.find_checkin(hike_id, *member_id).is_some(),
                        )
                    }
                    RsvpTarget::Guest(name) => (
                        (name.clone(), String::new()),
                        name.clone(),
                        None,
                        rsvp.checked_in_at.is_some(),
                    ),
                };
                (
                    sort_key,
                    RsvpEntry {
                        rsvp: rsvp.clone(),
                        display_name,
                        membership_number,
                        checked_in,
                    },
                )
            })
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(keyed.into_iter().map(|(_, entry)| entry).collect())
    }

    #[instrument(skip(self))]
    async fn delete_rsvp(&self, id: RsvpId) -> TrailcallResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.rsvps.remove(&id).is_none() {
            return Ok(false);
        }
        tables.drop_participation(AttendanceRef::Rsvp(id));
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn set_rsvp_checked_in_at(
        &self,
        id: RsvpId,
        checked_in_at: Option<DateTime<Utc>>,
    ) -> TrailcallResult<Rsvp> {
        let mut tables = self.tables.write().await;
        let rsvp = tables
            .rsvps
            .get_mut(&id)
            .ok_or_else(|| AttendanceError::not_found(Entity::Rsvp, id))?;
        rsvp.checked_in_at = checked_in_at;
        Ok(rsvp.clone())
    }

    #[instrument(skip(self))]
    async fn create_activity(&self, hike_id: HikeId, name: &str) -> TrailcallResult<Activity> {
        let mut tables = self.tables.write().await;
        tables.hike(hike_id)?;
        let row = ActivityRow {
            id: ActivityId(tables.next_id()),
            hike_id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        let activity = tables.activity(&row);
        tables.activities.insert(row.id, row);
        Ok(activity)
    }

    async fn get_activity(&self, id: ActivityId) -> TrailcallResult<Activity> {
        let tables = self.tables.read().await;
        let row = tables.activity_row(id)?;
        Ok(tables.activity(row))
    }

    async fn list_activities(&self, hike_id: HikeId) -> TrailcallResult<Vec<Activity>> {
        let tables = self.tables.read().await;
        let mut activities: Vec<Activity> = tables
            .activities
            .values()
            .filter(|a| a.hike_id == hike_id)
            .map(|row| tables.activity(row))
            .collect();
        activities.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        Ok(activities)
    }

    #[instrument(skip(self))]
    async fn delete_activity(&self, id: ActivityId) -> TrailcallResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.activities.remove(&id).is_none() {
            return Ok(false);
        }
        tables.participants.retain(|_, p| p.activity_id != id);
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn add_participant(
        &self,
        activity_id: ActivityId,
        attendance: AttendanceRef,
    ) -> TrailcallResult<ActivityParticipant> {
        let mut tables = self.tables.write().await;
        tables.activity_row(activity_id)?;
        tables.attendance_exists(attendance)?;

        if let Some(existing) = tables
            .participants
            .values()
            .find(|p| p.activity_id == activity_id && p.attendance == attendance)
        {
            return Ok(tables.participant(existing));
        }

        let row = ParticipantRow {
            id: ParticipantId(tables.next_id()),
            activity_id,
            attendance,
        };
        let participant = tables.participant(&row);
        tables.participants.insert(row.id, row);
        Ok(participant)
    }

    #[instrument(skip(self))]
    async fn remove_participant(
        &self,
        activity_id: ActivityId,
        attendance: AttendanceRef,
    ) -> TrailcallResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.participants.len();
        tables
            .participants
            .retain(|_, p| !(p.activity_id == activity_id && p.attendance == attendance));
        Ok(tables.participants.len() < before)
    }

    async fn list_participants(
        &self,
        activity_id: ActivityId,
    ) -> TrailcallResult<Vec<ActivityParticipant>> {
        let tables = self.tables.read().await;
        tables.activity_row(activity_id)?;
        let mut participants: Vec<ActivityParticipant> = tables
            .participants
            .values()
            .filter(|p| p.activity_id == activity_id)
            .map(|row| tables.participant(row))
            .collect();
        participants.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        Ok(participants)
    }

    async fn activities_for(&self, attendance: AttendanceRef) -> TrailcallResult<Vec<String>> {
        let tables = self.tables.read().await;
        let mut names: Vec<String> = tables
            .participants
            .values()
            .filter(|p| p.attendance == attendance)
            .filter_map(|p| tables.activities.get(&p.activity_id))
            .map(|a| a.name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn attendees_for_hike(&self, hike_id: HikeId) -> TrailcallResult<Vec<Member>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<&CheckinRow> = tables
            .checkins
            .values()
            .filter(|c| c.hike_id == hike_id)
            .collect();
        rows.sort_by(|a, b| (b.checked_in_at, b.id).cmp(&(a.checked_in_at, a.id)));
        Ok(rows
            .into_iter()
            .filter_map(|row| tables.members.get(&row.member_id).cloned())
            .collect())
    }

    async fn member_history(&self, member_id: MemberId) -> TrailcallResult<Vec<Hike>> {
        let tables = self.tables.read().await;
        let mut hikes: Vec<Hike> = tables
            .checkins
            .values()
            .filter(|c| c.member_id == member_id)
            .filter_map(|c| tables.hikes.get(&c.hike_id))
            .map(|h| tables.with_counts(h))
            .collect();
        hikes.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));
        Ok(hikes)
    }

    async fn attendance_for_year(&self, year: i32) -> TrailcallResult<Vec<AttendanceRecord>> {
        let tables = self.tables.read().await;
        let mut records: Vec<AttendanceRecord> = tables
            .checkins
            .values()
            .filter_map(|c| {
                let hike = tables.hikes.get(&c.hike_id)?;
                let member = tables.members.get(&c.member_id)?;
                (hike.date.year() == year).then(|| AttendanceRecord {
                    checkin_id: c.id,
                    hike_date: hike.date,
                    hike_name: hike.name.clone(),
                    hike_location: hike.location.clone(),
                    membership_number: member.membership_number.clone(),
                    first_name: member.first_name.clone(),
                    last_name: member.last_name.clone(),
                    checked_in_at: c.checked_in_at,
                    activities: Vec::new(),
                })
            })
            .collect();
        records.sort_by(|a, b| {
            (a.hike_date, &a.hike_name, &a.last_name, &a.first_name).cmp(&(
                b.hike_date,
                &b.hike_name,
                &b.last_name,
                &b.first_name,
            ))
        });
        Ok(records)
    }
}
