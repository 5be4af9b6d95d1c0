use super::{checkins as checkin_queries, db, hikes, rsvps as rsvp_queries, to_count};
use crate::models::{ActivityRow, MemberRow, NewActivityRow, NewParticipantRow, ParticipantRow};
use crate::schema::{activities, activity_participants, checkins, members, rsvps};
use diesel::dsl::count_star;
use diesel::prelude::*;
use std::collections::HashMap;
use trailcall_core::{Activity, ActivityId, ActivityParticipant, AttendanceRef, HikeId};
use trailcall_error::{AttendanceError, Entity, TrailcallResult};

fn participant_counts(
    conn: &mut PgConnection,
    activity_ids: &[i64],
) -> TrailcallResult<HashMap<i64, i64>> {
    Ok(activity_participants::table
        .filter(activity_participants::activity_id.eq_any(activity_ids))
        .group_by(activity_participants::activity_id)
        .select((activity_participants::activity_id, count_star()))
        .load::<(i64, i64)>(conn)
        .map_err(db)?
        .into_iter()
        .collect())
}

fn get_row(conn: &mut PgConnection, id: ActivityId) -> TrailcallResult<ActivityRow> {
    activities::table
        .find(id.get())
        .select(ActivityRow::as_select())
        .first(conn)
        .optional()
        .map_err(db)?
        .ok_or_else(|| AttendanceError::not_found(Entity::Activity, id).into())
}

pub(crate) fn create(conn: &mut PgConnection, hike_id: HikeId, name: &str) -> TrailcallResult<Activity> {
    hikes::get_row(conn, hike_id)?;
    let row = diesel::insert_into(activities::table)
        .values(NewActivityRow {
            hike_id: hike_id.get(),
            name,
        })
        .returning(ActivityRow::as_returning())
        .get_result(conn)
        .map_err(db)?;
    Ok(row.into_activity(0))
}

pub(crate) fn get(conn: &mut PgConnection, id: ActivityId) -> TrailcallResult<Activity> {
    let row = get_row(conn, id)?;
    let counts = participant_counts(conn, &[row.id])?;
    let count = to_count(counts.get(&row.id).copied().unwrap_or(0));
    Ok(row.into_activity(count))
}

pub(crate) fn list(conn: &mut PgConnection, hike_id: HikeId) -> TrailcallResult<Vec<Activity>> {
    let rows = activities::table
        .filter(activities::hike_id.eq(hike_id.get()))
        .order((activities::name.asc(), activities::id.asc()))
        .select(ActivityRow::as_select())
        .load(conn)
        .map_err(db)?;
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let counts = participant_counts(conn, &ids)?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let count = to_count(counts.get(&row.id).copied().unwrap_or(0));
            row.into_activity(count)
        })
        .collect())
}

/// Participant rows go with the activity through `ON DELETE CASCADE`.
pub(crate) fn delete(conn: &mut PgConnection, id: ActivityId) -> TrailcallResult<bool> {
    let deleted = diesel::delete(activities::table.find(id.get()))
        .execute(conn)
        .map_err(db)?;
    Ok(deleted > 0)
}

fn ensure_attendance(conn: &mut PgConnection, attendance: AttendanceRef) -> TrailcallResult<()> {
    match attendance {
        AttendanceRef::Checkin(id) => checkin_queries::get(conn, id).map(|_| ()),
        AttendanceRef::Rsvp(id) => rsvp_queries::get(conn, id).map(|_| ()),
    }
}

fn find_participant(
    conn: &mut PgConnection,
    activity_id: ActivityId,
    attendance: AttendanceRef,
) -> TrailcallResult<Option<ParticipantRow>> {
    let query = activity_participants::table
        .filter(activity_participants::activity_id.eq(activity_id.get()))
        .select(ParticipantRow::as_select())
        .into_boxed();
    let query = match attendance {
        AttendanceRef::Checkin(id) => query.filter(activity_participants::checkin_id.eq(id.get())),
        AttendanceRef::Rsvp(id) => query.filter(activity_participants::rsvp_id.eq(id.get())),
    };
    query.first(conn).optional().map_err(db)
}

/// Link an attendance record to an activity; linking twice returns the existing row.
pub(crate) fn add_participant(
    conn: &mut PgConnection,
    activity_id: ActivityId,
    attendance: AttendanceRef,
) -> TrailcallResult<ActivityParticipant> {
    get_row(conn, activity_id)?;
    ensure_attendance(conn, attendance)?;

    diesel::insert_into(activity_participants::table)
        .values(NewParticipantRow::new(activity_id, attendance))
        .on_conflict_do_nothing()
        .execute(conn)
        .map_err(db)?;

    let row = find_participant(conn, activity_id, attendance)?
        .ok_or_else(|| AttendanceError::not_found(Entity::Participant, activity_id))?;
    describe(conn, vec![row])?
        .pop()
        .ok_or_else(|| AttendanceError::not_found(Entity::Participant, activity_id).into())
}

pub(crate) fn remove_participant(
    conn: &mut PgConnection,
    activity_id: ActivityId,
    attendance: AttendanceRef,
) -> TrailcallResult<bool> {
    let scope = activity_participants::table
        .filter(activity_participants::activity_id.eq(activity_id.get()));
    let deleted = match attendance {
        AttendanceRef::Checkin(id) => {
            diesel::delete(scope.filter(activity_participants::checkin_id.eq(id.get())))
                .execute(conn)
        }
        AttendanceRef::Rsvp(id) => {
            diesel::delete(scope.filter(activity_participants::rsvp_id.eq(id.get()))).execute(conn)
        }
    }
    .map_err(db)?;
    Ok(deleted > 0)
}

pub(crate) fn list_participants(
    conn: &mut PgConnection,
    activity_id: ActivityId,
) -> TrailcallResult<Vec<ActivityParticipant>> {
    get_row(conn, activity_id)?;
    let rows = activity_participants::table
        .filter(activity_participants::activity_id.eq(activity_id.get()))
        .select(ParticipantRow::as_select())
        .load(conn)
        .map_err(db)?;
    let mut participants = describe(conn, rows)?;
    participants.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
    Ok(participants)
}

/// Names of the activities an attendance record joined, alphabetical.
pub(crate) fn activities_for(
    conn: &mut PgConnection,
    attendance: AttendanceRef,
) -> TrailcallResult<Vec<String>> {
    let query = activities::table
        .inner_join(activity_participants::table)
        .select(activities::name)
        .order(activities::name.asc())
        .into_boxed();
    let query = match attendance {
        AttendanceRef::Checkin(id) => query.filter(activity_participants::checkin_id.eq(id.get())),
        AttendanceRef::Rsvp(id) => query.filter(activity_participants::rsvp_id.eq(id.get())),
    };
    query.load::<String>(conn).map_err(db)
}

/// Resolve display names: check-ins through their member, RSVPs through
/// their member or guest name.
fn describe(
    conn: &mut PgConnection,
    rows: Vec<ParticipantRow>,
) -> TrailcallResult<Vec<ActivityParticipant>> {
    let checkin_ids: Vec<i64> = rows.iter().filter_map(|row| row.checkin_id).collect();
    let rsvp_ids: Vec<i64> = rows.iter().filter_map(|row| row.rsvp_id).collect();

    let checkin_members: HashMap<i64, MemberRow> = checkins::table
        .inner_join(members::table)
        .filter(checkins::id.eq_any(&checkin_ids))
        .select((checkins::id, members::all_columns))
        .load::<(i64, MemberRow)>(conn)
        .map_err(db)?
        .into_iter()
        .collect();
    let rsvp_targets: HashMap<i64, (Option<String>, Option<MemberRow>)> = rsvps::table
        .left_join(members::table)
        .filter(rsvps::id.eq_any(&rsvp_ids))
        .select((rsvps::id, rsvps::guest_name, members::all_columns.nullable()))
        .load::<(i64, Option<String>, Option<MemberRow>)>(conn)
        .map_err(db)?
        .into_iter()
        .map(|(id, guest, member)| (id, (guest, member)))
        .collect();

    let member_fields = |member: Option<&MemberRow>| {
        (
            member.map(MemberRow::full_name).unwrap_or_default(),
            member.map(|m| m.membership_number.clone()),
            false,
        )
    };

    rows.into_iter()
        .map(|row| -> TrailcallResult<ActivityParticipant> {
            let attendance = row.attendance()?;
            let (name, membership_number, is_guest) = match attendance {
                AttendanceRef::Checkin(id) => member_fields(checkin_members.get(&id.get())),
                AttendanceRef::Rsvp(id) => match rsvp_targets.get(&id.get()) {
                    Some((Some(guest), _)) => (guest.clone(), None, true),
                    Some((None, member)) => member_fields(member.as_ref()),
                    None => (String::new(), None, false),
                },
            };
            Ok(ActivityParticipant {
                id: row.participant_id(),
                activity_id: ActivityId(row.activity_id),
                attendance,
                name,
                membership_number,
                is_guest,
            })
        })
        .collect()
}
