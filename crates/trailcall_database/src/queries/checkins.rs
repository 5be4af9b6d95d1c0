use super::{db, hikes, members};
use crate::models::{CheckinRow, MemberRow, NewCheckinRow};
use crate::schema::{checkins, members as member_table};
use diesel::prelude::*;
use trailcall_core::{Checkin, CheckinId, CheckinRole, HikeId, MemberId};
use trailcall_error::{AttendanceError, Entity, TrailcallResult};

fn find(
    conn: &mut PgConnection,
    hike_id: HikeId,
    member_id: MemberId,
) -> TrailcallResult<Option<Checkin>> {
    let row = checkins::table
        .inner_join(member_table::table)
        .filter(checkins::hike_id.eq(hike_id.get()))
        .filter(checkins::member_id.eq(member_id.get()))
        .select((CheckinRow::as_select(), MemberRow::as_select()))
        .first::<(CheckinRow, MemberRow)>(conn)
        .optional()
        .map_err(db)?;
    Ok(row.map(|(checkin, member)| checkin.into_checkin(&member)))
}

/// Insert unless a row already exists, then read back whichever row won.
pub(crate) fn insert_if_absent(
    conn: &mut PgConnection,
    hike_id: HikeId,
    member_id: MemberId,
) -> TrailcallResult<Checkin> {
    hikes::get_row(conn, hike_id)?;
    members::get_row(conn, member_id)?;

    diesel::insert_into(checkins::table)
        .values(NewCheckinRow {
            hike_id: hike_id.get(),
            member_id: member_id.get(),
        })
        .on_conflict((checkins::hike_id, checkins::member_id))
        .do_nothing()
        .execute(conn)
        .map_err(db)?;

    find(conn, hike_id, member_id)?.ok_or_else(|| {
        AttendanceError::not_found(Entity::Checkin, format!("hike {hike_id}, member {member_id}"))
            .into()
    })
}

pub(crate) fn get(conn: &mut PgConnection, id: CheckinId) -> TrailcallResult<Checkin> {
    let row = checkins::table
        .inner_join(member_table::table)
        .filter(checkins::id.eq(id.get()))
        .select((CheckinRow::as_select(), MemberRow::as_select()))
        .first::<(CheckinRow, MemberRow)>(conn)
        .optional()
        .map_err(db)?;
    row.map(|(checkin, member)| checkin.into_checkin(&member))
        .ok_or_else(|| AttendanceError::not_found(Entity::Checkin, id).into())
}

/// Participant rows go with the check-in through `ON DELETE CASCADE`.
pub(crate) fn delete(
    conn: &mut PgConnection,
    hike_id: HikeId,
    member_id: MemberId,
) -> TrailcallResult<bool> {
    let deleted = diesel::delete(
        checkins::table
            .filter(checkins::hike_id.eq(hike_id.get()))
            .filter(checkins::member_id.eq(member_id.get())),
    )
    .execute(conn)
    .map_err(db)?;
    Ok(deleted > 0)
}

pub(crate) fn list(conn: &mut PgConnection, hike_id: HikeId) -> TrailcallResult<Vec<Checkin>> {
    let rows = checkins::table
        .inner_join(member_table::table)
        .filter(checkins::hike_id.eq(hike_id.get()))
        .order((checkins::checked_in_at.desc(), checkins::id.desc()))
        .select((CheckinRow::as_select(), MemberRow::as_select()))
        .load::<(CheckinRow, MemberRow)>(conn)
        .map_err(db)?;
    Ok(rows
        .into_iter()
        .map(|(checkin, member)| checkin.into_checkin(&member))
        .collect())
}

pub(crate) fn set_role(
    conn: &mut PgConnection,
    id: CheckinId,
    role: CheckinRole,
    value: bool,
) -> TrailcallResult<Checkin> {
    let target = checkins::table.find(id.get());
    let updated = match role {
        CheckinRole::Leader => diesel::update(target)
            .set(checkins::is_leader.eq(value))
            .execute(conn),
        CheckinRole::Sweeper => diesel::update(target)
            .set(checkins::is_sweeper.eq(value))
            .execute(conn),
    }
    .map_err(db)?;
    if updated == 0 {
        return Err(AttendanceError::not_found(Entity::Checkin, id).into());
    }
    get(conn, id)
}
