use super::{db, to_count};
use crate::models::{HikeChangeset, HikeRow, NewHikeRow};
use crate::schema::{checkins, hikes, rsvps};
use diesel::dsl::count_star;
use diesel::prelude::*;
use std::collections::HashMap;
use trailcall_core::{Hike, HikeId, HikeStatus, HikeUpdate, NewHike};
use trailcall_error::{AttendanceError, Entity, TrailcallError, TrailcallResult};

/// Attach attendee and RSVP counts to hike rows, keeping their order.
pub(crate) fn with_counts(conn: &mut PgConnection, rows: Vec<HikeRow>) -> TrailcallResult<Vec<Hike>> {
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

    let attendees: HashMap<i64, i64> = checkins::table
        .filter(checkins::hike_id.eq_any(&ids))
        .group_by(checkins::hike_id)
        .select((checkins::hike_id, count_star()))
        .load::<(i64, i64)>(conn)
        .map_err(db)?
        .into_iter()
        .collect();
    let registrations: HashMap<i64, i64> = rsvps::table
        .filter(rsvps::hike_id.eq_any(&ids))
        .group_by(rsvps::hike_id)
        .select((rsvps::hike_id, count_star()))
        .load::<(i64, i64)>(conn)
        .map_err(db)?
        .into_iter()
        .collect();

    rows.into_iter()
        .map(|row| {
            let attendee_count = to_count(attendees.get(&row.id).copied().unwrap_or(0));
            let rsvp_count = to_count(registrations.get(&row.id).copied().unwrap_or(0));
            row.into_hike(attendee_count, rsvp_count)
                .map_err(TrailcallError::from)
        })
        .collect()
}

fn single(conn: &mut PgConnection, row: HikeRow) -> TrailcallResult<Hike> {
    let id = row.id;
    with_counts(conn, vec![row])?
        .pop()
        .ok_or_else(|| AttendanceError::not_found(Entity::Hike, id).into())
}

pub(crate) fn create(conn: &mut PgConnection, new_hike: &NewHike) -> TrailcallResult<Hike> {
    let row = diesel::insert_into(hikes::table)
        .values(NewHikeRow::from(new_hike))
        .returning(HikeRow::as_returning())
        .get_result(conn)
        .map_err(db)?;
    Ok(row.into_hike(0, 0)?)
}

pub(crate) fn list(conn: &mut PgConnection) -> TrailcallResult<Vec<Hike>> {
    let rows = hikes::table
        .order((hikes::date.desc(), hikes::created_at.desc(), hikes::id.desc()))
        .select(HikeRow::as_select())
        .load(conn)
        .map_err(db)?;
    with_counts(conn, rows)
}

pub(crate) fn get_row(conn: &mut PgConnection, id: HikeId) -> TrailcallResult<HikeRow> {
    hikes::table
        .find(id.get())
        .select(HikeRow::as_select())
        .first(conn)
        .optional()
        .map_err(db)?
        .ok_or_else(|| AttendanceError::not_found(Entity::Hike, id).into())
}

pub(crate) fn get(conn: &mut PgConnection, id: HikeId) -> TrailcallResult<Hike> {
    let row = get_row(conn, id)?;
    single(conn, row)
}

pub(crate) fn current_open(conn: &mut PgConnection) -> TrailcallResult<Option<Hike>> {
    let row = hikes::table
        .filter(hikes::status.eq(HikeStatus::Open.as_ref()))
        .order((hikes::created_at.desc(), hikes::id.desc()))
        .select(HikeRow::as_select())
        .first(conn)
        .optional()
        .map_err(db)?;
    row.map(|row| single(conn, row)).transpose()
}

pub(crate) fn update(
    conn: &mut PgConnection,
    id: HikeId,
    update: &HikeUpdate,
) -> TrailcallResult<Hike> {
    let changes = HikeChangeset::from(update);
    if changes.is_empty() {
        return get(conn, id);
    }
    let row = diesel::update(hikes::table.find(id.get()))
        .set(&changes)
        .returning(HikeRow::as_returning())
        .get_result(conn)
        .optional()
        .map_err(db)?
        .ok_or_else(|| AttendanceError::not_found(Entity::Hike, id))?;
    single(conn, row)
}

pub(crate) fn set_status(
    conn: &mut PgConnection,
    id: HikeId,
    status: HikeStatus,
) -> TrailcallResult<Hike> {
    let row = diesel::update(hikes::table.find(id.get()))
        .set(hikes::status.eq(status.as_ref()))
        .returning(HikeRow::as_returning())
        .get_result(conn)
        .optional()
        .map_err(db)?
        .ok_or_else(|| AttendanceError::not_found(Entity::Hike, id))?;
    single(conn, row)
}

pub(crate) fn set_rsvp_open(conn: &mut PgConnection, id: HikeId, open: bool) -> TrailcallResult<Hike> {
    let row = diesel::update(hikes::table.find(id.get()))
        .set(hikes::rsvp_open.eq(open))
        .returning(HikeRow::as_returning())
        .get_result(conn)
        .optional()
        .map_err(db)?
        .ok_or_else(|| AttendanceError::not_found(Entity::Hike, id))?;
    single(conn, row)
}
