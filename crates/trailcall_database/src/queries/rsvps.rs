use super::{db, hikes, members, unique_or_db};
use crate::models::{MemberRow, NewRsvpRow, RsvpRow};
use crate::schema::{checkins, members as member_table, rsvps};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::collections::HashSet;
use trailcall_core::{HikeId, Rsvp, RsvpEntry, RsvpId, RsvpTarget};
use trailcall_error::{AttendanceError, Entity, TrailcallResult};

pub(crate) fn insert(
    conn: &mut PgConnection,
    hike_id: HikeId,
    target: &RsvpTarget,
) -> TrailcallResult<Rsvp> {
    hikes::get_row(conn, hike_id)?;
    if let RsvpTarget::Member(member_id) = target {
        members::get_row(conn, *member_id)?;
    }

    let key = match target {
        RsvpTarget::Member(id) => format!("hike {hike_id}, member {id}"),
        RsvpTarget::Guest(name) => format!("hike {hike_id}, guest {name}"),
    };
    let row = diesel::insert_into(rsvps::table)
        .values(NewRsvpRow::new(hike_id, target))
        .returning(RsvpRow::as_returning())
        .get_result(conn)
        .map_err(unique_or_db(Entity::Rsvp, key))?;
    Ok(Rsvp::try_from(row)?)
}

pub(crate) fn get(conn: &mut PgConnection, id: RsvpId) -> TrailcallResult<Rsvp> {
    let row = rsvps::table
        .find(id.get())
        .select(RsvpRow::as_select())
        .first(conn)
        .optional()
        .map_err(db)?
        .ok_or_else(|| AttendanceError::not_found(Entity::Rsvp, id))?;
    Ok(Rsvp::try_from(row)?)
}

/// RSVPs of a hike, by surname (guests by their full name), then given name.
pub(crate) fn list(conn: &mut PgConnection, hike_id: HikeId) -> TrailcallResult<Vec<RsvpEntry>> {
    let rows = rsvps::table
        .left_join(member_table::table)
        .filter(rsvps::hike_id.eq(hike_id.get()))
        .select((rsvps::all_columns, member_table::all_columns.nullable()))
        .load::<(RsvpRow, Option<MemberRow>)>(conn)
        .map_err(db)?;

    let checked_in: HashSet<i64> = checkins::table
        .filter(checkins::hike_id.eq(hike_id.get()))
        .select(checkins::member_id)
        .load::<i64>(conn)
        .map_err(db)?
        .into_iter()
        .collect();

    let mut keyed = Vec::with_capacity(rows.len());
    for (row, member) in rows {
        let rsvp = Rsvp::try_from(row)?;
        let (sort_key, display_name, membership_number, is_checked_in) = match (&rsvp.target, member) {
            (RsvpTarget::Member(member_id), Some(member)) => (
                (member.last_name.clone(), member.first_name.clone()),
                member.full_name(),
                Some(member.membership_number),
                checked_in.contains(&member_id.get()),
            ),
            (RsvpTarget::Member(member_id), None) => (
                (String::new(), String::new()),
                String::new(),
                None,
                checked_in.contains(&member_id.get()),
            ),
            (RsvpTarget::Guest(name), _) => (
                (name.clone(), String::new()),
                name.clone(),
                None,
                rsvp.checked_in_at.is_some(),
            ),
        };
        keyed.push((
            sort_key,
            RsvpEntry {
                rsvp,
                display_name,
                membership_number,
                checked_in: is_checked_in,
            },
        ));
    }
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, entry)| entry).collect())
}

/// Participant rows go with the RSVP through `ON DELETE CASCADE`.
pub(crate) fn delete(conn: &mut PgConnection, id: RsvpId) -> TrailcallResult<bool> {
    let deleted = diesel::delete(rsvps::table.find(id.get()))
        .execute(conn)
        .map_err(db)?;
    Ok(deleted > 0)
}

pub(crate) fn set_checked_in_at(
    conn: &mut PgConnection,
    id: RsvpId,
    at: Option<DateTime<Utc>>,
) -> TrailcallResult<Rsvp> {
    let row = diesel::update(rsvps::table.find(id.get()))
        .set(rsvps::checked_in_at.eq(at))
        .returning(RsvpRow::as_returning())
        .get_result(conn)
        .optional()
        .map_err(db)?
        .ok_or_else(|| AttendanceError::not_found(Entity::Rsvp, id))?;
    Ok(Rsvp::try_from(row)?)
}
