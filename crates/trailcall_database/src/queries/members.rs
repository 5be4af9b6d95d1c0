use super::{db, unique_or_db};
use crate::models::{MemberChangeset, MemberRow, NewMemberRow};
use crate::schema::members;
use chrono::Utc;
use diesel::prelude::*;
use trailcall_core::{Member, MemberId, MemberUpdate, NewMember, membership_key};
use trailcall_error::{AttendanceError, Entity, TrailcallResult};

pub(crate) fn create(conn: &mut PgConnection, new_member: &NewMember) -> TrailcallResult<Member> {
    diesel::insert_into(members::table)
        .values(NewMemberRow::from(new_member))
        .returning(MemberRow::as_returning())
        .get_result(conn)
        .map(Member::from)
        .map_err(unique_or_db(Entity::Member, new_member.membership_key()))
}

pub(crate) fn list(conn: &mut PgConnection, active_only: bool) -> TrailcallResult<Vec<Member>> {
    let mut query = members::table.into_boxed();
    if active_only {
        query = query.filter(members::active.eq(true));
    }
    let rows = query
        .order((members::last_name.asc(), members::first_name.asc(), members::id.asc()))
        .select(MemberRow::as_select())
        .load(conn)
        .map_err(db)?;
    Ok(rows.into_iter().map(Member::from).collect())
}

pub(crate) fn get_row(conn: &mut PgConnection, id: MemberId) -> TrailcallResult<MemberRow> {
    members::table
        .find(id.get())
        .select(MemberRow::as_select())
        .first(conn)
        .optional()
        .map_err(db)?
        .ok_or_else(|| AttendanceError::not_found(Entity::Member, id).into())
}

pub(crate) fn get(conn: &mut PgConnection, id: MemberId) -> TrailcallResult<Member> {
    get_row(conn, id).map(Member::from)
}

pub(crate) fn find_by_number(
    conn: &mut PgConnection,
    number: &str,
) -> TrailcallResult<Option<Member>> {
    let row = members::table
        .filter(members::membership_number.eq(membership_key(number)))
        .select(MemberRow::as_select())
        .first(conn)
        .optional()
        .map_err(db)?;
    Ok(row.map(Member::from))
}

pub(crate) fn update(
    conn: &mut PgConnection,
    id: MemberId,
    update: &MemberUpdate,
) -> TrailcallResult<Member> {
    let changes = MemberChangeset::from(update);
    let key = changes.membership_number.clone().unwrap_or_default();
    diesel::update(members::table.find(id.get()))
        .set(&changes)
        .returning(MemberRow::as_returning())
        .get_result(conn)
        .optional()
        .map_err(unique_or_db(Entity::Member, key))?
        .map(Member::from)
        .ok_or_else(|| AttendanceError::not_found(Entity::Member, id).into())
}

pub(crate) fn deactivate(conn: &mut PgConnection, id: MemberId) -> TrailcallResult<Member> {
    diesel::update(members::table.find(id.get()))
        .set((members::active.eq(false), members::updated_at.eq(Utc::now())))
        .returning(MemberRow::as_returning())
        .get_result(conn)
        .optional()
        .map_err(db)?
        .map(Member::from)
        .ok_or_else(|| AttendanceError::not_found(Entity::Member, id).into())
}
