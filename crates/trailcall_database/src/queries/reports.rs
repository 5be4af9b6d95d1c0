use super::{db, hikes};
use crate::models::{CheckinRow, HikeRow, MemberRow};
use crate::schema::{checkins, hikes as hike_table, members};
use chrono::NaiveDate;
use diesel::prelude::*;
use trailcall_core::{AttendanceRecord, CheckinId, Hike, HikeId, Member, MemberId};
use trailcall_error::{AttendanceError, TrailcallResult};

/// Checked-in members of a hike, latest check-in first.
pub(crate) fn attendees_for_hike(
    conn: &mut PgConnection,
    hike_id: HikeId,
) -> TrailcallResult<Vec<Member>> {
    let rows = checkins::table
        .inner_join(members::table)
        .filter(checkins::hike_id.eq(hike_id.get()))
        .order((checkins::checked_in_at.desc(), checkins::id.desc()))
        .select(MemberRow::as_select())
        .load(conn)
        .map_err(db)?;
    Ok(rows.into_iter().map(Member::from).collect())
}

/// Hikes a member checked in to, newest date first.
pub(crate) fn member_history(
    conn: &mut PgConnection,
    member_id: MemberId,
) -> TrailcallResult<Vec<Hike>> {
    let rows = hike_table::table
        .inner_join(checkins::table)
        .filter(checkins::member_id.eq(member_id.get()))
        .order((hike_table::date.desc(), hike_table::id.desc()))
        .select(HikeRow::as_select())
        .load(conn)
        .map_err(db)?;
    hikes::with_counts(conn, rows)
}

/// Every check-in on a hike dated within `year`.
pub(crate) fn attendance_for_year(
    conn: &mut PgConnection,
    year: i32,
) -> TrailcallResult<Vec<AttendanceRecord>> {
    let bounds = NaiveDate::from_ymd_opt(year, 1, 1).zip(NaiveDate::from_ymd_opt(year, 12, 31));
    let (first_day, last_day) = bounds
        .ok_or_else(|| AttendanceError::validation("year", format!("{year} is out of range")))?;

    let rows = checkins::table
        .inner_join(hike_table::table)
        .inner_join(members::table)
        .filter(hike_table::date.between(first_day, last_day))
        .order((
            hike_table::date.asc(),
            hike_table::name.asc(),
            members::last_name.asc(),
            members::first_name.asc(),
        ))
        .select((
            CheckinRow::as_select(),
            HikeRow::as_select(),
            MemberRow::as_select(),
        ))
        .load::<(CheckinRow, HikeRow, MemberRow)>(conn)
        .map_err(db)?;

    Ok(rows
        .into_iter()
        .map(|(checkin, hike, member)| AttendanceRecord {
            checkin_id: CheckinId(checkin.id),
            hike_date: hike.date,
            hike_name: hike.name,
            hike_location: hike.location,
            membership_number: member.membership_number,
            first_name: member.first_name,
            last_name: member.last_name,
            checked_in_at: checkin.checked_in_at,
            activities: Vec::new(),
        })
        .collect())
}
