//! Blocking query functions, one module per table.
//!
//! Each function takes a checked-out connection and maps diesel failures into
//! the attendance taxonomy: missing rows become NotFound and unique violations
//! become Conflict; everything else surfaces as a database error.

pub(crate) mod activities;
pub(crate) mod checkins;
pub(crate) mod hikes;
pub(crate) mod members;
pub(crate) mod reports;
pub(crate) mod rsvps;

use diesel::result::{DatabaseErrorKind as DieselErrorKind, Error as DieselError};
use trailcall_error::{AttendanceError, DatabaseError, Entity, TrailcallError};

/// Wraps any diesel error as a database error.
pub(crate) fn db(err: DieselError) -> TrailcallError {
    DatabaseError::from(err).into()
}

/// Maps a unique violation to Conflict on `entity`.
pub(crate) fn unique_or_db(
    entity: Entity,
    key: impl ToString,
) -> impl FnOnce(DieselError) -> TrailcallError {
    let key = key.to_string();
    move |err| match err {
        DieselError::DatabaseError(DieselErrorKind::UniqueViolation, _) => {
            AttendanceError::conflict(entity, key).into()
        }
        other => db(other),
    }
}

/// Database counts are `BIGINT`; the domain counters are `u32`.
pub(crate) fn to_count(n: i64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
