//! PostgreSQL persistence for TrailCall.
//!
//! This crate provides the Diesel schema, row models, embedded migrations and
//! [`PostgresAttendanceStore`], the production implementation of
//! [`AttendanceStore`](trailcall_interface::AttendanceStore).
//!
//! Uniqueness rules are enforced by the schema itself: `UNIQUE` constraints
//! on check-ins, RSVPs and participants, and `ON DELETE CASCADE` from
//! participant rows to the attendance rows they point at.
//!
//! # Example
//!
//! ```rust,ignore
//! use trailcall_database::{PostgresAttendanceStore, establish_pool, run_migrations};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = establish_pool("postgres://localhost/trailcall", 4)?;
//! run_migrations(&mut pool.get()?)?;
//! let store = PostgresAttendanceStore::new(pool);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod models;
mod queries;
mod store;

pub mod schema;

pub use connection::{PgPool, establish_connection, establish_pool, reset_database, run_migrations};
pub use models::{
    ActivityRow, CheckinRow, HikeChangeset, HikeRow, MemberChangeset, MemberRow, NewActivityRow,
    NewCheckinRow, NewHikeRow, NewMemberRow, NewParticipantRow, NewRsvpRow, ParticipantRow,
    RsvpRow,
};
pub use store::PostgresAttendanceStore;

use trailcall_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
