//! TrailCall - club hike attendance tracking.
//!
//! TrailCall records who is on the club roster, who intends to come to each
//! hike (RSVPs, by member or walk-in guest), who actually showed up
//! (check-ins), and which activities each attendee joined. Public RSVPs are
//! matched against the roster by name so a member who registers online and
//! is later checked in counts once.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use trailcall::{MatchPolicy, NewHike, NewMember, RsvpOutcome, Trailcall};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let app = Trailcall::in_memory(MatchPolicy::default());
//!
//! app.roster()
//!     .create(
//!         &NewMember::builder()
//!             .membership_number("TC-001")
//!             .first_name("Jane")
//!             .last_name("Smith")
//!             .build()?,
//!     )
//!     .await?;
//! let hike = app
//!     .lifecycle()
//!     .create_hike(
//!         &NewHike::builder()
//!             .name("Ridge Loop")
//!             .date(NaiveDate::from_ymd_opt(2026, 6, 13).unwrap())
//!             .build()?,
//!     )
//!     .await?;
//!
//! let outcome = app.reconciler().submit_rsvp(hike.id, "jane", "smith").await?;
//! assert!(matches!(outcome, RsvpOutcome::Confirmed { is_guest: false, .. }));
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `trailcall_error` - Error types
//! - `trailcall_core` - Domain types and the name matcher
//! - `trailcall_interface` - `AttendanceStore` and `SessionStore` traits
//! - `trailcall_attendance` - Attendance services and the in-memory store
//! - `trailcall_database` - PostgreSQL store
//! - `trailcall_security` - Admin PIN and sessions
//!
//! This crate re-exports the public surface and adds configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;

pub use app::Trailcall;
pub use config::{DatabaseConfig, LoggingConfig, RsvpConfig, SessionConfig, TrailcallConfig};

pub use trailcall_error::{
    AttendanceError, AttendanceErrorKind, AuthError, AuthErrorKind, ConfigError, DatabaseError,
    DatabaseErrorKind, Entity, JsonError, TrailcallError, TrailcallErrorKind, TrailcallResult,
};

pub use trailcall_core::{
    Activity, ActivityId, ActivityParticipant, AttendanceRecord, AttendanceRef, Attendee,
    AttendeeSource, Checkin, CheckinId, CheckinRole, Hike, HikeDetail, HikeId, HikeStatus,
    HikeUpdate, Member, MemberHistory, MemberId, MemberUpdate, NameMatch, NameMatcher, NewHike,
    NewMember, ParticipantId, Rsvp, RsvpEntry, RsvpId, RsvpOutcome, RsvpTarget, init_tracing,
    similarity,
};

pub use trailcall_interface::{AttendanceStore, Session, SessionStore};

pub use trailcall_attendance::{
    AttendanceReports, BulkCheckin, BulkCheckinFailure, HikeLifecycle, InMemoryAttendanceStore,
    MEMBER_MATCH_THRESHOLD, MatchPolicy, MemberRoster, ParticipationReconciler, RsvpCheckin,
    RsvpPage,
};

pub use trailcall_database::{
    PgPool, PostgresAttendanceStore, establish_connection, establish_pool, reset_database,
    run_migrations,
};

pub use trailcall_security::{AdminGate, InMemorySessionStore, PinVerifier, hash_pin};
