//! Attendance reconciliation for the TrailCall tracker.
//!
//! The services here hold an explicitly constructed
//! [`AttendanceStore`](trailcall_interface::AttendanceStore) and apply the
//! attendance rules on top of it:
//!
//! - [`HikeLifecycle`] schedules hikes and flips their check-in and RSVP flags
//! - [`MemberRoster`] maintains the member list
//! - [`ParticipationReconciler`] records check-ins, classifies and converts
//!   RSVPs, and maintains activity sub-rosters
//! - [`AttendanceReports`] builds the read-side views
//!
//! [`InMemoryAttendanceStore`] implements the store without a database.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use trailcall_attendance::{HikeLifecycle, InMemoryAttendanceStore, ParticipationReconciler};
//! use trailcall_core::{NewHike, RsvpOutcome};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryAttendanceStore::new());
//! let lifecycle = HikeLifecycle::new(store.clone());
//! let reconciler = ParticipationReconciler::new(store);
//!
//! let hike = lifecycle
//!     .create_hike(
//!         &NewHike::builder()
//!             .name("Ridge Trail")
//!             .date(chrono::NaiveDate::from_ymd_opt(2026, 4, 11).unwrap())
//!             .build()?,
//!     )
//!     .await?;
//!
//! let outcome = reconciler.submit_rsvp(hike.id, "Pat", "Lee").await?;
//! assert!(matches!(outcome, RsvpOutcome::Confirmed { is_guest: true, .. }));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod in_memory_store;
mod lifecycle;
mod policy;
mod reconciler;
mod reports;
mod roster;

pub use in_memory_store::InMemoryAttendanceStore;
pub use lifecycle::{HikeLifecycle, RsvpPage};
pub use policy::{MEMBER_MATCH_THRESHOLD, MatchPolicy};
pub use reconciler::{BulkCheckin, BulkCheckinFailure, ParticipationReconciler, RsvpCheckin};
pub use reports::AttendanceReports;
pub use roster::MemberRoster;
