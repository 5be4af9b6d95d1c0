//! The attendance services wired over one store.

use crate::TrailcallConfig;
use derive_getters::Getters;
use std::sync::Arc;
use tracing::info;
use trailcall_attendance::{
    AttendanceReports, HikeLifecycle, InMemoryAttendanceStore, MatchPolicy, MemberRoster,
    ParticipationReconciler,
};
use trailcall_database::{PostgresAttendanceStore, establish_pool};
use trailcall_error::{ConfigError, TrailcallResult};
use trailcall_interface::AttendanceStore;

/// Every attendance service sharing a single [`AttendanceStore`].
///
/// # Examples
///
/// ```
/// use trailcall::{MatchPolicy, Trailcall};
///
/// let app = Trailcall::in_memory(MatchPolicy::default());
/// assert_eq!(*app.reconciler().policy().member_threshold(), 80);
/// ```
#[derive(Clone, Getters)]
pub struct Trailcall {
    /// Backing store
    store: Arc<dyn AttendanceStore>,
    /// Member roster
    roster: MemberRoster,
    /// Hike scheduling and status
    lifecycle: HikeLifecycle,
    /// Check-ins, RSVPs and activities
    reconciler: ParticipationReconciler,
    /// Read-side reports
    reports: AttendanceReports,
}

impl Trailcall {
    /// Services over `store`, matching RSVPs with `policy`.
    pub fn new(store: Arc<dyn AttendanceStore>, policy: MatchPolicy) -> Self {
        Self {
            roster: MemberRoster::new(store.clone()),
            lifecycle: HikeLifecycle::new(store.clone()),
            reconciler: ParticipationReconciler::new(store.clone()).with_policy(policy),
            reports: AttendanceReports::new(store.clone()),
            store,
        }
    }

    /// Services over a fresh in-memory store.
    pub fn in_memory(policy: MatchPolicy) -> Self {
        Self::new(Arc::new(InMemoryAttendanceStore::new()), policy)
    }

    /// Services over PostgreSQL as configured.
    ///
    /// # Errors
    ///
    /// A ConfigError when no database URL is configured, a database error
    /// when the pool cannot be built.
    pub fn connect(config: &TrailcallConfig) -> TrailcallResult<Self> {
        let url = config.database().resolved_url().ok_or_else(|| {
            ConfigError::new("database.url is not set and DATABASE_URL is missing")
        })?;
        let pool = establish_pool(&url, *config.database().pool_size())?;
        info!(pool_size = *config.database().pool_size(), "Connected to PostgreSQL");
        Ok(Self::new(
            Arc::new(PostgresAttendanceStore::new(pool)),
            config.match_policy(),
        ))
    }
}
