//! Attendance error types.
//!
//! These are the business-level failures of the attendance core: a referenced
//! record is missing, a uniqueness rule was hit, or a request was malformed.
//! Callers are expected to branch on them, so the kinds stay small and stable.

/// The kind of record an attendance error refers to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display,
)]
pub enum Entity {
    /// A club member
    #[display("Member")]
    Member,
    /// An outing
    #[display("Hike")]
    Hike,
    /// A confirmed check-in
    #[display("Check-in")]
    Checkin,
    /// A pre-registration
    #[display("RSVP")]
    Rsvp,
    /// A sub-group of an outing
    #[display("Activity")]
    Activity,
    /// A link between an activity and an attendance record
    #[display("Activity participant")]
    Participant,
}

/// Attendance error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AttendanceErrorKind {
    /// Referenced record does not exist
    #[display("{} not found: {}", entity, key)]
    NotFound {
        /// What was looked up
        entity: Entity,
        /// The key it was looked up by
        key: String,
    },
    /// A uniqueness constraint rejected the write
    #[display("{} already exists: {}", entity, key)]
    Conflict {
        /// What was being written
        entity: Entity,
        /// The duplicated key
        key: String,
    },
    /// A request field is missing or malformed
    #[display("Validation failed for '{}': {}", field, reason)]
    Validation {
        /// Offending field
        field: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Attendance error with source location tracking.
///
/// # Examples
///
/// ```
/// use trailcall_error::{AttendanceError, AttendanceErrorKind, Entity};
///
/// let err = AttendanceError::not_found(Entity::Member, "TC-404");
/// assert!(matches!(err.kind, AttendanceErrorKind::NotFound { .. }));
/// assert!(format!("{}", err).contains("TC-404"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Attendance Error: {} at line {} in {}", kind, line, file)]
pub struct AttendanceError {
    /// The kind of error that occurred
    pub kind: AttendanceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AttendanceError {
    /// Create a new AttendanceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AttendanceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A missing `entity` looked up by `key`.
    #[track_caller]
    pub fn not_found(entity: Entity, key: impl ToString) -> Self {
        Self::new(AttendanceErrorKind::NotFound {
            entity,
            key: key.to_string(),
        })
    }

    /// A duplicate `entity` on `key`.
    #[track_caller]
    pub fn conflict(entity: Entity, key: impl ToString) -> Self {
        Self::new(AttendanceErrorKind::Conflict {
            entity,
            key: key.to_string(),
        })
    }

    /// A rejected request field.
    #[track_caller]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(AttendanceErrorKind::Validation {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// True for [`AttendanceErrorKind::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, AttendanceErrorKind::NotFound { .. })
    }

    /// True for [`AttendanceErrorKind::Conflict`].
    pub fn is_conflict(&self) -> bool {
        matches!(self.kind, AttendanceErrorKind::Conflict { .. })
    }
}
