//! Top-level error wrapper types.

use crate::{AttendanceError, AuthError, ConfigError, DatabaseError, JsonError};

/// Every error a TrailCall operation can produce.
///
/// # Examples
///
/// ```
/// use trailcall_error::{AttendanceError, Entity, TrailcallError};
///
/// let err: TrailcallError = AttendanceError::not_found(Entity::Hike, 7).into();
/// assert!(err.is_not_found());
/// assert!(format!("{}", err).contains("Hike not found"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TrailcallErrorKind {
    /// Attendance business error
    #[from(AttendanceError)]
    Attendance(AttendanceError),
    /// Database error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Admin authentication error
    #[from(AuthError)]
    Auth(AuthError),
}

/// TrailCall error with kind discrimination.
///
/// # Examples
///
/// ```
/// use trailcall_error::{ConfigError, TrailcallResult};
///
/// fn might_fail() -> TrailcallResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("TrailCall Error: {}", _0)]
pub struct TrailcallError(Box<TrailcallErrorKind>);

impl TrailcallError {
    /// Create a new error from a kind.
    pub fn new(kind: TrailcallErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TrailcallErrorKind {
        &self.0
    }

    /// The attendance error inside, if this is one.
    pub fn as_attendance(&self) -> Option<&AttendanceError> {
        match self.kind() {
            TrailcallErrorKind::Attendance(err) => Some(err),
            _ => None,
        }
    }

    /// True when a referenced record does not exist.
    pub fn is_not_found(&self) -> bool {
        self.as_attendance().is_some_and(AttendanceError::is_not_found)
    }

    /// True when a uniqueness constraint rejected the write.
    pub fn is_conflict(&self) -> bool {
        self.as_attendance().is_some_and(AttendanceError::is_conflict)
    }
}

// Generic From implementation for any type that converts to TrailcallErrorKind
impl<T> From<T> for TrailcallError
where
    T: Into<TrailcallErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for TrailCall operations.
pub type TrailcallResult<T> = std::result::Result<T, TrailcallError>;
