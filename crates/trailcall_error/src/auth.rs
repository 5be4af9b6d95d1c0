//! Admin authentication error types.

/// Authentication error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AuthErrorKind {
    /// No admin PIN hash has been configured
    #[display("Admin PIN not configured")]
    PinNotConfigured,
    /// Submitted PIN does not match
    #[display("Invalid PIN")]
    InvalidPin,
    /// Token is not in the session table
    #[display("Unknown session")]
    UnknownSession,
    /// Token was issued but has expired
    #[display("Session expired")]
    Expired,
}

/// Authentication error with source location tracking.
///
/// # Examples
///
/// ```
/// use trailcall_error::{AuthError, AuthErrorKind};
///
/// let err = AuthError::new(AuthErrorKind::InvalidPin);
/// assert_eq!(err.kind, AuthErrorKind::InvalidPin);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Auth Error: {} at line {} in {}", kind, line, file)]
pub struct AuthError {
    /// The kind of error that occurred
    pub kind: AuthErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AuthError {
    /// Create a new AuthError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AuthErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
