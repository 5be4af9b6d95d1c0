//! PIN login in front of the session table.

use crate::PinVerifier;
use std::sync::Arc;
use tracing::{debug, instrument};
use trailcall_error::{AuthError, AuthErrorKind, TrailcallResult};
use trailcall_interface::{Session, SessionStore};

/// Exchanges the admin PIN for a session token and checks tokens after.
#[derive(Clone)]
pub struct AdminGate {
    verifier: PinVerifier,
    sessions: Arc<dyn SessionStore>,
}

impl AdminGate {
    /// Gate using `verifier` for logins and `sessions` for tokens.
    pub fn new(verifier: PinVerifier, sessions: Arc<dyn SessionStore>) -> Self {
        Self { verifier, sessions }
    }

    /// True when a PIN is configured, so admin access needs a login.
    pub fn is_configured(&self) -> bool {
        self.verifier.is_configured()
    }

    /// Log in with `pin` when a PIN is configured.
    ///
    /// Without a configured PIN admin access is open and no session is
    /// issued.
    ///
    /// # Errors
    ///
    /// `InvalidPin` when a PIN is configured and `pin` is missing or wrong.
    #[instrument(skip(self, pin), fields(pin_given = pin.is_some()))]
    pub async fn unlock(&self, pin: Option<&str>) -> TrailcallResult<Option<Session>> {
        if !self.is_configured() {
            debug!("No admin PIN configured, admin access is open");
            return Ok(None);
        }
        let Some(pin) = pin else {
            return Err(AuthError::new(AuthErrorKind::InvalidPin).into());
        };
        self.login(pin).await.map(Some)
    }

    /// Verify the PIN and issue a session.
    #[instrument(skip(self, pin))]
    pub async fn login(&self, pin: &str) -> TrailcallResult<Session> {
        self.verifier.verify(pin)?;
        self.sessions.issue().await
    }

    /// The session behind `token`, if it is live.
    pub async fn authorize(&self, token: &str) -> TrailcallResult<Session> {
        self.sessions.validate(token).await
    }

    /// End the session behind `token`.
    pub async fn logout(&self, token: &str) -> TrailcallResult<()> {
        self.sessions.revoke(token).await
    }
}
