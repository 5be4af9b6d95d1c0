//! Admin session tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trailcall_error::TrailcallResult;

/// An issued admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token
    pub token: String,
    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// True once `now` has passed the expiry.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Token → expiry lookup for authenticated admin sessions.
///
/// The attendance core never depends on this; only the outer surface that
/// guards admin operations does.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Issue a fresh token valid for the store's configured lifetime.
    async fn issue(&self) -> TrailcallResult<Session>;

    /// Check a token.
    ///
    /// # Errors
    ///
    /// `UnknownSession` for tokens never issued or already revoked, `Expired`
    /// for tokens past their expiry (which are dropped as a side effect).
    async fn validate(&self, token: &str) -> TrailcallResult<Session>;

    /// Forget a token. Revoking an unknown token is not an error.
    async fn revoke(&self, token: &str) -> TrailcallResult<()>;

    /// Drop every expired token, returning how many were removed.
    async fn purge_expired(&self) -> TrailcallResult<usize>;
}
