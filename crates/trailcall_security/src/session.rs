//! In-memory session table.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use trailcall_error::{AuthError, AuthErrorKind, TrailcallResult};
use trailcall_interface::{Session, SessionStore};
use uuid::Uuid;

/// Token → expiry map shared by clones.
///
/// Sessions do not survive a restart; admins log in again.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    /// A store whose tokens live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// A store whose tokens live for `hours`.
    pub fn with_ttl_hours(hours: u32) -> Self {
        Self::new(Duration::hours(i64::from(hours)))
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of tokens held, expired or not.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True when no token is held.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_ttl_hours(24)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    #[instrument(skip(self))]
    async fn issue(&self) -> TrailcallResult<Session> {
        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.expires_at);
        info!(expires_at = %session.expires_at, "Admin session issued");
        Ok(session)
    }

    async fn validate(&self, token: &str) -> TrailcallResult<Session> {
        let expires_at = self
            .sessions
            .read()
            .await
            .get(token)
            .copied()
            .ok_or_else(|| AuthError::new(AuthErrorKind::UnknownSession))?;

        let session = Session {
            token: token.to_string(),
            expires_at,
        };
        if session.is_expired_at(Utc::now()) {
            self.sessions.write().await.remove(token);
            debug!("Expired session dropped");
            return Err(AuthError::new(AuthErrorKind::Expired).into());
        }
        Ok(session)
    }

    async fn revoke(&self, token: &str) -> TrailcallResult<()> {
        if self.sessions.write().await.remove(token).is_some() {
            info!("Admin session revoked");
        }
        Ok(())
    }

    async fn purge_expired(&self) -> TrailcallResult<usize> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, expires_at| now <= *expires_at);
        let purged = before - sessions.len();
        debug!(purged, "Expired sessions purged");
        Ok(purged)
    }
}
