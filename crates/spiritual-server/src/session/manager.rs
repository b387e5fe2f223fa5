use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::{ApiError, Result};

/// A signed-in browser session.
pub struct Session {
    pub id: String,
    pub user_id: i64,
    last_activity: AtomicU64,
}

impl Session {
    fn new(id: String, user_id: i64) -> Self {
        Self {
            id,
            user_id,
            last_activity: AtomicU64::new(Self::now_timestamp()),
        }
    }

    fn now_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    pub fn touch(&self) {
        self.last_activity.store(Self::now_timestamp(), Ordering::SeqCst);
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        let last = self.last_activity.load(Ordering::SeqCst);
        let now = Self::now_timestamp();
        now.saturating_sub(last) > ttl.as_secs()
    }

    #[cfg(test)]
    pub(crate) fn backdate(&self, secs: u64) {
        self.last_activity
            .store(Self::now_timestamp().saturating_sub(secs), Ordering::SeqCst);
    }
}

/// In-memory session store keyed by the cookie value.
pub struct SessionManager {
    sessions: DashMap<String, Arc<Session>>,
    ttl: Duration,
    max_sessions: usize,
}

impl SessionManager {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            max_sessions,
        }
    }

    /// Start a session for `user_id`.
    pub fn create_session(&self, user_id: i64) -> Result<Arc<Session>> {
        if self.sessions.len() >= self.max_sessions {
            self.cleanup_expired();
            if self.sessions.len() >= self.max_sessions {
                return Err(ApiError::TooManySessions(self.max_sessions));
            }
        }

        let session_id = uuid::Uuid::new_v4().to_string();
        let session = Arc::new(Session::new(session_id.clone(), user_id));
        self.sessions.insert(session_id, session.clone());

        tracing::debug!(user_id, "session created");
        Ok(session)
    }

    /// Look up a live session, refreshing its activity time. Expired sessions
    /// are dropped on sight.
    pub fn get_session(&self, id: &str) -> Option<Arc<Session>> {
        let session = self.sessions.get(id).map(|entry| entry.clone())?;
        if session.is_expired(self.ttl) {
            self.sessions.remove(id);
            return None;
        }
        session.touch();
        Some(session)
    }

    pub fn delete_session(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Remove expired sessions, returning how many were dropped.
    pub fn cleanup_expired(&self) -> usize {
        let ttl = self.ttl;
        let before = self.sessions.len();

        self.sessions.retain(|_, session| !session.is_expired(ttl));

        before - self.sessions.len()
    }
}

/// Background task to periodically clean up expired sessions
pub async fn cleanup_task(manager: Arc<SessionManager>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let cleaned = manager.cleanup_expired();
        if cleaned > 0 {
            tracing::info!(cleaned, "cleaned up expired sessions");
        }
    }
}
