use crate::session_management::conn_session::ConnSession;
use crate::session_management::AuthType;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
#[cfg(test)]
use std::sync::TryLockError;
use uuid::Uuid;

/// Mutable part of a session, only reachable through [`Session::lock`].
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub username: String,
    pub group: String,
    pub mac_addr: String,
    /// Whether the group enforces one session per MAC address.
    pub unique_mac: bool,
    /// `false` for a sleeper: kept around but not carrying traffic.
    pub is_active: bool,
    pub auth_type: AuthType,
    pub last_login: DateTime<Utc>,
    /// Live transport binding, absent while the client is disconnected.
    pub conn: Option<Arc<ConnSession>>,
}

/// A client association tracked by the tunnel runtime.
///
/// The token never changes; everything else sits behind the session's own
/// lock.
#[derive(Debug)]
pub struct Session {
    token: String,
    state: Mutex<SessionState>,
}

impl Session {
    /// Creates a session with a fresh random token.
    pub fn new(state: SessionState) -> Self {
        Self::with_token(Uuid::new_v4().simple().to_string(), state)
    }

    pub fn with_token(token: impl Into<String>, state: SessionState) -> Self {
        Self {
            token: token.into(),
            state: Mutex::new(state),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Acquires the per-session lock.
    ///
    /// A poisoned lock is recovered: readers only copy fields out, and a
    /// writer that panicked cannot leave a field half-written.
    pub fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether some thread currently holds this session's lock.
    #[cfg(test)]
    pub(crate) fn is_locked(&self) -> bool {
        matches!(self.state.try_lock(), Err(TryLockError::WouldBlock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sessions_get_distinct_tokens() {
        let a = Session::new(SessionState::default());
        let b = Session::new(SessionState::default());
        assert_ne!(a.token(), b.token());
        assert_eq!(a.token().len(), 32);
    }

    #[test]
    fn test_state_changes_are_visible_through_lock() {
        let session = Session::with_token(
            "t1",
            SessionState {
                username: "alice".into(),
                is_active: true,
                ..Default::default()
            },
        );
        session.lock().is_active = false;
        assert!(!session.lock().is_active);
        assert_eq!(session.token(), "t1");
    }

    #[test]
    fn test_is_locked_tracks_guard() {
        let session = Session::new(SessionState::default());
        let guard = session.lock();
        assert!(session.is_locked());
        drop(guard);
        assert!(!session.is_locked());
    }
}
