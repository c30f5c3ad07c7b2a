use crate::session_management::session::Session;
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
#[cfg(test)]
use std::sync::TryLockError;

/// The registry of every session known to the tunnel runtime.
///
/// One registry-wide lock guards the map structure (insertions and
/// removals). Each [`Session`] additionally carries its own lock for its
/// mutable fields.
///
/// # Lock order
///
/// Registry lock first, then at most one session lock at a time. Never
/// perform blocking I/O while holding either.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Arc<Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `session` under its token, returning the session it replaced.
    pub fn insert(&self, session: Arc<Session>) -> Option<Arc<Session>> {
        let token = session.token().to_string();
        debug!("registering session {}", token);
        self.lock().insert(token, session)
    }

    pub fn remove(&self, token: &str) -> Option<Arc<Session>> {
        debug!("removing session {}", token);
        self.lock().remove(token)
    }

    pub fn get(&self, token: &str) -> Option<Arc<Session>> {
        self.lock().get(token).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// Acquires the registry-wide lock.
    ///
    /// Holding the guard blocks every structural change to the registry.
    pub fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Session>>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether some thread currently holds the registry-wide lock.
    #[cfg(test)]
    pub(crate) fn is_locked(&self) -> bool {
        matches!(self.sessions.try_lock(), Err(TryLockError::WouldBlock))
    }
}
