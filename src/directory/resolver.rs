//! Enrichment pre-pass for session listings.

use std::collections::{BTreeSet, HashMap};

use log::{debug, warn};

use crate::directory::directory_trait::DirectoryStore;
use crate::directory::types::UserExtraInfo;
use crate::session_management::SessionRegistry;

/// Fetches nickname and email for every active, directory-backed session.
///
/// Usernames are collected under the registry lock (one session lock at a
/// time), then both locks are released before the single batched lookup.
/// A failed lookup is logged and yields an empty map: enrichment is best
/// effort and never fails a listing.
pub fn resolve_user_info(
    registry: &SessionRegistry,
    store: &dyn DirectoryStore,
) -> HashMap<String, UserExtraInfo> {
    let usernames: Vec<String> = {
        let sessions = registry.lock();
        let mut names = BTreeSet::new();
        for session in sessions.values() {
            let state = session.lock();
            if state.is_active && state.auth_type.is_directory_backed() {
                names.insert(state.username.clone());
            }
        }
        names.into_iter().collect()
    };

    if usernames.is_empty() {
        return HashMap::new();
    }

    match store.find_users(&usernames) {
        Ok(records) => {
            debug!("Resolved {} of {} username(s)", records.len(), usernames.len());
            records
                .into_iter()
                .map(|record| (record.username.clone(), UserExtraInfo::from(record)))
                .collect()
        }
        Err(e) => {
            warn!("User directory unavailable, listing without nickname/email: {}", e);
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::types::UserRecord;
    use crate::error_handling::types::StorageError;
    use crate::session_management::{AuthType, Session, SessionState};
    use std::sync::{Arc, Mutex};

    /// Records every lookup and answers from a fixed user list.
    struct MockDirectory {
        users: Vec<UserRecord>,
        fail: bool,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl MockDirectory {
        fn new(users: Vec<UserRecord>) -> Self {
            Self { users, fail: false, calls: Mutex::new(Vec::new()) }
        }

        fn failing() -> Self {
            Self { users: Vec::new(), fail: true, calls: Mutex::new(Vec::new()) }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl DirectoryStore for MockDirectory {
        fn find_users(&self, usernames: &[String]) -> Result<Vec<UserRecord>, StorageError> {
            self.calls.lock().unwrap().push(usernames.to_vec());
            if self.fail {
                return Err(StorageError::ConnectionFailed);
            }
            Ok(self
                .users
                .iter()
                .filter(|u| usernames.contains(&u.username))
                .cloned()
                .collect())
        }
    }

    /// Fails the test if the lookup runs while any registry or session lock
    /// is held.
    struct LockCheckingDirectory {
        registry: Arc<SessionRegistry>,
        lookups: Mutex<usize>,
    }

    impl DirectoryStore for LockCheckingDirectory {
        fn find_users(&self, usernames: &[String]) -> Result<Vec<UserRecord>, StorageError> {
            *self.lookups.lock().unwrap() += 1;
            assert!(!self.registry.is_locked(), "registry lock held during lookup");
            let sessions: Vec<Arc<Session>> = self.registry.lock().values().cloned().collect();
            for session in sessions {
                assert!(!session.is_locked(), "session {} locked during lookup", session.token());
            }
            Ok(usernames
                .iter()
                .map(|name| UserRecord {
                    username: name.clone(),
                    nickname: String::new(),
                    email: String::new(),
                })
                .collect())
        }
    }

    fn add(registry: &SessionRegistry, token: &str, username: &str, active: bool, auth: AuthType) {
        registry.insert(Arc::new(Session::with_token(
            token,
            SessionState {
                username: username.into(),
                is_active: active,
                auth_type: auth,
                ..Default::default()
            },
        )));
    }

    fn alice() -> UserRecord {
        UserRecord { username: "alice".into(), nickname: "Alice A".into(), email: "a@x.com".into() }
    }

    #[test]
    fn test_deduplicates_and_batches() {
        let registry = SessionRegistry::new();
        add(&registry, "t1", "alice", true, AuthType::Local);
        add(&registry, "t2", "alice", true, AuthType::Local);
        add(&registry, "t3", "bob", true, AuthType::Local);
        let store = MockDirectory::new(vec![alice()]);

        let info = resolve_user_info(&registry, &store);

        assert_eq!(store.calls(), vec![vec!["alice".to_string(), "bob".to_string()]]);
        assert_eq!(info.len(), 1);
        assert_eq!(info["alice"].nickname, "Alice A");
        assert_eq!(info["alice"].email, "a@x.com");
    }

    #[test]
    fn test_skips_sleepers_and_external_auth() {
        let registry = SessionRegistry::new();
        add(&registry, "t1", "alice", false, AuthType::Local);
        add(&registry, "t2", "dave", true, AuthType::Ldap);
        add(&registry, "t3", "erin", true, AuthType::Radius);
        let store = MockDirectory::new(vec![alice()]);

        let info = resolve_user_info(&registry, &store);

        assert!(info.is_empty());
        assert!(store.calls().is_empty(), "no eligible username means no lookup");
    }

    #[test]
    fn test_failure_degrades_to_empty_map() {
        let registry = SessionRegistry::new();
        add(&registry, "t1", "alice", true, AuthType::Local);
        let store = MockDirectory::failing();

        let info = resolve_user_info(&registry, &store);

        assert!(info.is_empty());
        assert_eq!(store.calls().len(), 1);
    }

    #[test]
    fn test_empty_registry_skips_lookup() {
        let registry = SessionRegistry::new();
        let store = MockDirectory::new(vec![alice()]);
        assert!(resolve_user_info(&registry, &store).is_empty());
        assert!(store.calls().is_empty());
    }

    #[test]
    fn test_lookup_runs_without_locks_held() {
        let registry = Arc::new(SessionRegistry::new());
        add(&registry, "t1", "alice", true, AuthType::Local);
        add(&registry, "t2", "bob", true, AuthType::Local);
        add(&registry, "t3", "carol", false, AuthType::Local);
        let store = LockCheckingDirectory { registry: registry.clone(), lookups: Mutex::new(0) };

        let info = resolve_user_info(&registry, &store);

        assert_eq!(*store.lookups.lock().unwrap(), 1);
        assert_eq!(info.len(), 2);
    }
}
