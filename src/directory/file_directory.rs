use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::directory::directory_trait::DirectoryStore;
use crate::directory::types::UserRecord;
use crate::error_handling::types::StorageError;

/// User directory kept in a JSON file: an array of
/// `{"username", "nickname", "email"}` objects.
///
/// The file is read again on every lookup, so edits show up on the next
/// listing without a restart.
pub struct FileDirectory {
    path: PathBuf,
}

impl FileDirectory {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        info!("FileDirectory reading users from {}", path.display());
        Self { path }
    }

    /// Construct FileDirectory using env var VIGIL_USERS_FILE if set, otherwise `users.json` in the current directory.
    pub fn new_default() -> Result<Self, StorageError> {
        if let Ok(file) = std::env::var("VIGIL_USERS_FILE") {
            info!("Using FileDirectory from VIGIL_USERS_FILE: {}", file);
            return Ok(Self::new(PathBuf::from(file)));
        }
        let cwd = std::env::current_dir().map_err(|e| { error!("Failed to get current dir: {}", e); StorageError::ReadFailed })?;
        Ok(Self::new(cwd.join("users.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<UserRecord>, StorageError> {
        let content = fs::read_to_string(&self.path).map_err(|e| { error!("Failed to read users file {}: {}", self.path.display(), e); StorageError::ReadFailed })?;
        serde_json::from_str(&content).map_err(|e| { error!("Invalid users file {}: {}", self.path.display(), e); StorageError::ReadFailed })
    }
}

impl DirectoryStore for FileDirectory {
    fn find_users(&self, usernames: &[String]) -> Result<Vec<UserRecord>, StorageError> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }
        let wanted: HashSet<&str> = usernames.iter().map(String::as_str).collect();
        let mut users = self.load()?;
        let total = users.len();
        users.retain(|u| wanted.contains(u.username.as_str()));
        debug!("Loaded {} user(s) from {}, {} requested", total, self.path.display(), users.len());
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn users_file(json: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_find_users_filters_requested() {
        let f = users_file(
            r#"[
                {"username": "alice", "nickname": "Alice A", "email": "a@x.com"},
                {"username": "bob", "nickname": "Bob B"}
            ]"#,
        );
        let directory = FileDirectory::new(f.path());

        let found = directory.find_users(&["bob".to_string()]).unwrap();
        assert_eq!(
            found,
            vec![UserRecord {
                username: "bob".into(),
                nickname: "Bob B".into(),
                email: String::new(),
            }]
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let directory = FileDirectory::new(dir.path().join("absent.json"));
        assert!(matches!(
            directory.find_users(&["alice".to_string()]),
            Err(StorageError::ReadFailed)
        ));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let f = users_file("{ not json");
        let directory = FileDirectory::new(f.path());
        assert!(directory.find_users(&["alice".to_string()]).is_err());
    }

    #[test]
    fn test_empty_request_skips_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let directory = FileDirectory::new(dir.path().join("absent.json"));
        assert!(directory.find_users(&[]).unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn test_new_default_uses_env() {
        std::env::set_var("VIGIL_USERS_FILE", "/tmp/vigil-users.json");
        let directory = FileDirectory::new_default().unwrap();
        std::env::remove_var("VIGIL_USERS_FILE");
        assert_eq!(directory.path(), Path::new("/tmp/vigil-users.json"));
    }
}
