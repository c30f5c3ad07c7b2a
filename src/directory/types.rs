use serde::{Deserialize, Serialize};

/// One user row as stored in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
}

/// Display attributes attached to a listed session, keyed by username.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserExtraInfo {
    pub nickname: String,
    pub email: String,
}

impl From<UserRecord> for UserExtraInfo {
    fn from(record: UserRecord) -> Self {
        Self {
            nickname: record.nickname,
            email: record.email,
        }
    }
}
