use std::path::Path;

use log::{debug, error, info};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    QueryFilter, QuerySelect, Set,
};

use crate::directory::db_entities::users;
use crate::directory::directory_trait::DirectoryStore;
use crate::directory::types::UserRecord;
use crate::error_handling::types::StorageError;

/// SQLite-backed user directory.
///
/// The store owns a private current-thread runtime so callers get a plain
/// blocking API. Do not call it from inside an async context; hop onto a
/// blocking thread first.
pub struct DatabaseDirectory {
    rt: tokio::runtime::Runtime,
    db: DatabaseConnection,
}

impl DatabaseDirectory {
    /// Create or open the database at `path`, creating the schema if needed.
    pub fn new_file<P: AsRef<Path>>(path: P, max_connections: u32) -> Result<Self, StorageError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|_| StorageError::ConnectionFailed)?;
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                error!("Failed to create directory {}: {}", parent.display(), e);
                StorageError::WriteFailed
            })?;
        }
        let url = format!("sqlite://{}?mode=rwc", path_ref.display());
        let db = rt.block_on(async {
            let mut opts = ConnectOptions::new(url);
            opts.max_connections(max_connections).sqlx_logging(false);
            let db = Database::connect(opts).await.map_err(|e| {
                error!("Failed to open user directory {}: {}", path_ref.display(), e);
                StorageError::ConnectionFailed
            })?;
            db.execute_unprepared(
                "CREATE TABLE IF NOT EXISTS users (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    username TEXT NOT NULL UNIQUE,
                    nickname TEXT NOT NULL DEFAULT '',
                    email TEXT NOT NULL DEFAULT ''
                );",
            )
            .await
            .map_err(|e| {
                error!("Failed to create users table: {}", e);
                StorageError::WriteFailed
            })?;
            Ok::<_, StorageError>(db)
        })?;
        info!("User directory opened at {}", path_ref.display());
        Ok(Self { rt, db })
    }

    /// Inserts a user, or updates nickname and email of an existing one.
    pub fn save_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        self.rt.block_on(async {
            let model = users::ActiveModel {
                username: Set(user.username.clone()),
                nickname: Set(user.nickname.clone()),
                email: Set(user.email.clone()),
                ..Default::default()
            };
            users::Entity::insert(model)
                .on_conflict(
                    OnConflict::column(users::Column::Username)
                        .update_columns([users::Column::Nickname, users::Column::Email])
                        .to_owned(),
                )
                .exec(&self.db)
                .await
                .map_err(|e| {
                    error!("Failed to save user {}: {}", user.username, e);
                    StorageError::WriteFailed
                })?;
            Ok(())
        })
    }
}

impl DirectoryStore for DatabaseDirectory {
    fn find_users(&self, usernames: &[String]) -> Result<Vec<UserRecord>, StorageError> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }
        self.rt.block_on(async {
            let rows = users::Entity::find()
                .select_only()
                .columns([
                    users::Column::Username,
                    users::Column::Nickname,
                    users::Column::Email,
                ])
                .filter(users::Column::Username.is_in(usernames.iter().cloned()))
                .into_model::<users::ExtraInfoRow>()
                .all(&self.db)
                .await
                .map_err(|e| {
                    error!("User directory lookup failed: {}", e);
                    StorageError::ReadFailed
                })?;
            debug!(
                "Directory lookup for {} username(s) returned {} row(s)",
                usernames.len(),
                rows.len()
            );
            Ok(rows
                .into_iter()
                .map(|row| UserRecord {
                    username: row.username,
                    nickname: row.nickname,
                    email: row.email,
                })
                .collect())
        })
    }
}
