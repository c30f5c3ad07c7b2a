//! User directory subsystem
//!
//! The tunnel runtime keeps only what it needs in memory. Display attributes
//! such as nickname and email live in a persistent user directory and are
//! fetched on demand when sessions are listed.
//!
//! Components:
//! - `directory_trait`: the DirectoryStore trait defining one batched lookup.
//! - `types`: records returned by the backends.
//! - `database_directory`: ORM-based SQLite implementation using SeaORM.
//! - `file_directory`: JSON file implementation for small deployments.
//! - `db_entities`: SeaORM entity model for the `users` table.
//! - `resolver`: best-effort enrichment pre-pass over the session registry.

pub mod database_directory;
pub mod db_entities;
pub mod directory_trait;
pub mod file_directory;
pub mod resolver;
pub mod types;

pub use database_directory::DatabaseDirectory;
pub use directory_trait::DirectoryStore;
pub use file_directory::FileDirectory;
pub use resolver::resolve_user_info;
pub use types::{UserExtraInfo, UserRecord};
