//! Directory Trait
//!
//! This module defines the `DirectoryStore` trait, the interface of the
//! persistent user directory as seen by the session listing.
//!
//! Implementors must answer a whole batch of usernames with a single
//! round-trip to their backend.

use crate::directory::types::UserRecord;
use crate::error_handling::types::StorageError;

/// The `DirectoryStore` trait defines the interface for user directory backends.
pub trait DirectoryStore: Send + Sync {
    /// Looks up every username in `usernames` at once.
    ///
    /// Returns the records that exist; unknown usernames are simply absent
    /// from the result.
    fn find_users(&self, usernames: &[String]) -> Result<Vec<UserRecord>, StorageError>;
}
