//! Session management core module.
//!
//! This module holds the in-memory state the tunnel runtime keeps for every
//! connected client: the registry of sessions, the per-session state guarded
//! by its own lock, and the live connection binding with its bandwidth
//! counters.
//!
//! The listing engine in [`crate::online`] only reads these types. Creation,
//! authentication and teardown belong to the tunnel runtime, which owns the
//! shared [`session_registry::SessionRegistry`].

use serde::{Deserialize, Serialize};

/// Submodule for the live transport binding of a session.
pub mod conn_session;
/// Submodule for session data structures.
pub mod session;
/// Submodule for the registry of all sessions.
pub mod session_registry;

pub use conn_session::{BandwidthCounters, BandwidthSnapshot, ConnSession, DtlsSession};
pub use session::{Session, SessionState};
pub use session_registry::SessionRegistry;

/// Origin of the credentials a session authenticated with.
///
/// Variants:
/// - `Local`: users stored in the local user directory.
/// - `Ldap`: an LDAP server.
/// - `Radius`: a RADIUS server.
/// - `Oidc`: an OpenID Connect provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    Local,
    Ldap,
    Radius,
    Oidc,
}

impl AuthType {
    /// Whether the persistent user directory holds a record for users
    /// authenticated this way.
    pub fn is_directory_backed(&self) -> bool {
        matches!(self, AuthType::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_local_auth_is_directory_backed() {
        assert!(AuthType::Local.is_directory_backed());
        assert!(!AuthType::Ldap.is_directory_backed());
        assert!(!AuthType::Radius.is_directory_backed());
        assert!(!AuthType::Oidc.is_directory_backed());
    }

    #[test]
    fn test_auth_type_serializes_lowercase() {
        let json = serde_json::to_string(&AuthType::Radius).unwrap();
        assert_eq!(json, "\"radius\"");
        let parsed: AuthType = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(parsed, AuthType::Local);
    }
}
