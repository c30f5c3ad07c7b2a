//! Online session listing.
//!
//! Turns the live, lock-protected session registry into a sorted snapshot of
//! flat display records for operator dashboards.
//!
//! Re-exports:
//! - [`OnlineDirectory`]: the query engine (`list_sessions`, `list_active`).
//! - [`Online`], [`SearchCategory`], [`TransportProtocol`]: record and query types.
//! - [`IpOrdering`], [`sort_onlines`]: ordering stage.
//! - [`human_byte`]: byte count formatter used for bandwidth columns.
//!
//! Example (non-running):
//! ```ignore
//! use std::sync::Arc;
//! use vigil::directory::FileDirectory;
//! use vigil::online::{OnlineDirectory, SearchCategory};
//! use vigil::session_management::SessionRegistry;
//!
//! let registry = Arc::new(SessionRegistry::new());
//! let store = Arc::new(FileDirectory::new("/etc/vigil/users.json"));
//! let online = OnlineDirectory::new(registry, store);
//! for record in online.list_sessions(SearchCategory::Group, "ops", true) {
//!     println!("{} {:?} {}", record.username, record.ip, record.bandwidth_up);
//! }
//! ```

pub mod human_byte;
pub mod online_directory;
pub mod ordering;
pub mod types;

pub use human_byte::human_byte;
pub use online_directory::OnlineDirectory;
pub use ordering::{sort_onlines, IpOrdering};
pub use types::{Online, SearchCategory, TransportProtocol};
