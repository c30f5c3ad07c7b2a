pub mod configuration;
pub mod controller;
pub mod directory;
pub mod error_handling;
pub mod online;
pub mod session_management;
pub mod web_interface;

pub use online::{Online, OnlineDirectory, SearchCategory};
pub use session_management::SessionRegistry;
