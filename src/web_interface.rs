// Web Interface module root
pub mod routes;
pub mod web_server;

// Re-export commonly used items
pub use routes::*;
pub use web_server::*;
