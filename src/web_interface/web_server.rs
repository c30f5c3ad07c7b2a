use std::net::SocketAddr;
use std::sync::Arc;

use log::info;
use warp::Filter;

use crate::error_handling::types::WebError;
use crate::online::OnlineDirectory;

use super::routes::{dashboard_route, list_online_route};

/// Web server for the online listing API
pub struct WebServer {
    online: Arc<OnlineDirectory>,
}

impl WebServer {
    /// Create a new WebServer instance
    pub fn new(online: Arc<OnlineDirectory>) -> Self {
        Self { online }
    }

    /// Serve the API on `addr` until the process stops
    pub async fn start(&self, addr: SocketAddr) -> Result<(), WebError> {
        let routes = dashboard_route().or(list_online_route(self.online.clone()));

        info!("Web interface listening on {}", addr);
        let server = tokio::spawn(warp::serve(routes).run(addr));
        server
            .await
            .map_err(|e| WebError::Internal(e.to_string()))
    }
}
