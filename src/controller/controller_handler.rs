use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::configuration::{Config, DirectoryBackend};
use crate::directory::{DatabaseDirectory, DirectoryStore, FileDirectory};
use crate::error_handling::types::*;
use crate::online::OnlineDirectory;
use crate::session_management::SessionRegistry;
use crate::web_interface::WebServer;

/// Wires configuration, user directory, session registry and web interface.
///
/// The registry is created empty; the tunnel runtime embedding this crate
/// fills it through [`Controller::registry`].
pub struct Controller {
    pub config: Config,
    registry: Arc<SessionRegistry>,
    online: Arc<OnlineDirectory>,
}

impl Controller {
    /// Opens the configured directory backend.
    ///
    /// Must be called outside of any tokio runtime: the database backend
    /// starts its own.
    pub fn new(config: Config) -> Result<Self, ControllerError> {
        info!("Opening {:?} user directory", config.directory.backend);
        let store = Self::open_directory(&config).map_err(|e| {
            error!("Unable to open the user directory: {}", e);
            e
        })?;
        let registry = Arc::new(SessionRegistry::new());
        let online = Arc::new(
            OnlineDirectory::new(registry.clone(), store).with_ip_ordering(config.ip_ordering),
        );
        Ok(Self {
            config,
            registry,
            online,
        })
    }

    fn open_directory(config: &Config) -> Result<Arc<dyn DirectoryStore>, ControllerError> {
        let directory = &config.directory;
        match directory.backend {
            DirectoryBackend::Database => {
                let path = directory.database_path.clone().ok_or_else(|| {
                    ConfigError::MissingField("directory.database_path".to_string())
                })?;
                Ok(Arc::new(DatabaseDirectory::new_file(
                    path,
                    directory.max_connections,
                )?))
            }
            DirectoryBackend::File => {
                let path = directory
                    .users_file
                    .clone()
                    .ok_or_else(|| ConfigError::MissingField("directory.users_file".to_string()))?;
                Ok(Arc::new(FileDirectory::new(path)))
            }
        }
    }

    pub fn registry(&self) -> Arc<SessionRegistry> {
        self.registry.clone()
    }

    pub fn online(&self) -> Arc<OnlineDirectory> {
        self.online.clone()
    }

    /// Serves the web interface until it stops. Returns immediately when
    /// the web interface is disabled.
    pub fn run(&self) -> Result<(), ControllerError> {
        if !self.config.web_ui_enabled {
            info!("Web interface disabled, nothing to serve");
            return Ok(());
        }

        let addr = SocketAddr::new(self.config.bind_ip()?, self.config.web_ui_port);
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| ControllerError::InitializationFailed(e.to_string()))?;
        let server = WebServer::new(self.online.clone());
        runtime.block_on(server.start(addr))?;
        info!("Web interface stopped");
        Ok(())
    }
}
