use super::types::*;
use crate::error_handling::types::ConfigError;
use crate::online::IpOrdering;
use serde::Deserialize;
use std::net::IpAddr;
use std::path::Path;

/// Application configuration structure that defines all runtime parameters.
///
/// This structure holds the complete configuration for the application: the
/// web interface exposing the online listing, the user directory backend
/// used for enrichment, and the listing order. It is read from a TOML file
/// with the `serde` derive macro; every field has a default so a partial
/// file is accepted.
///
/// # Examples
///
/// ```ignore
/// use std::path::Path;
/// use vigil::configuration::Config;
///
/// let config = Config::from_file(Path::new("/etc/vigil/vigil.toml"))?;
/// println!("Binding to: {}:{}", config.bind_address, config.web_ui_port);
/// # Ok::<(), vigil::error_handling::types::ConfigError>(())
/// ```
///
/// # Fields Overview
///
/// - `bind_address`: IP address the web interface listens on
/// - `web_ui_enabled`: If `true`, will start the web interface
/// - `web_ui_port`: Port on which to expose the web interface
/// - `ip_ordering`: `raw` or `canonical` ordering of listed addresses
/// - `directory`: user directory backend and its location
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network address to bind the web interface to.
    ///
    /// Must be a literal IPv4 or IPv6 address.
    pub bind_address: String,

    /// Enable or disable the web interface
    ///
    /// When disabled the process only opens the user directory and exits,
    /// which is useful to validate a deployment.
    pub web_ui_enabled: bool,

    /// Port number for the web interface.
    ///
    /// Port number should not be reserved by IANA so mostly in the range of 1024 - 65535
    /// both included
    pub web_ui_port: u16,

    /// Ordering of listed sessions by tunnel address.
    ///
    /// `raw` compares raw address bytes and keeps IPv4 and IPv6 in their
    /// native widths; `canonical` widens IPv4 to IPv4-mapped IPv6 first.
    pub ip_ordering: IpOrdering,

    /// User directory configuration
    pub directory: DirectoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: String::from("127.0.0.1"),
            web_ui_enabled: true,
            web_ui_port: 8800,
            ip_ordering: IpOrdering::Raw,
            directory: DirectoryConfig::default(),
        }
    }
}

impl Config {
    /// Reads and validates the configuration file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses and validates a TOML document.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::TomlError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_ip()?;

        if self.web_ui_enabled && self.web_ui_port < 1024 {
            return Err(ConfigError::NotInRange(format!(
                "web_ui_port {} must be within 1024-65535",
                self.web_ui_port
            )));
        }

        if !(1..=64).contains(&self.directory.max_connections) {
            return Err(ConfigError::NotInRange(format!(
                "directory.max_connections {} must be within 1-64",
                self.directory.max_connections
            )));
        }

        match self.directory.backend {
            DirectoryBackend::Database if self.directory.database_path.is_none() => Err(
                ConfigError::MissingField("directory.database_path".to_string()),
            ),
            DirectoryBackend::File if self.directory.users_file.is_none() => Err(
                ConfigError::MissingField("directory.users_file".to_string()),
            ),
            _ => Ok(()),
        }
    }

    pub fn bind_ip(&self) -> Result<IpAddr, ConfigError> {
        self.bind_address
            .parse()
            .map_err(|_| ConfigError::BadIPFormatting(self.bind_address.clone()))
    }
}
