use serde::Deserialize;
use std::path::PathBuf;

/// Which user directory backend enriches listings.
#[derive(Debug, PartialEq, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryBackend {
    #[default]
    Database,
    File,
}

#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub backend: DirectoryBackend,
    pub database_path: Option<PathBuf>,
    pub users_file: Option<PathBuf>,
    pub max_connections: u32,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            backend: DirectoryBackend::Database,
            database_path: None,
            users_file: None,
            max_connections: 5,
        }
    }
}
