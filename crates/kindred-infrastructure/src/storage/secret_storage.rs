//! secret.json storage (read-only).

use crate::paths::KindredPaths;
use kindred_core::config::SecretConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretStorageError {
    #[error("Secret file not found at: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Could not determine the config directory")]
    ConfigDirNotFound,
}

/// Reads secret.json into `SecretConfig`.
///
/// Does not validate keys and never writes; the template is created by
/// `KindredPaths::ensure_secret_file`.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    pub fn from_paths(paths: &KindredPaths) -> Result<Self, SecretStorageError> {
        let path = paths
            .secret_file()
            .map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
