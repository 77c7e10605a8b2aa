//! Path management for Kindred configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/kindred/           # Config directory
//! ├── config.toml              # Quiz, generation and persistence settings
//! ├── secret.json              # API keys (0600)
//! ├── assessments/             # Saved assessments, one JSON file each
//! └── logs/                    # Daily-rolling logs
//!     └── kindred.log.YYYY-MM-DD
//! ```

use kindred_core::config::{
    DEFAULT_ASSESSMENT_TABLE, DEFAULT_GEMINI_MODEL, GeminiConfig, SecretConfig, SupabaseConfig,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "kindred";

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Cannot find the user config directory")]
    ConfigDirNotFound,
}

/// Resolves every Kindred path.
///
/// `KindredPaths::new(Some(dir))` roots everything at `dir` instead of the
/// platform config directory (used by tests and `--config-dir`).
#[derive(Debug, Clone, Default)]
pub struct KindredPaths {
    base: Option<PathBuf>,
}

impl KindredPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Path to secret.json. Keep it at 0600.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    pub fn assessments_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("assessments"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }

    /// Ensures secret.json exists, writing a typed template if it doesn't.
    ///
    /// The template has empty keys; on Unix the file is created with mode
    /// 0600.
    pub fn ensure_secret_file(&self) -> std::io::Result<PathBuf> {
        let secret_path = self
            .secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: Some(DEFAULT_GEMINI_MODEL.to_string()),
            }),
            supabase: Some(SupabaseConfig {
                url: String::new(),
                api_key: String::new(),
                table: Some(DEFAULT_ASSESSMENT_TABLE.to_string()),
            }),
        };
        let json = serde_json::to_string_pretty(&template)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        write_private(&secret_path, json.as_bytes())?;
        tracing::info!(path = %secret_path.display(), "created secret.json template");
        Ok(secret_path)
    }
}

#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, bytes)
}
