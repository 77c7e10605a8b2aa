//! config.toml storage.
//!
//! Loads and saves the typed `AppConfig`. A missing or empty file is the
//! default configuration; writes go through tmp file + rename, and
//! read-modify-write updates hold an exclusive lock.

use super::atomic_file::{AtomicFileError, FileLock, write_atomic};
use crate::paths::KindredPaths;
use kindred_core::config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigStorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Atomic(#[from] AtomicFileError),
    #[error("Could not determine the config directory")]
    ConfigDirNotFound,
}

pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Storage for `<config_dir>/config.toml`.
    pub fn from_paths(paths: &KindredPaths) -> Result<Self, ConfigStorageError> {
        let path = paths
            .config_file()
            .map_err(|_| ConfigStorageError::ConfigDirNotFound)?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads config.toml; missing or blank files yield the defaults.
    pub fn load(&self) -> Result<AppConfig, ConfigStorageError> {
        if !self.path.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        toml::from_str(&content).map_err(|source| ConfigStorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigStorageError> {
        let toml_string = toml::to_string_pretty(config)?;
        write_atomic(&self.path, toml_string.as_bytes())?;
        tracing::debug!(path = %self.path.display(), "saved config.toml");
        Ok(())
    }

    /// Locked read-modify-write.
    pub fn update<F>(&self, f: F) -> Result<AppConfig, ConfigStorageError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut config = self.load()?;
        f(&mut config);
        self.save(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindred_core::config::{PersistenceBackend, QuestionSourceKind};
    use tempfile::TempDir;

    fn storage(temp_dir: &TempDir) -> ConfigStorage {
        ConfigStorage::new(temp_dir.path().join("config.toml"))
    }

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        assert!(!storage.exists());
        assert_eq!(storage.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);

        let mut config = AppConfig::default();
        config.quiz.question_count = 5;
        config.quiz.question_source = QuestionSourceKind::Fixed;
        config.persistence.backend = PersistenceBackend::Disabled;
        storage.save(&config).unwrap();

        assert_eq!(storage.load().unwrap(), config);
    }

    #[test]
    fn test_update_applies_on_top_of_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        fs::write(storage.path(), "[quiz]\nquestion_count = 3\n").unwrap();

        let updated = storage
            .update(|config| config.generation.request_timeout_secs = 30)
            .unwrap();

        assert_eq!(updated.quiz.question_count, 3);
        assert_eq!(storage.load().unwrap().generation.request_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        fs::write(storage.path(), "[quiz\n").unwrap();

        let err = storage.load().unwrap_err();
        assert!(matches!(err, ConfigStorageError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
