//! Secret service implementation.
//!
//! Reads secret.json once and caches it. A non-empty `GEMINI_API_KEY`
//! environment variable replaces the Gemini key from the file, so a
//! deployment can supply the credential without writing it to disk.

use crate::paths::KindredPaths;
use crate::storage::{SecretStorage, SecretStorageError};
use kindred_core::config::{GeminiConfig, SecretConfig};
use kindred_core::secret::SecretService;
use once_cell::sync::OnceCell;
use std::sync::Arc;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Clone)]
pub struct SecretServiceImpl {
    storage: Arc<SecretStorage>,
    gemini_key_override: Option<String>,
    cache: Arc<OnceCell<SecretConfig>>,
}

impl SecretServiceImpl {
    /// Service over `<config_dir>/secret.json`, honouring `GEMINI_API_KEY`.
    pub fn new(paths: &KindredPaths) -> Result<Self, SecretStorageError> {
        let storage = SecretStorage::from_paths(paths)?;
        let override_key = std::env::var(GEMINI_API_KEY_ENV).ok();
        Ok(Self::with_storage(storage, override_key))
    }

    /// Explicit storage and override, for tests and embedding.
    pub fn with_storage(storage: SecretStorage, gemini_key_override: Option<String>) -> Self {
        Self {
            storage: Arc::new(storage),
            gemini_key_override: gemini_key_override.filter(|key| !key.trim().is_empty()),
            cache: Arc::new(OnceCell::new()),
        }
    }

    fn load_internal(&self) -> Result<SecretConfig, String> {
        self.cache
            .get_or_try_init(|| {
                let mut config = match self.storage.load() {
                    Ok(config) => config,
                    // The env override alone is enough to run.
                    Err(SecretStorageError::NotFound(_)) if self.gemini_key_override.is_some() => {
                        SecretConfig::default()
                    }
                    Err(e) => return Err(e.to_string()),
                };

                if let Some(key) = &self.gemini_key_override {
                    tracing::debug!("using {GEMINI_API_KEY_ENV} from the environment");
                    let model_name = config.gemini.take().and_then(|g| g.model_name);
                    config.gemini = Some(GeminiConfig {
                        api_key: key.clone(),
                        model_name,
                    });
                }
                Ok(config)
            })
            .cloned()
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig, String> {
        self.load_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.storage.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_secret(temp_dir: &TempDir, json: &str) -> SecretStorage {
        let path = temp_dir.path().join("secret.json");
        std::fs::write(&path, json).unwrap();
        SecretStorage::with_path(path)
    }

    #[tokio::test]
    async fn test_loads_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = write_secret(&temp_dir, r#"{"gemini":{"api_key":"from-file"}}"#);
        let service = SecretServiceImpl::with_storage(storage, None);

        assert!(service.secret_file_exists().await);
        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.gemini.unwrap().api_key, "from-file");
    }

    #[tokio::test]
    async fn test_env_override_replaces_key_keeps_model() {
        let temp_dir = TempDir::new().unwrap();
        let storage = write_secret(
            &temp_dir,
            r#"{"gemini":{"api_key":"from-file","model_name":"gemini-x"}}"#,
        );
        let service = SecretServiceImpl::with_storage(storage, Some("from-env".into()));

        let gemini = service.load_secrets().await.unwrap().gemini.unwrap();
        assert_eq!(gemini.api_key, "from-env");
        assert_eq!(gemini.model_name.as_deref(), Some("gemini-x"));
    }

    #[tokio::test]
    async fn test_env_override_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));
        let service = SecretServiceImpl::with_storage(storage, Some("from-env".into()));

        assert!(!service.secret_file_exists().await);
        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.gemini.unwrap().api_key, "from-env");
        assert!(secrets.supabase.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_without_override_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));
        let service = SecretServiceImpl::with_storage(storage, Some("  ".into()));

        let err = service.load_secrets().await.unwrap_err();
        assert!(err.contains("not found"));
    }

    #[tokio::test]
    async fn test_result_is_cached() {
        let temp_dir = TempDir::new().unwrap();
        let storage = write_secret(&temp_dir, r#"{"gemini":{"api_key":"first"}}"#);
        let service = SecretServiceImpl::with_storage(storage, None);
        service.load_secrets().await.unwrap();

        std::fs::write(
            temp_dir.path().join("secret.json"),
            r#"{"gemini":{"api_key":"second"}}"#,
        )
        .unwrap();
        let gemini = service.load_secrets().await.unwrap().gemini.unwrap();
        assert_eq!(gemini.api_key, "first");
    }
}
