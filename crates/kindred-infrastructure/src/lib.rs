//! Infrastructure layer for Kindred: where files live, how config and
//! secrets are read and written, where assessments are stored, and how
//! logging is wired.

pub mod async_dir_assessment_repository;
pub mod disabled_assessment_repository;
pub mod dto;
pub mod logging;
pub mod paths;
pub mod secret_service;
pub mod storage;
pub mod supabase_assessment_repository;

pub use async_dir_assessment_repository::AsyncDirAssessmentRepository;
pub use disabled_assessment_repository::DisabledAssessmentRepository;
pub use paths::{KindredPaths, PathError};
pub use secret_service::{GEMINI_API_KEY_ENV, SecretServiceImpl};
pub use storage::{ConfigStorage, ConfigStorageError, SecretStorage, SecretStorageError};
pub use supabase_assessment_repository::SupabaseAssessmentRepository;

use kindred_core::assessment::AssessmentRepository;
use kindred_core::config::{PersistenceBackend, PersistenceSettings, SecretConfig};
use kindred_core::error::{KindredError, Result};
use std::sync::Arc;

/// Builds the assessment store selected by `persistence.backend`.
pub async fn build_assessment_repository(
    settings: &PersistenceSettings,
    paths: &KindredPaths,
    secrets: &SecretConfig,
) -> Result<Arc<dyn AssessmentRepository>> {
    match settings.backend {
        PersistenceBackend::Local => {
            let dir = paths
                .assessments_dir()
                .map_err(|e| KindredError::config(e.to_string()))?;
            Ok(Arc::new(AsyncDirAssessmentRepository::new(dir).await?))
        }
        PersistenceBackend::Supabase => {
            let supabase = secrets.supabase.as_ref().ok_or_else(|| {
                KindredError::config("persistence.backend is \"supabase\" but secret.json has no supabase section")
            })?;
            Ok(Arc::new(
                SupabaseAssessmentRepository::from_config(supabase)?
                    .with_timeout(settings.request_timeout()),
            ))
        }
        PersistenceBackend::Disabled => Ok(Arc::new(DisabledAssessmentRepository)),
    }
}
