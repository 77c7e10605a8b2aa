//! Directory-backed AssessmentRepository.
//!
//! Directory structure:
//! ```text
//! assessments/
//! ├── <uuid-1>.json
//! └── <uuid-2>.json
//! ```

use crate::dto::AssessmentV1_0_0;
use crate::storage::{AtomicFileError, write_new};
use async_trait::async_trait;
use kindred_core::assessment::{AssessmentRecord, AssessmentRepository};
use kindred_core::error::{KindredError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct AsyncDirAssessmentRepository {
    dir: PathBuf,
}

impl AsyncDirAssessmentRepository {
    /// Opens (creating if needed) the store at `dir`.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| KindredError::io(format!("Failed to create {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    async fn read_record(path: &Path) -> Result<AssessmentRecord> {
        let content = fs::read_to_string(path).await?;
        let dto: AssessmentV1_0_0 = serde_json::from_str(&content)?;
        Ok(dto.into())
    }
}

#[async_trait]
impl AssessmentRepository for AsyncDirAssessmentRepository {
    async fn insert(&self, record: &AssessmentRecord) -> Result<()> {
        let path = self.file_path(&record.id);
        let json = serde_json::to_string_pretty(&AssessmentV1_0_0::from(record))?;

        let target = path.clone();
        let written = tokio::task::spawn_blocking(move || write_new(&target, json.as_bytes()))
            .await
            .map_err(|e| KindredError::persistence(format!("Assessment write task failed: {e}")))?;

        match written {
            Ok(()) => {}
            Err(AtomicFileError::Io(e)) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(KindredError::persistence(format!(
                    "assessment {} already exists",
                    record.id
                )));
            }
            Err(e) => {
                return Err(KindredError::persistence(format!(
                    "Failed to store assessment: {e}"
                )));
            }
        }

        tracing::debug!(id = %record.id, path = %path.display(), "assessment written");
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| KindredError::data_access(format!("Failed to list assessments: {e}")))?;

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            let is_hidden = path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with('.'));
            if !is_json || is_hidden {
                continue;
            }
            match Self::read_record(&path).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable assessment");
                }
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        Ok(records)
    }
}
