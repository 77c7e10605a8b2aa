use super::model::AssessmentRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Storage for completed assessments.
///
/// Inserts are append-only: saving the same session twice yields two
/// records.
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    async fn insert(&self, record: &AssessmentRecord) -> Result<()>;

    /// Most recent first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>>;
}
