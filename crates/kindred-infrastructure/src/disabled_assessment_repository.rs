use async_trait::async_trait;
use kindred_core::assessment::{AssessmentRecord, AssessmentRepository};
use kindred_core::error::Result;

/// Store used when `persistence.backend = "disabled"`: accepts and drops
/// every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAssessmentRepository;

#[async_trait]
impl AssessmentRepository for DisabledAssessmentRepository {
    async fn insert(&self, record: &AssessmentRecord) -> Result<()> {
        tracing::debug!(id = %record.id, "persistence disabled; assessment dropped");
        Ok(())
    }

    async fn list_recent(&self, _limit: usize) -> Result<Vec<AssessmentRecord>> {
        Ok(Vec::new())
    }
}
