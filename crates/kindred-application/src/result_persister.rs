//! Best-effort storage of finished assessments.
//!
//! The wizard reaches the results screen whether or not the save works;
//! failures are logged here and go no further.

use kindred_core::assessment::{AssessmentDraft, AssessmentRecord, AssessmentRepository};
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved { id: String },
    Failed { reason: String },
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistOutcome::Saved { .. })
    }
}

pub struct ResultPersister {
    repository: Arc<dyn AssessmentRepository>,
    user_id: Option<String>,
}

impl ResultPersister {
    pub fn new(repository: Arc<dyn AssessmentRepository>, user_id: Option<String>) -> Self {
        Self {
            repository,
            user_id,
        }
    }

    /// Stores one new record. Plain insert: saving twice stores twice.
    pub async fn save(&self, draft: AssessmentDraft) -> PersistOutcome {
        let record = AssessmentRecord::from_draft(aligned(draft), self.user_id.clone());
        let id = record.id.clone();

        match self.repository.insert(&record).await {
            Ok(()) => {
                tracing::info!(%id, character = %record.result.character, "assessment saved");
                PersistOutcome::Saved { id }
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "assessment save failed");
                PersistOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Runs [`save`](Self::save) on the runtime. The handle may be dropped.
    pub fn spawn_save(self: &Arc<Self>, draft: AssessmentDraft) -> JoinHandle<PersistOutcome> {
        let persister = Arc::clone(self);
        tokio::spawn(async move { persister.save(draft).await })
    }
}

/// Keeps only index-aligned pairs whose response is non-blank.
fn aligned(draft: AssessmentDraft) -> AssessmentDraft {
    let (questions, responses) = draft
        .questions
        .into_iter()
        .zip(draft.responses)
        .filter(|(_, response)| !response.trim().is_empty())
        .unzip();
    AssessmentDraft {
        questions,
        responses,
        result: draft.result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kindred_core::analysis::AnalysisResult;
    use kindred_core::error::{KindredError, Result};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRepository {
        inserted: Mutex<Vec<AssessmentRecord>>,
        fail: bool,
    }

    #[async_trait]
    impl AssessmentRepository for RecordingRepository {
        async fn insert(&self, record: &AssessmentRecord) -> Result<()> {
            if self.fail {
                return Err(KindredError::persistence("store is down"));
            }
            self.inserted.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn list_recent(&self, _limit: usize) -> Result<Vec<AssessmentRecord>> {
            Ok(self.inserted.lock().unwrap().clone())
        }
    }

    fn draft(questions: &[&str], responses: &[&str]) -> AssessmentDraft {
        AssessmentDraft {
            questions: questions.iter().map(|s| s.to_string()).collect(),
            responses: responses.iter().map(|s| s.to_string()).collect(),
            result: AnalysisResult::fallback(),
        }
    }

    #[tokio::test]
    async fn test_save_filters_blank_pairs() {
        let repo = Arc::new(RecordingRepository::default());
        let persister = ResultPersister::new(repo.clone(), Some("u1".into()));

        let outcome = persister
            .save(draft(&["Q1", "Q2", "Q3", "Q4"], &["a", " ", "c"]))
            .await;

        assert!(outcome.is_saved());
        let inserted = repo.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].questions, vec!["Q1", "Q3"]);
        assert_eq!(inserted[0].responses, vec!["a", "c"]);
        assert_eq!(inserted[0].user_id.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn test_failure_is_reported_not_raised() {
        let repo = Arc::new(RecordingRepository {
            fail: true,
            ..Default::default()
        });
        let persister = ResultPersister::new(repo, None);

        let outcome = persister.save(draft(&["Q"], &["a"])).await;
        match outcome {
            PersistOutcome::Failed { reason } => assert!(reason.contains("store is down")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_repeated_saves_accumulate() {
        let repo = Arc::new(RecordingRepository::default());
        let persister = Arc::new(ResultPersister::new(repo.clone(), None));

        let first = persister.spawn_save(draft(&["Q"], &["a"])).await.unwrap();
        let second = persister.spawn_save(draft(&["Q"], &["a"])).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(repo.inserted.lock().unwrap().len(), 2);
    }
}
