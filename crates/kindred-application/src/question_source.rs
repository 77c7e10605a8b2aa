//! Where each step's question comes from.

use async_trait::async_trait;
use kindred_core::config::QuestionSourceKind;
use kindred_core::question::{Question, fixed_question};
use kindred_interaction::{Generated, GenerationGateway};
use std::sync::Arc;

#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Question for the 0-based `step_index`. Never fails: a source that
    /// cannot produce one returns a fallback.
    async fn question_for(
        &self,
        step_index: usize,
        prior_responses: &[String],
    ) -> Generated<Question>;
}

/// Asks the model for every question.
pub struct GeneratedQuestionSource {
    gateway: Arc<GenerationGateway>,
}

impl GeneratedQuestionSource {
    pub fn new(gateway: Arc<GenerationGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl QuestionSource for GeneratedQuestionSource {
    async fn question_for(
        &self,
        step_index: usize,
        prior_responses: &[String],
    ) -> Generated<Question> {
        self.gateway.next_question(step_index, prior_responses).await
    }
}

/// The built-in question set, no network.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedQuestionSource;

#[async_trait]
impl QuestionSource for FixedQuestionSource {
    async fn question_for(&self, step_index: usize, _prior: &[String]) -> Generated<Question> {
        Generated::Fresh(fixed_question(step_index))
    }
}

pub fn question_source_for(
    kind: QuestionSourceKind,
    gateway: Arc<GenerationGateway>,
) -> Arc<dyn QuestionSource> {
    match kind {
        QuestionSourceKind::Generated => Arc::new(GeneratedQuestionSource::new(gateway)),
        QuestionSourceKind::Fixed => Arc::new(FixedQuestionSource),
    }
}
