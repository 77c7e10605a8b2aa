//! Drives one quiz session end to end.
//!
//! `QuizUseCase` owns the `WizardController` and performs the I/O the
//! controller asks for: generating the current question, running the
//! analysis, and handing the finished assessment to the persister. Only
//! one generation call is ever outstanding.

use crate::question_source::QuestionSource;
use crate::result_persister::{PersistOutcome, ResultPersister};
use kindred_core::analysis::AnalysisResult;
use kindred_core::question::Question;
use kindred_core::session::{TransitionError, WizardController, WizardEvent, WizardPolicy};
use kindred_interaction::{Generated, GenerationFailure, GenerationGateway};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// What the analysis step produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    /// Set when the fallback profile was used.
    pub fallback_reason: Option<GenerationFailure>,
}

pub struct QuizUseCase {
    wizard: WizardController,
    questions: Arc<dyn QuestionSource>,
    gateway: Arc<GenerationGateway>,
    persister: Arc<ResultPersister>,
    pending_saves: Vec<JoinHandle<PersistOutcome>>,
}

impl QuizUseCase {
    pub fn new(
        policy: WizardPolicy,
        questions: Arc<dyn QuestionSource>,
        gateway: Arc<GenerationGateway>,
        persister: Arc<ResultPersister>,
    ) -> Self {
        Self {
            wizard: WizardController::new(policy),
            questions,
            gateway,
            persister,
            pending_saves: Vec::new(),
        }
    }

    pub fn wizard(&self) -> &WizardController {
        &self.wizard
    }

    pub fn start(&mut self) -> Result<WizardEvent, TransitionError> {
        self.wizard.start()
    }

    pub fn submit_guesses(&mut self, guesses: &[String]) -> Result<WizardEvent, TransitionError> {
        self.wizard.submit_guesses(guesses)
    }

    /// Returns the current step's question, generating it first if this
    /// step has none yet. A question generated earlier is reused.
    pub async fn current_question(&mut self) -> Result<Question, TransitionError> {
        if !self.wizard.needs_question() {
            let index = self.wizard.question_index();
            return self
                .wizard
                .current_question()
                .cloned()
                .ok_or(TransitionError::MissingQuestion { index });
        }

        let step_index = self.wizard.begin_generation()?;
        let prior = self.wizard.state().prior_responses();
        let generated = self.questions.question_for(step_index, &prior).await;
        if let Some(reason) = generated.failure() {
            tracing::debug!(step = step_index + 1, %reason, "showing fallback question");
        }

        let question = generated.into_value();
        if let Err(e) = self.wizard.record_question(question.clone()) {
            self.wizard.finish_generation();
            return Err(e);
        }
        Ok(question)
    }

    pub fn answer(&mut self, text: impl Into<String>) -> Result<(), TransitionError> {
        self.wizard.set_response(text)
    }

    pub fn advance(&mut self) -> Result<WizardEvent, TransitionError> {
        self.wizard.advance()
    }

    pub fn retreat(&mut self) -> Result<WizardEvent, TransitionError> {
        self.wizard.retreat()
    }

    /// Runs the analysis, moves to Results, and starts the save without
    /// waiting for it.
    pub async fn run_analysis(&mut self) -> Result<AnalysisOutcome, TransitionError> {
        self.wizard.begin_generation()?;
        let responses = self.wizard.state().non_blank_responses();
        let generated = self.gateway.analyze(&responses).await;

        let fallback_reason = generated.failure().cloned();
        let result = generated.into_value();
        let draft = match self.wizard.complete_analysis(result.clone()) {
            Ok(draft) => draft,
            Err(e) => {
                self.wizard.finish_generation();
                return Err(e);
            }
        };

        self.pending_saves.retain(|handle| !handle.is_finished());
        self.pending_saves.push(self.persister.spawn_save(draft));

        Ok(AnalysisOutcome {
            result,
            fallback_reason,
        })
    }

    /// Back to Landing with a fresh session.
    pub fn restart(&mut self) -> WizardEvent {
        self.wizard.restart()
    }

    /// Waits for saves still in flight, e.g. before the process exits.
    pub async fn wait_for_saves(&mut self) -> Vec<PersistOutcome> {
        let mut outcomes = Vec::new();
        for handle in self.pending_saves.drain(..) {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => tracing::warn!(error = %e, "assessment save task failed"),
            }
        }
        outcomes
    }
}
