use super::step::WizardStep;
use crate::analysis::AnalysisResult;
use crate::question::Question;
use serde::{Deserialize, Serialize};

/// Everything one user's traversal of the wizard accumulates.
///
/// Owned exclusively by a `WizardController`. `responses[i]` answers
/// `questions[i]`; responses may run ahead of questions only while the
/// user is typing on a step whose question is already recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionState {
    pub step: WizardStep,
    /// 0-based position within the question flow.
    pub question_index: usize,
    pub questions: Vec<Question>,
    pub responses: Vec<String>,
    pub guesses: Vec<String>,
    pub result: Option<AnalysisResult>,
    /// True while a question or analysis call is outstanding.
    pub generation_in_flight: bool,
}

impl SessionState {
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.question_index)
    }

    pub fn current_response(&self) -> &str {
        self.responses
            .get(self.question_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Question prompts and responses for every step with a non-blank
    /// answer, index-aligned.
    pub fn answered_pairs(&self) -> (Vec<String>, Vec<String>) {
        self.questions
            .iter()
            .zip(self.responses.iter())
            .filter(|(_, response)| !response.trim().is_empty())
            .map(|(question, response)| (question.prompt.clone(), response.trim().to_string()))
            .unzip()
    }

    /// Non-blank responses in step order.
    pub fn non_blank_responses(&self) -> Vec<String> {
        self.answered_pairs().1
    }

    /// Responses for the steps before the current one, as context for
    /// generating the next question.
    pub fn prior_responses(&self) -> Vec<String> {
        self.responses
            .iter()
            .take(self.question_index)
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect()
    }
}
