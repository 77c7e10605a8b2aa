use super::step::WizardStep;
use serde::{Deserialize, Serialize};

/// Emitted by the controller for every accepted transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WizardEvent {
    /// Left the landing screen.
    Started { step: WizardStep },
    GuessesSubmitted { guesses: Vec<String> },
    /// A question for the 0-based step was stored.
    QuestionRecorded { index: usize },
    /// Moved forward to the 0-based step.
    Advanced { index: usize },
    /// Moved back to the 0-based step.
    Retreated { index: usize },
    /// Backed out of the question flow or guess screen.
    ReturnedTo { step: WizardStep },
    /// All questions answered; these responses go to analysis.
    AnalysisRequested { responses: Vec<String> },
    Completed { character: String },
    Restarted,
}
