//! The wizard state machine.
//!
//! `WizardController` owns a `SessionState` and is the only thing that
//! mutates it. It performs no I/O: the application layer asks it what to do
//! next (generate a question, run the analysis), performs the call, and feeds
//! the outcome back in. Rejected transitions return a `TransitionError` and
//! leave the state untouched.

use super::event::WizardEvent;
use super::guess::normalize_guesses;
use super::state::SessionState;
use super::step::WizardStep;
use crate::analysis::AnalysisResult;
use crate::assessment::AssessmentDraft;
use crate::config::{DEFAULT_MIN_RESPONSE_CHARS, DEFAULT_QUESTION_COUNT, QuizSettings};
use crate::question::Question;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {action} while on the {actual} screen")]
    WrongStep {
        action: &'static str,
        actual: WizardStep,
    },
    #[error("response must be longer than {min_chars} characters")]
    ResponseTooShort { min_chars: usize },
    #[error("a generation call is still in flight")]
    Busy,
    #[error("no question has been recorded for step {index}")]
    MissingQuestion { index: usize },
    #[error("select at least one figure to continue")]
    NoGuesses,
}

/// Knobs that differ between product variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardPolicy {
    /// Number of question steps (N).
    pub question_count: usize,
    /// A free-text response must be longer than this many characters
    /// (trimmed). Zero means "non-empty".
    pub min_response_chars: usize,
    /// Whether the guess screen sits between landing and the questions.
    pub guessing_enabled: bool,
}

impl Default for WizardPolicy {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            min_response_chars: DEFAULT_MIN_RESPONSE_CHARS,
            guessing_enabled: true,
        }
    }
}

impl From<&QuizSettings> for WizardPolicy {
    fn from(settings: &QuizSettings) -> Self {
        Self {
            question_count: settings.question_count.max(1),
            min_response_chars: settings.min_response_chars,
            guessing_enabled: settings.guessing_enabled,
        }
    }
}

impl WizardPolicy {
    /// The minimum-content guard for advancing past a question.
    ///
    /// Picking one of the question's own options always satisfies it; free
    /// text must exceed `min_response_chars` once trimmed.
    pub fn accepts(&self, question: Option<&Question>, response: &str) -> bool {
        let response = response.trim();
        if response.is_empty() {
            return false;
        }
        if question.is_some_and(|q| q.options.iter().any(|o| o == response)) {
            return true;
        }
        response.chars().count() > self.min_response_chars
    }
}

#[derive(Debug, Clone, Default)]
pub struct WizardController {
    policy: WizardPolicy,
    state: SessionState,
}

impl WizardController {
    pub fn new(policy: WizardPolicy) -> Self {
        Self {
            policy,
            state: SessionState::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn policy(&self) -> &WizardPolicy {
        &self.policy
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn question_index(&self) -> usize {
        self.state.question_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.state.current_question()
    }

    pub fn current_response(&self) -> &str {
        self.state.current_response()
    }

    pub fn is_busy(&self) -> bool {
        self.state.generation_in_flight
    }

    pub fn is_last_question(&self) -> bool {
        self.state.question_index + 1 >= self.policy.question_count
    }

    /// True when the current step has no question yet and one must be
    /// generated before the user can answer.
    pub fn needs_question(&self) -> bool {
        self.state.step == WizardStep::Questioning
            && self.state.questions.len() <= self.state.question_index
    }

    /// Whether `advance()` would currently succeed.
    pub fn can_advance(&self) -> bool {
        self.check_advance().is_ok()
    }

    /// 0.0..=100.0 progress through the question flow.
    pub fn progress_pct(&self) -> f64 {
        match self.state.step {
            WizardStep::Landing | WizardStep::Guessing => 0.0,
            WizardStep::Questioning => {
                (self.state.question_index + 1) as f64 / self.policy.question_count as f64 * 100.0
            }
            WizardStep::Analyzing | WizardStep::Results => 100.0,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Landing -> Guessing, or straight to the first question when the
    /// guess screen is disabled.
    pub fn start(&mut self) -> Result<WizardEvent, TransitionError> {
        self.expect_step(WizardStep::Landing, "start")?;
        let next = if self.policy.guessing_enabled {
            WizardStep::Guessing
        } else {
            WizardStep::Questioning
        };
        self.state.step = next;
        self.state.question_index = 0;
        tracing::info!(step = %next, "wizard started");
        Ok(WizardEvent::Started { step: next })
    }

    /// Guessing -> Questioning, keeping up to three distinct names.
    pub fn submit_guesses<I, S>(&mut self, guesses: I) -> Result<WizardEvent, TransitionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.expect_step(WizardStep::Guessing, "submit guesses")?;
        let guesses = normalize_guesses(guesses);
        if guesses.is_empty() {
            return Err(TransitionError::NoGuesses);
        }
        self.state.guesses = guesses.clone();
        self.state.step = WizardStep::Questioning;
        self.state.question_index = 0;
        tracing::info!(count = guesses.len(), "guesses submitted");
        Ok(WizardEvent::GuessesSubmitted { guesses })
    }

    /// Marks the start of the one allowed outstanding generation call.
    ///
    /// Valid while a question is being generated or the analysis is
    /// running. Returns the 0-based step the call is for.
    pub fn begin_generation(&mut self) -> Result<usize, TransitionError> {
        if !matches!(
            self.state.step,
            WizardStep::Questioning | WizardStep::Analyzing
        ) {
            return Err(TransitionError::WrongStep {
                action: "generate",
                actual: self.state.step,
            });
        }
        if self.state.generation_in_flight {
            return Err(TransitionError::Busy);
        }
        self.state.generation_in_flight = true;
        Ok(self.state.question_index)
    }

    /// Clears the in-flight marker without recording anything.
    pub fn finish_generation(&mut self) {
        self.state.generation_in_flight = false;
    }

    /// Stores the question for the current step and ends the generation
    /// call. A question already stored at this index is replaced.
    pub fn record_question(&mut self, question: Question) -> Result<WizardEvent, TransitionError> {
        self.expect_step(WizardStep::Questioning, "record a question")?;
        let index = self.state.question_index;
        if index < self.state.questions.len() {
            self.state.questions[index] = question;
        } else {
            // Only the next slot can be filled: questions stay contiguous.
            if index != self.state.questions.len() {
                return Err(TransitionError::MissingQuestion {
                    index: self.state.questions.len(),
                });
            }
            self.state.questions.push(question);
        }
        if self.state.responses.len() < self.state.questions.len() {
            self.state.responses.resize(self.state.questions.len(), String::new());
        }
        self.state.generation_in_flight = false;
        Ok(WizardEvent::QuestionRecorded { index })
    }

    /// Writes the response for the current step. Editing is allowed until
    /// the user advances.
    pub fn set_response(&mut self, text: impl Into<String>) -> Result<(), TransitionError> {
        self.expect_step(WizardStep::Questioning, "answer")?;
        let index = self.state.question_index;
        if index >= self.state.questions.len() {
            return Err(TransitionError::MissingQuestion { index });
        }
        if self.state.responses.len() <= index {
            self.state.responses.resize(index + 1, String::new());
        }
        self.state.responses[index] = text.into();
        Ok(())
    }

    /// Moves to the next question, or to Analyzing after the last one.
    pub fn advance(&mut self) -> Result<WizardEvent, TransitionError> {
        self.check_advance()?;

        if self.is_last_question() {
            self.state.step = WizardStep::Analyzing;
            let responses = self.state.non_blank_responses();
            tracing::info!(responses = responses.len(), "all questions answered");
            return Ok(WizardEvent::AnalysisRequested { responses });
        }

        self.state.question_index += 1;
        tracing::debug!(index = self.state.question_index, "advanced");
        Ok(WizardEvent::Advanced {
            index: self.state.question_index,
        })
    }

    /// Moves back one question; from the first question, back to the guess
    /// screen (or landing). From the guess screen, back to landing.
    pub fn retreat(&mut self) -> Result<WizardEvent, TransitionError> {
        match self.state.step {
            WizardStep::Guessing => {
                self.state.step = WizardStep::Landing;
                Ok(WizardEvent::ReturnedTo {
                    step: WizardStep::Landing,
                })
            }
            WizardStep::Questioning => {
                if self.state.generation_in_flight {
                    return Err(TransitionError::Busy);
                }
                if self.state.question_index > 0 {
                    self.state.question_index -= 1;
                    return Ok(WizardEvent::Retreated {
                        index: self.state.question_index,
                    });
                }
                let previous = if self.policy.guessing_enabled {
                    WizardStep::Guessing
                } else {
                    WizardStep::Landing
                };
                self.state.step = previous;
                Ok(WizardEvent::ReturnedTo { step: previous })
            }
            actual => Err(TransitionError::WrongStep {
                action: "go back",
                actual,
            }),
        }
    }

    /// Analyzing -> Results. Returns what should be persisted; the caller
    /// stores it without waiting.
    pub fn complete_analysis(
        &mut self,
        result: AnalysisResult,
    ) -> Result<AssessmentDraft, TransitionError> {
        self.expect_step(WizardStep::Analyzing, "complete the analysis")?;
        let (questions, responses) = self.state.answered_pairs();
        let draft = AssessmentDraft {
            questions,
            responses,
            result: result.clone(),
        };
        tracing::info!(character = %result.character, "analysis complete");
        self.state.result = Some(result);
        self.state.step = WizardStep::Results;
        self.state.generation_in_flight = false;
        Ok(draft)
    }

    /// Back to Landing with nothing left from the previous run.
    pub fn restart(&mut self) -> WizardEvent {
        self.state = SessionState::default();
        tracing::info!("wizard restarted");
        WizardEvent::Restarted
    }

    fn expect_step(&self, expected: WizardStep, action: &'static str) -> Result<(), TransitionError> {
        if self.state.step == expected {
            Ok(())
        } else {
            Err(TransitionError::WrongStep {
                action,
                actual: self.state.step,
            })
        }
    }

    fn check_advance(&self) -> Result<(), TransitionError> {
        self.expect_step(WizardStep::Questioning, "advance")?;
        if self.state.generation_in_flight {
            return Err(TransitionError::Busy);
        }
        let index = self.state.question_index;
        let question = self
            .state
            .questions
            .get(index)
            .ok_or(TransitionError::MissingQuestion { index })?;
        if !self.policy.accepts(Some(question), self.state.current_response()) {
            return Err(TransitionError::ResponseTooShort {
                min_chars: self.policy.min_response_chars,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(question_count: usize, guessing_enabled: bool) -> WizardPolicy {
        WizardPolicy {
            question_count,
            min_response_chars: 10,
            guessing_enabled,
        }
    }

    fn question(index: usize) -> Question {
        Question::new(index + 1, format!("Title {index}"), format!("Prompt {index}"))
    }

    /// Starts a session and lands on the first question with it recorded.
    fn at_first_question(policy: WizardPolicy) -> WizardController {
        let mut wizard = WizardController::new(policy);
        wizard.start().unwrap();
        if policy.guessing_enabled {
            wizard.submit_guesses(["Mozart"]).unwrap();
        }
        wizard.begin_generation().unwrap();
        wizard.record_question(question(0)).unwrap();
        wizard
    }

    fn answer_and_advance(wizard: &mut WizardController, text: &str) -> WizardEvent {
        if wizard.needs_question() {
            wizard.begin_generation().unwrap();
            wizard.record_question(question(wizard.question_index())).unwrap();
        }
        wizard.set_response(text).unwrap();
        wizard.advance().unwrap()
    }

    #[test]
    fn test_start_goes_to_guessing_when_enabled() {
        let mut wizard = WizardController::new(policy(3, true));
        assert_eq!(
            wizard.start(),
            Ok(WizardEvent::Started {
                step: WizardStep::Guessing
            })
        );
        assert_eq!(wizard.step(), WizardStep::Guessing);
    }

    #[test]
    fn test_start_skips_guessing_when_disabled() {
        let mut wizard = WizardController::new(policy(3, false));
        wizard.start().unwrap();
        assert_eq!(wizard.step(), WizardStep::Questioning);
        assert!(wizard.needs_question());
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut wizard = WizardController::new(policy(3, true));
        wizard.start().unwrap();
        assert!(matches!(
            wizard.start(),
            Err(TransitionError::WrongStep { .. })
        ));
    }

    #[test]
    fn test_submit_guesses_filters_and_caps() {
        let mut wizard = WizardController::new(policy(3, true));
        wizard.start().unwrap();
        wizard
            .submit_guesses(["Mozart", "", "Mozart", "Gandhi", "Hannibal", "Confucius"])
            .unwrap();
        assert_eq!(wizard.state().guesses, vec!["Mozart", "Gandhi", "Hannibal"]);
        assert_eq!(wizard.step(), WizardStep::Questioning);
    }

    #[test]
    fn test_submit_no_guesses_is_rejected() {
        let mut wizard = WizardController::new(policy(3, true));
        wizard.start().unwrap();
        assert_eq!(
            wizard.submit_guesses(Vec::<String>::new()),
            Err(TransitionError::NoGuesses)
        );
        assert_eq!(wizard.step(), WizardStep::Guessing);
    }

    #[test]
    fn test_advance_blocked_until_guard_satisfied_on_every_step() {
        let n = 4;
        let mut wizard = at_first_question(policy(n, false));
        for step in 0..n {
            if wizard.needs_question() {
                wizard.begin_generation().unwrap();
                wizard.record_question(question(step)).unwrap();
            }
            for short in ["", "   ", "too short", "exactly10!"] {
                wizard.set_response(short).unwrap();
                assert_eq!(
                    wizard.advance(),
                    Err(TransitionError::ResponseTooShort { min_chars: 10 })
                );
                assert_eq!(wizard.question_index(), step);
                assert_eq!(wizard.step(), WizardStep::Questioning);
            }
            wizard.set_response("long enough answer").unwrap();
            assert!(wizard.can_advance());
            wizard.advance().unwrap();
        }
        assert_eq!(wizard.step(), WizardStep::Analyzing);
    }

    #[test]
    fn test_zero_minimum_means_non_empty() {
        let mut wizard = at_first_question(WizardPolicy {
            question_count: 2,
            min_response_chars: 0,
            guessing_enabled: false,
        });
        wizard.set_response(" ").unwrap();
        assert!(!wizard.can_advance());
        wizard.set_response("a").unwrap();
        assert!(wizard.can_advance());
    }

    #[test]
    fn test_selected_option_satisfies_guard() {
        let mut wizard = WizardController::new(policy(2, false));
        wizard.start().unwrap();
        wizard.begin_generation().unwrap();
        wizard
            .record_question(question(0).with_options(["Yes", "No"]))
            .unwrap();
        wizard.set_response("No").unwrap();
        assert!(wizard.can_advance());
        wizard.set_response("Maybe").unwrap();
        assert!(!wizard.can_advance());
    }

    #[test]
    fn test_advance_blocked_while_generating() {
        let mut wizard = at_first_question(policy(3, false));
        wizard.set_response("a thoughtful answer").unwrap();
        wizard.advance().unwrap();
        wizard.begin_generation().unwrap();
        assert_eq!(wizard.begin_generation(), Err(TransitionError::Busy));
        assert_eq!(wizard.advance(), Err(TransitionError::Busy));
        assert_eq!(wizard.retreat(), Err(TransitionError::Busy));
        wizard.record_question(question(1)).unwrap();
        assert!(!wizard.is_busy());
    }

    #[test]
    fn test_advance_without_question_is_rejected() {
        let mut wizard = WizardController::new(policy(3, false));
        wizard.start().unwrap();
        assert_eq!(
            wizard.advance(),
            Err(TransitionError::MissingQuestion { index: 0 })
        );
        assert_eq!(
            wizard.set_response("answer before question"),
            Err(TransitionError::MissingQuestion { index: 0 })
        );
    }

    #[test]
    fn test_retreat_walks_back_and_keeps_responses() {
        let mut wizard = at_first_question(policy(3, true));
        answer_and_advance(&mut wizard, "first response here");
        answer_and_advance(&mut wizard, "second response here");
        assert_eq!(wizard.question_index(), 2);

        assert_eq!(wizard.retreat(), Ok(WizardEvent::Retreated { index: 1 }));
        assert_eq!(wizard.current_response(), "second response here");
        assert!(!wizard.needs_question());
        assert_eq!(wizard.retreat(), Ok(WizardEvent::Retreated { index: 0 }));
        assert_eq!(
            wizard.retreat(),
            Ok(WizardEvent::ReturnedTo {
                step: WizardStep::Guessing
            })
        );
        assert_eq!(
            wizard.retreat(),
            Ok(WizardEvent::ReturnedTo {
                step: WizardStep::Landing
            })
        );
    }

    #[test]
    fn test_retreat_from_first_question_without_guessing() {
        let mut wizard = at_first_question(policy(3, false));
        assert_eq!(
            wizard.retreat(),
            Ok(WizardEvent::ReturnedTo {
                step: WizardStep::Landing
            })
        );
    }

    #[test]
    fn test_record_question_replaces_stale_question() {
        let mut wizard = at_first_question(policy(3, false));
        wizard.begin_generation().unwrap();
        wizard
            .record_question(Question::new(1, "Replaced", "New prompt"))
            .unwrap();
        assert_eq!(wizard.state().questions.len(), 1);
        assert_eq!(wizard.current_question().unwrap().title, "Replaced");
    }

    #[test]
    fn test_full_flow_and_draft() {
        let mut wizard = at_first_question(policy(5, false));
        let answers = ["a", "b", "c", "d", "e"].map(|a| format!("{a} is my padded answer"));
        let mut last = None;
        for answer in &answers {
            last = Some(answer_and_advance(&mut wizard, answer));
        }
        assert_eq!(
            last,
            Some(WizardEvent::AnalysisRequested {
                responses: answers.to_vec()
            })
        );
        assert_eq!(wizard.step(), WizardStep::Analyzing);
        assert_eq!(wizard.state().responses.len(), wizard.state().questions.len());

        wizard.begin_generation().unwrap();
        let draft = wizard.complete_analysis(AnalysisResult::fallback()).unwrap();
        assert_eq!(wizard.step(), WizardStep::Results);
        assert!(!wizard.is_busy());
        assert_eq!(draft.responses, answers.to_vec());
        assert_eq!(draft.questions.len(), 5);
        assert_eq!(draft.questions[0], "Prompt 0");
        assert!(wizard.state().result.is_some());
    }

    #[test]
    fn test_complete_analysis_requires_analyzing() {
        let mut wizard = at_first_question(policy(3, false));
        assert!(matches!(
            wizard.complete_analysis(AnalysisResult::fallback()),
            Err(TransitionError::WrongStep { .. })
        ));
        assert!(wizard.state().result.is_none());
    }

    #[test]
    fn test_restart_clears_everything() {
        let mut wizard = at_first_question(policy(1, true));
        answer_and_advance(&mut wizard, "only answer given");
        wizard.complete_analysis(AnalysisResult::fallback()).unwrap();

        assert_eq!(wizard.restart(), WizardEvent::Restarted);
        assert_eq!(wizard.state(), &SessionState::default());

        // A second run carries nothing over.
        wizard.start().unwrap();
        wizard.submit_guesses(["Gandhi"]).unwrap();
        assert!(wizard.state().questions.is_empty());
        assert!(wizard.state().responses.is_empty());
        assert!(wizard.state().result.is_none());
        assert_eq!(wizard.state().guesses, vec!["Gandhi"]);
    }

    #[test]
    fn test_progress() {
        let mut wizard = at_first_question(policy(4, false));
        assert_eq!(wizard.progress_pct(), 25.0);
        answer_and_advance(&mut wizard, "first response here");
        assert_eq!(wizard.progress_pct(), 50.0);
    }
}
