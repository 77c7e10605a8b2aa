//! Application layer for Kindred.
//!
//! Wires the wizard state machine to question generation, analysis and
//! result persistence. Front ends drive a [`QuizUseCase`] and render its
//! state; nothing here touches the terminal.

pub mod bootstrap;
pub mod question_source;
pub mod quiz_usecase;
pub mod result_persister;

pub use bootstrap::AppContext;
pub use question_source::{
    FixedQuestionSource, GeneratedQuestionSource, QuestionSource, question_source_for,
};
pub use quiz_usecase::{AnalysisOutcome, QuizUseCase};
pub use result_persister::{PersistOutcome, ResultPersister};
