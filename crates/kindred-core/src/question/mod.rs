//! Question domain module.
//!
//! - `model`: the `Question` entity shown on each wizard step
//! - `category`: rotating scenario categories used when generating questions
//! - `builtin`: the fixed question set and the fallback question

mod builtin;
mod category;
mod model;

pub use builtin::{FALLBACK_QUESTION_TEXT, fallback_question, fixed_question, fixed_question_set};
pub use category::QuestionCategory;
pub use model::{MAX_OPTIONS, Question};
