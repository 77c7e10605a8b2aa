//! Completed assessments and where they are stored.

mod model;
mod repository;

pub use model::{AssessmentDraft, AssessmentRecord};
pub use repository::AssessmentRepository;
