//! Analysis domain module: the final match and how it is presented.

mod model;
mod presentation;

pub use model::{AnalysisResult, TraitMatch};
pub use presentation::{format_year, ANALYSIS_PROGRESS_MESSAGES};
