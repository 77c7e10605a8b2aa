use serde::{Deserialize, Serialize};
use strum::Display;

/// The screen a session is currently on.
///
/// ```text
/// Landing -> [Guessing] -> Questioning(1..N) -> Analyzing -> Results
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Landing,
    Guessing,
    Questioning,
    Analyzing,
    Results,
}
