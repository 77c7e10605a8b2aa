//! Scenario categories for generated questions.
//!
//! Successive steps target different trait dimensions. The category for a
//! step is a table lookup: `ALL[step % ALL.len()]`.

use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    #[strum(serialize = "Leadership crisis")]
    LeadershipCrisis,
    #[strum(serialize = "Creative challenge")]
    CreativeChallenge,
    #[strum(serialize = "Resource allocation")]
    ResourceAllocation,
    #[strum(serialize = "Social conflict")]
    SocialConflict,
    #[strum(serialize = "Personal sacrifice")]
    PersonalSacrifice,
    #[strum(serialize = "Knowledge vs action")]
    KnowledgeVsAction,
    #[strum(serialize = "Legacy building")]
    LegacyBuilding,
    #[strum(serialize = "Change vs tradition")]
    ChangeVsTradition,
}

impl QuestionCategory {
    pub const ALL: [QuestionCategory; 8] = [
        QuestionCategory::LeadershipCrisis,
        QuestionCategory::CreativeChallenge,
        QuestionCategory::ResourceAllocation,
        QuestionCategory::SocialConflict,
        QuestionCategory::PersonalSacrifice,
        QuestionCategory::KnowledgeVsAction,
        QuestionCategory::LegacyBuilding,
        QuestionCategory::ChangeVsTradition,
    ];

    /// Category for a 0-based step index, wrapping around the table.
    pub fn for_step(step_index: usize) -> Self {
        Self::ALL[step_index % Self::ALL.len()]
    }

    /// What a scenario in this category puts the user through.
    pub fn description(&self) -> &'static str {
        match self {
            Self::LeadershipCrisis => "Leading a team through unexpected disaster",
            Self::CreativeChallenge => "Balancing innovation with practical constraints",
            Self::ResourceAllocation => "Distributing limited resources among competing needs",
            Self::SocialConflict => "Mediating between opposing groups with valid concerns",
            Self::PersonalSacrifice => "Choosing between personal gain and greater good",
            Self::KnowledgeVsAction => "Having information others don't - when to act or speak",
            Self::LegacyBuilding => "How to be remembered vs immediate impact",
            Self::ChangeVsTradition => "Reforming established systems people depend on",
        }
    }
}
