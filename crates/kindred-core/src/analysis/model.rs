use serde::{Deserialize, Serialize};

/// A personality trait shared by the user and the matched figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitMatch {
    pub title: String,
    pub description: String,
}

impl TraitMatch {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// The terminal artifact of a session: which historical figure the user
/// matches and why.
///
/// Produced once per completed session and immutable afterwards. Serialized
/// with camelCase keys, which is both the shape the model is asked to emit
/// and the shape stored in the `result` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub character: String,
    /// 0..=100
    pub match_percentage: u8,
    pub description: String,
    pub short_description: String,
    pub biography: String,
    /// Negative years are BCE.
    pub birth_year: i32,
    pub death_year: i32,
    pub location: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub traits: Vec<TraitMatch>,
}

impl AnalysisResult {
    /// The deterministic profile returned when the analysis call fails.
    pub fn fallback() -> Self {
        Self {
            character: "Marcus Aurelius".to_string(),
            match_percentage: 88,
            description: "A thoughtful leader who balances wisdom with action, prioritizing long-term thinking and principled decision-making.".to_string(),
            short_description: "Philosopher Emperor and Stoic Leader".to_string(),
            biography: "Marcus Aurelius stood as one of history's most unique figures - a philosopher who wielded absolute power yet remained grounded in wisdom and humility. As Roman Emperor from 161 to 180 CE, he faced constant military campaigns, plague, and political challenges, yet never abandoned his commitment to Stoic philosophy and self-improvement. His personal journal, 'Meditations,' reveals a leader constantly examining his own actions and motivations, striving to serve the greater good rather than personal ambition. Marcus Aurelius believed that true leadership came from inner discipline and rational thinking, approaching each crisis with measured consideration rather than emotional reaction. He demonstrated that power could be wielded with wisdom, compassion, and an unwavering commitment to duty over personal desires.".to_string(),
            birth_year: 121,
            death_year: 180,
            location: "Rome, Roman Empire".to_string(),
            achievements: vec![
                "Successfully defended Roman Empire during multiple military campaigns".to_string(),
                "Authored 'Meditations', one of history's greatest philosophical works".to_string(),
                "Maintained stability during plague and internal conflicts".to_string(),
                "Exemplified philosopher-king ideal in actual governance".to_string(),
            ],
            traits: vec![
                TraitMatch::new(
                    "Reflective",
                    "Both you and Marcus value deep thinking and self-examination before making decisions",
                ),
                TraitMatch::new(
                    "Duty-Bound",
                    "Strong sense of responsibility and commitment to serving something greater than yourself",
                ),
                TraitMatch::new(
                    "Balanced",
                    "Ability to combine practical action with philosophical wisdom and long-term perspective",
                ),
            ],
        }
    }

    /// Clamps a raw percentage from the model into 0..=100.
    pub fn clamp_percentage(raw: f64) -> u8 {
        if raw.is_nan() {
            return 0;
        }
        raw.round().clamp(0.0, 100.0) as u8
    }
}
