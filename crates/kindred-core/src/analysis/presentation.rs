//! Display helpers for the results and analysis screens.

use super::model::AnalysisResult;

/// Status lines cycled while the analysis call is running.
pub const ANALYSIS_PROGRESS_MESSAGES: [&str; 7] = [
    "Analyzing your character traits...",
    "Comparing with history's great leaders...",
    "Evaluating your cultural affinity...",
    "Examining your leadership style...",
    "Studying your values and principles...",
    "Calculating historical compatibility...",
    "Finalizing your historical match...",
];

/// Formats a year, rendering negative years as BCE.
pub fn format_year(year: i32) -> String {
    if year < 0 {
        format!("{} BCE", year.unsigned_abs())
    } else {
        year.to_string()
    }
}

impl AnalysisResult {
    /// "121 - 180", "356 - 323 BCE", or "4 BCE - 65 CE".
    /// `None` when the model gave no years (both 0; there is no year 0).
    pub fn lifespan(&self) -> Option<String> {
        if self.birth_year == 0 && self.death_year == 0 {
            return None;
        }
        let text = match (self.birth_year < 0, self.death_year < 0) {
            (true, true) => format!(
                "{} - {} BCE",
                self.birth_year.unsigned_abs(),
                self.death_year.unsigned_abs()
            ),
            (true, false) => format!(
                "{} - {} CE",
                format_year(self.birth_year),
                self.death_year
            ),
            _ => format!("{} - {}", self.birth_year, self.death_year),
        };
        Some(text)
    }

    /// Splits the biography into paragraphs of two sentences each.
    ///
    /// A sentence ends at a period followed by whitespace and an uppercase
    /// letter, so abbreviations like "180 CE," stay inside their sentence.
    pub fn biography_paragraphs(&self) -> Vec<String> {
        let sentences = split_sentences(&self.biography);
        sentences
            .chunks(2)
            .map(|chunk| {
                let mut paragraph = chunk.join(" ");
                if !paragraph.ends_with(['.', '!', '?']) {
                    paragraph.push('.');
                }
                paragraph
            })
            .collect()
    }

    /// Text for sharing the result.
    pub fn share_text(&self, origin: &str) -> String {
        format!(
            "I just discovered my historical match! I'm a {}% match with {} - {} Take the assessment: {}",
            self.match_percentage, self.character, self.description, origin
        )
    }
}

fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for i in 0..chars.len() {
        let boundary = chars[i] == '.'
            && chars.get(i + 1).is_some_and(|c| c.is_whitespace())
            && chars.get(i + 2).is_some_and(|c| c.is_uppercase());
        if boundary {
            let sentence: String = chars[start..=i].iter().collect();
            let sentence = sentence.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = i + 1;
        }
    }

    let rest: String = chars[start..].iter().collect();
    let rest = rest.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_biography(biography: &str) -> AnalysisResult {
        AnalysisResult {
            biography: biography.to_string(),
            ..AnalysisResult::fallback()
        }
    }

    #[test]
    fn test_paragraphs_group_two_sentences() {
        let result = with_biography("Alpha one. Beta two. Gamma three.");
        assert_eq!(
            result.biography_paragraphs(),
            vec!["Alpha one. Beta two.", "Gamma three."]
        );
    }

    #[test]
    fn test_paragraphs_keep_lowercase_continuations() {
        let result = with_biography("Ruled from 161 to 180 c. as emperor. Wrote Meditations");
        assert_eq!(
            result.biography_paragraphs(),
            vec!["Ruled from 161 to 180 c. as emperor. Wrote Meditations."]
        );
    }

    #[test]
    fn test_empty_biography() {
        assert!(with_biography("   ").biography_paragraphs().is_empty());
    }

    #[test]
    fn test_fallback_biography_has_paragraphs() {
        let paragraphs = AnalysisResult::fallback().biography_paragraphs();
        assert_eq!(paragraphs.len(), 3);
        assert!(paragraphs[0].starts_with("Marcus Aurelius stood"));
    }

    #[test]
    fn test_lifespan() {
        let mut result = AnalysisResult::fallback();
        assert_eq!(result.lifespan().as_deref(), Some("121 - 180"));

        result.birth_year = -356;
        result.death_year = -323;
        assert_eq!(result.lifespan().as_deref(), Some("356 - 323 BCE"));

        result.birth_year = -4;
        result.death_year = 65;
        assert_eq!(result.lifespan().as_deref(), Some("4 BCE - 65 CE"));
    }

    #[test]
    fn test_lifespan_unknown_years() {
        let mut result = AnalysisResult::fallback();
        result.birth_year = 0;
        result.death_year = 0;
        assert_eq!(result.lifespan(), None);
    }

    #[test]
    fn test_share_text() {
        let text = AnalysisResult::fallback().share_text("https://kindred.example");
        assert!(text.starts_with("I just discovered my historical match! I'm a 88% match with Marcus Aurelius - "));
        assert!(text.ends_with("Take the assessment: https://kindred.example"));
    }
}
