//! Built-in questions: the fixed seven-question set and the fallback.

use super::model::Question;

/// Question text used whenever generation fails.
pub const FALLBACK_QUESTION_TEXT: &str =
    "Tell me about a challenging situation you faced and how you handled it.";

const FIXED_SET: [(&str, &str, &str); 7] = [
    (
        "Conflict Resolution",
        "Describe how you handle conflict and disagreements with others.",
        "When faced with conflict, I tend to...",
    ),
    (
        "Arts & Creativity",
        "What role do arts, creativity, and beauty play in your life?",
        "Art and creativity in my life are...",
    ),
    (
        "Building Relationships",
        "How do you approach building and maintaining relationships?",
        "In relationships, I believe in...",
    ),
    (
        "Leadership Style",
        "Describe your approach to leadership and influencing others.",
        "My leadership style involves...",
    ),
    (
        "Values & Priorities",
        "What are your core values and how do they guide your decisions?",
        "My core values include...",
    ),
    (
        "Legacy & Impact",
        "What kind of legacy or impact do you hope to leave behind?",
        "I hope to be remembered for...",
    ),
    (
        "Joy & Celebration",
        "How do you create joy and celebration in your community or circle?",
        "I bring joy to others by...",
    ),
];

/// The fallback question for a 0-based step.
pub fn fallback_question(step_index: usize) -> Question {
    Question::new(step_index + 1, format!("Question {}", step_index + 1), FALLBACK_QUESTION_TEXT)
        .with_placeholder("Start typing...")
}

/// The built-in question for a 0-based step; wraps past the seventh.
pub fn fixed_question(step_index: usize) -> Question {
    let (title, prompt, placeholder) = FIXED_SET[step_index % FIXED_SET.len()];
    Question::new(step_index + 1, title, prompt).with_placeholder(placeholder)
}

/// All seven built-in questions in order.
pub fn fixed_question_set() -> Vec<Question> {
    (0..FIXED_SET.len()).map(fixed_question).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_text_is_exact() {
        let q = fallback_question(2);
        assert_eq!(
            q.prompt,
            "Tell me about a challenging situation you faced and how you handled it."
        );
        assert_eq!(q.index, 3);
        assert!(q.options.is_empty());
    }

    #[test]
    fn test_fixed_set() {
        let set = fixed_question_set();
        assert_eq!(set.len(), 7);
        assert_eq!(set[0].title, "Conflict Resolution");
        assert_eq!(set[6].index, 7);
        assert_eq!(fixed_question(7).title, "Conflict Resolution");
        assert_eq!(fixed_question(7).index, 8);
    }
}
