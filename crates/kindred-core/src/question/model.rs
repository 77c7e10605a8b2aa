use serde::{Deserialize, Serialize};

/// Maximum number of answer choices a question may carry.
pub const MAX_OPTIONS: usize = 5;

/// One wizard step's question.
///
/// Created once per step and never mutated afterwards; the controller keeps
/// every question for the lifetime of the session so "previous" navigation
/// and persistence see exactly what the user saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based position in the quiz.
    pub index: usize,
    /// Short label shown above the prompt.
    pub title: String,
    /// The question text.
    pub prompt: String,
    /// Optional multiple-choice answers (0..=5).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Hint shown in an empty answer box.
    #[serde(default)]
    pub placeholder: String,
}

impl Question {
    /// Builds a question; `index` is clamped to at least 1.
    pub fn new(index: usize, title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            index: index.max(1),
            title: title.into(),
            prompt: prompt.into(),
            options: Vec::new(),
            placeholder: String::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Attaches answer choices, dropping blanks and keeping the first five.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(Into::into)
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .take(MAX_OPTIONS)
            .collect();
        self
    }

    pub fn is_multiple_choice(&self) -> bool {
        !self.options.is_empty()
    }

    /// Resolves a 1-based option number typed by the user to the option text.
    pub fn option(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }
}
