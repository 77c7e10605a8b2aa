//! The guess screen: before answering, the user picks up to three figures
//! they expect to match.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_GUESSES: usize = 3;

/// Figures offered on the guess screen.
pub const HISTORICAL_FIGURES: [&str; 20] = [
    "Napoleon Bonaparte",
    "Cleopatra VII",
    "Leonardo da Vinci",
    "Albert Einstein",
    "Winston Churchill",
    "Joan of Arc",
    "Julius Caesar",
    "Marie Curie",
    "Alexander the Great",
    "Gandhi",
    "Elizabeth I",
    "Benjamin Franklin",
    "Theodore Roosevelt",
    "Catherine the Great",
    "Abraham Lincoln",
    "Mozart",
    "Shakespeare",
    "Confucius",
    "Genghis Khan",
    "Hannibal",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("at most {MAX_GUESSES} figures can be selected")]
    SelectionFull,
    #[error("figure name is empty")]
    EmptyName,
}

/// Ordered selection of at most three figures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuessSelection {
    selected: Vec<String>,
}

impl GuessSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `name`, or deselects it if already selected.
    ///
    /// Returns `Ok(true)` when the figure is now selected and `Ok(false)`
    /// when it was removed. A fourth selection is rejected and leaves the
    /// selection unchanged.
    pub fn toggle(&mut self, name: &str) -> Result<bool, GuessError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GuessError::EmptyName);
        }
        if let Some(pos) = self.selected.iter().position(|s| s == name) {
            self.selected.remove(pos);
            return Ok(false);
        }
        if self.selected.len() >= MAX_GUESSES {
            return Err(GuessError::SelectionFull);
        }
        self.selected.push(name.to_string());
        Ok(true)
    }

    /// 1-based badge number for a selected figure.
    pub fn badge(&self, name: &str) -> Option<usize> {
        self.selected.iter().position(|s| s == name).map(|i| i + 1)
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.selected
    }
}

/// Trims, drops blanks and repeats, keeps the first three.
pub fn normalize_guesses<I, S>(guesses: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::with_capacity(MAX_GUESSES);
    for guess in guesses {
        let guess = guess.as_ref().trim();
        if guess.is_empty() || out.iter().any(|g| g == guess) {
            continue;
        }
        out.push(guess.to_string());
        if out.len() == MAX_GUESSES {
            break;
        }
    }
    out
}

/// How the user's intuition compared with the actual match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessVerdict {
    /// The match was the user's guess number `position` (1-based).
    Matched { position: usize },
    Missed,
    /// The user skipped guessing.
    NoGuesses,
}

/// Compares guesses with the matched character, case-insensitively and
/// tolerating short forms ("Gandhi" vs "Mahatma Gandhi").
pub fn guess_verdict(guesses: &[String], character: &str) -> GuessVerdict {
    if guesses.is_empty() {
        return GuessVerdict::NoGuesses;
    }
    let character = character.trim().to_lowercase();
    guesses
        .iter()
        .position(|guess| {
            let guess = guess.trim().to_lowercase();
            !guess.is_empty() && (character.contains(&guess) || guess.contains(&character))
        })
        .map(|i| GuessVerdict::Matched { position: i + 1 })
        .unwrap_or(GuessVerdict::Missed)
}
