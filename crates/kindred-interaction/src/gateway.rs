//! GenerationGateway - one outbound call per question or analysis, with
//! the failure policy applied at this boundary.
//!
//! Callers always get a usable value. Whether it came from the model or
//! from a fixed fallback is carried in [`Generated`], never as an error.

use crate::json_extract::extract_json_object;
use crate::llm_client::{GenerationParams, LlmClient, LlmError};
use crate::prompt::PromptBuilder;
use kindred_core::analysis::{AnalysisResult, TraitMatch};
use kindred_core::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use kindred_core::question::{Question, fallback_question};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PLACEHOLDER: &str = "Start typing...";

/// Why a generation call degraded to its fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationFailure {
    #[error("transport error: {0}")]
    Transport(#[from] LlmError),
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("response contained no JSON object")]
    NoJsonObject,
    #[error("response JSON could not be parsed: {0}")]
    Parse(String),
    #[error("response JSON is missing `{0}`")]
    MissingField(&'static str),
    #[error("prompt could not be rendered: {0}")]
    Prompt(String),
}

/// Outcome of a generation call.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated<T> {
    Fresh(T),
    Fallback { value: T, reason: GenerationFailure },
}

impl<T> Generated<T> {
    pub fn value(&self) -> &T {
        match self {
            Generated::Fresh(value) | Generated::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Generated::Fresh(value) | Generated::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Generated::Fallback { .. })
    }

    pub fn failure(&self) -> Option<&GenerationFailure> {
        match self {
            Generated::Fresh(_) => None,
            Generated::Fallback { reason, .. } => Some(reason),
        }
    }
}

pub struct GenerationGateway {
    client: Arc<dyn LlmClient>,
    prompts: PromptBuilder,
    timeout: Duration,
}

impl GenerationGateway {
    pub fn new(client: Arc<dyn LlmClient>, prompts: PromptBuilder) -> Self {
        Self {
            client,
            prompts,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn prompts(&self) -> &PromptBuilder {
        &self.prompts
    }

    /// Generates the question for the 0-based `step_index`.
    pub async fn next_question(
        &self,
        step_index: usize,
        prior_responses: &[String],
    ) -> Generated<Question> {
        match self.try_next_question(step_index, prior_responses).await {
            Ok(question) => {
                tracing::info!(step = step_index + 1, title = %question.title, "question generated");
                Generated::Fresh(question)
            }
            Err(reason) => {
                tracing::warn!(step = step_index + 1, %reason, "question generation fell back");
                Generated::Fallback {
                    value: fallback_question(step_index),
                    reason,
                }
            }
        }
    }

    /// Matches the responses to a historical figure.
    pub async fn analyze(&self, responses: &[String]) -> Generated<AnalysisResult> {
        match self.try_analyze(responses).await {
            Ok(result) => {
                tracing::info!(character = %result.character, "analysis generated");
                Generated::Fresh(result)
            }
            Err(reason) => {
                tracing::warn!(%reason, "analysis fell back");
                Generated::Fallback {
                    value: AnalysisResult::fallback(),
                    reason,
                }
            }
        }
    }

    async fn try_next_question(
        &self,
        step_index: usize,
        prior_responses: &[String],
    ) -> Result<Question, GenerationFailure> {
        let prompt = self
            .prompts
            .build_question_prompt(step_index, prior_responses)
            .map_err(|e| GenerationFailure::Prompt(e.to_string()))?;
        let text = self.call(&prompt, GenerationParams::QUESTION).await?;
        parse_question(&text, step_index)
    }

    async fn try_analyze(&self, responses: &[String]) -> Result<AnalysisResult, GenerationFailure> {
        let prompt = self
            .prompts
            .build_analysis_prompt(responses)
            .map_err(|e| GenerationFailure::Prompt(e.to_string()))?;
        let text = self.call(&prompt, GenerationParams::ANALYSIS).await?;
        parse_analysis(&text)
    }

    async fn call(&self, prompt: &str, params: GenerationParams) -> Result<String, GenerationFailure> {
        tracing::debug!(model = self.client.model(), prompt, "sending prompt");
        match tokio::time::timeout(self.timeout, self.client.generate(prompt, params)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(GenerationFailure::Timeout(self.timeout)),
        }
    }
}

#[derive(Deserialize)]
struct QuestionPayload {
    question: Option<String>,
    title: Option<String>,
    placeholder: Option<String>,
    #[serde(default)]
    options: Vec<Value>,
}

/// Parses a next-question reply. Only `question` is required.
pub(crate) fn parse_question(text: &str, step_index: usize) -> Result<Question, GenerationFailure> {
    let json = extract_json_object(text).ok_or(GenerationFailure::NoJsonObject)?;
    let payload: QuestionPayload =
        serde_json::from_str(json).map_err(|e| GenerationFailure::Parse(e.to_string()))?;

    let prompt = non_blank(payload.question).ok_or(GenerationFailure::MissingField("question"))?;
    let number = step_index + 1;
    let title = non_blank(payload.title).unwrap_or_else(|| format!("Question {number}"));
    let placeholder =
        non_blank(payload.placeholder).unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string());
    let options: Vec<String> = payload
        .options
        .into_iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();

    Ok(Question::new(number, title, prompt)
        .with_placeholder(placeholder)
        .with_options(options))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisPayload {
    character: Option<String>,
    match_percentage: Option<Value>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    short_description: String,
    #[serde(default)]
    biography: String,
    birth_year: Option<Value>,
    death_year: Option<Value>,
    #[serde(default)]
    location: String,
    #[serde(default)]
    achievements: Vec<Value>,
    #[serde(default)]
    traits: Vec<TraitPayload>,
}

#[derive(Deserialize)]
struct TraitPayload {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

/// Parses an analysis reply. `character` and a numeric `matchPercentage`
/// are required; numbers may arrive as JSON numbers or numeric strings.
/// Missing years are left at 0, which the results screen treats as unknown.
pub(crate) fn parse_analysis(text: &str) -> Result<AnalysisResult, GenerationFailure> {
    let json = extract_json_object(text).ok_or(GenerationFailure::NoJsonObject)?;
    let payload: AnalysisPayload =
        serde_json::from_str(json).map_err(|e| GenerationFailure::Parse(e.to_string()))?;

    let character =
        non_blank(payload.character).ok_or(GenerationFailure::MissingField("character"))?;

    let match_percentage = payload
        .match_percentage
        .as_ref()
        .and_then(number)
        .map(AnalysisResult::clamp_percentage)
        .ok_or(GenerationFailure::MissingField("matchPercentage"))?;

    Ok(AnalysisResult {
        character,
        match_percentage,
        description: payload.description,
        short_description: payload.short_description,
        biography: payload.biography,
        birth_year: payload.birth_year.as_ref().and_then(year).unwrap_or(0),
        death_year: payload.death_year.as_ref().and_then(year).unwrap_or(0),
        location: payload.location,
        achievements: payload
            .achievements
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        traits: payload
            .traits
            .into_iter()
            .filter(|t| !t.title.trim().is_empty())
            .map(|t| TraitMatch::new(t.title, t.description))
            .collect(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse().ok(),
        _ => None,
    }
}

fn year(value: &Value) -> Option<i32> {
    number(value).map(|y| y.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_defaults() {
        let q = parse_question(r#"{"question": "What would you do?"}"#, 2).unwrap();
        assert_eq!(q.index, 3);
        assert_eq!(q.title, "Question 3");
        assert_eq!(q.prompt, "What would you do?");
        assert_eq!(q.placeholder, DEFAULT_PLACEHOLDER);
        assert!(q.options.is_empty());
    }

    #[test]
    fn test_parse_question_with_options() {
        let text = r#"Sure! {"title":"Crossroads","question":"Pick one","options":["A","B",3,"C","D","E","F"]}"#;
        let q = parse_question(text, 0).unwrap();
        assert_eq!(q.title, "Crossroads");
        assert_eq!(q.options, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_parse_question_missing_or_blank_field() {
        assert_eq!(
            parse_question(r#"{"title": "No question"}"#, 0),
            Err(GenerationFailure::MissingField("question"))
        );
        assert_eq!(
            parse_question(r#"{"question": "   "}"#, 0),
            Err(GenerationFailure::MissingField("question"))
        );
    }

    #[test]
    fn test_parse_question_errors() {
        assert_eq!(
            parse_question("I cannot help with that.", 0),
            Err(GenerationFailure::NoJsonObject)
        );
        assert!(matches!(
            parse_question("{ not json }", 0),
            Err(GenerationFailure::Parse(_))
        ));
    }

    #[test]
    fn test_parse_analysis_from_prose() {
        let text = r#"Here is the result: {"character":"X","matchPercentage":"91%","birthYear":-356,"deathYear":"-323","traits":[{"title":"Bold","description":"d"},{"title":" "}]} Thanks!"#;
        let result = parse_analysis(text).unwrap();
        assert_eq!(result.character, "X");
        assert_eq!(result.match_percentage, 91);
        assert_eq!(result.birth_year, -356);
        assert_eq!(result.death_year, -323);
        assert_eq!(result.traits, vec![TraitMatch::new("Bold", "d")]);
    }

    #[test]
    fn test_parse_analysis_clamps_percentage() {
        let result = parse_analysis(r#"{"character":"Y","matchPercentage":140}"#).unwrap();
        assert_eq!(result.match_percentage, 100);
    }

    #[test]
    fn test_parse_analysis_requires_match_percentage() {
        assert_eq!(
            parse_analysis(r#"{"character":"Z"}"#),
            Err(GenerationFailure::MissingField("matchPercentage"))
        );
        assert_eq!(
            parse_analysis(r#"{"character":"Z","matchPercentage":"high"}"#),
            Err(GenerationFailure::MissingField("matchPercentage"))
        );
    }

    #[test]
    fn test_parse_analysis_requires_character() {
        assert_eq!(
            parse_analysis(r#"{"matchPercentage": 90}"#),
            Err(GenerationFailure::MissingField("character"))
        );
    }

    #[test]
    fn test_generated_accessors() {
        let fresh = Generated::Fresh(1);
        assert!(!fresh.is_fallback());
        assert!(fresh.failure().is_none());

        let fallback = Generated::Fallback {
            value: 2,
            reason: GenerationFailure::NoJsonObject,
        };
        assert!(fallback.is_fallback());
        assert_eq!(fallback.value(), &2);
        assert_eq!(fallback.failure(), Some(&GenerationFailure::NoJsonObject));
        assert_eq!(fallback.into_value(), 2);
    }
}
