//! Prompt rendering for question generation and the final analysis.
//!
//! Both prompts are minijinja templates rendered from a fixed context, so
//! the same inputs always produce the same text.

use kindred_core::config::DEFAULT_QUESTION_COUNT;
use kindred_core::question::QuestionCategory;
use minijinja::{Environment, context};
use thiserror::Error;

/// Figures the analysis is steered towards: names most people know without
/// looking them up.
pub const ANALYSIS_FIGURE_POOL: &[&str] = &[
    "Napoleon Bonaparte",
    "Cleopatra VII",
    "Leonardo da Vinci",
    "Albert Einstein",
    "Winston Churchill",
    "Genghis Khan",
    "Alexander the Great",
    "Julius Caesar",
    "Mahatma Gandhi",
    "Joan of Arc",
    "Benjamin Franklin",
    "Elizabeth I",
    "Confucius",
    "Abraham Lincoln",
    "Theodore Roosevelt",
    "Catherine the Great",
    "Otto von Bismarck",
    "Hannibal Barca",
    "Wolfgang Mozart",
    "William Shakespeare",
    "Marie Curie",
    "Marcus Aurelius",
    "Nelson Mandela",
];

/// (heading, guidance) pairs the analysis walks through.
pub const ANALYSIS_DIMENSIONS: &[(&str, &str)] = &[
    (
        "DECISION-MAKING PATTERNS",
        "Analyze how they approach choices - Are they intuitive or calculated? Risk-taking or cautious? Do they seek input or decide independently?",
    ),
    (
        "CORE VALUE SYSTEM",
        "Identify their fundamental beliefs - Do they prioritize idealism or pragmatism? Justice or mercy? Individual rights or collective benefit?",
    ),
    (
        "LEADERSHIP INSTINCTS",
        "Determine their natural leadership style - Are they inspirational or systematic? Collaborative or authoritative? Do they embrace change or preserve tradition?",
    ),
    (
        "RELATIONSHIP WITH POWER",
        "Assess their power motivation - Do they seek power for service or achievement? Are they naturally ambitious or reluctant leaders?",
    ),
    (
        "ADVERSITY RESPONSE",
        "Evaluate how they handle setbacks - Are they adaptive or persistent? Confrontational or diplomatic? Do they take accountability?",
    ),
];

const QUESTION_TEMPLATE: &str = r#"You are conducting a personality assessment to match someone with a historical figure.

{{ context }}

Generate question {{ step }} of {{ total }}. Create a COMPLETELY DIFFERENT type of scenario from any previous questions.

SCENARIO TYPE FOR THIS QUESTION:
- {{ category }}: {{ category_description }}

Scenario types used for other questions (do not repeat them):
{% for other in other_categories -%}
- {{ other }}
{% endfor %}
Create a realistic scenario that:
- Tests core values, decision-making patterns, and natural instincts
- Reveals leadership style, risk tolerance, and moral priorities
- Shows whether they're driven by logic, emotion, duty, or personal conviction
- Is under 45 words total
- Has NO obvious "correct" answer

Format as JSON:
{
  "title": "2-3 Word Title",
  "question": "Engaging scenario that reveals their decision-making process",
  "placeholder": "Brief response starter..."
}

Only return the JSON, no other text."#;

const ANALYSIS_TEMPLATE: &str = r#"Based on these personality assessment responses, conduct a comprehensive psychological analysis to match this person with a historical figure.

Responses: {{ responses | join("; ") }}

COMPREHENSIVE ANALYSIS PROCESS:
{% for dimension in dimensions %}
{{ loop.index }}. {{ dimension[0] }}:
{{ dimension[1] }}
{% endfor %}
Based on this psychological profile, match them to a WIDELY RECOGNIZED historical figure that shares these core personality patterns.

HISTORICAL FIGURES POOL: {{ pool | join(", ") }}, etc.

Return analysis in JSON format:

{
  "character": "Historical Figure Name",
  "matchPercentage": 70-95,
  "description": "2-3 sentences explaining the psychological and behavioral connections",
  "shortDescription": "3-7 word concise character description",
  "biography": "3-4 paragraph biography focusing on personality traits and leadership patterns",
  "birthYear": 100,
  "deathYear": 200,
  "location": "City, Country",
  "achievements": ["3-4 key historical achievements"],
  "traits": [
    {"title": "Primary Trait", "description": "How this trait shows in both the person and the figure"},
    {"title": "Secondary Trait", "description": "Another matching personality pattern"},
    {"title": "Third Trait", "description": "Additional character similarity"}
  ]
}

Only return the JSON, no other text."#;

#[derive(Error, Debug)]
#[error("failed to render {template} prompt: {source}")]
pub struct PromptError {
    template: &'static str,
    #[source]
    source: minijinja::Error,
}

/// Renders prompts. Pure: no I/O, deterministic output.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    env: Environment<'static>,
    question_count: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION_COUNT)
    }
}

impl PromptBuilder {
    pub fn new(question_count: usize) -> Self {
        Self {
            env: Environment::new(),
            question_count: question_count.max(1),
        }
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    /// Prompt for the question at the 0-based `step_index`, with the
    /// answers given so far as context.
    pub fn build_question_prompt(
        &self,
        step_index: usize,
        prior_responses: &[String],
    ) -> Result<String, PromptError> {
        let category = QuestionCategory::for_step(step_index);
        let others: Vec<String> = QuestionCategory::ALL
            .iter()
            .filter(|c| **c != category)
            .map(ToString::to_string)
            .collect();

        let ctx = context! {
            context => transcript(prior_responses),
            step => step_index + 1,
            total => self.question_count,
            category => category.to_string(),
            category_description => category.description(),
            other_categories => others,
        };
        self.env
            .render_named_str("question", QUESTION_TEMPLATE, ctx)
            .map_err(|source| PromptError {
                template: "question",
                source,
            })
    }

    /// Prompt for the final analysis over all non-blank responses.
    pub fn build_analysis_prompt(&self, responses: &[String]) -> Result<String, PromptError> {
        let ctx = context! {
            responses => responses,
            dimensions => ANALYSIS_DIMENSIONS,
            pool => ANALYSIS_FIGURE_POOL,
        };
        self.env
            .render_named_str("analysis", ANALYSIS_TEMPLATE, ctx)
            .map_err(|source| PromptError {
                template: "analysis",
                source,
            })
    }
}

/// The prior-answer line embedded in the question prompt.
fn transcript(prior_responses: &[String]) -> String {
    if prior_responses.is_empty() {
        "This is the first question.".to_string()
    } else {
        format!("Previous responses: {}", prior_responses.join("; "))
    }
}
