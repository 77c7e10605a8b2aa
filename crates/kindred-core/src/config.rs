//! Configuration types shared by every layer.
//!
//! `AppConfig` mirrors `config.toml`; `SecretConfig` mirrors `secret.json`.
//! Both are plain data: loading and saving lives in the infrastructure crate.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_QUESTION_COUNT: usize = 7;
pub const DEFAULT_MIN_RESPONSE_CHARS: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_ASSESSMENT_TABLE: &str = "assessments";

/// Root of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub quiz: QuizSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub persistence: PersistenceSettings,
    #[serde(default)]
    pub debug: DebugSettings,
}

/// Where questions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSourceKind {
    /// Each question is generated by the LLM.
    #[default]
    Generated,
    /// The seven built-in questions, no network needed for questions.
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSettings {
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    #[serde(default = "default_min_response_chars")]
    pub min_response_chars: usize,
    #[serde(default = "default_true")]
    pub guessing_enabled: bool,
    #[serde(default)]
    pub question_source: QuestionSourceKind,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            min_response_chars: DEFAULT_MIN_RESPONSE_CHARS,
            guessing_enabled: true,
            question_source: QuestionSourceKind::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Upper bound for one generation call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Overrides the model named in secret.json.
    #[serde(default)]
    pub model: Option<String>,
}

impl GenerationSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            model: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceBackend {
    /// JSON files under the config directory.
    #[default]
    Local,
    /// Supabase (PostgREST) table.
    Supabase,
    /// Results are not stored.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceSettings {
    #[serde(default)]
    pub backend: PersistenceBackend,
    /// Attached to every stored record when set.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Upper bound for one remote store request, in seconds.
    #[serde(default = "default_store_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl PersistenceSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        Self {
            backend: PersistenceBackend::default(),
            user_id: None,
            request_timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugSettings {
    /// Log prompts and raw model output at debug level.
    #[serde(default)]
    pub enable_llm_debug: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            enable_llm_debug: false,
            log_level: default_log_level(),
        }
    }
}

fn default_question_count() -> usize {
    DEFAULT_QUESTION_COUNT
}

fn default_min_response_chars() -> usize {
    DEFAULT_MIN_RESPONSE_CHARS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_store_timeout_secs() -> u64 {
    DEFAULT_STORE_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Root configuration structure for secret.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
    #[serde(default)]
    pub supabase: Option<SupabaseConfig>,
}

/// Gemini API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Supabase REST configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    pub api_key: String,
    #[serde(default)]
    pub table: Option<String>,
}

impl SupabaseConfig {
    pub fn table_name(&self) -> &str {
        self.table.as_deref().unwrap_or(DEFAULT_ASSESSMENT_TABLE)
    }
}
