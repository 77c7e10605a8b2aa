//! LLM interaction for Kindred.
//!
//! - [`LlmClient`]: the transport seam, implemented by [`GeminiApiAgent`].
//! - [`PromptBuilder`]: renders the question and analysis prompts.
//! - [`GenerationGateway`]: sends prompts, pulls the JSON object out of the
//!   model's prose, and degrades to fixed fallbacks instead of failing.

pub mod gateway;
pub mod gemini_api_agent;
pub mod json_extract;
pub mod llm_client;
pub mod prompt;

pub use gateway::{Generated, GenerationFailure, GenerationGateway};
pub use gemini_api_agent::GeminiApiAgent;
pub use json_extract::extract_json_object;
pub use llm_client::{GenerationParams, LlmClient, LlmError};
pub use prompt::{PromptBuilder, PromptError};
