use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

impl GenerationParams {
    /// Next-question calls sample a little hotter for variety.
    pub const QUESTION: Self = Self {
        temperature: 0.9,
        top_k: 40,
        top_p: 0.95,
    };

    pub const ANALYSIS: Self = Self {
        temperature: 0.8,
        top_k: 40,
        top_p: 0.9,
    };
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    #[error("LLM request failed: {message}")]
    Transport { message: String },

    #[error("LLM returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("LLM response could not be read: {0}")]
    InvalidResponse(String),

    #[error("LLM response contained no text")]
    EmptyResponse,

    #[error("LLM client is not configured: {0}")]
    Config(String),
}

/// A text-in, text-out model endpoint.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends one prompt and returns the model's raw text.
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Arc<T> {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError> {
        (**self).generate(prompt, params).await
    }

    fn model(&self) -> &str {
        (**self).model()
    }
}
