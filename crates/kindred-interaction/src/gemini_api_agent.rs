//! GeminiApiAgent - REST client for Gemini `generateContent`.
//!
//! Credentials come from the secret service (secret.json, or the
//! `GEMINI_API_KEY` override) and are passed in at construction.

use crate::llm_client::{GenerationParams, LlmClient, LlmError};
use async_trait::async_trait;
use kindred_core::config::DEFAULT_GEMINI_MODEL;
use kindred_core::secret::SecretService;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// LLM client that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiApiAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiApiAgent")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Builds an agent from the loaded secrets.
    ///
    /// `model_override` (from config.toml) wins over `gemini.model_name` in
    /// secret.json; both fall back to the default model.
    pub async fn try_from_secrets(
        service: &dyn SecretService,
        model_override: Option<&str>,
    ) -> Result<Self, LlmError> {
        let secret_config = service
            .load_secrets()
            .await
            .map_err(|e| LlmError::Config(format!("Failed to load secrets: {e}")))?;

        let gemini = secret_config.gemini.ok_or_else(|| {
            LlmError::Config("Gemini configuration not found in secret.json".to_string())
        })?;

        if gemini.api_key.trim().is_empty() {
            return Err(LlmError::Config("Gemini API key is empty".to_string()));
        }

        let model = model_override
            .map(str::to_string)
            .or(gemini.model_name)
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        Ok(Self::new(gemini.api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at another endpoint root (a proxy, or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, LlmError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            // The URL carries the key; keep it out of the message.
            .map_err(|err| LlmError::Transport {
                message: err.without_url().to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| LlmError::InvalidResponse(err.without_url().to_string()))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl LlmClient for GeminiApiAgent {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                top_k: params.top_k,
                top_p: params.top_p,
            },
        };
        tracing::debug!(model = %self.model, chars = prompt.len(), "Gemini generateContent");
        self.send_request(&request).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Joins the text parts of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Result<String, LlmError> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text)
}

fn map_http_error(status: StatusCode, body: String) -> LlmError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    LlmError::Http {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.9,
                top_k: 40,
                top_p: 0.95,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert!(json["generationConfig"]["topP"].is_number());
        assert!(json.get("generation_config").is_none());
    }

    #[test]
    fn test_extract_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"Hello, "},{"text":"world"}]}},
                {"content":{"parts":[{"text":"ignored"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "Hello, world");
    }

    #[test]
    fn test_extract_without_candidates_is_empty() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(extract_text_response(response), Err(LlmError::EmptyResponse));
    }

    #[test]
    fn test_map_http_error_uses_error_body() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        assert_eq!(
            err,
            LlmError::Http {
                status: 429,
                message: "RESOURCE_EXHAUSTED: Quota exceeded".to_string(),
            }
        );
    }

    #[test]
    fn test_map_http_error_plain_body() {
        let err = map_http_error(StatusCode::BAD_REQUEST, "bad".to_string());
        assert_eq!(err.to_string(), "LLM returned HTTP 400: bad");
    }

    #[test]
    fn test_debug_hides_key() {
        let agent = GeminiApiAgent::new("secret-key", "m");
        assert!(!format!("{agent:?}").contains("secret-key"));
    }
}
