use async_trait::async_trait;
use kindred_core::analysis::AnalysisResult;
use kindred_core::question::FALLBACK_QUESTION_TEXT;
use kindred_interaction::{
    GeminiApiAgent, GenerationFailure, GenerationGateway, GenerationParams, Generated, LlmClient,
    LlmError, PromptBuilder,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Replies with a fixed outcome and records every prompt it receives.
struct ScriptedClient {
    reply: Result<String, LlmError>,
    delay: Option<Duration>,
    prompts: Mutex<Vec<(String, GenerationParams)>>,
}

impl ScriptedClient {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(err: LlmError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn hanging() -> Arc<Self> {
        Arc::new(Self {
            reply: Ok("{\"question\": \"too late\"}".to_string()),
            delay: Some(Duration::from_secs(3600)),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<(String, GenerationParams)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push((prompt.to_string(), params));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone()
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

fn gateway(client: Arc<ScriptedClient>) -> GenerationGateway {
    GenerationGateway::new(client, PromptBuilder::new(7))
}

fn responses(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_next_question_fresh() {
    let client = ScriptedClient::replying(
        "```json\n{\"title\": \"The Flood\", \"question\": \"The river rises. Who do you save first?\", \"placeholder\": \"I would...\"}\n```",
    );
    let generated = gateway(client.clone())
        .next_question(1, &responses(&["I stay calm under pressure"]))
        .await;

    let question = match generated {
        Generated::Fresh(q) => q,
        other => panic!("expected fresh question, got {other:?}"),
    };
    assert_eq!(question.index, 2);
    assert_eq!(question.title, "The Flood");
    assert_eq!(question.placeholder, "I would...");

    let prompts = client.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].0.contains("Previous responses: I stay calm under pressure"));
    assert_eq!(prompts[0].1, GenerationParams::QUESTION);
}

#[tokio::test]
async fn test_next_question_network_failure_returns_fallback() {
    let client = ScriptedClient::failing(LlmError::Transport {
        message: "connection refused".into(),
    });
    let generated = gateway(client).next_question(0, &[]).await;

    assert!(generated.is_fallback());
    assert!(matches!(
        generated.failure(),
        Some(GenerationFailure::Transport(_))
    ));
    let question = generated.into_value();
    assert_eq!(
        question.prompt,
        "Tell me about a challenging situation you faced and how you handled it."
    );
    assert_eq!(question.prompt, FALLBACK_QUESTION_TEXT);
    assert_eq!(question.index, 1);
}

#[tokio::test]
async fn test_next_question_missing_field_returns_fallback() {
    let client = ScriptedClient::replying("{\"title\": \"Only a title\"}");
    let generated = gateway(client).next_question(3, &[]).await;
    assert_eq!(
        generated.failure(),
        Some(&GenerationFailure::MissingField("question"))
    );
    assert_eq!(generated.value().prompt, FALLBACK_QUESTION_TEXT);
    assert_eq!(generated.value().index, 4);
}

#[tokio::test]
async fn test_next_question_http_error_returns_fallback() {
    let client = ScriptedClient::failing(LlmError::Http {
        status: 500,
        message: "boom".into(),
    });
    let generated = gateway(client).next_question(0, &[]).await;
    assert!(generated.is_fallback());
    assert_eq!(generated.value().prompt, FALLBACK_QUESTION_TEXT);
}

#[tokio::test(start_paused = true)]
async fn test_hung_call_times_out_to_fallback() {
    let generated = gateway(ScriptedClient::hanging())
        .with_timeout(Duration::from_secs(15))
        .next_question(0, &[])
        .await;
    assert_eq!(
        generated.failure(),
        Some(&GenerationFailure::Timeout(Duration::from_secs(15)))
    );
    assert_eq!(generated.value().prompt, FALLBACK_QUESTION_TEXT);
}

#[tokio::test]
async fn test_analyze_extracts_json_from_prose() {
    let client = ScriptedClient::replying(
        "Here is the result: {\"character\":\"X\",\"matchPercentage\":87,\"location\":\"Paris, France\",\"achievements\":[\"one\",\"two\"]} Thanks!",
    );
    let generated = gateway(client.clone())
        .analyze(&responses(&["first answer", "second answer"]))
        .await;

    let result = match generated {
        Generated::Fresh(r) => r,
        other => panic!("expected fresh analysis, got {other:?}"),
    };
    assert_eq!(result.character, "X");
    assert_eq!(result.match_percentage, 87);
    assert_eq!(result.location, "Paris, France");
    assert_eq!(result.achievements, vec!["one", "two"]);

    let prompts = client.prompts();
    assert!(prompts[0].0.contains("Responses: first answer; second answer"));
    assert_eq!(prompts[0].1, GenerationParams::ANALYSIS);
}

#[tokio::test]
async fn test_analyze_malformed_json_returns_fallback_profile() {
    let client = ScriptedClient::replying("Result: {\"character\": \"X\", } oops");
    let generated = gateway(client).analyze(&responses(&["answer"])).await;
    assert!(matches!(
        generated.failure(),
        Some(GenerationFailure::Parse(_))
    ));
    assert_eq!(generated.into_value(), AnalysisResult::fallback());
}

#[tokio::test]
async fn test_analyze_without_percentage_returns_fallback_profile() {
    let client = ScriptedClient::replying("{\"character\": \"X\", \"location\": \"Nowhere\"}");
    let generated = gateway(client).analyze(&responses(&["answer"])).await;
    assert_eq!(
        generated.failure(),
        Some(&GenerationFailure::MissingField("matchPercentage"))
    );
    assert_eq!(generated.value().match_percentage, 88);
    assert_eq!(generated.value().character, "Marcus Aurelius");
}

#[tokio::test]
async fn test_analyze_without_json_returns_fallback_profile() {
    let client = ScriptedClient::replying("I'm sorry, I can't do that.");
    let generated = gateway(client).analyze(&[]).await;
    assert_eq!(generated.failure(), Some(&GenerationFailure::NoJsonObject));
    assert_eq!(generated.value().character, "Marcus Aurelius");
}

#[tokio::test]
async fn test_gateway_over_gemini_server_error_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/gemini-test:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .with_body("internal")
        .create_async()
        .await;

    let client = Arc::new(GeminiApiAgent::new("k", "gemini-test").with_base_url(server.url()));
    let generated = GenerationGateway::new(client, PromptBuilder::default())
        .next_question(0, &[])
        .await;
    assert!(generated.is_fallback());
    assert_eq!(generated.value().prompt, FALLBACK_QUESTION_TEXT);
}
