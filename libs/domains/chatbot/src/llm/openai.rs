use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{ChatPrompt, LanguageModel};
use crate::config::{
    DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};
use crate::error::{ChatbotError, ChatbotResult};

/// OpenAI chat-completions configuration
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl OpenAIConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Language model backed by the OpenAI chat-completions endpoint
pub struct OpenAIChatModel {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIChatModel {
    pub fn new(config: OpenAIConfig) -> ChatbotResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChatbotError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [RequestMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl LanguageModel for OpenAIChatModel {
    async fn complete(&self, prompt: ChatPrompt) -> ChatbotResult<String> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: [
                RequestMessage {
                    role: "system",
                    content: &prompt.system,
                },
                RequestMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.config.temperature,
        };

        debug!(model = %self.config.model, "Requesting chat completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatbotError::LanguageModel(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChatbotError::LanguageModel(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatbotError::LanguageModel(format!("Invalid response body: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ChatbotError::LanguageModel("No completion returned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn model_for(server: &MockServer) -> OpenAIChatModel {
        let config = OpenAIConfig::new("sk-test".to_string()).with_base_url(server.uri());
        OpenAIChatModel::new(config).unwrap()
    }

    fn prompt() -> ChatPrompt {
        ChatPrompt {
            system: "You are a shoe store assistant".to_string(),
            user: "running shoes".to_string(),
        }
    }

    #[tokio::test]
    async fn test_complete_sends_two_messages_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4",
                "messages": [
                    {"role": "system", "content": "You are a shoe store assistant"},
                    {"role": "user", "content": "running shoes"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Try the Air Cloud Runner."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = model_for(&server).complete(prompt()).await.unwrap();
        assert_eq!(reply, "Try the Air Cloud Runner.");
    }

    #[tokio::test]
    async fn test_complete_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = model_for(&server).complete(prompt()).await.unwrap_err();
        match err {
            ChatbotError::LanguageModel(msg) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("rate limited"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_rejects_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        assert!(model_for(&server).complete(prompt()).await.is_err());
    }
}
