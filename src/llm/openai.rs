use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatMessage, CompletionError, CompletionService, LlmConfig};

/// OpenAI 兼容的 chat/completions 客户端。
///
/// Only owns transport concerns. Message assembly and plan parsing live with
/// the caller.
pub struct OpenAiChatService {
    /// Pre-computed `"Bearer <key>"` header value.
    auth_header: String,
    endpoint: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiChatService {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            auth_header: format!("Bearer {}", config.api_key),
            endpoint: format!(
                "{}/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            model: config.model,
            client: Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    pub fn from_env() -> Result<Self, CompletionError> {
        Ok(Self::new(LlmConfig::from_env()?))
    }
}

#[async_trait]
impl CompletionService for OpenAiChatService {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature,
            max_tokens,
        };

        debug!("POST {} with {} messages", self.endpoint, messages.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", &self.auth_header)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyChoices)?;
        Ok(choice.message.content.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LlmConfig {
        LlmConfig {
            api_key: "sk-test-123".to_string(),
            base_url: "https://gateway.example.com/v1/".to_string(),
            model: "qwen-plus".to_string(),
        }
    }

    #[test]
    fn precomputes_bearer_header_and_endpoint() {
        let service = OpenAiChatService::new(config());
        assert_eq!(service.auth_header, "Bearer sk-test-123");
        assert_eq!(
            service.endpoint,
            "https://gateway.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn request_serializes_messages_in_order() {
        let messages = vec![
            ChatMessage::system("contract"),
            ChatMessage::assistant("tools"),
            ChatMessage::user("task"),
        ];
        let request = ChatRequest {
            model: "qwen-plus",
            messages: &messages,
            temperature: 0.2,
            max_tokens: 512,
        };

        // 走字符串路径，和真正发出去的请求体一致
        let text = serde_json::to_string(&request).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["model"], "qwen-plus");
        assert_eq!(value["temperature"], 0.2);
        assert_eq!(value["max_tokens"], 512);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][2]["content"], "task");
    }

    #[test]
    fn response_deserializes_single_choice() {
        let text = r#"{"choices":[{"message":{"content":"{\"task_summary\":\"x\"}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(text).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("{\"task_summary\":\"x\"}")
        );
    }

    #[test]
    fn response_tolerates_null_content_and_extra_fields() {
        let text = r#"{"id":"cmpl-1","choices":[{"message":{"content":null,"role":"assistant"},"finish_reason":"stop"}],"usage":{"total_tokens":9}}"#;
        let parsed: ChatResponse = serde_json::from_str(text).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
