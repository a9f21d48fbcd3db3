#[cfg(test)]
mod llm_client_tests {
    use rusplan::llm::{ChatMessage, CompletionError, CompletionService, LlmConfig, OpenAiChatService};
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path},
    };

    fn service_for(server: &MockServer) -> OpenAiChatService {
        OpenAiChatService::new(LlmConfig {
            api_key: "sk-test".to_string(),
            base_url: format!("{}/v1", server.uri()),
            model: "qwen-plus".to_string(),
        })
    }

    #[tokio::test]
    async fn test_completes_against_openai_compatible_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "qwen-plus",
                "temperature": 0.2,
                "max_tokens": 512
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cmpl-1",
                "choices": [{
                    "message": {"role": "assistant", "content": "{\"task_summary\":\"x\"}"},
                    "finish_reason": "stop"
                }],
                "usage": {"total_tokens": 12}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server);
        let text = service
            .complete(&[ChatMessage::user("plan it")], 0.2, 512)
            .await
            .unwrap();

        assert_eq!(text, "{\"task_summary\":\"x\"}");
    }

    #[tokio::test]
    async fn test_error_status_carries_body_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let err = service
            .complete(&[ChatMessage::user("plan it")], 0.2, 512)
            .await
            .unwrap_err();

        match err {
            CompletionError::Api { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let err = service
            .complete(&[ChatMessage::user("plan it")], 0.2, 512)
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::EmptyChoices));
    }

    #[tokio::test]
    async fn test_null_content_becomes_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let text = service
            .complete(&[ChatMessage::user("plan it")], 0.2, 512)
            .await
            .unwrap();

        assert_eq!(text, "");
    }
}
