//! OpenAI client against a mock completion server.

use serde_json::json;
use vmum_core::chat::ConversationTurn;
use vmum_core::completion::{CompletionClient, CompletionError, OpenAiClient};
use vmum_core::prompt::PromptSequence;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new(
        reqwest::Client::new(),
        "test-api-key",
        "test-model",
        &format!("{}/v1", server.uri()),
    )
}

fn completion_body(content: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "chatcmpl_test123",
        "object": "chat.completion",
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn sends_prompt_and_returns_content() {
    let server = MockServer::start().await;
    let history = vec![
        ConversationTurn::user("What is 2+2?"),
        ConversationTurn::assistant("4"),
    ];
    let prompt = PromptSequence::build("be nice", &history, "And 3+3?", 10);

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-api-key"))
        .and(body_json(json!({
            "model": "test-model",
            "messages": [
                {"role": "system", "content": "be nice"},
                {"role": "user", "content": "What is 2+2?"},
                {"role": "assistant", "content": "4"},
                {"role": "user", "content": "And 3+3?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!("6"))))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server).complete(&prompt).await.expect("complete");
    assert_eq!(text.as_deref(), Some("6"));
}

#[tokio::test]
async fn null_content_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!(null))))
        .mount(&server)
        .await;

    let prompt = PromptSequence::with_persona(&[], "Hi");
    let text = client_for(&server).complete(&prompt).await.expect("complete");
    assert!(text.is_none());
}

#[tokio::test]
async fn missing_choices_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let prompt = PromptSequence::with_persona(&[], "Hi");
    let text = client_for(&server).complete(&prompt).await.expect("complete");
    assert!(text.is_none());
}

#[tokio::test]
async fn error_status_keeps_json_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"type": "rate_limit_error", "message": "Rate limit exceeded"}
        })))
        .mount(&server)
        .await;

    let prompt = PromptSequence::with_persona(&[], "Hi");
    let err = client_for(&server).complete(&prompt).await.unwrap_err();

    assert_eq!(err.status(), Some(429));
    let details = err.details();
    assert_eq!(details["payload"]["error"]["type"], "rate_limit_error");
}

#[tokio::test]
async fn error_status_with_text_body_is_kept_as_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let prompt = PromptSequence::with_persona(&[], "Hi");
    let err = client_for(&server).complete(&prompt).await.unwrap_err();
    match err {
        CompletionError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, json!("upstream down"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let prompt = PromptSequence::with_persona(&[], "Hi");
    let err = client_for(&server).complete(&prompt).await.unwrap_err();
    assert!(matches!(err, CompletionError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let client = OpenAiClient::new(
        reqwest::Client::new(),
        "test-api-key",
        "test-model",
        "http://127.0.0.1:1/v1",
    );

    let prompt = PromptSequence::with_persona(&[], "Hi");
    let err = client.complete(&prompt).await.unwrap_err();
    assert!(matches!(err, CompletionError::Transport(_)));
}
