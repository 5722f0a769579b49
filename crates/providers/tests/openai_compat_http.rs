use std::time::Duration;

use campusdesk_core::error::ProviderError;
use campusdesk_core::message::Message;
use campusdesk_core::provider::{EmbeddingProvider, Provider, ProviderRequest};
use campusdesk_core::tool::ToolKind;
use campusdesk_providers::OpenAiCompatProvider;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> OpenAiCompatProvider {
    OpenAiCompatProvider::new(
        "openai",
        server.uri(),
        "test-key",
        "text-embedding-3-small",
        Duration::from_secs(5),
    )
    .unwrap()
}

fn request() -> ProviderRequest {
    ProviderRequest {
        model: "gpt-4o-mini".into(),
        messages: vec![Message::system("Be brief"), Message::human("Menu on Monday?")],
        temperature: 0.2,
        max_tokens: Some(256),
        tools: ToolKind::ALL.iter().map(|k| k.to_definition()).collect(),
    }
}

#[tokio::test]
async fn completion_returns_tool_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_string_contains("get_menu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "get_menu", "arguments": "{\"day\":\"Monday\"}"}
                    }]
                }
            }],
            "usage": {"prompt_tokens": 50, "completion_tokens": 9, "total_tokens": 59}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = provider(&server).complete(request()).await.unwrap();

    assert!(response.content.is_empty());
    assert_eq!(response.tool_calls.len(), 1);
    assert_eq!(response.tool_calls[0].id, "call_1");
    assert_eq!(response.tool_calls[0].arguments["day"], "Monday");
    assert_eq!(response.usage.unwrap().total_tokens, 59);
}

#[tokio::test]
async fn completion_maps_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let err = provider(&server).complete(request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
}

#[tokio::test]
async fn completion_maps_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = provider(&server).complete(request()).await.unwrap_err();
    match err {
        ProviderError::ApiError {
            status_code,
            message,
        } => {
            assert_eq!(status_code, 503);
            assert_eq!(message, "overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_network_error() {
    let provider = OpenAiCompatProvider::new(
        "openai",
        "http://127.0.0.1:9",
        "test-key",
        "text-embedding-3-small",
        Duration::from_secs(2),
    )
    .unwrap();

    let err = provider.complete(request()).await.unwrap_err();
    assert!(matches!(
        err,
        ProviderError::Network(_) | ProviderError::Timeout(_)
    ));
}

#[tokio::test]
async fn embeddings_are_returned_in_input_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(body_string_contains("text-embedding-3-small"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "text-embedding-3-small",
            "data": [
                {"index": 1, "embedding": [0.0, 1.0]},
                {"index": 0, "embedding": [1.0, 0.0]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let vectors = provider(&server)
        .embed_batch(&["Room 203 is IT".to_string(), "Room 204 is Library".to_string()])
        .await
        .unwrap();

    assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[tokio::test]
async fn embedding_count_mismatch_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"index": 0, "embedding": [1.0, 0.0]}]
        })))
        .mount(&server)
        .await;

    let err = provider(&server)
        .embed_batch(&["a".to_string(), "b".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}

#[tokio::test]
async fn empty_batch_skips_the_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let vectors = provider(&server).embed_batch(&[]).await.unwrap();
    assert!(vectors.is_empty());
}
