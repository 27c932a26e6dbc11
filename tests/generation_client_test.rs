//! Integration tests for the generation client against a mocked endpoint.

use std::time::Duration;

use gromit::llm::Credentials;
use gromit::{CallProfile, GenerationClient, GenerationResult, TextGenerator};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(endpoint: String) -> GenerationClient {
    GenerationClient::with_timeout(
        Credentials {
            endpoint,
            api_key: "sk-test-key".to_string(),
        },
        "gpt-4.1",
        Duration::from_secs(5),
    )
    .expect("Failed to build client")
}

fn completion(content: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ]
    })
}

#[tokio::test]
async fn test_commit_profile_request_shape_and_trimmed_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test-key"))
        .and(body_json(json!({
            "model": "gpt-4.1",
            "messages": [{ "role": "user", "content": "describe this diff" }],
            "max_tokens": 100,
            "temperature": 0.3
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion(json!("  feat: add login\n"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(format!("{}/v1/chat/completions", server.uri()));
    let result = client
        .generate("describe this diff", CallProfile::CommitMessage)
        .await;

    assert_eq!(
        result,
        GenerationResult::Success {
            text: "feat: add login".to_string()
        }
    );
}

#[tokio::test]
async fn test_pull_request_profile_sends_larger_budget() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(json!({
            "model": "gpt-4.1",
            "messages": [{ "role": "user", "content": "pr prompt" }],
            "max_tokens": 1000,
            "temperature": 0.7
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion(json!("Title: X\nDescription: Y"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(server.uri());
    let result = client.generate("pr prompt", CallProfile::PullRequest).await;
    assert!(result.is_success());
}

#[tokio::test]
async fn test_non_success_status_becomes_failure_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let client = client_for(server.uri());
    let result = client.generate("x", CallProfile::CommitMessage).await;

    match result {
        GenerationResult::Failure { reason } => {
            assert!(reason.contains("401"));
            assert!(reason.contains("invalid api key"));
        }
        other => panic!("Expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_becomes_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let client = client_for(server.uri());
    let result = client.generate("x", CallProfile::CommitMessage).await;

    match result {
        GenerationResult::Failure { reason } => {
            assert!(reason.starts_with("Invalid response format"));
        }
        other => panic!("Expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_blank_content_becomes_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!("   "))))
        .mount(&server)
        .await;

    let client = client_for(server.uri());
    let result = client.generate("x", CallProfile::CommitMessage).await;

    assert_eq!(
        result,
        GenerationResult::Failure {
            reason: "AI returned an empty message".to_string()
        }
    );
}

#[tokio::test]
async fn test_transport_failure_becomes_failure() {
    // Bind then drop a listener so the port is closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = client_for(format!("http://127.0.0.1:{}/v1/chat/completions", port));
    let result = client.generate("x", CallProfile::CommitMessage).await;

    match result {
        GenerationResult::Failure { reason } => assert!(reason.starts_with("Connection error")),
        other => panic!("Expected failure, got {:?}", other),
    }
}
