//! HTTP transport integration tests
//!
//! Verifies the wire format sent to the provider and the classification of
//! every kind of response.

use std::time::Duration;

use chatline::{
    CompletionRequest, CompletionResult, CompletionTransport, Credential, Failure, FailureKind,
    HttpTransport, Transcript,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    constants, test_config, test_credential, test_transport, truncated_body_endpoint,
    unreachable_endpoint,
};
use crate::mocks::provider::{MockProvider, ProviderTestData};

fn question(text: &str) -> CompletionRequest {
    let mut transcript = Transcript::new();
    transcript.add_user_turn(text);
    CompletionRequest::new(&transcript, constants::TEST_MODEL)
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn test_success_returns_first_choice_text() {
    let provider = MockProvider::start().await;
    provider
        .mock_chat_completion_success(ProviderTestData::simple_chat_response("4"))
        .await;

    let result = test_transport()
        .execute(&question("What is 2+2?"), &test_credential(&provider.endpoint()))
        .await;

    assert_eq!(result, CompletionResult::Text("4".to_string()));
}

#[tokio::test]
async fn test_multiple_choices_first_wins() {
    let provider = MockProvider::start().await;
    provider
        .mock_chat_completion_success(ProviderTestData::multi_choice_response(&["one", "two"]))
        .await;

    let result = test_transport()
        .execute(&question("pick"), &test_credential(&provider.endpoint()))
        .await;

    assert_eq!(result, CompletionResult::Text("one".to_string()));
}

#[tokio::test]
async fn test_request_wire_format() {
    let provider = MockProvider::start().await;
    provider
        .mock_chat_completion_success(ProviderTestData::simple_chat_response("ok"))
        .await;

    let mut transcript = Transcript::with_system_prompt("You are helpful.");
    transcript.add_user_turn("Hello!");
    let request = CompletionRequest::new(&transcript, "gpt-4");

    test_transport()
        .execute(&request, &test_credential(&provider.endpoint()))
        .await;

    let requests = provider.received_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].headers.get("authorization").unwrap(),
        &format!("Bearer {}", constants::TEST_API_KEY)
    );

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body,
        json!({
            "model": "gpt-4",
            "messages": [
                {"role": "system", "content": "You are helpful."},
                {"role": "user", "content": "Hello!"}
            ],
            "temperature": 0.7,
            "max_tokens": 1000,
            "stream": false
        })
    );
}

#[tokio::test]
async fn test_each_call_reauthenticates() {
    let provider = MockProvider::start().await;
    provider
        .mock_chat_completion_for_key(constants::TEST_API_KEY, "authorized")
        .await;

    let transport = test_transport();
    let credential = test_credential(&provider.endpoint());
    for _ in 0..2 {
        let result = transport.execute(&question("hi"), &credential).await;
        assert_eq!(result, CompletionResult::Text("authorized".to_string()));
    }

    let requests = provider.received_requests().await;
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.headers.contains_key("authorization")));
}

// =============================================================================
// Provider errors
// =============================================================================

#[tokio::test]
async fn test_unauthorized_maps_to_provider_error() {
    let provider = MockProvider::start().await;
    provider.mock_chat_completion_unauthorized().await;

    let result = test_transport()
        .execute(&question("hi"), &test_credential(&provider.endpoint()))
        .await;

    assert_eq!(
        result,
        CompletionResult::Failure(Failure::provider(401, "invalid_api_key", "bad key"))
    );
}

#[tokio::test]
async fn test_rate_limited_is_not_retried() {
    let provider = MockProvider::start().await;
    provider.mock_chat_completion_rate_limited().await;

    let result = test_transport()
        .execute(&question("hi"), &test_credential(&provider.endpoint()))
        .await;

    let failure = result.into_result().unwrap_err();
    assert_eq!(failure.kind, FailureKind::Provider);
    assert_eq!(failure.status, Some(429));
    assert_eq!(failure.error_type.as_deref(), Some("rate_limit_error"));
    assert_eq!(provider.received_requests().await.len(), 1);
}

#[tokio::test]
async fn test_non_json_error_body_kept_raw() {
    let provider = MockProvider::start().await;
    provider.mock_raw_error(502, "Bad Gateway").await;

    let result = test_transport()
        .execute(&question("hi"), &test_credential(&provider.endpoint()))
        .await;

    assert_eq!(
        result,
        CompletionResult::Failure(Failure::provider(502, "unknown", "Bad Gateway"))
    );
}

// =============================================================================
// Malformed responses
// =============================================================================

#[tokio::test]
async fn test_empty_object_is_malformed() {
    let provider = MockProvider::start().await;
    provider.mock_raw_success("{}").await;

    let result = test_transport()
        .execute(&question("hi"), &test_credential(&provider.endpoint()))
        .await;

    assert_eq!(
        result,
        CompletionResult::Failure(Failure::malformed(200, "No content in response"))
    );
}

#[tokio::test]
async fn test_empty_choices_is_malformed() {
    let provider = MockProvider::start().await;
    provider
        .mock_chat_completion_success(ProviderTestData::empty_choices_response())
        .await;

    let result = test_transport()
        .execute(&question("hi"), &test_credential(&provider.endpoint()))
        .await;

    assert_eq!(result.failure_kind(), Some(FailureKind::MalformedResponse));
}

#[tokio::test]
async fn test_unparsable_success_body_is_malformed() {
    let provider = MockProvider::start().await;
    provider.mock_raw_success("definitely not json").await;

    let result = test_transport()
        .execute(&question("hi"), &test_credential(&provider.endpoint()))
        .await;

    assert_eq!(result.failure_kind(), Some(FailureKind::MalformedResponse));
}

// =============================================================================
// Transport errors
// =============================================================================

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let result = test_transport()
        .execute(&question("hi"), &test_credential(&unreachable_endpoint()))
        .await;

    let failure = result.into_result().unwrap_err();
    assert_eq!(failure.kind, FailureKind::Transport);
    assert_eq!(failure.status, None);
    assert_eq!(failure.error_type, None);
    assert!(!failure.message.is_empty());
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let provider = MockProvider::start().await;
    provider.mock_slow_response(Duration::from_secs(3)).await;

    let mut config = test_config(&provider.endpoint(), constants::TEST_API_KEY);
    config.read_timeout = Duration::from_millis(200);
    config.write_timeout = Duration::from_millis(200);
    config.connect_timeout = Duration::from_millis(200);
    let transport = HttpTransport::new(&config).unwrap();

    let result = transport
        .execute(&question("hi"), &config.credential())
        .await;

    assert_eq!(result.failure_kind(), Some(FailureKind::Transport));
}

#[tokio::test]
async fn test_truncated_success_body_is_transport_error() {
    let endpoint = truncated_body_endpoint(200).await;

    let result = test_transport()
        .execute(&question("hi"), &test_credential(&endpoint))
        .await;

    let failure = result.into_result().unwrap_err();
    assert_eq!(failure.kind, FailureKind::Transport);
    assert_eq!(failure.status, None);
    assert_ne!(failure.message, "No content in response");
}

#[tokio::test]
async fn test_truncated_error_body_is_transport_error() {
    let endpoint = truncated_body_endpoint(500).await;

    let result = test_transport()
        .execute(&question("hi"), &test_credential(&endpoint))
        .await;

    let failure = result.into_result().unwrap_err();
    assert_eq!(failure.kind, FailureKind::Transport);
    assert_eq!(failure.status, None);
    assert_eq!(failure.error_type, None);
}

#[tokio::test]
async fn test_invalid_endpoint_is_transport_error() {
    let credential = Credential::new(constants::TEST_API_KEY, "not a url");
    let result = test_transport().execute(&question("hi"), &credential).await;
    assert_eq!(result.failure_kind(), Some(FailureKind::Transport));
}
