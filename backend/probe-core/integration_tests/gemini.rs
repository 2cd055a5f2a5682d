// Client-level tests for the Gemini API wrapper.

use crate::helpers::{error_envelope, test_key, wire_model};

use probe_core::error::GeminiError;
use probe_core::gemini::{GeminiClient, GenerationConfig};

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::configure_with_base_url(&test_key(), &format!("{}/v1beta", server.uri()))
        .expect("client must configure")
}

/// **VALUE**: Verifies enumeration follows nextPageToken across pages
/// and concatenates the catalog in provider order.
///
/// **WHY THIS MATTERS**: The provider paginates once the lineup grows.
/// A probe that only reads page one silently under-reports the catalog
/// and can miss every eligible model.
///
/// **BUG THIS CATCHES**: Would catch the pagination loop terminating
/// after the first page or dropping earlier pages when appending.
#[tokio::test]
async fn given_paginated_catalog_when_listing_then_all_pages_fetched_in_order() {
    // GIVEN: Two pages linked by a page token
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(query_param("pageToken", "page-two"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [wire_model("gemini-pro", &["generateContent"])]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [wire_model("gemini-1.5-flash", &["generateContent"])],
            "nextPageToken": "page-two"
        })))
        .mount(&server)
        .await;

    // WHEN: Listing models
    let catalog = client_for(&server).list_models().await.expect("must list");

    // THEN: Both pages present, provider order preserved
    let names: Vec<&str> = catalog.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["models/gemini-1.5-flash", "models/gemini-pro"]);
}

/// **VALUE**: Verifies the enumeration request authenticates via the
/// key query parameter.
#[tokio::test]
async fn given_client_when_listing_then_key_sent_as_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(query_param("key", "x".repeat(40)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = client_for(&server).list_models().await.expect("must list");

    assert!(catalog.is_empty());
}

/// **VALUE**: Verifies provider error envelopes surface their status
/// and reason markers in the rendered error, which is what the
/// classifier matches on.
///
/// **BUG THIS CATCHES**: Would catch the reason being dropped when
/// converting the envelope, which downgrades invalid_credential to
/// unknown.
#[tokio::test]
async fn given_api_error_envelope_when_listing_then_reason_preserved_in_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_envelope(
            400,
            "INVALID_ARGUMENT",
            "API key not valid. Please pass a valid API key.",
            Some("API_KEY_INVALID"),
        )))
        .mount(&server)
        .await;

    let err = client_for(&server).list_models().await.expect_err("must fail");

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.error_category(), "client_error");
    let rendered = err.to_string();
    assert!(rendered.contains("API_KEY_INVALID"), "rendered: {rendered}");
    assert!(rendered.contains("INVALID_ARGUMENT"));
}

/// **VALUE**: Verifies a non-JSON error body still produces a usable
/// API error instead of a decode panic.
#[tokio::test]
async fn given_non_json_error_body_when_listing_then_body_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream connect error"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_models().await.expect_err("must fail");

    assert_eq!(err.status_code(), Some(503));
    assert!(err.is_retryable());
    assert!(err.to_string().contains("upstream connect error"));
}

/// **VALUE**: Verifies a generation response without candidates is a
/// decode error, and one with multiple parts is joined into one string.
#[tokio::test]
async fn given_generation_responses_when_decoded_then_candidates_handled() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/no-candidates:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/multi-part:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "API test " }, { "text": "successful" }]
                }
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let config = GenerationConfig {
        max_output_tokens: 50,
        temperature: 0.1,
    };

    let err = client
        .generate_content("no-candidates", "hello", &config)
        .await
        .expect_err("must fail");
    assert!(matches!(err, GeminiError::Decode { .. }));

    let text = client
        .generate_content("multi-part", "hello", &config)
        .await
        .expect("must succeed");
    assert_eq!(text, "API test successful");
}

/// **VALUE**: Verifies configuration rejects an unparseable endpoint at
/// configure time rather than on the first request.
#[test]
fn given_invalid_base_url_when_configured_then_url_error() {
    let err = GeminiClient::configure_with_base_url(&test_key(), "not a url")
        .expect_err("must fail");

    assert!(matches!(err, GeminiError::Url { .. }));
}
