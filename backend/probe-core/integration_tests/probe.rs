// End-to-end probe scenarios against a wiremock Gemini API.

use crate::helpers::{
    error_envelope, mount_generation, mount_models, prober_for, test_key, wire_model,
};

use common::{ErrorCategory, StepKind};

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the full happy path: one eligible model, a
/// successful generation call, and a report carrying the masked key,
/// the response text, and success=true.
///
/// **WHY THIS MATTERS**: This is the canonical scenario the whole tool
/// exists for. It also pins the deterministic mask for a 40-character
/// key (8 visible + 24 stars + 4 visible).
///
/// **BUG THIS CATCHES**: Would catch the key leaking unmasked into the
/// report, the generation response not being surfaced as evidence, or
/// any stage silently not running.
#[tokio::test]
async fn given_valid_key_when_probed_then_success_report_with_response_text() {
    // GIVEN: A provider with one eligible model and working generation
    let server = MockServer::start().await;
    mount_models(
        &server,
        vec![wire_model("gemini-1.5-flash", &["generateContent"])],
    )
    .await;
    mount_generation(&server, "gemini-1.5-flash", "API test successful").await;

    // WHEN: Probing a structurally valid 40-char key
    let report = prober_for(&server).probe(&test_key()).await;

    // THEN: The probe succeeds with the expected masked key
    assert!(report.success, "report: {report:?}");
    assert_eq!(
        report.api_key_masked,
        format!("xxxxxxxx{}xxxx", "*".repeat(24))
    );
    assert_eq!(report.status_message, "API key test completed successfully!");
    assert!(report.error_message.is_none());
    assert!(report.category.is_none());

    // AND: The catalog and selection are recorded
    assert_eq!(report.catalog.len(), 1);
    let selected = report.selected_model.expect("model must be selected");
    assert_eq!(selected.name, "models/gemini-1.5-flash");
    assert!(selected.is_popular);

    // AND: Exactly one step quotes the response text verbatim
    let response_steps: Vec<_> = report
        .steps
        .iter()
        .filter(|s| s.text.contains("API test successful"))
        .collect();
    assert_eq!(response_steps.len(), 1);
    assert_eq!(response_steps[0].kind, StepKind::Passed);
}

/// **VALUE**: Verifies the authoritative invalid-key path: enumeration
/// rejects the key, the probe fails, and the failure classifies as
/// invalid_credential.
///
/// **WHY THIS MATTERS**: Enumeration failure is the primary signal of
/// an invalid credential; its classification drives the headline
/// message users act on.
///
/// **BUG THIS CATCHES**: Would catch enumeration failures being
/// swallowed like generation failures are, or the provider's
/// API_KEY_INVALID reason being lost before classification.
#[tokio::test]
async fn given_rejected_key_when_probed_then_invalid_credential_failure() {
    // GIVEN: A provider rejecting enumeration with API_KEY_INVALID
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

    // WHEN: Probing
    let report = prober_for(&server).probe(&test_key()).await;

    // THEN: Fatal failure, classified
    assert!(!report.success);
    assert_eq!(report.category, Some(ErrorCategory::InvalidCredential));
    assert_eq!(
        report.status_message,
        "Invalid API key. Please check your key and try again."
    );

    // AND: Partial progress is preserved - configuration passed, then
    // enumeration failed
    assert_eq!(report.steps[0].kind, StepKind::Passed);
    assert!(
        report
            .steps
            .iter()
            .any(|s| s.kind == StepKind::Failed && s.text.contains("Failed to list models"))
    );
    assert!(report.catalog.is_empty());
    assert!(report.selected_model.is_none());
}

/// **VALUE**: Verifies PERMISSION_DENIED enumeration failures classify
/// as permission_denied, not invalid_credential.
#[tokio::test]
async fn given_permission_denied_when_probed_then_permission_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(403).set_body_json(error_envelope(
            403,
            "PERMISSION_DENIED",
            "Generative Language API has not been used in this project",
            None,
        )))
        .mount(&server)
        .await;

    let report = prober_for(&server).probe(&test_key()).await;

    assert!(!report.success);
    assert_eq!(report.category, Some(ErrorCategory::PermissionDenied));
}

/// **VALUE**: Verifies free-tier quota exhaustion during enumeration
/// classifies as quota_free_tier and the status message names the
/// higher-free-tier alternative model.
#[tokio::test]
async fn given_free_tier_quota_exhausted_when_probed_then_alternative_suggested() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(429).set_body_json(error_envelope(
            429,
            "RESOURCE_EXHAUSTED",
            "Quota exceeded for metric generate_content_free_tier_requests",
            None,
        )))
        .mount(&server)
        .await;

    let report = prober_for(&server).probe(&test_key()).await;

    assert!(!report.success);
    assert_eq!(report.category, Some(ErrorCategory::QuotaFreeTier));
    assert!(report.status_message.contains("gemini-1.5-flash"));
}

/// **VALUE**: Verifies an empty eligible subset is NOT a failure: the
/// probe succeeds, selection is absent, and generation is skipped with
/// a warning step.
///
/// **WHY THIS MATTERS**: A key scoped to embedding-only models is still
/// a valid key. Flipping success here would be a false negative.
///
/// **BUG THIS CATCHES**: Would catch "no eligible models" being routed
/// through the fatal-failure classifier.
#[tokio::test]
async fn given_no_eligible_models_when_probed_then_success_with_skip_warning() {
    // GIVEN: Only an embedding model and denylisted generative models
    let server = MockServer::start().await;
    mount_models(
        &server,
        vec![
            wire_model("embedding-001", &["embedContent"]),
            wire_model("text-bison-001", &["generateContent"]),
            wire_model("gemini-pro-vision", &["generateContent"]),
        ],
    )
    .await;

    // WHEN: Probing
    let report = prober_for(&server).probe(&test_key()).await;

    // THEN: Still a success; generation skipped with warnings
    assert!(report.success);
    assert!(report.selected_model.is_none());
    assert_eq!(report.catalog.len(), 3);
    assert!(
        report
            .steps
            .iter()
            .any(|s| s.kind == StepKind::Warning && s.text.contains("Skipped content generation"))
    );
    assert!(
        !report.steps.iter().any(|s| s.kind == StepKind::Failed),
        "no step may be an error: {:?}",
        report.steps
    );
}

/// **VALUE**: Verifies generation failure is non-fatal and a
/// "deprecated" failure adds the retry-hint info step.
///
/// **WHY THIS MATTERS**: Generation can fail for reasons orthogonal to
/// credential validity. Treating it as fatal would report working keys
/// as broken - the exact false negative the design guards against.
///
/// **BUG THIS CATCHES**: Would catch generation errors being re-raised
/// into the classifier, or the deprecated hint disappearing.
#[tokio::test]
async fn given_deprecated_model_generation_failure_when_probed_then_still_success_with_hint() {
    // GIVEN: Enumeration works but generation 404s as deprecated
    let server = MockServer::start().await;
    mount_models(
        &server,
        vec![wire_model("gemini-1.5-flash", &["generateContent"])],
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_envelope(
            404,
            "NOT_FOUND",
            "Model gemini-1.5-flash is deprecated and no longer available",
            None,
        )))
        .mount(&server)
        .await;

    // WHEN: Probing
    let report = prober_for(&server).probe(&test_key()).await;

    // THEN: Overall success survives the generation failure
    assert!(report.success);
    assert_eq!(report.category, None);
    assert!(
        report
            .steps
            .iter()
            .any(|s| s.kind == StepKind::Failed && s.text.contains("Content generation failed"))
    );

    // AND: The retry hint is present
    assert!(
        report
            .steps
            .iter()
            .any(|s| s.kind == StepKind::Info && s.text.contains("different model"))
    );
}

/// **VALUE**: Verifies an empty generation response is a warning step,
/// not an error, and does not affect success.
#[tokio::test]
async fn given_empty_generation_response_when_probed_then_warning_step() {
    let server = MockServer::start().await;
    mount_models(
        &server,
        vec![wire_model("gemini-1.5-flash", &["generateContent"])],
    )
    .await;
    mount_generation(&server, "gemini-1.5-flash", "   ").await;

    let report = prober_for(&server).probe(&test_key()).await;

    assert!(report.success);
    assert!(
        report
            .steps
            .iter()
            .any(|s| s.kind == StepKind::Warning && s.text.contains("empty response"))
    );
}

/// **VALUE**: Verifies the generation request carries the key as a
/// query parameter and the fixed probe prompt in the body.
///
/// **WHY THIS MATTERS**: The probe's generation call is contractually
/// minimal: fixed prompt, bounded output, low temperature. This pins
/// the wire shape the provider actually receives.
#[tokio::test]
async fn given_probe_when_generating_then_request_carries_key_and_prompt() {
    let server = MockServer::start().await;
    mount_models(
        &server,
        vec![wire_model("gemini-1.5-flash", &["generateContent"])],
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "x".repeat(40)))
        .and(wiremock::matchers::body_string_contains("API test successful"))
        .and(wiremock::matchers::body_string_contains("maxOutputTokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "ok" }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = prober_for(&server).probe(&test_key()).await;

    assert!(report.success);
}
