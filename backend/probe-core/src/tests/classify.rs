// Unit tests for fatal-failure classification and status messages.

use crate::classify::{classify, finalize_failure, status_message};
use crate::policy::default_policy;

use common::{ErrorCategory, ProbeReport, Step};

/// **VALUE**: Verifies the invalid-key markers, including the exact
/// message from the known scenario ("API_KEY_INVALID: key not found").
///
/// **WHY THIS MATTERS**: Invalid-credential is the single most common
/// outcome of this tool; misclassifying it as Unknown gives the user a
/// raw provider error instead of actionable guidance.
#[test]
fn given_invalid_key_markers_when_classified_then_invalid_credential() {
    for text in [
        "API_KEY_INVALID: key not found",
        "Gemini API error during list_models: HTTP 400 INVALID_ARGUMENT - API key not valid. Please pass a valid API key. (reason: API_KEY_INVALID)",
        "provider said: Invalid API Key supplied",
    ] {
        assert_eq!(classify(text), ErrorCategory::InvalidCredential, "text: {text}");
    }
}

/// **VALUE**: Verifies PERMISSION_DENIED classification.
#[test]
fn given_permission_denied_marker_when_classified_then_permission_denied() {
    assert_eq!(
        classify("HTTP 403 PERMISSION_DENIED - Generative Language API has not been used"),
        ErrorCategory::PermissionDenied
    );
}

/// **VALUE**: Verifies quota classification and its free-tier
/// refinement.
///
/// **WHY THIS MATTERS**: Free-tier exhaustion has a remedy the user can
/// act on immediately (switch model); generic quota exhaustion does
/// not. Collapsing the two loses the most useful hint this tool gives.
///
/// **BUG THIS CATCHES**: Would catch the free-tier refinement being
/// checked after the generic quota match returns.
#[test]
fn given_quota_markers_when_classified_then_quota_categories() {
    assert_eq!(
        classify("HTTP 429 RESOURCE_EXHAUSTED - Quota exceeded for metric"),
        ErrorCategory::QuotaExceeded
    );
    assert_eq!(
        classify("QUOTA_EXCEEDED: request limit reached"),
        ErrorCategory::QuotaExceeded
    );
    assert_eq!(
        classify(
            "HTTP 429 RESOURCE_EXHAUSTED - quota metric generate_content_free_tier_requests exceeded"
        ),
        ErrorCategory::QuotaFreeTier
    );
}

/// **VALUE**: Verifies network classification from timeout/connection
/// wording.
#[test]
fn given_network_wording_when_classified_then_network_error() {
    assert_eq!(
        classify("Network error during list_models: operation timed out after timeout"),
        ErrorCategory::NetworkError
    );
    assert_eq!(
        classify("error sending request: connection refused"),
        ErrorCategory::NetworkError
    );
}

/// **VALUE**: Verifies match priority: an invalid-key marker wins even
/// when network wording is also present.
///
/// **BUG THIS CATCHES**: Would catch the match arms being reordered so
/// a later category shadows an earlier one.
#[test]
fn given_multiple_markers_when_classified_then_first_priority_wins() {
    assert_eq!(
        classify("connection established but API_KEY_INVALID"),
        ErrorCategory::InvalidCredential
    );
    assert_eq!(
        classify("PERMISSION_DENIED after connection retry"),
        ErrorCategory::PermissionDenied
    );
}

/// **VALUE**: Verifies unmatched text falls through to Unknown with the
/// raw message interpolated.
#[test]
fn given_unrecognized_text_when_classified_then_unknown_passthrough() {
    let text = "something nobody anticipated";

    assert_eq!(classify(text), ErrorCategory::Unknown);
    let message = status_message(ErrorCategory::Unknown, text, default_policy());
    assert!(message.contains(text));
}

/// **VALUE**: Verifies the free-tier message names the policy's
/// alternative model.
#[test]
fn given_free_tier_category_when_messaged_then_alternative_model_named() {
    let message = status_message(ErrorCategory::QuotaFreeTier, "", default_policy());

    assert!(
        message.contains("gemini-1.5-flash"),
        "free-tier guidance must name the alternative model, got: {message}"
    );
}

/// **VALUE**: Verifies finalize_failure preserves prior steps, sets
/// success=false, and records category, message, and status.
///
/// **WHY THIS MATTERS**: The report the user sees after a fatal failure
/// must still show how far the probe got; wiping the step log hides
/// that partial progress.
#[test]
fn given_partial_report_when_finalized_then_steps_preserved_and_failure_recorded() {
    let mut report = ProbeReport::new(String::from("****"));
    report.push_step(Step::passed("API key configuration successful"));
    report.push_step(Step::failed("Failed to list models: ..."));

    finalize_failure(
        &mut report,
        String::from("API_KEY_INVALID: key not found"),
        default_policy(),
    );

    assert!(!report.success);
    assert_eq!(report.steps.len(), 2, "prior steps must be preserved");
    assert_eq!(report.category, Some(ErrorCategory::InvalidCredential));
    assert_eq!(
        report.error_message.as_deref(),
        Some("API_KEY_INVALID: key not found")
    );
    assert_eq!(
        report.status_message,
        "Invalid API key. Please check your key and try again."
    );
}
