//! Fatal-failure classification.
//!
//! Invoked only when configuration or enumeration fails. Classification
//! is by substring match over the failure's rendered message, checked
//! in priority order: first match wins. Enumeration is the first round
//! trip that requires the provider to accept the credential, which is
//! why its failure is the authoritative invalid-key signal.

use crate::policy::SelectionPolicy;

use common::{ErrorCategory, ProbeReport};

use log::error;

// Markers checked case-sensitively are the provider's machine-readable
// status/reason codes; the rest are matched on lowercased text.
const INVALID_KEY_MARKER: &str = "API_KEY_INVALID";
const INVALID_KEY_TEXT_MARKERS: &[&str] = &["invalid api key", "api key not valid"];
const PERMISSION_MARKER: &str = "PERMISSION_DENIED";
const QUOTA_MARKERS: &[&str] = &["QUOTA_EXCEEDED", "RESOURCE_EXHAUSTED"];
const FREE_TIER_MARKERS: &[&str] = &["free_tier", "free tier"];
const NETWORK_TEXT_MARKERS: &[&str] = &["timeout", "connection"];

/// Map a fatal failure's message to a user-facing category.
pub fn classify(error_text: &str) -> ErrorCategory {
    let lower = error_text.to_lowercase();

    if error_text.contains(INVALID_KEY_MARKER)
        || INVALID_KEY_TEXT_MARKERS.iter().any(|m| lower.contains(m))
    {
        return ErrorCategory::InvalidCredential;
    }

    if error_text.contains(PERMISSION_MARKER) {
        return ErrorCategory::PermissionDenied;
    }

    if QUOTA_MARKERS.iter().any(|m| error_text.contains(m)) {
        if FREE_TIER_MARKERS.iter().any(|m| lower.contains(m)) {
            return ErrorCategory::QuotaFreeTier;
        }
        return ErrorCategory::QuotaExceeded;
    }

    if NETWORK_TEXT_MARKERS.iter().any(|m| lower.contains(m)) {
        return ErrorCategory::NetworkError;
    }

    ErrorCategory::Unknown
}

/// The single fixed status message for a category.
///
/// Only `Unknown` interpolates the raw error text; `QuotaFreeTier`
/// names the policy's higher-free-tier alternative model.
pub fn status_message(
    category: ErrorCategory,
    error_text: &str,
    policy: &SelectionPolicy,
) -> String {
    match category {
        ErrorCategory::InvalidCredential => {
            String::from("Invalid API key. Please check your key and try again.")
        }
        ErrorCategory::PermissionDenied => String::from(
            "Permission denied. Please check if your API key has the required permissions.",
        ),
        ErrorCategory::QuotaFreeTier => format!(
            "Free-tier quota exceeded. Try {}, which has a higher free-tier limit, or check your usage limits.",
            policy.free_tier_alternative
        ),
        ErrorCategory::QuotaExceeded => {
            String::from("API quota exceeded. Please check your usage limits.")
        }
        ErrorCategory::NetworkError => String::from(
            "Network error. Please check your internet connection and try again.",
        ),
        ErrorCategory::Unknown => format!("API test failed: {error_text}"),
    }
}

/// Fold a fatal failure into the partially populated report.
///
/// Steps recorded before the failure are preserved; `success` is
/// unconditionally false and exactly one status message is set.
pub fn finalize_failure(report: &mut ProbeReport, error_text: String, policy: &SelectionPolicy) {
    let category = classify(&error_text);

    error!("API key test failed ({category}): {error_text}");

    report.success = false;
    report.status_message = status_message(category, &error_text, policy);
    report.category = Some(category);
    report.error_message = Some(error_text);
}
