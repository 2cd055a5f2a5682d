//! Terminal rendering of probe results.
//!
//! The presentation contract: exactly one top-level status message,
//! then the ordered step log for transparency into partial progress.
//! Only the masked key ever appears.

use crate::error::KeyprobeError;

use common::ProbeReport;
use probe_core::error::KeyValidationFailure;

use std::fmt::Write;

/// User-facing message for a structural pre-check failure.
///
/// These bypass the prober entirely, so they get their own wording
/// instead of a classified category.
pub fn validation_message(failure: &KeyValidationFailure) -> &'static str {
    match failure {
        KeyValidationFailure::Empty => "Please provide an API key.",
        KeyValidationFailure::TooShort { .. } => {
            "API key appears to be too short. Please check and try again."
        }
    }
}

/// Human-readable rendering of a completed report.
pub fn render_text(report: &ProbeReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", report.status_message);
    let _ = writeln!(out);
    let _ = writeln!(out, "Tested key: {}", report.api_key_masked);

    if !report.steps.is_empty() {
        let _ = writeln!(out);
        for step in &report.steps {
            let _ = writeln!(out, "  {step}");
        }
    }

    if let Some(model) = &report.selected_model {
        let _ = writeln!(out);
        let popular = if model.is_popular { " [popular]" } else { "" };
        let _ = writeln!(
            out,
            "Selected model: {} ({}){popular}",
            model.display_name, model.name
        );
        if !model.description.is_empty() {
            let _ = writeln!(out, "  {}", model.description);
        }
    }

    if let Some(error_message) = &report.error_message {
        let _ = writeln!(out);
        let _ = writeln!(out, "Error detail: {error_message}");
    }

    out
}

/// JSON rendering for machine consumers.
pub fn render_json(report: &ProbeReport) -> Result<String, KeyprobeError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| KeyprobeError::app(format!("Failed to serialize report: {e}")))
}
