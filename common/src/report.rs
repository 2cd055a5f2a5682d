//! Probe report model shared between the prober and the presentation layer.
//!
//! These are pure data: the prober populates a [`ProbeReport`]
//! incrementally as its stages complete and hands it off by value. The
//! presentation layer (CLI today, a web form tomorrow) only reads it.

use serde::{Deserialize, Serialize};

// ============================================
// MODEL CATALOG
// ============================================

/// One model as advertised by the provider's `models.list` endpoint.
///
/// Copied out of the wire response immediately on receipt; never holds
/// a live handle into the provider client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Fully qualified name, e.g. `models/gemini-1.5-flash`.
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Capability tags, e.g. `generateContent`, `embedContent`.
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
    #[serde(default)]
    pub input_token_limit: Option<u64>,
    #[serde(default)]
    pub output_token_limit: Option<u64>,
}

impl ModelDescriptor {
    /// Name without the `models/` prefix, as accepted by generation URLs.
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix("models/").unwrap_or(&self.name)
    }
}

/// The single model chosen for the generation probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedModel {
    pub name: String,
    pub display_name: String,
    pub description: String,
    /// Whether the model is on the designated popular list (display only).
    pub is_popular: bool,
}

// ============================================
// STEP LOG
// ============================================

/// Outcome class of a single probe step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StepKind {
    Passed,
    Warning,
    Failed,
    Info,
}

impl StepKind {
    /// Glyph shown before the step text.
    pub fn glyph(&self) -> &'static str {
        match self {
            StepKind::Passed => "✓",
            StepKind::Warning => "⚠",
            StepKind::Failed => "✗",
            StepKind::Info => "ℹ",
        }
    }
}

/// One entry in the ordered, append-only step log.
///
/// Ordering is user-visible and meaningful, which is why steps live in
/// a sequence rather than a map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub text: String,
}

impl Step {
    pub fn passed(text: impl Into<String>) -> Self {
        Self { kind: StepKind::Passed, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { kind: StepKind::Warning, text: text.into() }
    }

    pub fn failed(text: impl Into<String>) -> Self {
        Self { kind: StepKind::Failed, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: StepKind::Info, text: text.into() }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.glyph(), self.text)
    }
}

// ============================================
// ERROR CATEGORIES
// ============================================

/// User-facing category for a fatal probe failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    InvalidCredential,
    PermissionDenied,
    QuotaExceeded,
    QuotaFreeTier,
    NetworkError,
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorCategory::InvalidCredential => "invalid_credential",
            ErrorCategory::PermissionDenied => "permission_denied",
            ErrorCategory::QuotaExceeded => "quota_exceeded",
            ErrorCategory::QuotaFreeTier => "quota_free_tier",
            ErrorCategory::NetworkError => "network_error",
            ErrorCategory::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

// ============================================
// PROBE REPORT
// ============================================

/// Everything one probe run learned, in presentation-ready form.
///
/// Created fresh per request. The key only ever appears here in its
/// masked form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    /// True iff configuration and enumeration completed. Generation
    /// failures do not flip this (the key may still be valid).
    pub success: bool,
    pub api_key_masked: String,
    /// Ordered step outcomes, appended as stages complete.
    pub steps: Vec<Step>,
    /// Raw error text of the fatal failure, if any.
    pub error_message: Option<String>,
    /// Classified category of the fatal failure, if any.
    pub category: Option<ErrorCategory>,
    /// The single user-facing status line for this probe.
    pub status_message: String,
    pub selected_model: Option<SelectedModel>,
    /// Full catalog snapshot in provider order, not deduplicated.
    pub catalog: Vec<ModelDescriptor>,
}

impl ProbeReport {
    /// Fresh report for a probe that has not run any stage yet.
    pub fn new(api_key_masked: String) -> Self {
        Self {
            success: false,
            api_key_masked,
            steps: Vec::new(),
            error_message: None,
            category: None,
            status_message: String::new(),
            selected_model: None,
            catalog: Vec::new(),
        }
    }

    /// Append a step outcome (append-only, order preserved).
    pub fn push_step(&mut self, step: Step) {
        self.steps.push(step);
    }
}
