//! The credential probe pipeline.
//!
//! One probe = configure → enumerate → filter → select → generate, each
//! stage appending to the report's step log. Configuration and
//! enumeration failures are fatal and routed through the classifier;
//! generation failures are not, since a quota, per-model permission, or
//! deprecation problem on the probed model says nothing about the key
//! itself. That asymmetry is what keeps valid-but-limited keys from
//! reporting as invalid.

use crate::classify;
use crate::error::GeminiError;
use crate::gemini::{GeminiClient, GenerationConfig};
use crate::policy::SelectionPolicy;
use crate::selection;
use crate::GEMINI_API_BASE_URL;

use common::{ProbeReport, RedactedApiKey, Step};

use log::{debug, info, warn};

/// Fixed connectivity prompt; the probe wants a deterministic-leaning
/// echo, not creativity.
pub const TEST_PROMPT: &str =
    "Hello! Please respond with 'API test successful' to confirm connectivity.";

/// Output budget for the generation probe.
pub const PROBE_MAX_OUTPUT_TOKENS: u32 = 50;

/// Sampling temperature for the generation probe.
pub const PROBE_TEMPERATURE: f32 = 0.1;

/// Success status line, set only when configuration and enumeration
/// both completed.
pub const SUCCESS_MESSAGE: &str = "API key test completed successfully!";

/// Marker in generation failures indicating the model (not the key) is
/// the problem.
const DEPRECATED_MARKER: &str = "deprecated";

/// Runs one end-to-end probe per call. Stateless across probes, so
/// concurrent probers are fully isolated.
pub struct Prober {
    policy: SelectionPolicy,
    base_url: String,
}

impl Prober {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            base_url: GEMINI_API_BASE_URL.to_string(),
        }
    }

    /// Probe against a non-default endpoint (test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Validate the credential end to end. Never fails: every outcome,
    /// including every error, is folded into the returned report.
    ///
    /// Callers are expected to have applied the structural pre-checks
    /// ([`crate::validation::KeyValidator`]) already; a structurally
    /// invalid key should never reach this point.
    pub async fn probe(&self, api_key: &RedactedApiKey) -> ProbeReport {
        let mut report = ProbeReport::new(api_key.masked());

        debug!("Starting probe for key {}", report.api_key_masked);

        match self.run_stages(api_key, &mut report).await {
            Ok(()) => {
                // Reaching here means configuration and enumeration
                // held up; generation outcome does not affect success.
                report.success = true;
                report.status_message = SUCCESS_MESSAGE.to_string();
                info!("Probe completed: key accepted by provider");
            }
            Err(e) => {
                classify::finalize_failure(&mut report, e.to_string(), &self.policy);
            }
        }

        report
    }

    /// Everything after the pre-checks. An `Err` from here is a fatal
    /// failure (configuration or enumeration); generation problems are
    /// absorbed into steps.
    async fn run_stages(
        &self,
        api_key: &RedactedApiKey,
        report: &mut ProbeReport,
    ) -> Result<(), GeminiError> {
        let client = GeminiClient::configure_with_base_url(api_key, &self.base_url)?;
        report.push_step(Step::passed("API key configuration successful"));

        // Enumeration is the authoritative credential check.
        let catalog = match client.list_models().await {
            Ok(catalog) => catalog,
            Err(e) => {
                report.push_step(Step::failed(format!("Failed to list models: {e}")));
                return Err(e);
            }
        };
        report.push_step(Step::passed(format!(
            "Successfully retrieved {} available models",
            catalog.len()
        )));

        let eligible = selection::eligible_models(&catalog, &self.policy);
        report.push_step(Step::passed(format!(
            "Cataloged {} models, {} eligible for generation testing",
            catalog.len(),
            eligible.len()
        )));

        let chosen = selection::select_model(&eligible, &self.policy).cloned();
        report.catalog = catalog;

        let Some(model) = chosen else {
            warn!("Catalog contained no eligible generative models");
            report.push_step(Step::warning("No generative models found"));
            report.push_step(Step::warning(
                "Skipped content generation test (no suitable models)",
            ));
            return Ok(());
        };

        let selected = selection::to_selected(&model, &self.policy);
        let found_text = if selected.is_popular {
            format!("Found suitable model: {} (popular)", selected.display_name)
        } else {
            format!("Found suitable model: {}", selected.display_name)
        };
        report.push_step(Step::passed(found_text));
        report.selected_model = Some(selected);

        // Generation is non-fatal whatever happens.
        let config = GenerationConfig {
            max_output_tokens: PROBE_MAX_OUTPUT_TOKENS,
            temperature: PROBE_TEMPERATURE,
        };

        match client
            .generate_content(model.short_name(), TEST_PROMPT, &config)
            .await
        {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    report.push_step(Step::warning(
                        "Content generation returned empty response",
                    ));
                } else {
                    report.push_step(Step::passed("Successfully generated content"));
                    report.push_step(Step::passed(format!("Model response: \"{trimmed}\"")));
                }
            }
            Err(e) => {
                // The key may still be valid: quota, per-model
                // permission, or deprecation can all fail generation.
                let text = e.to_string();
                warn!("Content generation failed ({}): {text}", e.error_category());
                report.push_step(Step::failed(format!("Content generation failed: {text}")));

                if text.to_lowercase().contains(DEPRECATED_MARKER) {
                    report.push_step(Step::info(
                        "Selected model is deprecated; a different model will be chosen on the next attempt",
                    ));
                }
            }
        }

        Ok(())
    }
}
