//! API key format validation.
//!
//! Applied by the presentation layer BEFORE the prober runs, so that
//! structurally impossible keys never cost a network round-trip.
//!
//! Only structural checks live here (empty, too short). Prefix and
//! character-set rules are deliberately absent: the probe exists to find
//! out whether a plausible-looking key works, and over-strict local
//! rules would reject keys the provider might accept.

use crate::error::{KeyValidationFailure, ValidationError};
use common::RedactedApiKey;

/// Minimum plausible length for a Gemini API key.
pub const MIN_KEY_LENGTH: usize = 30;

/// Validation result for an API key.
#[derive(Debug)]
pub enum ValidationResult {
    Valid,
    Invalid(KeyValidationFailure),
}

/// Structural pre-checks for a raw key string.
pub struct KeyValidator {
    /// Minimum key length.
    min_length: usize,
}

impl KeyValidator {
    pub fn new() -> Self {
        Self {
            min_length: MIN_KEY_LENGTH,
        }
    }

    /// Validate a key value.
    ///
    /// Returns `ValidationResult::Valid` if the key passes all checks,
    /// or `ValidationResult::Invalid` with the specific failure reason.
    pub fn validate(&self, key: &str) -> ValidationResult {
        let trimmed = key.trim();

        if trimmed.is_empty() {
            return ValidationResult::Invalid(KeyValidationFailure::Empty);
        }

        if trimmed.chars().count() < self.min_length {
            return ValidationResult::Invalid(KeyValidationFailure::TooShort {
                min: self.min_length,
                actual: trimmed.chars().count(),
            });
        }

        ValidationResult::Valid
    }

    /// Validate and wrap in RedactedApiKey if valid.
    ///
    /// The wrapped key is the trimmed input: surrounding whitespace is a
    /// paste artifact, not part of the credential.
    #[track_caller]
    pub fn validate_and_wrap(&self, key: String) -> Result<RedactedApiKey, ValidationError> {
        match self.validate(&key) {
            ValidationResult::Valid => Ok(RedactedApiKey::new(key.trim().to_string())),
            ValidationResult::Invalid(reason) => Err(ValidationError::key_validation(reason)),
        }
    }
}

impl Default for KeyValidator {
    fn default() -> Self {
        Self::new()
    }
}
