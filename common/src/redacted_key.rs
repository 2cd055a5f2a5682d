//! Secure API key handling with redacted Debug output.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

/// Redaction character used by [`RedactedApiKey::masked`].
const MASK_CHAR: char = '*';

/// Keys at or below this length are fully redacted when masked.
const MASK_FULL_REDACTION_LEN: usize = 12;

/// Leading characters kept visible in the masked form.
const MASK_VISIBLE_PREFIX: usize = 8;

/// Trailing characters kept visible in the masked form.
const MASK_VISIBLE_SUFFIX: usize = 4;

/// An API key that never exposes its value in logs or debug output.
#[derive(Clone)]
pub struct RedactedApiKey {
    inner: String,
}

impl RedactedApiKey {
    /// Create a new redacted API key.
    pub fn new(key: String) -> Self {
        Self { inner: key }
    }

    /// Get the actual key value for transmission.
    ///
    /// # Security Note
    /// Only call this when actually sending the key to the provider.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Get the key length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the key is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Display-only masked view of the key.
    ///
    /// Keys of 12 characters or fewer are fully redacted. Longer keys
    /// keep the first 8 and last 4 characters with a redaction run in
    /// between. Deterministic: the same key always masks the same way.
    pub fn masked(&self) -> String {
        // Counted in chars, not bytes, so an unexpected multibyte key
        // cannot split a codepoint.
        let len = self.inner.chars().count();
        if len <= MASK_FULL_REDACTION_LEN {
            return MASK_CHAR.to_string().repeat(len);
        }

        let prefix: String = self.inner.chars().take(MASK_VISIBLE_PREFIX).collect();
        let suffix: String = self
            .inner
            .chars()
            .skip(len - MASK_VISIBLE_SUFFIX)
            .collect();
        let redacted_run = len - MASK_VISIBLE_PREFIX - MASK_VISIBLE_SUFFIX;

        format!(
            "{prefix}{}{suffix}",
            MASK_CHAR.to_string().repeat(redacted_run)
        )
    }
}

impl fmt::Debug for RedactedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedApiKey([REDACTED])")
    }
}

impl fmt::Display for RedactedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED API KEY]")
    }
}

impl Drop for RedactedApiKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Prevent accidental serialization
impl serde::Serialize for RedactedApiKey {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(
            RedactError::Serialization {
                message: String::from("RedactedApiKey cannot be serialized - use masked() for display"),
                location: ErrorLocation::from(Location::caller()),
            }
        ))
    }
}
