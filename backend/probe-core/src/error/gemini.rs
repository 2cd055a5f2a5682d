//! Error types for Gemini API operations.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - `is_retryable()` uses status codes, not message content
//! - All errors include ErrorLocation for debugging
//! - `#[track_caller]` for automatic location capture
//!
//! The probe classifier, by contract, works over the *rendered* message
//! of these errors, so the Display impls keep the provider's `status`
//! and `reason` markers (e.g. `API_KEY_INVALID`) verbatim.

use common::{ErrorLocation, HttpStatusCode};
use std::panic::Location;
use thiserror::Error as ThisError;

/// Errors that can occur talking to the Gemini API.
#[derive(Debug, ThisError)]
pub enum GeminiError {
    #[error("Client configuration failed: {message} {location}")]
    Configure {
        message: String,
        location: ErrorLocation,
    },

    #[error("Gemini API error during {operation}: HTTP {status_code} {status} - {message} {location}")]
    Api {
        operation: &'static str,
        status: String,
        message: String,
        status_code: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("Network error during {operation}: {message} {location}")]
    Network {
        operation: &'static str,
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Unexpected response during {operation}: {message} {location}")]
    Decode {
        operation: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid API URL '{url}': {message} {location}")]
    Url {
        url: String,
        message: String,
        location: ErrorLocation,
    },
}

impl GeminiError {
    #[track_caller]
    pub fn configure(message: impl Into<String>) -> Self {
        GeminiError::Configure {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode(operation: &'static str, message: impl Into<String>) -> Self {
        GeminiError::Decode {
            operation,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn url(url: impl Into<String>, message: impl Into<String>) -> Self {
        GeminiError::Url {
            url: url.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from reqwest error with proper categorization.
    #[track_caller]
    pub fn from_reqwest(operation: &'static str, error: &reqwest::Error) -> Self {
        // Check for specific error types BEFORE converting to string
        let is_timeout = error.is_timeout();
        let is_connect = error.is_connect();

        if is_timeout || is_connect {
            // Spell the failure mode out in the message: the rendered
            // text is what classification matches on, and reqwest's own
            // Display does not reliably name it.
            let message = if is_timeout {
                format!("request timeout: {error}")
            } else {
                format!("connection failed: {error}")
            };
            return GeminiError::Network {
                operation,
                message,
                is_timeout,
                is_connection: is_connect,
                location: ErrorLocation::from(Location::caller()),
            };
        }

        // Check for HTTP status in the error
        if let Some(status) = error.status() {
            return GeminiError::Api {
                operation,
                status: String::new(),
                message: error.to_string(),
                status_code: HttpStatusCode(status.as_u16()),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        // Generic network error (no status available)
        GeminiError::Network {
            operation,
            message: error.to_string(),
            is_timeout: false,
            is_connection: false,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a non-success HTTP response body.
    ///
    /// `status` is the provider's error status (e.g. `INVALID_ARGUMENT`,
    /// `PERMISSION_DENIED`); `message` should already carry any `reason`
    /// markers extracted from the error details.
    #[track_caller]
    pub fn from_api_response(
        operation: &'static str,
        status_code: u16,
        status: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        GeminiError::Api {
            operation,
            status: status.into(),
            message: message.into(),
            status_code: HttpStatusCode(status_code),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Check if this error is worth retrying by hand, based on error
    /// category rather than message content.
    pub fn is_retryable(&self) -> bool {
        match self {
            GeminiError::Network { is_timeout, is_connection, .. } => {
                *is_timeout || *is_connection
            }
            GeminiError::Api { status_code, .. } => status_code.is_retryable(),
            GeminiError::Configure { .. } => false,
            GeminiError::Decode { .. } => false,
            GeminiError::Url { .. } => false,
        }
    }

    /// Get error category for logging.
    pub fn error_category(&self) -> &'static str {
        match self {
            GeminiError::Configure { .. } => "configure",
            GeminiError::Api { status_code, .. } if status_code.is_client_error() => "client_error",
            GeminiError::Api { status_code, .. } if status_code.is_server_error() => "server_error",
            GeminiError::Api { .. } => "api",
            GeminiError::Network { is_timeout: true, .. } => "timeout",
            GeminiError::Network { is_connection: true, .. } => "connection",
            GeminiError::Network { .. } => "network",
            GeminiError::Decode { .. } => "decode",
            GeminiError::Url { .. } => "url",
        }
    }

    /// Get HTTP status code if applicable.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GeminiError::Api { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }
}
