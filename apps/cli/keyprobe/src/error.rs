use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

/// Errors that can occur in the CLI wrapper itself.
///
/// Probe outcomes are NOT errors - they arrive as a ProbeReport. This
/// type only covers the wrapper's own failures (usage, logging, output).
#[derive(Debug, Error)]
pub enum KeyprobeError {
    /// Bad invocation (arguments, missing key source)
    #[error("Usage Error: {message}")]
    Usage { message: String },

    /// Error from this app's own plumbing
    #[error("Keyprobe Error: {message} {location}")]
    App {
        message: String,
        location: ErrorLocation,
    },
}

impl KeyprobeError {
    pub fn usage(message: impl Into<String>) -> Self {
        KeyprobeError::Usage {
            message: message.into(),
        }
    }

    #[track_caller]
    pub fn app(message: impl Into<String>) -> Self {
        KeyprobeError::App {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
