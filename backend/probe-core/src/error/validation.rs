//! Error types for key format validation.

use common::ErrorLocation;
use std::panic::Location;
use thiserror::Error as ThisError;

/// Specific reasons for key validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValidationFailure {
    Empty,
    TooShort { min: usize, actual: usize },
}

impl std::fmt::Display for KeyValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "key is empty"),
            Self::TooShort { min, actual } => {
                write!(f, "key too short ({} chars, minimum {})", actual, min)
            }
        }
    }
}

#[derive(Debug, ThisError)]
pub enum ValidationError {
    #[error("Key validation failed: {reason} {location}")]
    KeyValidation {
        reason: KeyValidationFailure,
        location: ErrorLocation,
    },
}

impl ValidationError {
    #[track_caller]
    pub fn key_validation(reason: KeyValidationFailure) -> Self {
        ValidationError::KeyValidation {
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The underlying failure reason.
    pub fn reason(&self) -> &KeyValidationFailure {
        match self {
            ValidationError::KeyValidation { reason, .. } => reason,
        }
    }
}
