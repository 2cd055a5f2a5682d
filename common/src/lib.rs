//! Domain models for KeyProbe.
//!
//! This crate contains pure data structures representing the core
//! concepts in our application. Models have no business logic - they're
//! just data that can be passed between layers.
//!
//! ## Architecture
//!
//! - **common** (this crate): Pure data structures
//! - **probe-core**: Business logic operating on models
//! - **keyprobe**: Application wiring everything together
//!
//! This layered architecture keeps concerns separated and makes testing easier.

pub mod error;
pub mod http_status;
pub mod redacted_key;
pub mod report;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_key::RedactedApiKey;
pub use report::{
    ErrorCategory, ModelDescriptor, ProbeReport, SelectedModel, Step, StepKind,
};

#[cfg(test)]
mod tests;
