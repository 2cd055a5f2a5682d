pub mod gemini;
pub mod policy;
pub mod validation;

pub use gemini::GeminiError;
pub use policy::PolicyError;
pub use validation::{KeyValidationFailure, ValidationError};
