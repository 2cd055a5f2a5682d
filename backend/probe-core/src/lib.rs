pub mod classify;
pub mod error;
pub mod gemini;
pub mod policy;
pub mod probe;
pub mod selection;
pub mod validation;

pub use probe::Prober;

#[cfg(test)]
mod tests;

pub const GEMINI_API_HOSTNAME: &str = "generativelanguage.googleapis.com";
pub const GEMINI_API_BASE_URL: &str =
    const_format::concatcp!("https://", GEMINI_API_HOSTNAME, "/v1beta");
