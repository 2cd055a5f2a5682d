//! HTTP status code utilities for error handling and retry guidance.

/// HTTP status code for error categorization.
///
/// Stored directly rather than parsed from error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    /// 4xx client errors (key or request problem, not transient).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors (potentially transient).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    /// Specific codes that indicate transient failures worth retrying by hand.
    pub fn is_retryable(&self) -> bool {
        matches!(self.0, 502 | 503 | 504 | 429)
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
