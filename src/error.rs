//! Error types and vendor error classification
//!
//! All public APIs return `Result<T, Error>` where `Error` is defined here.
//! The classifier decides how a vendor failure is handled: not-found errors
//! are suppressed by Get-style operations, rate-limit errors are handed to
//! the retry loop in `http`, and everything else propagates to the host.

use thiserror::Error;

/// The main error type for the adapter
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("JWT generation failed: {message}")]
    JwtGeneration { message: String },

    #[error("Token exchange failed: {message}")]
    TokenExchange { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// True when the vendor reported the requested resource as missing
    pub fn is_not_found(&self) -> bool {
        classify(self) == ErrorClass::NotFound
    }

    /// True when the retry loop may usefully re-issue the request
    pub fn is_retryable(&self) -> bool {
        classify(self) == ErrorClass::RateLimited
    }
}

/// Result type alias for the adapter
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Classification
// ============================================================================

/// How a vendor error should be handled by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Resource does not exist; Get operations produce zero rows instead
    NotFound,
    /// Transient throttling or deadline condition; hand to the retry loop
    RateLimited,
    /// Everything else; propagate verbatim as a query failure
    Fatal,
}

/// Vendor phrases that mark a lookup target as missing. E0000007 is the
/// Okta error code for "Resource not found".
const NOT_FOUND_MARKERS: &[&str] = &["Not found", "E0000007", "Invalid Factor"];

/// Classify an error once, as close to the vendor call as possible.
///
/// Retry execution itself lives in the `http` retry loop; this function only
/// names the class so callers stay decoupled from backoff policy.
pub fn classify(err: &Error) -> ErrorClass {
    match err {
        Error::HttpStatus { status: 404, .. } => ErrorClass::NotFound,
        Error::HttpStatus { status: 429, .. } => ErrorClass::RateLimited,
        Error::RateLimited { .. } | Error::Timeout { .. } | Error::MaxRetriesExceeded { .. } => {
            ErrorClass::RateLimited
        }
        Error::Http(e) if e.is_timeout() => ErrorClass::RateLimited,
        Error::HttpStatus { body, .. } if contains_not_found_marker(body) => ErrorClass::NotFound,
        _ => {
            let text = err.to_string();
            if contains_not_found_marker(&text) {
                ErrorClass::NotFound
            } else if text.contains("429") {
                ErrorClass::RateLimited
            } else {
                ErrorClass::Fatal
            }
        }
    }
}

fn contains_not_found_marker(text: &str) -> bool {
    NOT_FOUND_MARKERS.iter().any(|m| text.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::invalid_value("max_retries", "not an integer");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'max_retries': not an integer"
        );

        let err = Error::http_status(404, "Not found: Resource not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found: Resource not found");
    }

    #[test]
    fn test_classify_not_found() {
        assert_eq!(classify(&Error::http_status(404, "")), ErrorClass::NotFound);
        assert_eq!(
            classify(&Error::http_status(400, "E0000007: Not found")),
            ErrorClass::NotFound
        );
        assert_eq!(
            classify(&Error::Other("Invalid Factor".to_string())),
            ErrorClass::NotFound
        );
    }

    #[test]
    fn test_classify_rate_limited() {
        assert_eq!(
            classify(&Error::http_status(429, "too many requests")),
            ErrorClass::RateLimited
        );
        assert_eq!(
            classify(&Error::RateLimited {
                retry_after_seconds: 30
            }),
            ErrorClass::RateLimited
        );
        assert_eq!(
            classify(&Error::Timeout { timeout_ms: 1000 }),
            ErrorClass::RateLimited
        );
        assert_eq!(
            classify(&Error::Other("got HTTP 429 from upstream".to_string())),
            ErrorClass::RateLimited
        );
    }

    #[test]
    fn test_classify_fatal() {
        assert_eq!(
            classify(&Error::http_status(400, "bad request")),
            ErrorClass::Fatal
        );
        assert_eq!(
            classify(&Error::http_status(403, "forbidden")),
            ErrorClass::Fatal
        );
        assert_eq!(classify(&Error::config("oops")), ErrorClass::Fatal);
        assert_eq!(classify(&Error::auth("no credentials")), ErrorClass::Fatal);
    }

    #[test]
    fn test_is_not_found_and_is_retryable() {
        assert!(Error::http_status(404, "").is_not_found());
        assert!(!Error::http_status(404, "").is_retryable());
        assert!(Error::http_status(429, "").is_retryable());
        assert!(!Error::config("x").is_retryable());
    }
}
