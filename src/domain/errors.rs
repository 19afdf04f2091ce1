//! Domain error types
//!
//! This module defines the error hierarchy for the report pipeline.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main report error type
///
/// This is the primary error type used throughout the application.
/// Each variant maps to one class of failure a caller can act on: fix the
/// input, retry later, or report a bug.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request input (dates, window)
    #[error("{0}")]
    Validation(String),

    /// The ERP server could not be read
    #[error("Failed to fetch data from the ERP server: {0}")]
    Fetch(#[from] FetchError),

    /// The ERP server answered but returned no rows at all
    #[error("No data fetched.")]
    NoData,

    /// Workbook rendering failed
    #[error("Export error: {0}")]
    Export(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// How a failure should be presented to the person who asked for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational, nothing went wrong (e.g. no data)
    Info,
    /// The request could not be served
    Error,
}

impl Severity {
    /// Lowercase label used in flash messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Error => "error",
        }
    }
}

impl ReportError {
    /// Process exit code for the CLI
    ///
    /// 2 = bad input or configuration, 3 = no data, 4 = upstream unavailable,
    /// 5 = anything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::Configuration(_) | ReportError::Validation(_) => 2,
            ReportError::NoData => 3,
            ReportError::Fetch(_) => 4,
            ReportError::Export(_)
            | ReportError::Io(_)
            | ReportError::Serialization(_)
            | ReportError::Other(_) => 5,
        }
    }

    /// Severity of the message shown to the user
    pub fn severity(&self) -> Severity {
        match self {
            ReportError::NoData => Severity::Info,
            _ => Severity::Error,
        }
    }

    /// Message suitable for showing back on the input form
    pub fn user_message(&self) -> String {
        match self {
            ReportError::Validation(msg) => msg.clone(),
            ReportError::NoData => self.to_string(),
            ReportError::Fetch(_) => {
                "Failed to fetch data from the ERP server. Please try again later.".to_string()
            }
            other => format!("An error occurred: {other}"),
        }
    }

    /// Whether repeating the same request later might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ReportError::Fetch(e) if e.is_retryable())
    }
}

/// ERP fetch errors
///
/// Errors that occur when reading the remote resource.
/// These errors don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to connect to the ERP server
    #[error("Failed to connect to ERP server: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Rate limit exceeded (429)
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Response body could not be decoded
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// The server kept returning full pages past the configured guard
    #[error("Page limit exceeded: stopped after {pages} pages")]
    PageLimitExceeded { pages: usize },
}

impl FetchError {
    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FetchError::ConnectionFailed(_)
                | FetchError::Timeout(_)
                | FetchError::ServerError { .. }
                | FetchError::RateLimitExceeded(_)
        )
    }

    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            429 => FetchError::RateLimitExceeded(message),
            500..=599 => FetchError::ServerError { status, message },
            _ => FetchError::ClientError { status, message },
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from workbook errors
impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ReportError::Export(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_report_error_display() {
        let err = ReportError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_fetch_error_conversion() {
        let fetch_err = FetchError::ConnectionFailed("Network error".to_string());
        let report_err: ReportError = fetch_err.into();
        assert!(matches!(report_err, ReportError::Fetch(_)));
    }

    #[test_case(429, true ; "rate limited")]
    #[test_case(500, true ; "internal error")]
    #[test_case(503, true ; "unavailable")]
    #[test_case(401, false ; "unauthorized")]
    #[test_case(404, false ; "not found")]
    fn test_status_classification(status: u16, retryable: bool) {
        assert_eq!(FetchError::from_status(status, "x").is_retryable(), retryable);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ReportError::Validation("x".into()).exit_code(), 2);
        assert_eq!(ReportError::NoData.exit_code(), 3);
        assert_eq!(
            ReportError::Fetch(FetchError::Timeout("x".into())).exit_code(),
            4
        );
        assert_eq!(ReportError::Export("x".into()).exit_code(), 5);
    }

    #[test]
    fn test_no_data_is_informational() {
        assert_eq!(ReportError::NoData.severity(), Severity::Info);
        assert_eq!(ReportError::NoData.user_message(), "No data fetched.");
        assert!(!ReportError::NoData.is_retryable());
    }

    #[test]
    fn test_upstream_failure_is_retryable() {
        let err = ReportError::Fetch(FetchError::from_status(502, "bad gateway"));
        assert_eq!(err.severity(), Severity::Error);
        assert!(err.is_retryable());
        assert!(err.user_message().contains("ERP server"));
    }

    #[test]
    fn test_unexpected_error_message() {
        let err = ReportError::Export("zip failure".into());
        assert_eq!(err.user_message(), "An error occurred: Export error: zip failure");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let report_err: ReportError = io_err.into();
        assert!(matches!(report_err, ReportError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let report_err: ReportError = toml_err.into();
        assert!(matches!(report_err, ReportError::Configuration(_)));
        assert!(report_err.to_string().contains("TOML parse error"));
    }
}
