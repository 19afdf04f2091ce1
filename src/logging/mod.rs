//! Logging and observability
//!
//! Structured logging via `tracing`, plus a few macros that keep the field
//! names of recurring events consistent across the crate.
//!
//! # Example
//!
//! ```no_run
//! use maintenance_report::logging::init_logging;
//! use maintenance_report::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Report server started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log one fetched page
///
/// # Example
///
/// ```no_run
/// use maintenance_report::log_fetch_page;
///
/// log_fetch_page!(3, 2000, 1000);
/// ```
#[macro_export]
macro_rules! log_fetch_page {
    ($page:expr, $offset:expr, $rows:expr) => {
        tracing::debug!(
            page = $page,
            offset = $offset,
            rows = $rows,
            "Fetched page"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use maintenance_report::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_retries:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_retries = $max_retries,
            reason = %$reason,
            "Retrying request after error"
        );
    };
}

/// Log the completion of a report run
///
/// # Example
///
/// ```no_run
/// use maintenance_report::log_report_complete;
/// use std::time::Duration;
///
/// log_report_complete!(120, 14, Duration::from_millis(850));
/// ```
#[macro_export]
macro_rules! log_report_complete {
    ($rows:expr, $selected:expr, $duration:expr) => {
        tracing::info!(
            rows = $rows,
            selected = $selected,
            duration_ms = $duration.as_millis() as u64,
            "Report completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use maintenance_report::log_error_with_context;
/// use maintenance_report::domain::ReportError;
///
/// let error = ReportError::NoData;
/// log_error_with_context!(&error, "Report request failed");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
