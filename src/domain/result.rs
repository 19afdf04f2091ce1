//! Result type alias for the report pipeline
//!
//! This module provides a convenient Result type alias that uses ReportError
//! as the error type.

use super::errors::ReportError;

/// Result type alias for report operations
///
/// # Examples
///
/// ```
/// use maintenance_report::domain::result::Result;
/// use maintenance_report::domain::errors::ReportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ReportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ReportError>;
