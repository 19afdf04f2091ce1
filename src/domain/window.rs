//! Reporting date window
//!
//! The window is validated when it is built, so every stage downstream of
//! request parsing can assume `start <= end`.

use super::errors::ReportError;
use super::result::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Input format of window boundaries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar-date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Builds a window, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ReportError::Validation(
                "End Date must be after Start Date.".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Parses both boundaries as `YYYY-MM-DD` and builds the window
    ///
    /// # Examples
    ///
    /// ```
    /// use maintenance_report::domain::DateWindow;
    ///
    /// let window = DateWindow::parse("2024-01-01", "2024-01-31").unwrap();
    /// assert_eq!(window.to_string(), "2024-01-01..=2024-01-31");
    /// assert!(DateWindow::parse("2024-02-01", "2024-01-31").is_err());
    /// ```
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_boundary("Start Date", start)?;
        let end = parse_boundary("End Date", end)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the window; `None` never does
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        matches!(date, Some(d) if self.start <= d && d <= self.end)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

fn parse_boundary(label: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| {
        ReportError::Validation(format!(
            "{label} '{raw}' is not a valid date (expected YYYY-MM-DD): {e}"
        ))
    })
}
