//! Domain identifier types with validation
//!
//! This module provides the newtype wrapper for maintenance schedule
//! identifiers. Many visit rows share one identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maintenance schedule identifier newtype wrapper
///
/// Represents the ERP document name of a maintenance schedule, e.g.
/// `MS-2024-00017`. It is the grouping key of the classifier and the value
/// written to the exported sheet.
///
/// # Examples
///
/// ```
/// use maintenance_report::domain::ids::ScheduleId;
/// use std::str::FromStr;
///
/// let id = ScheduleId::from_str("MS-001").unwrap();
/// assert_eq!(id.as_str(), "MS-001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScheduleId(String);

impl ScheduleId {
    /// Creates a new ScheduleId from a string
    ///
    /// Returns `Err` if the identifier is empty or whitespace only.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Maintenance schedule ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the schedule ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ScheduleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ScheduleId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScheduleId> for String {
    fn from(id: ScheduleId) -> Self {
        id.0
    }
}

impl AsRef<str> for ScheduleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
