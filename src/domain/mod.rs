//! Domain models and types for the maintenance report.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ScheduleId`])
//! - **Domain models** ([`ScheduleRecord`], [`VisitType`], [`DateWindow`])
//! - **Error types** ([`ReportError`], [`FetchError`])
//! - **Result type alias** ([`Result`])
//!
//! # Building records
//!
//! ```rust
//! use maintenance_report::domain::{ScheduleRecord, VisitType};
//! use chrono::NaiveDate;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let record = ScheduleRecord::builder()
//!     .id("MS-001")
//!     .visit_type("PM Visit 1")
//!     .completion_status("Completed")
//!     .scheduled_date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
//!     .build()?;
//!
//! assert!(record.is_type(&VisitType::PmVisit1));
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;
pub mod visit;
pub mod window;

// Re-export commonly used types for convenience
pub use errors::{FetchError, ReportError, Severity};
pub use ids::ScheduleId;
pub use record::{CompletionRule, ScheduleRecord, ScheduleRecordBuilder, StatusField};
pub use result::Result;
pub use visit::{VisitType, COMPLETED};
pub use window::DateWindow;
