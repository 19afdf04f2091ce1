//! Report orchestration
//!
//! [`ReportCoordinator`] drives one run: validate the window, fetch every
//! schedule row, filter, classify and render the workbook.
//!
//! # Example
//!
//! ```rust,no_run
//! use maintenance_report::config::load_config;
//! use maintenance_report::core::report::ReportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("report.toml")?;
//! let coordinator = ReportCoordinator::from_config(&config)?;
//!
//! let outcome = coordinator.run("2024-01-01", "2024-01-31").await?;
//! std::fs::write(&outcome.file_name, &outcome.bytes)?;
//! println!("Selected {} schedules", outcome.summary.ids_selected);
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod summary;

pub use coordinator::{ReportCoordinator, ReportOutcome};
pub use summary::ReportSummary;
