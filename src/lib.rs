// Maintenance Report - ERP maintenance visit billing export
// Copyright (c) 2025 Maintenance Report Contributors
// Licensed under the MIT License

//! # Maintenance Report
//!
//! Builds the billing report of completed maintenance visits: every
//! maintenance schedule row is read from an ERP REST resource, narrowed to
//! uninvoiced billable visits inside a date window, and the schedules whose
//! visits are complete are exported as an xlsx workbook.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`server`] - HTTP form and download endpoint
//! - [`core`] - Filtering, classification, export and orchestration
//! - [`adapters`] - ERP integration
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use maintenance_report::config::load_config;
//! use maintenance_report::core::report::ReportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("report.toml")?;
//!     let coordinator = ReportCoordinator::from_config(&config)?;
//!
//!     let outcome = coordinator.run("2024-01-01", "2024-01-31").await?;
//!     std::fs::write(&outcome.file_name, &outcome.bytes)?;
//!
//!     println!("Selected {} schedules", outcome.selected.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Completion patterns
//!
//! A schedule is selected when its filtered visits match at least one of:
//!
//! - **PM sequence**: `PM Visit 1` completed and any `PM Visit 2` resolved
//! - **PM Visit 2 only**: every visit is a completed `PM Visit 2`
//! - **Non-PM completed**: every other visit type is completed
//!
//! See [`core::classify`] for the exact rules.
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], whose
//! [`domain::ReportError`] knows its CLI exit code and the message shown on
//! the form:
//!
//! ```rust
//! use maintenance_report::domain::ReportError;
//!
//! let err = ReportError::NoData;
//! assert_eq!(err.exit_code(), 3);
//! assert_eq!(err.user_message(), "No data fetched.");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod server;
