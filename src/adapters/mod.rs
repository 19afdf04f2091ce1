//! External system integrations.
//!
//! - [`erp`] - ERP REST resource listing (maintenance schedules)
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the report
//! pipeline can be tested with in-memory implementations.
//!
//! ```rust,no_run
//! use maintenance_report::adapters::erp::{ErpClient, ScheduleSource};
//! use maintenance_report::config::load_config;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("report.toml")?;
//! let source: Arc<dyn ScheduleSource> = Arc::new(ErpClient::new(config.erp)?);
//! # Ok(())
//! # }
//! ```

pub mod erp;
