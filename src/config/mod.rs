//! Configuration management for the maintenance report.
//!
//! Configuration lives in a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MSR_*` environment overrides applied after parsing
//! - Default values for every optional section
//! - Validation before anything talks to the ERP server
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use maintenance_report::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("report.toml")?;
//!
//! println!("ERP resource: {}", config.erp.resource_url());
//! println!("Status field: {}", config.filter.status_field);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ErpConfig`] - ERP connection, credentials, paging and retry ([`RetryConfig`])
//! - [`FilterConfig`] - Billable visit types and the completion status field
//! - [`ExportConfig`] - Workbook file, sheet and header naming
//! - [`ServerConfig`] - HTTP listener
//! - [`LoggingConfig`] - Local rolling log files
//!
//! # Example Configuration
//!
//! ```toml
//! [erp]
//! base_url = "https://erp.example.com"
//! api_token = "${MSR_ERP_API_TOKEN}"
//!
//! [filter]
//! status_field = "completion_status"
//!
//! [server]
//! port = 5001
//! ```
//!
//! The API token is never stored in the file itself: reference it through a
//! placeholder or set `MSR_ERP_API_TOKEN` directly.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_str};
pub use schema::{
    ApplicationConfig, Environment, ErpConfig, ExportConfig, FilterConfig, LoggingConfig,
    ReportConfig, RetryConfig, ServerConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
