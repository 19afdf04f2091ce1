//! Schedule source trait
//!
//! Abstracts where maintenance schedule rows come from so the report
//! pipeline can run against the ERP server or an in-memory table.

use crate::domain::{FetchError, ScheduleRecord};
use async_trait::async_trait;

/// Provider of the full maintenance schedule table
///
/// # Example
///
/// ```no_run
/// use maintenance_report::adapters::erp::{ErpClient, ScheduleSource};
/// use maintenance_report::config::load_config;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config("report.toml")?;
/// let source = ErpClient::new(config.erp)?;
///
/// let rows = source.fetch_all().await?;
/// println!("{} rows from {}", rows.len(), source.describe());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Fetch every row of the resource, following pagination to the end
    ///
    /// An empty vector means the server answered with no rows at all.
    async fn fetch_all(&self) -> Result<Vec<ScheduleRecord>, FetchError>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}
