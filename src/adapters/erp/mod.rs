//! ERP adapter implementation
//!
//! Integration with the ERP resource API: wire models, the paginating HTTP
//! client and the [`ScheduleSource`] seam the report pipeline depends on.

pub mod client;
pub mod models;
pub mod source;

pub use client::ErpClient;
pub use models::{RawScheduleRow, ResourcePage};
pub use source::ScheduleSource;
