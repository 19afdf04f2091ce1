//! Core business logic.
//!
//! # Modules
//!
//! - [`filter`] - Date window, invoice and visit type filtering
//! - [`classify`] - Completion patterns and selection of schedule ids
//! - [`export`] - xlsx rendering
//! - [`report`] - Orchestration of one report run
//!
//! # Report Workflow
//!
//! 1. **Validate**: parse and check the date window
//! 2. **Fetch**: read every schedule row from the ERP server
//! 3. **Filter**: keep uninvoiced, allowed visits inside the window
//! 4. **Classify**: select schedule ids whose visits are complete
//! 5. **Export**: render the selection as a workbook

pub mod classify;
pub mod export;
pub mod filter;
pub mod report;
