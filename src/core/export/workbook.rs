//! xlsx rendering of the selection
//!
//! The first sheet holds one bold header cell and one schedule id per row.
//! An optional second sheet lists the filtered visits behind the selection.

use crate::config::ExportConfig;
use crate::core::filter::{column_labels, FilteredVisit};
use crate::domain::{Result, ScheduleId};
use rust_xlsxwriter::{Format, Workbook};

/// MIME type of the rendered workbook
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Name of the row-detail sheet
pub const VISITS_SHEET_NAME: &str = "Visits";

/// Renders selections to xlsx bytes
#[derive(Debug, Clone)]
pub struct WorkbookExporter {
    config: ExportConfig,
}

impl WorkbookExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn file_name(&self) -> &str {
        &self.config.file_name
    }

    /// Renders `ids` in order, plus the visit sheet when `visits` is given
    ///
    /// An empty `ids` slice still produces a valid workbook with the header.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ReportError::Export`] if the workbook cannot be
    /// encoded.
    pub fn render(&self, ids: &[ScheduleId], visits: Option<&[FilteredVisit]>) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        {
            let sheet = workbook.add_worksheet();
            sheet.set_name(&self.config.sheet_name)?;
            sheet.write_string_with_format(0, 0, &self.config.column_header, &header)?;

            for (row, id) in (1u32..).zip(ids) {
                sheet.write_string(row, 0, id.as_str())?;
            }
        }

        if let Some(visits) = visits {
            let sheet = workbook.add_worksheet();
            sheet.set_name(VISITS_SHEET_NAME)?;

            for (col, (_, label)) in (0u16..).zip(column_labels()) {
                sheet.write_string_with_format(0, col, *label, &header)?;
            }
            for (row, visit) in (1u32..).zip(visits) {
                for (col, cell) in (0u16..).zip(visit.cells()) {
                    if !cell.is_empty() {
                        sheet.write_string(row, col, cell)?;
                    }
                }
            }
        }

        let bytes = workbook.save_to_buffer()?;
        tracing::debug!(
            ids = ids.len(),
            visits = visits.map(|v| v.len()).unwrap_or_default(),
            bytes = bytes.len(),
            "Rendered workbook"
        );
        Ok(bytes)
    }
}
