//! Spreadsheet export

pub mod workbook;

pub use workbook::{WorkbookExporter, VISITS_SHEET_NAME, XLSX_CONTENT_TYPE};
