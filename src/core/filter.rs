//! Date window, invoice and visit type filtering
//!
//! Reduces the fetched table to the visits a billing report cares about and
//! numbers the survivors.

use crate::config::FilterConfig;
use crate::domain::{DateWindow, ScheduleRecord, VisitType};
use serde::Serialize;

/// A visit that survived filtering, with its 1-based sequence number
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredVisit {
    /// Position in the filtered table, starting at 1
    pub sr: usize,
    pub record: ScheduleRecord,
}

/// Keeps rows scheduled inside `window`, not yet invoiced, with an allowed
/// visit type
///
/// Input order is preserved. Rows with an absent or unparseable
/// `scheduled_date` never fall inside the window.
///
/// # Examples
///
/// ```
/// use maintenance_report::config::FilterConfig;
/// use maintenance_report::core::filter::filter_records;
/// use maintenance_report::domain::{DateWindow, ScheduleRecord};
/// use chrono::NaiveDate;
///
/// let row = ScheduleRecord::builder()
///     .id("MS-001")
///     .visit_type("PM Visit 1")
///     .scheduled_date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
///     .build()
///     .unwrap();
/// let window = DateWindow::parse("2024-01-01", "2024-01-31").unwrap();
///
/// let kept = filter_records(vec![row], &window, &FilterConfig::default());
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].sr, 1);
/// ```
pub fn filter_records(
    records: Vec<ScheduleRecord>,
    window: &DateWindow,
    config: &FilterConfig,
) -> Vec<FilteredVisit> {
    let allowed = config.allowed();
    let total = records.len();

    let kept: Vec<FilteredVisit> = records
        .into_iter()
        .filter(|r| window.contains(r.scheduled_date))
        .filter(|r| !r.is_invoiced())
        .filter(|r| is_allowed(r, &allowed))
        .enumerate()
        .map(|(i, record)| FilteredVisit { sr: i + 1, record })
        .collect();

    tracing::debug!(
        window = %window,
        fetched = total,
        kept = kept.len(),
        "Filtered schedule rows"
    );

    kept
}

fn is_allowed(record: &ScheduleRecord, allowed: &[VisitType]) -> bool {
    record
        .visit_type
        .as_ref()
        .is_some_and(|t| allowed.contains(t))
}

/// Report-facing column labels for the row-detail sheet, in output order
///
/// The first entry of each pair is the ERP field name (or `Sr`).
pub fn column_labels() -> &'static [(&'static str, &'static str)] {
    &[
        ("Sr", "Sr"),
        ("name", "ID"),
        ("docstatus", "Docstatus"),
        ("naming_series", "Series"),
        (
            "service_completion_status",
            "Service Completion Status (Maintenance Schedule Detail)",
        ),
        (
            "sales_invoice",
            "Sales invoice (Maintenance Schedule Detail)",
        ),
        ("visit_type", "Visit Type (Maintenance Schedule Detail)"),
        (
            "completion_status",
            "Completion Status (Maintenance Schedule Detail)",
        ),
        ("serial_no", "Serial No (Maintenance Schedule Detail)"),
        ("scheduled_date", "Visit End Date (Maintenance Schedule Detail)"),
        (
            "customer_schedule_date",
            "Customer Schedule Date (Maintenance Schedule Detail)",
        ),
        ("customer", "Customer"),
        (
            "service_report_visit_date",
            "Service Report Visit Date (Maintenance Schedule Detail)",
        ),
        ("item_name", "Item Name (Maintenance Schedule Item)"),
    ]
}

impl FilteredVisit {
    /// Cell values in [`column_labels`] order; absent values are empty
    pub fn cells(&self) -> Vec<String> {
        let r = &self.record;
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();

        vec![
            self.sr.to_string(),
            r.id.to_string(),
            r.docstatus.to_string(),
            r.series.clone(),
            text(&r.service_completion_status),
            text(&r.sales_invoice),
            r.visit_type.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            text(&r.completion_status),
            text(&r.serial_no),
            date(r.scheduled_date),
            date(r.customer_schedule_date),
            r.customer.clone(),
            date(r.service_report_visit_date),
            text(&r.item_name),
        ]
    }
}
