//! ERP resource API models
//!
//! Wire shapes of `GET /api/resource/{resource}` and their conversion into
//! domain records.

use crate::domain::{FetchError, ScheduleId, ScheduleRecord, VisitType};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One page of the resource listing
///
/// A body without a `data` key is treated as an empty page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcePage {
    #[serde(default)]
    pub data: Vec<RawScheduleRow>,
}

/// A row exactly as the ERP server sends it
///
/// Every field except `name` may be missing or null. Dates arrive as strings
/// and are parsed in [`RawScheduleRow::into_record`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawScheduleRow {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub docstatus: Option<i64>,

    #[serde(default)]
    pub naming_series: Option<String>,

    #[serde(default)]
    pub customer: Option<String>,

    #[serde(default)]
    pub visit_type: Option<String>,

    #[serde(default)]
    pub completion_status: Option<String>,

    #[serde(default)]
    pub service_completion_status: Option<String>,

    #[serde(default)]
    pub sales_invoice: Option<String>,

    #[serde(default)]
    pub serial_no: Option<String>,

    #[serde(default)]
    pub scheduled_date: Option<String>,

    #[serde(default)]
    pub customer_schedule_date: Option<String>,

    #[serde(default)]
    pub service_report_visit_date: Option<String>,

    #[serde(default)]
    pub item_name: Option<String>,
}

impl RawScheduleRow {
    /// Converts the wire row into a domain record
    ///
    /// Blank strings become absent values. Dates that cannot be parsed are
    /// dropped to `None`, which keeps the row out of any date window.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidResponse`] if the row has no usable `name`
    /// or its `docstatus` does not fit the domain type.
    pub fn into_record(self) -> Result<ScheduleRecord, FetchError> {
        let name = non_blank(self.name).ok_or_else(|| {
            FetchError::InvalidResponse("row without a schedule name".to_string())
        })?;
        let id = ScheduleId::new(name).map_err(FetchError::InvalidResponse)?;
        let docstatus = i32::try_from(self.docstatus.unwrap_or_default()).map_err(|_| {
            FetchError::InvalidResponse(format!(
                "docstatus {} of {id} is out of range",
                self.docstatus.unwrap_or_default()
            ))
        })?;

        Ok(ScheduleRecord {
            id,
            docstatus,
            series: non_blank(self.naming_series).unwrap_or_default(),
            customer: non_blank(self.customer).unwrap_or_default(),
            visit_type: non_blank(self.visit_type).map(|v| VisitType::from(v.as_str())),
            completion_status: non_blank(self.completion_status),
            service_completion_status: non_blank(self.service_completion_status),
            sales_invoice: non_blank(self.sales_invoice),
            serial_no: non_blank(self.serial_no),
            scheduled_date: parse_erp_date(self.scheduled_date.as_deref()),
            customer_schedule_date: parse_erp_date(self.customer_schedule_date.as_deref()),
            service_report_visit_date: parse_erp_date(
                self.service_report_visit_date.as_deref(),
            ),
            item_name: non_blank(self.item_name),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Lenient date parsing for ERP date and datetime strings
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS[.ffffff]` and RFC 3339. The
/// time of day is discarded.
pub fn parse_erp_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    tracing::debug!(value = %raw, "Unparseable date treated as absent");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_case("2024-01-10", Some(date(2024, 1, 10)) ; "plain date")]
    #[test_case("2024-01-31 17:45:00", Some(date(2024, 1, 31)) ; "datetime")]
    #[test_case("2024-01-31 17:45:00.123456", Some(date(2024, 1, 31)) ; "fractional seconds")]
    #[test_case("2024-01-31T17:45:00+05:30", Some(date(2024, 1, 31)) ; "rfc3339")]
    #[test_case("not-a-date", None ; "garbage")]
    #[test_case("   ", None ; "blank")]
    fn test_parse_erp_date(raw: &str, expected: Option<NaiveDate>) {
        assert_eq!(parse_erp_date(Some(raw)), expected);
    }

    #[test]
    fn test_page_without_data_key_is_empty() {
        let page: ResourcePage = serde_json::from_str(r#"{"message": "ok"}"#).unwrap();
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_row_with_nulls_converts() {
        let json = r#"{
            "name": "MS-001",
            "docstatus": null,
            "visit_type": "PM Visit 1",
            "completion_status": "Completed",
            "sales_invoice": "",
            "scheduled_date": "2024-01-10"
        }"#;
        let row: RawScheduleRow = serde_json::from_str(json).unwrap();
        let record = row.into_record().unwrap();

        assert_eq!(record.id.as_str(), "MS-001");
        assert_eq!(record.docstatus, 0);
        assert_eq!(record.visit_type, Some(VisitType::PmVisit1));
        assert_eq!(record.sales_invoice, None);
        assert_eq!(record.scheduled_date, Some(date(2024, 1, 10)));
        assert_eq!(record.service_completion_status, None);
    }

    #[test]
    fn test_blank_visit_type_is_absent() {
        let row = RawScheduleRow {
            name: Some("MS-002".to_string()),
            visit_type: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(row.into_record().unwrap().visit_type, None);
    }

    #[test]
    fn test_row_without_name_is_invalid() {
        let row = RawScheduleRow {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            row.into_record(),
            Err(FetchError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_out_of_range_docstatus_is_invalid() {
        let row = RawScheduleRow {
            name: Some("MS-003".to_string()),
            docstatus: Some(i64::from(i32::MAX) + 1),
            ..Default::default()
        };
        assert!(matches!(
            row.into_record(),
            Err(FetchError::InvalidResponse(msg)) if msg.contains("MS-003")
        ));
    }
}
