//! Schedule record domain model
//!
//! One [`ScheduleRecord`] is one visit row of a maintenance schedule, as
//! returned by the ERP's child-table query. Records are never mutated after
//! they are fetched; the pipeline only filters and groups them.

use super::ids::ScheduleId;
use super::visit::{VisitType, COMPLETED};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which per-visit status column decides whether a visit is complete
///
/// The ERP exposes both a visit completion status and a service-report
/// completion status; the report can be driven by either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusField {
    /// `schedules.completion_status`
    #[default]
    CompletionStatus,
    /// `schedules.service_completion_status`
    ServiceCompletionStatus,
}

impl StatusField {
    /// Config/CLI spelling of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusField::CompletionStatus => "completion_status",
            StatusField::ServiceCompletionStatus => "service_completion_status",
        }
    }
}

impl fmt::Display for StatusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completion_status" => Ok(StatusField::CompletionStatus),
            "service_completion_status" => Ok(StatusField::ServiceCompletionStatus),
            other => Err(format!(
                "Invalid status field '{other}'. Must be one of: completion_status, service_completion_status"
            )),
        }
    }
}

/// What counts as a completed visit: a status column and the literal it must hold
///
/// # Examples
///
/// ```
/// use maintenance_report::domain::{CompletionRule, StatusField};
///
/// let rule = CompletionRule::from(StatusField::ServiceCompletionStatus);
/// assert_eq!(rule.completed, "Completed");
///
/// let custom = CompletionRule::new(StatusField::CompletionStatus).with_literal("Done");
/// assert_eq!(custom.completed, "Done");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionRule<'a> {
    pub field: StatusField,
    pub completed: &'a str,
}

impl CompletionRule<'static> {
    /// Rule reading `field` against the ERP's `Completed` literal
    pub const fn new(field: StatusField) -> Self {
        Self {
            field,
            completed: COMPLETED,
        }
    }
}

impl<'a> CompletionRule<'a> {
    pub fn with_literal<'b>(self, completed: &'b str) -> CompletionRule<'b> {
        CompletionRule {
            field: self.field,
            completed,
        }
    }
}

impl Default for CompletionRule<'static> {
    fn default() -> Self {
        Self::new(StatusField::default())
    }
}

impl From<StatusField> for CompletionRule<'static> {
    fn from(field: StatusField) -> Self {
        Self::new(field)
    }
}

/// One visit row of a maintenance schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    /// Maintenance schedule this visit belongs to
    pub id: ScheduleId,

    /// ERP document status (0 draft, 1 submitted, 2 cancelled)
    pub docstatus: i32,

    /// Naming series of the schedule
    pub series: String,

    /// Customer name
    pub customer: String,

    pub visit_type: Option<VisitType>,
    pub completion_status: Option<String>,
    pub service_completion_status: Option<String>,

    /// Set once the visit has been billed
    pub sales_invoice: Option<String>,

    pub serial_no: Option<String>,

    /// Parsed visit date; `None` when absent or unparseable
    pub scheduled_date: Option<NaiveDate>,

    pub customer_schedule_date: Option<NaiveDate>,
    pub service_report_visit_date: Option<NaiveDate>,
    pub item_name: Option<String>,
}

impl ScheduleRecord {
    /// Creates a new builder for constructing a ScheduleRecord
    pub fn builder() -> ScheduleRecordBuilder {
        ScheduleRecordBuilder::default()
    }

    /// Value of the selected status column
    pub fn status(&self, field: StatusField) -> Option<&str> {
        match field {
            StatusField::CompletionStatus => self.completion_status.as_deref(),
            StatusField::ServiceCompletionStatus => self.service_completion_status.as_deref(),
        }
    }

    /// Whether the rule's status column holds the rule's completed literal
    pub fn is_completed(&self, rule: CompletionRule<'_>) -> bool {
        self.status(rule.field) == Some(rule.completed)
    }

    /// Whether the visit has the given type
    pub fn is_type(&self, visit_type: &VisitType) -> bool {
        self.visit_type.as_ref() == Some(visit_type)
    }

    /// Whether the visit has already been invoiced
    pub fn is_invoiced(&self) -> bool {
        self.sales_invoice.is_some()
    }
}

/// Builder for constructing ScheduleRecord instances
///
/// Only the schedule id is required; everything else defaults to empty.
#[derive(Debug, Default)]
pub struct ScheduleRecordBuilder {
    id: Option<String>,
    docstatus: i32,
    series: String,
    customer: String,
    visit_type: Option<VisitType>,
    completion_status: Option<String>,
    service_completion_status: Option<String>,
    sales_invoice: Option<String>,
    serial_no: Option<String>,
    scheduled_date: Option<NaiveDate>,
    customer_schedule_date: Option<NaiveDate>,
    service_report_visit_date: Option<NaiveDate>,
    item_name: Option<String>,
}

impl ScheduleRecordBuilder {
    /// Creates a new ScheduleRecordBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schedule id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn docstatus(mut self, docstatus: i32) -> Self {
        self.docstatus = docstatus;
        self
    }

    pub fn series(mut self, series: impl Into<String>) -> Self {
        self.series = series.into();
        self
    }

    pub fn customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = customer.into();
        self
    }

    pub fn visit_type(mut self, visit_type: impl Into<VisitType>) -> Self {
        self.visit_type = Some(visit_type.into());
        self
    }

    /// Sets `completion_status`
    pub fn completion_status(mut self, status: impl Into<String>) -> Self {
        self.completion_status = Some(status.into());
        self
    }

    /// Sets `service_completion_status`
    pub fn service_completion_status(mut self, status: impl Into<String>) -> Self {
        self.service_completion_status = Some(status.into());
        self
    }

    /// Sets the status column selected by `field`
    pub fn status(self, field: StatusField, status: impl Into<String>) -> Self {
        match field {
            StatusField::CompletionStatus => self.completion_status(status),
            StatusField::ServiceCompletionStatus => self.service_completion_status(status),
        }
    }

    pub fn sales_invoice(mut self, invoice: impl Into<String>) -> Self {
        self.sales_invoice = Some(invoice.into());
        self
    }

    pub fn serial_no(mut self, serial_no: impl Into<String>) -> Self {
        self.serial_no = Some(serial_no.into());
        self
    }

    pub fn scheduled_date(mut self, date: NaiveDate) -> Self {
        self.scheduled_date = Some(date);
        self
    }

    pub fn customer_schedule_date(mut self, date: NaiveDate) -> Self {
        self.customer_schedule_date = Some(date);
        self
    }

    pub fn service_report_visit_date(mut self, date: NaiveDate) -> Self {
        self.service_report_visit_date = Some(date);
        self
    }

    pub fn item_name(mut self, item_name: impl Into<String>) -> Self {
        self.item_name = Some(item_name.into());
        self
    }

    /// Builds the ScheduleRecord
    ///
    /// # Errors
    ///
    /// Returns an error if the id is missing or empty
    pub fn build(self) -> Result<ScheduleRecord, String> {
        let id = ScheduleId::new(self.id.ok_or("id is required")?)?;
        Ok(ScheduleRecord {
            id,
            docstatus: self.docstatus,
            series: self.series,
            customer: self.customer,
            visit_type: self.visit_type,
            completion_status: self.completion_status,
            service_completion_status: self.service_completion_status,
            sales_invoice: self.sales_invoice,
            serial_no: self.serial_no,
            scheduled_date: self.scheduled_date,
            customer_schedule_date: self.customer_schedule_date,
            service_report_visit_date: self.service_report_visit_date,
            item_name: self.item_name,
        })
    }
}
