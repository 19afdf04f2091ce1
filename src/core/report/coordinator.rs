//! Report coordinator - runs fetch, filter, classify and export for one request

use super::summary::ReportSummary;
use crate::adapters::erp::{ErpClient, ScheduleSource};
use crate::config::{ExportConfig, FilterConfig, ReportConfig};
use crate::core::classify::classify;
use crate::core::export::WorkbookExporter;
use crate::core::filter::filter_records;
use crate::domain::{DateWindow, ReportError, Result, ScheduleId, StatusField};
use crate::{log_error_with_context, log_report_complete};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    /// Encoded xlsx workbook
    pub bytes: Vec<u8>,

    /// Suggested download / output file name
    pub file_name: String,

    /// Selected ids in workbook order
    pub selected: Vec<ScheduleId>,

    pub summary: ReportSummary,
}

/// Report coordinator
///
/// Holds read-only configuration and the schedule source; runs share
/// nothing else, so one coordinator can serve concurrent requests.
pub struct ReportCoordinator {
    source: Arc<dyn ScheduleSource>,
    filter: FilterConfig,
    exporter: WorkbookExporter,
    include_visit_sheet: bool,
}

impl ReportCoordinator {
    /// Create a coordinator over any schedule source
    pub fn new(source: Arc<dyn ScheduleSource>, filter: FilterConfig, export: ExportConfig) -> Self {
        let include_visit_sheet = export.include_visit_sheet;
        Self {
            source,
            filter,
            exporter: WorkbookExporter::new(export),
            include_visit_sheet,
        }
    }

    /// Create a coordinator reading from the configured ERP server
    pub fn from_config(config: &ReportConfig) -> Result<Self> {
        let client = ErpClient::new(config.erp.clone())?;
        Ok(Self::new(
            Arc::new(client),
            config.filter.clone(),
            config.export.clone(),
        ))
    }

    /// Override the status field the classifier reads
    pub fn with_status_field(mut self, field: StatusField) -> Self {
        self.filter.status_field = field;
        self
    }

    /// Add or drop the row-detail sheet
    pub fn with_visit_sheet(mut self, include: bool) -> Self {
        self.include_visit_sheet = include;
        self
    }

    pub fn file_name(&self) -> &str {
        self.exporter.file_name()
    }

    /// Validates the raw boundaries, then runs the report
    ///
    /// Invalid dates are rejected before any request reaches the ERP server.
    pub async fn run(&self, start_date: &str, end_date: &str) -> Result<ReportOutcome> {
        let window = DateWindow::parse(start_date, end_date).inspect_err(|e| {
            tracing::info!(start_date, end_date, error = %e, "Rejected report window");
        })?;
        self.run_window(window).await
    }

    /// Runs the report for an already validated window
    pub async fn run_window(&self, window: DateWindow) -> Result<ReportOutcome> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("report", run_id = %run_id, window = %window);

        let result = self.execute(run_id, window).instrument(span.clone()).await;
        if let Err(e) = &result {
            span.in_scope(|| match e {
                ReportError::NoData => tracing::info!("No data fetched"),
                other => {
                    log_error_with_context!(other, "Report run failed");
                }
            });
        }
        result
    }

    async fn execute(&self, run_id: Uuid, window: DateWindow) -> Result<ReportOutcome> {
        let started = Instant::now();
        let mut summary = ReportSummary::new(run_id, window);

        tracing::info!(source = %self.source.describe(), "Starting report");

        let records = self.source.fetch_all().await?;
        if records.is_empty() {
            return Err(ReportError::NoData);
        }
        summary.rows_fetched = records.len();

        let visits = filter_records(records, &window, &self.filter);
        summary.rows_kept = visits.len();

        let classification = classify(
            visits.iter().map(|v| &v.record),
            self.filter.completion_rule(),
        );
        summary.record_classification(&classification);

        let detail = self.include_visit_sheet.then_some(visits.as_slice());
        let bytes = self.exporter.render(&classification.selected, detail)?;

        let summary = summary.with_duration(started.elapsed());
        log_report_complete!(summary.rows_fetched, summary.ids_selected, summary.duration);
        summary.log_summary();

        Ok(ReportOutcome {
            bytes,
            file_name: self.exporter.file_name().to_string(),
            selected: classification.selected,
            summary,
        })
    }
}
