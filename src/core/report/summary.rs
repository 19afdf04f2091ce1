//! Report run summary

use crate::core::classify::{Classification, MatchReason};
use crate::domain::DateWindow;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// Counters describing one report run
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Correlates every log line of the run
    pub run_id: Uuid,

    pub window: DateWindow,

    /// Rows returned by the ERP server
    pub rows_fetched: usize,

    /// Rows left after date, invoice and visit type filtering
    pub rows_kept: usize,

    /// Distinct schedule ids among the kept rows
    pub schedules_considered: usize,

    /// Ids written to the workbook
    pub ids_selected: usize,

    pub pm_sequence_matches: usize,
    pub pm2_only_matches: usize,
    pub non_pm_matches: usize,

    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

impl ReportSummary {
    pub fn new(run_id: Uuid, window: DateWindow) -> Self {
        Self {
            run_id,
            window,
            rows_fetched: 0,
            rows_kept: 0,
            schedules_considered: 0,
            ids_selected: 0,
            pm_sequence_matches: 0,
            pm2_only_matches: 0,
            non_pm_matches: 0,
            duration: Duration::ZERO,
        }
    }

    /// Copies the selection counters from a classification
    pub fn record_classification(&mut self, classification: &Classification) {
        self.schedules_considered = classification.schedules;
        self.ids_selected = classification.selected.len();
        self.pm_sequence_matches = classification.count(MatchReason::PmSequence);
        self.pm2_only_matches = classification.count(MatchReason::Pm2Only);
        self.non_pm_matches = classification.count(MatchReason::NonPmCompleted);
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Share of kept rows out of fetched rows, as a percentage
    pub fn kept_rate(&self) -> f64 {
        if self.rows_fetched == 0 {
            return 0.0;
        }
        (self.rows_kept as f64 / self.rows_fetched as f64) * 100.0
    }

    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            window = %self.window,
            rows_fetched = self.rows_fetched,
            rows_kept = self.rows_kept,
            kept_rate = %format!("{:.2}%", self.kept_rate()),
            schedules = self.schedules_considered,
            selected = self.ids_selected,
            pm_sequence = self.pm_sequence_matches,
            pm2_only = self.pm2_only_matches,
            non_pm = self.non_pm_matches,
            duration_ms = self.duration.as_millis() as u64,
            "Report summary"
        );
    }
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}
