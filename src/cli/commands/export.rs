//! Export command implementation
//!
//! Runs one report for a date window and writes the workbook to disk.

use crate::config::load_config;
use crate::core::report::ReportCoordinator;
use crate::domain::StatusField;
use clap::Args;
use std::path::PathBuf;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// First scheduled date to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start_date: String,

    /// Last scheduled date to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end_date: String,

    /// Output path (defaults to export.file_name in the working directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Add a Visits sheet with the filtered rows
    #[arg(long)]
    pub include_visits: bool,

    /// Status column deciding completion (completion_status or service_completion_status)
    #[arg(long, value_name = "FIELD")]
    pub status_field: Option<StatusField>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(
            start_date = %self.start_date,
            end_date = %self.end_date,
            "Starting export command"
        );

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        let mut coordinator = match ReportCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to initialize export: {e}");
                return Ok(e.exit_code());
            }
        };
        if let Some(field) = self.status_field {
            tracing::info!(status_field = %field, "Overriding status field from CLI");
            coordinator = coordinator.with_status_field(field);
        }
        if self.include_visits {
            coordinator = coordinator.with_visit_sheet(true);
        }

        println!(
            "🚀 Generating report for {} to {}...",
            self.start_date, self.end_date
        );

        let outcome = tokio::select! {
            result = coordinator.run(&self.start_date, &self.end_date) => result,
            _ = crate::server::wait_for_shutdown(&mut shutdown_signal) => {
                println!("⚠️  Export interrupted, no file written.");
                return Ok(130);
            }
        };

        let outcome = match outcome {
            Ok(o) => o,
            Err(e) => {
                eprintln!("❌ {}", e.user_message());
                return Ok(e.exit_code());
            }
        };

        let path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&outcome.file_name));
        std::fs::write(&path, &outcome.bytes)?;

        let summary = &outcome.summary;
        println!();
        println!("📊 Report Summary:");
        println!("  Run ID: {}", summary.run_id);
        println!("  Window: {}", summary.window);
        println!("  Rows fetched: {}", summary.rows_fetched);
        println!("  Rows kept: {}", summary.rows_kept);
        println!("  Schedules considered: {}", summary.schedules_considered);
        println!("  Schedules selected: {}", summary.ids_selected);
        println!("    PM sequence: {}", summary.pm_sequence_matches);
        println!("    PM Visit 2 only: {}", summary.pm2_only_matches);
        println!("    Non-PM completed: {}", summary.non_pm_matches);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();
        println!("✅ Workbook written to {}", path.display());

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_export_args_parse() {
        let cli = Cli::parse_from([
            "maintenance-report",
            "export",
            "--start-date",
            "2024-01-01",
            "--end-date",
            "2024-01-31",
            "--status-field",
            "service_completion_status",
            "--include-visits",
        ]);

        let Commands::Export(args) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.start_date, "2024-01-01");
        assert_eq!(args.end_date, "2024-01-31");
        assert_eq!(args.status_field, Some(StatusField::ServiceCompletionStatus));
        assert!(args.include_visits);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_export_args_reject_unknown_status_field() {
        let result = Cli::try_parse_from([
            "maintenance-report",
            "export",
            "--start-date",
            "2024-01-01",
            "--end-date",
            "2024-01-31",
            "--status-field",
            "docstatus",
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_config_is_exit_code_2() {
        let args = ExportArgs {
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-31".to_string(),
            output: None,
            include_visits: false,
            status_field: None,
        };
        let (_tx, rx) = watch::channel(false);
        let code = args.execute("does-not-exist.toml", rx).await.unwrap();
        assert_eq!(code, 2);
    }
}
