//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// Maintenance visit billing report
#[derive(Parser, Debug)]
#[command(name = "maintenance-report")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "report.toml", env = "MSR_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MSR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the report for a date window and write the workbook
    Export(commands::export::ExportArgs),

    /// Serve the report form over HTTP
    Serve(commands::serve::ServeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
