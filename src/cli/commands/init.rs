//! Init command implementation
//!
//! Generates a starter configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "report.toml")]
    pub output: String,

    /// Include every optional section with its default value
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, content) {
            Ok(()) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set erp.base_url in {}", self.output);
                println!("  2. Put the ERP token (api_key:api_secret) in .env as MSR_ERP_API_TOKEN");
                println!("  3. Validate: maintenance-report validate-config");
                println!("  4. Run: maintenance-report serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# Maintenance visit billing report

[erp]
base_url = "https://erp.example.com"
# Never commit the token; it is read from the environment
api_token = "${MSR_ERP_API_TOKEN}"

[server]
host = "0.0.0.0"
port = 5001
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# Maintenance visit billing report
# Every value below except erp.base_url and erp.api_token is the default.

environment = "development"  # development | staging | production

[application]
log_level = "info"  # trace | debug | info | warn | error

[erp]
base_url = "https://erp.example.com"
resource = "Maintenance Schedule"
auth_scheme = "token"  # token | bearer
# Never commit the token; it is read from the environment
api_token = "${MSR_ERP_API_TOKEN}"
page_size = 1000
max_pages = 500
timeout_seconds = 60
tls_verify = true
fields = [
    "name",
    "docstatus",
    "naming_series",
    "schedules.service_completion_status",
    "schedules.sales_invoice",
    "schedules.visit_type",
    "schedules.completion_status",
    "schedules.serial_no",
    "schedules.scheduled_date",
    "schedules.customer_schedule_date",
    "customer",
    "schedules.service_report_visit_date",
    "schedules.item_name",
]

[erp.retry]
max_retries = 3
initial_delay_ms = 500
max_delay_ms = 10000
backoff_multiplier = 2.0

[filter]
allowed_visit_types = [
    "PM Visit 1",
    "PM Visit 2",
    "PVT Assist Visit",
    "In House Work",
    "Others Work",
    "ASTM Assist Visit",
]
status_field = "completion_status"  # completion_status | service_completion_status
completed_status = "Completed"

[export]
file_name = "MasterData.xlsx"
sheet_name = "Sheet1"
column_header = "Selected Names"
include_visit_sheet = false

[server]
host = "0.0.0.0"
port = 5001
shutdown_timeout_secs = 30

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}
