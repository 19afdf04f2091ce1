//! Validate config command implementation

use crate::config::load_config;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so a loaded configuration is a valid one.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  ERP Resource: {}", config.erp.resource_url());
        println!("  Auth Scheme: {}", config.erp.auth_scheme);
        println!("  API Token: {}", config.erp.api_token.expose_secret().masked());
        println!("  Page Size: {}", config.erp.page_size);
        println!("  Max Pages: {}", config.erp.max_pages);
        println!("  Retries: {}", config.erp.retry.max_retries);
        println!(
            "  Allowed Visit Types: {}",
            config.filter.allowed_visit_types.join(", ")
        );
        println!("  Status Field: {}", config.filter.status_field);
        println!("  Completed Status: {}", config.filter.completed_status);
        println!("  Output File: {}", config.export.file_name);
        println!(
            "  Server: {}:{}",
            config.server.host, config.server.port
        );
        println!();
        Ok(0)
    }
}
