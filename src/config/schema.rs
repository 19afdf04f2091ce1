//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML file.

use crate::config::SecretString;
use crate::domain::{CompletionRule, StatusField, VisitType, COMPLETED};
use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main report configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Only `[erp]` is required; every other section has defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// ERP server configuration
    pub erp: ErpConfig,

    /// Row filtering and classification settings
    #[serde(default)]
    pub filter: FilterConfig,

    /// Workbook settings
    #[serde(default)]
    pub export: ExportConfig,

    /// HTTP form server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.erp.validate(&self.environment)?;
        self.filter.validate()?;
        self.export.validate()?;
        self.server.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Retry configuration for ERP requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Additional attempts after the first failed one (0 disables retries)
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetryConfig {
    /// Backoff before retry number `attempt` (1-based), capped at `max_delay_ms`
    pub fn delay_for_attempt(&self, attempt: usize) -> u64 {
        let exponent = attempt.saturating_sub(1) as i32;
        let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(exponent);
        (delay as u64).min(self.max_delay_ms)
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_retries > 10 {
            return Err(format!(
                "erp.retry.max_retries must be <= 10, got {}",
                self.max_retries
            ));
        }
        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "erp.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err("erp.retry.initial_delay_ms cannot exceed max_delay_ms".to_string());
        }
        Ok(())
    }
}

/// ERP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErpConfig {
    /// Base URL of the ERP server, e.g. `https://erp.example.com`
    pub base_url: String,

    /// Resource (DocType) to list
    #[serde(default = "default_resource")]
    pub resource: String,

    /// Authorization scheme: `token` (`token key:secret`) or `bearer`
    #[serde(default = "default_auth_scheme")]
    pub auth_scheme: String,

    /// API token sent with every request
    /// Stored securely in memory and automatically zeroized on drop
    pub api_token: SecretString,

    /// Rows requested per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Hard stop for pagination against a misbehaving server
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: disabling verification exposes the token to
    /// man-in-the-middle attacks. Rejected in production environments.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Field list sent as the `fields` query parameter
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ErpConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("erp.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("erp.base_url must start with http:// or https://".to_string());
        }

        if self.resource.trim().is_empty() {
            return Err("erp.resource cannot be empty".to_string());
        }

        let valid_schemes = ["token", "bearer"];
        if !valid_schemes.contains(&self.auth_scheme.as_str()) {
            return Err(format!(
                "Invalid erp.auth_scheme '{}'. Must be one of: {}",
                self.auth_scheme,
                valid_schemes.join(", ")
            ));
        }

        if self.api_token.expose_secret().is_empty() {
            return Err("erp.api_token cannot be empty".to_string());
        }

        if !(1..=10_000).contains(&self.page_size) {
            return Err(format!(
                "erp.page_size must be between 1 and 10000, got {}",
                self.page_size
            ));
        }

        if self.max_pages == 0 {
            return Err("erp.max_pages must be > 0".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("erp.timeout_seconds must be > 0".to_string());
        }

        if self.fields.is_empty() {
            return Err("erp.fields cannot be empty".to_string());
        }

        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                Set 'tls_verify = true' or use environment = \"development\" for local testing."
                    .to_string(),
            );
        }

        self.retry.validate()?;
        Ok(())
    }

    /// Full URL of the resource listing endpoint
    pub fn resource_url(&self) -> String {
        format!(
            "{}/api/resource/{}",
            self.base_url.trim_end_matches('/'),
            self.resource
        )
    }

    /// `fields` query parameter value (a JSON array literal)
    pub fn fields_param(&self) -> String {
        serde_json::to_string(&self.fields).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Row filtering and classification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Visit types kept by the filter
    #[serde(default = "default_allowed_visit_types")]
    pub allowed_visit_types: Vec<String>,

    /// Status column that decides completion
    #[serde(default)]
    pub status_field: StatusField,

    /// Value of the status column that marks a visit as completed
    #[serde(default = "default_completed_status")]
    pub completed_status: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            allowed_visit_types: default_allowed_visit_types(),
            status_field: StatusField::default(),
            completed_status: default_completed_status(),
        }
    }
}

impl FilterConfig {
    fn validate(&self) -> Result<(), String> {
        if self.allowed_visit_types.is_empty() {
            return Err("filter.allowed_visit_types cannot be empty".to_string());
        }
        if self
            .allowed_visit_types
            .iter()
            .any(|t| t.trim().is_empty())
        {
            return Err("filter.allowed_visit_types cannot contain empty entries".to_string());
        }
        if self.completed_status.trim().is_empty() {
            return Err("filter.completed_status cannot be empty".to_string());
        }
        Ok(())
    }

    /// Allow-list as typed visit types; surrounding whitespace is ignored
    pub fn allowed(&self) -> Vec<VisitType> {
        self.allowed_visit_types
            .iter()
            .map(|t| VisitType::from(t.trim()))
            .collect()
    }

    /// Completion rule the classifier applies
    pub fn completion_rule(&self) -> CompletionRule<'_> {
        CompletionRule {
            field: self.status_field,
            completed: &self.completed_status,
        }
    }
}

/// Workbook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Download / output file name
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Name of the selection sheet
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Header of the single selection column
    #[serde(default = "default_column_header")]
    pub column_header: String,

    /// Add a second sheet with the filtered visit rows
    #[serde(default)]
    pub include_visit_sheet: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            sheet_name: default_sheet_name(),
            column_header: default_column_header(),
            include_visit_sheet: false,
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.file_name.ends_with(".xlsx") {
            return Err(format!(
                "export.file_name must end with .xlsx, got '{}'",
                self.file_name
            ));
        }
        if self.file_name.contains(['/', '\\', '"']) {
            return Err("export.file_name must be a bare file name".to_string());
        }

        // Excel limits sheet names to 31 characters
        if self.sheet_name.is_empty() || self.sheet_name.chars().count() > 31 {
            return Err(format!(
                "export.sheet_name must be 1 to 31 characters, got '{}'",
                self.sheet_name
            ));
        }

        if self.include_visit_sheet && self.sheet_name.eq_ignore_ascii_case("Visits") {
            return Err("export.sheet_name clashes with the Visits detail sheet".to_string());
        }

        if self.column_header.is_empty() {
            return Err("export.column_header cannot be empty".to_string());
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds to wait for in-flight requests on shutdown
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("server.port must be > 0".to_string());
        }
        self.socket_addr().map(|_| ())
    }

    /// Parsed bind address
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid server address {}:{}: {e}", self.host, self.port))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".into());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_resource() -> String {
    "Maintenance Schedule".to_string()
}

fn default_auth_scheme() -> String {
    "token".to_string()
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> usize {
    1000
}

fn default_max_pages() -> usize {
    500
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

/// Fields requested from the ERP, child-table columns prefixed with `schedules.`
pub fn default_fields() -> Vec<String> {
    [
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
    .iter()
    .map(|f| f.to_string())
    .collect()
}

fn default_allowed_visit_types() -> Vec<String> {
    VisitType::billable_labels()
}

fn default_completed_status() -> String {
    COMPLETED.to_string()
}

fn default_file_name() -> String {
    "MasterData.xlsx".to_string()
}

fn default_sheet_name() -> String {
    "Sheet1".to_string()
}

fn default_column_header() -> String {
    "Selected Names".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_shutdown_timeout_secs() -> u64 {
    30
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
