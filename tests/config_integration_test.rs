//! Integration tests for configuration loading and validation
//!
//! Tests that touch `MSR_*` variables hold `ENV_MUTEX` so they never
//! observe each other's environment.

use maintenance_report::config::load_config;
use maintenance_report::domain::{ReportError, StatusField};
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

const OVERRIDE_VARS: &[&str] = &[
    "MSR_APPLICATION_LOG_LEVEL",
    "MSR_ERP_BASE_URL",
    "MSR_ERP_API_TOKEN",
    "MSR_ERP_PAGE_SIZE",
    "MSR_ERP_MAX_PAGES",
    "MSR_FILTER_STATUS_FIELD",
    "MSR_FILTER_COMPLETED_STATUS",
    "MSR_FILTER_ALLOWED_VISIT_TYPES",
    "MSR_SERVER_PORT",
    "MSR_EXPORT_INCLUDE_VISIT_SHEET",
    "TEST_ERP_TOKEN",
];

fn cleanup_env_vars() {
    for var in OVERRIDE_VARS {
        std::env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
environment = "staging"

[application]
log_level = "debug"

[erp]
base_url = "https://erp.example.com"
resource = "Maintenance Schedule"
auth_scheme = "bearer"
api_token = "abc123"
page_size = 250
max_pages = 40
timeout_seconds = 15
fields = ["name", "schedules.visit_type"]

[erp.retry]
max_retries = 2
initial_delay_ms = 100
max_delay_ms = 1000
backoff_multiplier = 3.0

[filter]
allowed_visit_types = ["PM Visit 1", "PM Visit 2"]
status_field = "service_completion_status"

[export]
file_name = "Billing.xlsx"
sheet_name = "Selection"
column_header = "Schedules"
include_visit_sheet = true

[server]
host = "127.0.0.1"
port = 8080

[logging]
local_enabled = false
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.erp.auth_scheme, "bearer");
    assert_eq!(config.erp.api_token.expose_secret(), "abc123");
    assert_eq!(config.erp.page_size, 250);
    assert_eq!(config.erp.max_pages, 40);
    assert_eq!(config.erp.fields.len(), 2);
    assert_eq!(config.erp.retry.max_retries, 2);
    assert_eq!(config.filter.allowed_visit_types.len(), 2);
    assert_eq!(
        config.filter.status_field,
        StatusField::ServiceCompletionStatus
    );
    assert_eq!(config.export.file_name, "Billing.xlsx");
    assert!(config.export.include_visit_sheet);
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[erp]
base_url = "https://erp.example.com"
api_token = "key:secret"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "info");
    assert_eq!(
        config.erp.resource_url(),
        "https://erp.example.com/api/resource/Maintenance Schedule"
    );
    assert_eq!(config.erp.auth_scheme, "token");
    assert_eq!(config.erp.page_size, 1000);
    assert_eq!(config.erp.fields.len(), 13);
    assert_eq!(config.filter.allowed_visit_types.len(), 6);
    assert_eq!(config.filter.status_field, StatusField::CompletionStatus);
    assert_eq!(config.filter.completed_status, "Completed");
    assert_eq!(config.export.sheet_name, "Sheet1");
    assert_eq!(config.export.column_header, "Selected Names");
    assert_eq!(config.server.port, 5001);
}

#[test]
fn test_token_from_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_ERP_TOKEN", "env-key:env-secret");

    let file = write_config(
        r#"
[erp]
base_url = "https://erp.example.com"
api_token = "${TEST_ERP_TOKEN}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.erp.api_token.expose_secret(), "env-key:env-secret");

    cleanup_env_vars();
}

#[test]
fn test_missing_token_variable_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[erp]
base_url = "https://erp.example.com"
api_token = "${TEST_ERP_TOKEN}"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ReportError::Configuration(_)));
    assert!(err.to_string().contains("TEST_ERP_TOKEN"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("MSR_ERP_API_TOKEN", "override:token");
    std::env::set_var("MSR_ERP_PAGE_SIZE", "200");
    std::env::set_var("MSR_FILTER_STATUS_FIELD", "service_completion_status");
    std::env::set_var("MSR_FILTER_ALLOWED_VISIT_TYPES", "PM Visit 1, Others Work");
    std::env::set_var("MSR_FILTER_COMPLETED_STATUS", "Closed");
    std::env::set_var("MSR_SERVER_PORT", "9000");

    let file = write_config(
        r#"
[erp]
base_url = "https://erp.example.com"
api_token = "file:token"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.erp.api_token.expose_secret(), "override:token");
    assert_eq!(config.erp.page_size, 200);
    assert_eq!(
        config.filter.status_field,
        StatusField::ServiceCompletionStatus
    );
    assert_eq!(
        config.filter.allowed_visit_types,
        vec!["PM Visit 1".to_string(), "Others Work".to_string()]
    );
    assert_eq!(config.filter.completed_status, "Closed");
    assert_eq!(config.server.port, 9000);

    cleanup_env_vars();
}

#[test]
fn test_invalid_numeric_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("MSR_ERP_PAGE_SIZE", "lots");

    let file = write_config(
        r#"
[erp]
base_url = "https://erp.example.com"
api_token = "key:secret"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("MSR_ERP_PAGE_SIZE"));

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        // empty token
        r#"
[erp]
base_url = "https://erp.example.com"
api_token = ""
"#,
        // page size out of range
        r#"
[erp]
base_url = "https://erp.example.com"
api_token = "key:secret"
page_size = 0
"#,
        // TLS off in production
        r#"
environment = "production"

[erp]
base_url = "https://erp.example.com"
api_token = "key:secret"
tls_verify = false
"#,
        // empty allow-list
        r#"
[erp]
base_url = "https://erp.example.com"
api_token = "key:secret"

[filter]
allowed_visit_types = []
"#,
        // not an xlsx file
        r#"
[erp]
base_url = "https://erp.example.com"
api_token = "key:secret"

[export]
file_name = "MasterData.csv"
"#,
    ];

    for content in cases {
        let file = write_config(content);
        let err = load_config(file.path()).unwrap_err();
        assert!(
            matches!(err, ReportError::Configuration(_)),
            "expected configuration error for:\n{content}"
        );
    }
}
