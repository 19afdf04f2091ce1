//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so the
//! whole lifecycle is checked in a single test.

use maintenance_report::config::LoggingConfig;
use maintenance_report::domain::ReportError;
use maintenance_report::logging::init_logging;
use maintenance_report::logging::structured::LOG_FILE_NAME;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_file_logging_lifecycle() {
    std::env::remove_var("RUST_LOG");
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("nested").join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).unwrap();
    assert!(guard.has_file_output());
    assert!(log_path.is_dir());

    let err = init_logging("info", &config).unwrap_err();
    assert!(matches!(err, ReportError::Configuration(_)));

    // dropping the guard flushes the non-blocking writer
    drop(guard);

    let contents = std::fs::read_to_string(log_path.join(LOG_FILE_NAME)).unwrap();
    let events: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let initialized = events
        .iter()
        .find(|e| e["fields"]["message"] == "Logging initialized")
        .expect("initialization event in log file");
    assert_eq!(initialized["level"], "INFO");
    assert_eq!(initialized["fields"]["local_enabled"], true);
}

#[test]
fn test_invalid_level_is_rejected() {
    let err = init_logging("verbose", &LoggingConfig::default()).unwrap_err();
    assert!(err.to_string().contains("verbose"));
}
