//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ReportConfig;
use super::secret::secret_string;
use crate::domain::errors::ReportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of environment variables that override file values
pub const ENV_PREFIX: &str = "MSR_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`ReportConfig`]
/// 4. Applies environment variable overrides (`MSR_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ReportError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, parsing fails, or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use maintenance_report::config::loader::load_config;
///
/// let config = load_config("report.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ReportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ReportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ReportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Same as [`load_config`] for an in-memory document
pub fn load_config_str(contents: &str) -> Result<ReportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ReportConfig = toml::from_str(&contents)
        .map_err(|e| ReportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ReportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn placeholder_regex() -> Result<Regex> {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ReportError::Configuration(format!("Invalid placeholder pattern: {e}")))
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied untouched so documented placeholders in
/// comments never have to be set.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_regex()?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ReportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env(key) {
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            ReportError::Configuration(format!(
                "Environment variable {ENV_PREFIX}{key} has an invalid value: '{raw}'"
            ))
        }),
        None => Ok(None),
    }
}

/// Applies environment variable overrides using the `MSR_` prefix
///
/// Variables follow the pattern `MSR_<SECTION>_<KEY>`, for example
/// `MSR_ERP_BASE_URL` or `MSR_SERVER_PORT`. Unparseable numeric or boolean
/// values are rejected rather than ignored.
fn apply_env_overrides(config: &mut ReportConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // ERP overrides
    if let Some(val) = env("ERP_BASE_URL") {
        config.erp.base_url = val;
    }
    if let Some(val) = env("ERP_RESOURCE") {
        config.erp.resource = val;
    }
    if let Some(val) = env("ERP_AUTH_SCHEME") {
        config.erp.auth_scheme = val;
    }
    if let Some(val) = env("ERP_API_TOKEN") {
        config.erp.api_token = secret_string(val);
    }
    if let Some(size) = env_parsed("ERP_PAGE_SIZE")? {
        config.erp.page_size = size;
    }
    if let Some(pages) = env_parsed("ERP_MAX_PAGES")? {
        config.erp.max_pages = pages;
    }
    if let Some(secs) = env_parsed("ERP_TIMEOUT_SECONDS")? {
        config.erp.timeout_seconds = secs;
    }
    if let Some(verify) = env_parsed("ERP_TLS_VERIFY")? {
        config.erp.tls_verify = verify;
    }
    if let Some(retries) = env_parsed("ERP_RETRY_MAX_RETRIES")? {
        config.erp.retry.max_retries = retries;
    }

    // Filter overrides
    if let Some(val) = env("FILTER_ALLOWED_VISIT_TYPES") {
        config.filter.allowed_visit_types = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(val) = env("FILTER_STATUS_FIELD") {
        config.filter.status_field = val.parse().map_err(ReportError::Configuration)?;
    }
    if let Some(val) = env("FILTER_COMPLETED_STATUS") {
        config.filter.completed_status = val;
    }

    // Export overrides
    if let Some(val) = env("EXPORT_FILE_NAME") {
        config.export.file_name = val;
    }
    if let Some(include) = env_parsed("EXPORT_INCLUDE_VISIT_SHEET")? {
        config.export.include_visit_sheet = include;
    }

    // Server overrides
    if let Some(val) = env("SERVER_HOST") {
        config.server.host = val;
    }
    if let Some(port) = env_parsed("SERVER_PORT")? {
        config.server.port = port;
    }

    // Logging overrides
    if let Some(enabled) = env_parsed("LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = enabled;
    }
    if let Some(val) = env("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
