//! ERP REST client
//!
//! Lists a resource through `GET {base_url}/api/resource/{resource}`,
//! following offset pagination until the server returns an empty page.

use super::models::{RawScheduleRow, ResourcePage};
use super::source::ScheduleSource;
use crate::config::ErpConfig;
use crate::domain::{FetchError, ReportError, Result, ScheduleRecord};
use crate::{log_fetch_page, log_retry_attempt};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

/// HTTP client for the ERP resource API
///
/// # Example
///
/// ```no_run
/// use maintenance_report::adapters::erp::ErpClient;
/// use maintenance_report::config::ErpConfig;
///
/// # fn example() -> maintenance_report::domain::Result<()> {
/// let config: ErpConfig = toml::from_str(
///     r#"
///     base_url = "https://erp.example.com"
///     api_token = "key:secret"
///     "#,
/// )?;
/// let client = ErpClient::new(config)?;
/// # Ok(())
/// # }
/// ```
pub struct ErpClient {
    client: Client,
    config: ErpConfig,
}

impl ErpClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] if the HTTP client cannot be built
    pub fn new(config: ErpConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)));

        if !config.tls_verify {
            tracing::warn!(
                base_url = %config.base_url,
                "TLS certificate verification disabled for ERP client"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|e| {
            ReportError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ErpConfig {
        &self.config
    }

    /// `Authorization` header value
    fn auth_header_value(&self) -> String {
        let token: &str = self.config.api_token.expose_secret().as_ref();
        match self.config.auth_scheme.as_str() {
            "bearer" => format!("Bearer {token}"),
            _ => format!("token {token}"),
        }
    }

    /// Retry a request with exponential backoff
    ///
    /// Only transient failures are retried, at most `retry.max_retries`
    /// times after the first attempt.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> std::result::Result<T, FetchError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<T, FetchError>>,
    {
        let retry = &self.config.retry;
        let mut attempt = 0usize;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if !e.is_retryable() || attempt > retry.max_retries {
                        return Err(e);
                    }

                    let delay_ms = retry.delay_for_attempt(attempt);
                    log_retry_attempt!(attempt, retry.max_retries, e.to_string());
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }

    /// Fetch a single page starting at row offset `start`
    async fn fetch_page(&self, start: usize) -> std::result::Result<Vec<RawScheduleRow>, FetchError> {
        let url = self.config.resource_url();
        let page_size = self.config.page_size.to_string();
        let offset = start.to_string();
        let fields = self.config.fields_param();

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header_value())
            .header("Accept", "application/json")
            .query(&[
                ("fields", fields.as_str()),
                ("limit_page_length", page_size.as_str()),
                ("limit_start", offset.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(e.to_string())
                } else {
                    FetchError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::from_status(status.as_u16(), body));
        }

        let page: ResourcePage = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(format!("Failed to decode page: {e}")))?;

        Ok(page.data)
    }
}

#[async_trait]
impl ScheduleSource for ErpClient {
    async fn fetch_all(&self) -> std::result::Result<Vec<ScheduleRecord>, FetchError> {
        let page_size = self.config.page_size;
        let mut records = Vec::new();
        let mut start = 0usize;
        let mut pages = 0usize;

        tracing::info!(resource = %self.config.resource, page_size, "Fetching schedule rows");

        loop {
            if pages >= self.config.max_pages {
                tracing::error!(pages, "Server kept returning rows past the page limit");
                return Err(FetchError::PageLimitExceeded { pages });
            }

            let rows = self.retry_request(|| self.fetch_page(start)).await?;
            pages += 1;
            log_fetch_page!(pages, start, rows.len());

            if rows.is_empty() {
                break;
            }

            for row in rows {
                records.push(row.into_record()?);
            }
            start += page_size;
        }

        tracing::info!(rows = records.len(), pages, "Finished fetching schedule rows");
        Ok(records)
    }

    fn describe(&self) -> String {
        self.config.resource_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config(scheme: &str) -> ErpConfig {
        let mut config: ErpConfig = toml::from_str(
            r#"
            base_url = "https://erp.example.com/"
            api_token = "key:secret"
            "#,
        )
        .unwrap();
        config.auth_scheme = scheme.to_string();
        config
    }

    #[test]
    fn test_auth_header_token_scheme() {
        let client = ErpClient::new(config("token")).unwrap();
        assert_eq!(client.auth_header_value(), "token key:secret");
    }

    #[test]
    fn test_auth_header_bearer_scheme() {
        let mut cfg = config("bearer");
        cfg.api_token = secret_string("abc".to_string());
        let client = ErpClient::new(cfg).unwrap();
        assert_eq!(client.auth_header_value(), "Bearer abc");
    }

    #[test]
    fn test_describe_uses_resource_url() {
        let client = ErpClient::new(config("token")).unwrap();
        assert_eq!(
            client.describe(),
            "https://erp.example.com/api/resource/Maintenance Schedule"
        );
    }
}
