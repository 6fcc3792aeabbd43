//! Analytics API Client
//!
//! HTTP client for the analytics API's metric endpoints.

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use thiserror::Error;

use crate::session::Identity;

/// Header carrying the display identity
pub const USER_HEADER: &str = "X-User";

/// Known metric endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    RevenueByCountry,
    DailyRevenue { limit: u32 },
    AdminUsers,
}

impl Endpoint {
    /// Path and query relative to the API origin
    pub fn path(&self) -> String {
        match self {
            Endpoint::RevenueByCountry => "/metrics/revenue-by-country".to_string(),
            Endpoint::DailyRevenue { limit } => format!("/metrics/daily-revenue?limit={}", limit),
            Endpoint::AdminUsers => "/admin/users".to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Response as received, whatever the status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can answer a metrics GET
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// GET `path` on behalf of `identity`
    async fn get(&self, path: &str, identity: &Identity) -> Result<RawResponse, MetricsError>;
}

/// Configuration for the metrics client
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// API origin (e.g., "http://127.0.0.1:8000")
    pub base_url: String,
    /// Request timeout in seconds, `None` waits forever
    pub request_timeout_secs: Option<u64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: None,
        }
    }
}

/// reqwest-backed [`MetricsSource`]
pub struct MetricsClient {
    client: Client,
    config: MetricsConfig,
}

impl MetricsClient {
    /// Create a new client with the given configuration
    pub fn new(config: MetricsConfig) -> Result<Self, MetricsError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl MetricsSource for MetricsClient {
    async fn get(&self, path: &str, identity: &Identity) -> Result<RawResponse, MetricsError> {
        let url = self.url(path);
        tracing::debug!(url = %url, user = %identity, "Sending metrics request");

        let response = self
            .client
            .get(&url)
            .header(USER_HEADER, identity.as_str())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MetricsError::Timeout
                } else if e.is_connect() {
                    MetricsError::Unavailable(url.clone())
                } else {
                    MetricsError::Request(e)
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::info!(path = %path, status, bytes = body.len(), "Metrics response received");
        Ok(RawResponse { status, body })
    }
}

/// Errors that can occur before a response body arrives
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Analytics API unavailable at {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timeout")]
    Timeout,
}
