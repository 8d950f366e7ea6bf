//! HTTP transport to the analysis service.
//!
//! [`QueryTransport`] is the seam the query worker talks through; [`HttpTransport`] is the
//! reqwest implementation. No retries are attempted: one call, one outcome.

use crate::config::ClientConfig;
use crate::error::{NavigatorError, Result};
use crate::response::ServerPayload;
use async_trait::async_trait;
use serde::Serialize;

/// Sends a free-text question and yields the raw service payload.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn submit_query(&self, query: &str) -> Result<ServerPayload>;
}

#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    query: &'a str,
}

#[derive(Debug, Serialize)]
struct StatusBody<'a> {
    policy_id: &'a str,
}

#[derive(Debug, Serialize)]
struct ComplianceBody<'a> {
    business_type: &'a str,
    size: &'a str,
}

pub const DEFAULT_BUSINESS_TYPE: &str = "general";
pub const DEFAULT_BUSINESS_SIZE: &str = "small_business";

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| NavigatorError::Transport {
                message: "failed to build HTTP client".to_string(),
                source: Some(err),
            })?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// `GET /api/health`
    pub async fn health(&self) -> Result<ServerPayload> {
        let url = self.url("/api/health");
        log::debug!("GET {url}");
        let response = self.http_client.get(&url).send().await?;
        decode(response).await
    }

    /// `POST /api/status` for a single policy identifier such as `EO-14067`.
    pub async fn policy_status(&self, policy_id: &str) -> Result<ServerPayload> {
        let url = self.url("/api/status");
        log::debug!("POST {url} policy_id={policy_id}");
        let response = self
            .http_client
            .post(&url)
            .json(&StatusBody { policy_id })
            .send()
            .await?;
        decode(response).await
    }

    /// `POST /api/compliance`: requirements and deadlines for a kind and size of business.
    pub async fn compliance(&self, business_type: &str, size: &str) -> Result<ServerPayload> {
        let url = self.url("/api/compliance");
        log::debug!("POST {url} business_type={business_type} size={size}");
        let response = self
            .http_client
            .post(&url)
            .json(&ComplianceBody {
                business_type,
                size,
            })
            .send()
            .await?;
        decode(response).await
    }
}

#[async_trait]
impl QueryTransport for HttpTransport {
    async fn submit_query(&self, query: &str) -> Result<ServerPayload> {
        let url = self.url("/api/query");
        log::debug!("POST {url} ({} chars)", query.len());
        let response = self
            .http_client
            .post(&url)
            .json(&QueryBody { query })
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode(response: reqwest::Response) -> Result<ServerPayload> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::warn!("service answered HTTP {status}");
        return Err(NavigatorError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<ServerPayload>().await?)
}
