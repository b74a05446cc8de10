//! Async client for the partnership application endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::payload::{ApplicationPayload, SubmitResponse};
use crate::config::ApiConfig;
use crate::error::TransportError;

/// Submits an application and returns the server's verdict.
///
/// A business rejection is still `Ok`; only a missing or unreadable response is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationClient: Send + Sync {
    async fn submit(&self, payload: &ApplicationPayload) -> Result<SubmitResponse, TransportError>;
}

/// reqwest-backed client
pub struct HttpApplicationClient {
    url: String,
    timeout_secs: u64,
    http: Client,
}

impl HttpApplicationClient {
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self {
            url: config.submit_url(),
            timeout_secs: config.timeout_secs,
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ApplicationClient for HttpApplicationClient {
    async fn submit(&self, payload: &ApplicationPayload) -> Result<SubmitResponse, TransportError> {
        tracing::info!(url = %self.url, "submitting partnership application");

        let resp = self
            .http
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(self.timeout_secs)
                } else {
                    TransportError::Request(e.to_string())
                }
            })?;

        // The endpoint answers 400/403 with a JSON body too; status alone is not the verdict
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let parsed: SubmitResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(%status, "unparseable response body: {}", e);
            TransportError::Decode(format!("HTTP {}: {}", status, e))
        })?;

        tracing::info!(%status, success = parsed.success, "application endpoint responded");
        Ok(parsed)
    }
}
