use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::api::{Analysis, AnalyzeRequest, ErrorBody, HealthStatus};
use crate::config::Settings;
use crate::error::{SentiscopeError, SentiscopeResult};

/// Seam between the UI lifecycle and the transport. The worker loop and the
/// one-shot CLI paths only see this trait, so tests can substitute simulated
/// outcomes for the real service.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Exactly one POST of `{"text": ...}` to the configured endpoint.
    async fn analyze(&self, text: &str) -> SentiscopeResult<Analysis>;

    /// Probe the health route at the service origin.
    async fn health(&self) -> SentiscopeResult<HealthStatus>;
}

pub struct SentimentClient {
    http: reqwest::Client,
    endpoint: Url,
    origin: String,
}

impl SentimentClient {
    /// Build a client for the configured endpoint. No request timeout is set:
    /// an outstanding call runs until the transport resolves it, and the
    /// submit guard keeps it the only one in flight.
    pub fn new(settings: &Settings) -> SentiscopeResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SentiscopeError::config(format!("failed to build HTTP client: {}", e)))?;
        Ok(SentimentClient {
            http,
            endpoint: settings.endpoint.clone(),
            origin: settings.endpoint_origin(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn transport_err(&self, reason: impl ToString) -> SentiscopeError {
        SentiscopeError::transport(reason, self.origin.clone())
    }
}

#[async_trait]
impl Analyzer for SentimentClient {
    async fn analyze(&self, text: &str) -> SentiscopeResult<Analysis> {
        debug!(endpoint = %self.endpoint, bytes = text.len(), "sending analyze request");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&AnalyzeRequest { text })
            .send()
            .await
            .map_err(|e| self.transport_err(e))?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the backend's own message; an empty or undecodable
            // error body degrades to the bare status line.
            let message = match response.json::<ErrorBody>().await {
                Ok(body) if !body.error.is_empty() => body.error,
                _ => format!("HTTP error! Status: {}", status.as_u16()),
            };
            warn!(status = status.as_u16(), %message, "classifier returned an error");
            return Err(SentiscopeError::service(status.as_u16(), message));
        }

        response
            .json::<Analysis>()
            .await
            .map_err(|e| self.transport_err(e))
    }

    async fn health(&self) -> SentiscopeResult<HealthStatus> {
        let probe = self
            .endpoint
            .join("/")
            .map_err(|e| SentiscopeError::config(format!("cannot derive health URL: {}", e)))?;
        debug!(url = %probe, "probing service health");
        let response = self
            .http
            .get(probe)
            .send()
            .await
            .map_err(|e| self.transport_err(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SentiscopeError::service(
                status.as_u16(),
                format!("HTTP error! Status: {}", status.as_u16()),
            ));
        }
        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| self.transport_err(e))
    }
}
