//! The backend HTTP client.
//!
//! Every call is `POST <base-url><route>` with a JSON body of forwarded
//! params and the credential attached as a header. A 2xx response is success;
//! everything else is classified for the dispatch report.

use crate::error::RemoteError;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tradebeat_network::{Destination, NetworkBoundary};
use tradebeat_secrets::Credential;
use tracing::debug;

/// A successful backend response.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResponse {
    /// The 2xx status the backend answered with.
    pub status: u16,
    /// Response body, when the backend sent parseable JSON.
    pub body: Option<JsonValue>,
}

/// Trait for issuing authenticated calls to the backend.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Calls a backend route with the given params and credential.
    ///
    /// # Errors
    ///
    /// Returns a classified error for path failures, timeouts, and non-2xx
    /// responses.
    async fn call(
        &self,
        route: &str,
        params: &JsonValue,
        credential: &Credential,
    ) -> Result<RemoteResponse, RemoteError>;
}

/// reqwest-backed client against a fixed backend base address.
pub struct HttpRemoteClient {
    http: reqwest::Client,
    base_url: String,
    header_name: String,
    timeout: Duration,
    boundary: NetworkBoundary,
}

impl HttpRemoteClient {
    /// Creates a client for the given backend.
    ///
    /// `header_name` is the header the credential is attached under and
    /// `timeout` the hard per-request budget.
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        header_name: impl Into<String>,
        timeout: Duration,
        boundary: NetworkBoundary,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http,
            base_url,
            header_name: header_name.into(),
            timeout,
            boundary,
        }
    }

    fn classify(&self, err: &reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Timeout {
                budget_ms: self.timeout.as_millis() as u64,
            }
        } else {
            RemoteError::Unreachable {
                reason: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn call(
        &self,
        route: &str,
        params: &JsonValue,
        credential: &Credential,
    ) -> Result<RemoteResponse, RemoteError> {
        self.boundary
            .ensure(Destination::Backend)
            .map_err(|e| RemoteError::Unreachable {
                reason: e.to_string(),
            })?;

        let url = format!("{}{}", self.base_url, route);
        let response = self
            .http
            .post(&url)
            .header(&self.header_name, credential.reveal())
            .json(params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(&e))?;

        if !status.is_success() {
            return Err(RemoteError::Backend {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(route = %route, status = status.as_u16(), "backend call succeeded");
        Ok(RemoteResponse {
            status: status.as_u16(),
            body: serde_json::from_str(&text).ok(),
        })
    }
}
