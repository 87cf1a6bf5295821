//! Secret resolution over the private network endpoint.

use crate::credential::Credential;
use crate::error::SecretError;
use async_trait::async_trait;
use serde::Deserialize;
use tradebeat_network::{Destination, NetworkBoundary};
use tracing::debug;

/// Trait for resolving a named secret into a credential.
///
/// Implementations must not cache across calls; the dispatcher relies on a
/// fresh fetch per invocation to observe secret rotation.
#[async_trait]
pub trait SecretResolver: Send + Sync {
    /// Resolves a secret by name.
    ///
    /// # Errors
    ///
    /// Returns an error when the private path is blocked or the store refuses
    /// or mangles the request.
    async fn resolve(&self, name: &str) -> Result<Credential, SecretError>;
}

/// The wire shape of a successful `GetSecretValue` response.
#[derive(Debug, Deserialize)]
struct SecretValue {
    value: String,
}

/// Resolves secrets by calling the store's private HTTP endpoint.
///
/// The boundary is consulted before dialing so that a misconfigured path
/// fails immediately instead of hanging until the connect timeout.
pub struct HttpSecretResolver {
    http: reqwest::Client,
    endpoint: String,
    boundary: NetworkBoundary,
}

impl HttpSecretResolver {
    /// Creates a resolver against the given private endpoint.
    ///
    /// The caller supplies the `reqwest` client so request timeouts are
    /// configured in one place (the binary's startup path).
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        boundary: NetworkBoundary,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            boundary,
        }
    }
}

#[async_trait]
impl SecretResolver for HttpSecretResolver {
    async fn resolve(&self, name: &str) -> Result<Credential, SecretError> {
        self.boundary
            .ensure(Destination::SecretStore)
            .map_err(|e| SecretError::Unreachable {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let response = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
            .map_err(|e| SecretError::Unreachable {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SecretError::AccessDenied {
                name: name.to_string(),
                status: status.as_u16(),
            });
        }

        let secret: SecretValue =
            response
                .json()
                .await
                .map_err(|e| SecretError::MalformedResponse {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;

        debug!(secret_name = %name, "resolved secret");
        Ok(Credential::new(secret.value))
    }
}
