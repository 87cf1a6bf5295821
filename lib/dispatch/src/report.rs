//! The structured per-invocation result.
//!
//! One report is produced per invocation and surfaces back to the invoking
//! scheduler's record. Failure kinds are the operator-facing taxonomy: a
//! glance at the kind distinguishes bad schedule config from network
//! misconfiguration from backend outage, without inspecting payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tradebeat_core::InvocationId;
use tradebeat_remote::RemoteError;
use tradebeat_secrets::SecretError;

/// Overall invocation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Success,
    Failure,
}

/// Why an invocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The method name is not in the dispatch table.
    UnrecognizedMethod,
    /// A required identifying parameter is absent.
    MissingParameter,
    /// The credential could not be resolved from the secret store.
    SecretUnavailable,
    /// The network path to the backend failed.
    Unreachable,
    /// The backend call exceeded its time budget.
    Timeout,
    /// The backend answered with a non-2xx status.
    BackendError,
}

impl FailureKind {
    /// Whether re-firing the same payload could help.
    ///
    /// Input-validation failures are deterministic, so the scheduler's retry
    /// policy should not re-fire them; everything else may be transient.
    #[must_use]
    pub const fn retryable(self) -> bool {
        !matches!(self, Self::UnrecognizedMethod | Self::MissingParameter)
    }
}

impl From<&SecretError> for FailureKind {
    fn from(_: &SecretError) -> Self {
        Self::SecretUnavailable
    }
}

impl From<&RemoteError> for FailureKind {
    fn from(err: &RemoteError) -> Self {
        match err {
            RemoteError::Unreachable { .. } => Self::Unreachable,
            RemoteError::Timeout { .. } => Self::Timeout,
            RemoteError::Backend { .. } => Self::BackendError,
        }
    }
}

/// The result of one dispatcher invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Correlation ID assigned at receipt.
    pub invocation_id: InvocationId,
    /// The method, when it parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Success or failure.
    pub status: CallStatus,
    /// Backend HTTP status, when a response arrived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    /// Backend response body, when it was JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
    /// Failure classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<FailureKind>,
    /// Human-readable failure detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchReport {
    /// Builds a success report.
    #[must_use]
    pub fn success(
        invocation_id: InvocationId,
        method: &str,
        http_status: u16,
        body: Option<JsonValue>,
    ) -> Self {
        Self {
            invocation_id,
            method: Some(method.to_string()),
            status: CallStatus::Success,
            http_status: Some(http_status),
            body,
            error_kind: None,
            error: None,
        }
    }

    /// Builds a failure report.
    #[must_use]
    pub fn failure(
        invocation_id: InvocationId,
        method: Option<&str>,
        kind: FailureKind,
        error: impl Into<String>,
        http_status: Option<u16>,
    ) -> Self {
        Self {
            invocation_id,
            method: method.map(str::to_string),
            status: CallStatus::Failure,
            http_status,
            body: None,
            error_kind: Some(kind),
            error: Some(error.into()),
        }
    }

    /// Whether the invocation succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == CallStatus::Success
    }
}
