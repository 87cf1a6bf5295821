//! The dispatcher: validate, resolve, call, report.

use crate::method::Method;
use crate::report::{DispatchReport, FailureKind};
use crate::request::InvocationRequest;
use std::sync::Arc;
use tradebeat_core::InvocationId;
use tradebeat_remote::RemoteClient;
use tradebeat_secrets::SecretResolver;
use tracing::{info, instrument, warn};

/// The entry point the scheduler invokes.
///
/// Holds only shared-immutable collaborators, so a single instance can serve
/// any number of concurrent firings. Per invocation it performs at most one
/// credential fetch and one backend call; the credential is dropped when the
/// report is produced and is never reused across invocations.
pub struct Dispatcher {
    resolver: Arc<dyn SecretResolver>,
    client: Arc<dyn RemoteClient>,
    secret_name: String,
}

impl Dispatcher {
    /// Creates a dispatcher.
    ///
    /// `secret_name` is which secret holds the backend API key; it comes from
    /// startup configuration, not from the invocation payload.
    #[must_use]
    pub fn new(
        resolver: Arc<dyn SecretResolver>,
        client: Arc<dyn RemoteClient>,
        secret_name: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            client,
            secret_name: secret_name.into(),
        }
    }

    /// Handles one invocation.
    ///
    /// Validation failures return immediately with zero network calls;
    /// re-firing the same bad payload cannot help, so they are marked
    /// non-retryable in the report. Network and backend failures surface as
    /// classified failures for the scheduler's own retry policy.
    #[instrument(skip_all, fields(method = %request.method))]
    pub async fn handle(&self, request: InvocationRequest) -> DispatchReport {
        let invocation_id = InvocationId::new();

        let Some(method) = Method::parse(&request.method) else {
            warn!(
                %invocation_id,
                error_kind = "unrecognized_method",
                "rejecting invocation"
            );
            return DispatchReport::failure(
                invocation_id,
                None,
                FailureKind::UnrecognizedMethod,
                format!("unrecognized method '{}'", request.method),
                None,
            );
        };

        for required in method.required_params() {
            if !request.params.contains_key(*required) {
                warn!(
                    %invocation_id,
                    error_kind = "missing_parameter",
                    parameter = *required,
                    "rejecting invocation"
                );
                return DispatchReport::failure(
                    invocation_id,
                    Some(method.as_str()),
                    FailureKind::MissingParameter,
                    format!("method '{method}' requires parameter '{required}'"),
                    None,
                );
            }
        }

        let credential = match self.resolver.resolve(&self.secret_name).await {
            Ok(credential) => credential,
            Err(err) => {
                warn!(
                    %invocation_id,
                    error_kind = "secret_unavailable",
                    "credential resolution failed"
                );
                return DispatchReport::failure(
                    invocation_id,
                    Some(method.as_str()),
                    FailureKind::from(&err),
                    err.to_string(),
                    None,
                );
            }
        };

        match self
            .client
            .call(method.route(), &request.params_json(), &credential)
            .await
        {
            Ok(response) => {
                info!(
                    %invocation_id,
                    http_status = response.status,
                    "invocation succeeded"
                );
                DispatchReport::success(
                    invocation_id,
                    method.as_str(),
                    response.status,
                    response.body,
                )
            }
            Err(err) => {
                let kind = FailureKind::from(&err);
                let http_status = match &err {
                    tradebeat_remote::RemoteError::Backend { status, .. } => Some(*status),
                    _ => None,
                };
                warn!(
                    %invocation_id,
                    error_kind = ?kind,
                    "backend call failed"
                );
                DispatchReport::failure(
                    invocation_id,
                    Some(method.as_str()),
                    kind,
                    err.to_string(),
                    http_status,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CallStatus;
    use async_trait::async_trait;
    use serde_json::{Value as JsonValue, json};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tradebeat_remote::{RemoteError, RemoteResponse};
    use tradebeat_secrets::{Credential, SecretError};

    struct FakeResolver {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeResolver {
        fn reachable() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn unreachable() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SecretResolver for FakeResolver {
        async fn resolve(&self, name: &str) -> Result<Credential, SecretError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SecretError::Unreachable {
                    name: name.to_string(),
                    reason: "no network path to secret store".to_string(),
                })
            } else {
                Ok(Credential::new("k-test"))
            }
        }
    }

    struct FakeClient {
        calls: AtomicUsize,
        captured: Mutex<Vec<(String, JsonValue)>>,
        outcome: fn() -> Result<RemoteResponse, RemoteError>,
    }

    impl FakeClient {
        fn with_outcome(outcome: fn() -> Result<RemoteResponse, RemoteError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                captured: Mutex::new(Vec::new()),
                outcome,
            }
        }

        fn ok() -> Self {
            Self::with_outcome(|| {
                Ok(RemoteResponse {
                    status: 200,
                    body: Some(json!({ "status": "ok" })),
                })
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RemoteClient for FakeClient {
        async fn call(
            &self,
            route: &str,
            params: &JsonValue,
            _credential: &Credential,
        ) -> Result<RemoteResponse, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.captured
                .lock()
                .expect("lock")
                .push((route.to_string(), params.clone()));
            (self.outcome)()
        }
    }

    fn dispatcher(
        resolver: &Arc<FakeResolver>,
        client: &Arc<FakeClient>,
    ) -> Dispatcher {
        Dispatcher::new(
            Arc::clone(resolver) as Arc<dyn SecretResolver>,
            Arc::clone(client) as Arc<dyn RemoteClient>,
            "trading/api-key",
        )
    }

    #[tokio::test]
    async fn success_forwards_params_unmodified() {
        let resolver = Arc::new(FakeResolver::reachable());
        let client = Arc::new(FakeClient::ok());
        let request: InvocationRequest = serde_json::from_value(json!({
            "method": "capture_account_summary",
            "account_number": "DUK273068",
        }))
        .expect("request");

        let report = dispatcher(&resolver, &client).handle(request).await;

        assert_eq!(report.status, CallStatus::Success);
        assert_eq!(report.http_status, Some(200));
        assert_eq!(report.body, Some(json!({ "status": "ok" })));

        let captured = client.captured.lock().expect("lock");
        assert_eq!(
            captured.as_slice(),
            &[(
                "/account".to_string(),
                json!({ "account_number": "DUK273068" })
            )]
        );
    }

    #[tokio::test]
    async fn unrecognized_method_makes_no_network_calls() {
        let resolver = Arc::new(FakeResolver::reachable());
        let client = Arc::new(FakeClient::ok());

        let report = dispatcher(&resolver, &client)
            .handle(InvocationRequest::new("drop_all_tables"))
            .await;

        assert_eq!(report.error_kind, Some(FailureKind::UnrecognizedMethod));
        assert_eq!(report.method, None);
        assert_eq!(resolver.call_count(), 0);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_required_parameter_makes_no_network_calls() {
        let resolver = Arc::new(FakeResolver::reachable());
        let client = Arc::new(FakeClient::ok());

        let report = dispatcher(&resolver, &client)
            .handle(InvocationRequest::new("update_contracts_table"))
            .await;

        assert_eq!(report.error_kind, Some(FailureKind::MissingParameter));
        assert_eq!(report.method.as_deref(), Some("update_contracts_table"));
        assert!(
            report
                .error
                .as_deref()
                .is_some_and(|e| e.contains("contracts_details"))
        );
        assert_eq!(resolver.call_count(), 0);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn capture_account_summary_tolerates_missing_account_number() {
        let resolver = Arc::new(FakeResolver::reachable());
        let client = Arc::new(FakeClient::ok());

        let report = dispatcher(&resolver, &client)
            .handle(InvocationRequest::new("capture_account_summary"))
            .await;

        assert!(report.is_success());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn secret_unavailable_skips_the_remote_call() {
        let resolver = Arc::new(FakeResolver::unreachable());
        let client = Arc::new(FakeClient::ok());

        let report = dispatcher(&resolver, &client)
            .handle(InvocationRequest::new("refresh_orders"))
            .await;

        assert_eq!(report.error_kind, Some(FailureKind::SecretUnavailable));
        assert_eq!(resolver.call_count(), 1);
        // Resolution strictly precedes the remote call.
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn backend_503_reports_backend_error_with_status() {
        let resolver = Arc::new(FakeResolver::reachable());
        let client = Arc::new(FakeClient::with_outcome(|| {
            Err(RemoteError::Backend {
                status: 503,
                body: "maintenance".to_string(),
            })
        }));

        let report = dispatcher(&resolver, &client)
            .handle(InvocationRequest::new("refresh_orders"))
            .await;

        assert_eq!(report.status, CallStatus::Failure);
        assert_eq!(report.error_kind, Some(FailureKind::BackendError));
        assert_eq!(report.http_status, Some(503));
    }

    #[tokio::test]
    async fn timeout_maps_to_timeout_kind() {
        let resolver = Arc::new(FakeResolver::reachable());
        let client = Arc::new(FakeClient::with_outcome(|| {
            Err(RemoteError::Timeout { budget_ms: 250 })
        }));

        let report = dispatcher(&resolver, &client)
            .handle(InvocationRequest::new("truncate_orders"))
            .await;

        assert_eq!(report.error_kind, Some(FailureKind::Timeout));
        assert_eq!(report.http_status, None);
    }

    #[tokio::test]
    async fn duplicate_firings_are_independent() {
        let resolver = Arc::new(FakeResolver::reachable());
        let client = Arc::new(FakeClient::ok());
        let dispatcher = dispatcher(&resolver, &client);
        let request = InvocationRequest::new("capture_account_summary")
            .with_param("account_number", json!("DUK273068"));

        let first = dispatcher.handle(request.clone()).await;
        let second = dispatcher.handle(request).await;

        assert!(first.is_success());
        assert!(second.is_success());
        // Distinct correlation IDs, one credential fetch and one call each:
        // nothing leaked across the two executions.
        assert_ne!(first.invocation_id, second.invocation_id);
        assert_eq!(resolver.call_count(), 2);
        assert_eq!(client.call_count(), 2);
    }
}
