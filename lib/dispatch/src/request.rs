//! The invocation payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// The payload delivered to the dispatcher for one trigger firing.
///
/// On the wire the method-specific fields sit beside `method` rather than
/// nested under a key, e.g.
/// `{"method":"capture_account_summary","account_number":"DUK273068"}`.
/// The request is ephemeral: one per firing, no identity beyond the
/// correlation ID the dispatcher assigns at receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// The remote method name, unvalidated until dispatch.
    pub method: String,
    /// Method-specific parameters.
    #[serde(flatten)]
    pub params: Map<String, JsonValue>,
}

impl InvocationRequest {
    /// Creates a request for a method with no params.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Map::new(),
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// The params as a JSON object, the exact body forwarded to the backend.
    #[must_use]
    pub fn params_json(&self) -> JsonValue {
        JsonValue::Object(self.params.clone())
    }
}
