//! Error types for the secrets crate.
//!
//! Every variant maps to the dispatcher's `secret_unavailable` failure kind;
//! the split exists so an operator can tell a blocked private path from a
//! store-side access problem in the logs.

use std::fmt;

/// Errors from secret resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretError {
    /// The private network path to the secret store is not declared or down.
    Unreachable { name: String, reason: String },
    /// The store answered with a non-success status.
    AccessDenied { name: String, status: u16 },
    /// The store answered, but not with the expected `{ "value": ... }` shape.
    MalformedResponse { name: String, reason: String },
}

impl SecretError {
    /// The secret name the failed resolution was for.
    #[must_use]
    pub fn secret_name(&self) -> &str {
        match self {
            Self::Unreachable { name, .. }
            | Self::AccessDenied { name, .. }
            | Self::MalformedResponse { name, .. } => name,
        }
    }
}

impl fmt::Display for SecretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable { name, reason } => {
                write!(f, "secret store unreachable for '{name}': {reason}")
            }
            Self::AccessDenied { name, status } => {
                write!(f, "secret store denied access to '{name}' (status {status})")
            }
            Self::MalformedResponse { name, reason } => {
                write!(f, "malformed secret store response for '{name}': {reason}")
            }
        }
    }
}

impl std::error::Error for SecretError {}
