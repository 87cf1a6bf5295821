//! Error types for the remote client crate.
//!
//! The three variants map one-to-one onto what an operator needs to tell
//! apart: a network-path problem, a blown time budget, and a backend that
//! answered but refused.

use std::fmt;

/// Errors from backend calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The network path failed before a response arrived. Directly implicates
    /// boundary or security-group misconfiguration.
    Unreachable { reason: String },
    /// The request exceeded the configured time budget.
    Timeout { budget_ms: u64 },
    /// The backend answered with a non-2xx status.
    Backend { status: u16, body: String },
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable { reason } => {
                write!(f, "backend unreachable: {reason}")
            }
            Self::Timeout { budget_ms } => {
                write!(f, "backend call exceeded {budget_ms}ms budget")
            }
            Self::Backend { status, body } => {
                write!(f, "backend returned {status}: {body}")
            }
        }
    }
}

impl std::error::Error for RemoteError {}
