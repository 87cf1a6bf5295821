//! Error types for the network boundary crate.

use crate::boundary::Destination;
use std::fmt;

/// Errors from boundary checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryError {
    /// No path from the execution environment to the destination.
    EgressDenied { destination: Destination },
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EgressDenied { destination } => {
                write!(f, "no network path to {destination}")
            }
        }
    }
}

impl std::error::Error for BoundaryError {}
