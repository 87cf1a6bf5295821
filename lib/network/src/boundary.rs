//! The allowed-egress table.
//!
//! A boundary starts out fully isolated; every reachable destination must be
//! declared explicitly. There is no way to express "allow everything", which
//! keeps the absence-of-default-egress invariant structural rather than
//! conventional.

use crate::error::BoundaryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A destination the execution environment may be permitted to reach.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// The secret store, via its private endpoint.
    SecretStore,
    /// The backend service, via the security-group-scoped path.
    Backend,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SecretStore => write!(f, "secret store"),
            Self::Backend => write!(f, "backend"),
        }
    }
}

/// The static table of allowed source→destination paths.
///
/// The source is always the dispatcher's execution environment, so only
/// destinations are recorded. The table is built once at startup and never
/// mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkBoundary {
    allowed: BTreeSet<Destination>,
}

impl NetworkBoundary {
    /// Creates a boundary with no egress at all.
    #[must_use]
    pub fn isolated() -> Self {
        Self {
            allowed: BTreeSet::new(),
        }
    }

    /// Declares a path to a destination.
    #[must_use]
    pub fn with_path(mut self, destination: Destination) -> Self {
        self.allowed.insert(destination);
        self
    }

    /// The production shape: exactly the secret store and the backend.
    #[must_use]
    pub fn production() -> Self {
        Self::isolated()
            .with_path(Destination::SecretStore)
            .with_path(Destination::Backend)
    }

    /// Whether a path to the destination exists.
    #[must_use]
    pub fn allows(&self, destination: Destination) -> bool {
        self.allowed.contains(&destination)
    }

    /// Fails fast when no path to the destination exists.
    ///
    /// # Errors
    ///
    /// Returns `BoundaryError::EgressDenied` for undeclared destinations.
    pub fn ensure(&self, destination: Destination) -> Result<(), BoundaryError> {
        if self.allows(destination) {
            Ok(())
        } else {
            Err(BoundaryError::EgressDenied { destination })
        }
    }

    /// The declared paths, for audit logging at startup.
    pub fn paths(&self) -> impl Iterator<Item = Destination> + '_ {
        self.allowed.iter().copied()
    }
}
