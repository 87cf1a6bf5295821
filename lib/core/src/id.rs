//! Strongly-typed ID types for domain entities.
//!
//! All IDs are ULIDs, giving uniqueness plus temporal ordering. The latter
//! matters for invocation IDs: sorting a log of dispatch reports by ID yields
//! receipt order for free.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to generate a strongly-typed ID wrapper around ULID.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            /// Creates a new ID with a randomly generated ULID.
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            /// Returns the underlying ULID.
            #[must_use]
            pub const fn as_ulid(&self) -> Ulid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let prefix_with_underscore = concat!($prefix, "_");
                let ulid_str = s.strip_prefix(prefix_with_underscore).unwrap_or(s);

                Ulid::from_str(ulid_str)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        reason: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Correlation identifier assigned to each invocation at receipt.
    ///
    /// Triggers themselves are identified by their provisioning-time rule
    /// name, so no separate trigger ID type exists.
    InvocationId,
    "inv"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_prefix() {
        let id = InvocationId::new();
        assert!(id.to_string().starts_with("inv_"));
    }

    #[test]
    fn parses_with_and_without_prefix() {
        let id = InvocationId::new();
        let display = id.to_string();

        let reparsed: InvocationId = display.parse().expect("parse with prefix");
        assert_eq!(reparsed, id);

        let raw = id.as_ulid().to_string();
        let reparsed: InvocationId = raw.parse().expect("parse raw ulid");
        assert_eq!(reparsed, id);
    }

    #[test]
    fn rejects_garbage() {
        let err = "not-an-id".parse::<InvocationId>().unwrap_err();
        assert_eq!(err.id_type, "InvocationId");
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(InvocationId::new(), InvocationId::new());
    }
}
