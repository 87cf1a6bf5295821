//! The credential handed to the remote client.
//!
//! A `Credential` lives for the duration of one invocation and is discarded
//! when the dispatch report is produced. It deliberately implements neither
//! `Serialize` nor a revealing `Debug`, so the secret value cannot leak
//! through logs or serialized reports.

use chrono::{DateTime, Utc};
use std::fmt;

/// An opaque API credential resolved from the secret store.
#[derive(Clone)]
pub struct Credential {
    value: String,
    fetched_at: DateTime<Utc>,
}

impl Credential {
    /// Wraps a freshly fetched secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            fetched_at: Utc::now(),
        }
    }

    /// The secret value, for attaching to an outbound request header.
    #[must_use]
    pub fn reveal(&self) -> &str {
        &self.value
    }

    /// When the secret was fetched from the store.
    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("value", &"<redacted>")
            .field("fetched_at", &self.fetched_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_value() {
        let credential = Credential::new("super-secret-key");
        let debug = format!("{credential:?}");

        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("super-secret-key"));
    }

    #[test]
    fn reveal_returns_value() {
        let credential = Credential::new("super-secret-key");
        assert_eq!(credential.reveal(), "super-secret-key");
    }

    #[test]
    fn fetched_at_is_set() {
        let before = Utc::now();
        let credential = Credential::new("k");
        assert!(credential.fetched_at() >= before);
    }
}
