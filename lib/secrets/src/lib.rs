//! Secret resolution for the tradebeat dispatcher.
//!
//! This crate provides:
//!
//! - **Credential**: an opaque secret value scoped to one invocation
//! - **SecretResolver trait**: the seam the dispatcher depends on
//! - **HttpSecretResolver**: resolution via the secret store's private endpoint
//!
//! Credentials are never cached across invocations, so a rotated secret is
//! observed on the next firing. There is no retry here and no fallback to an
//! unauthenticated call; a broken private path surfaces immediately as a
//! classified error.

pub mod credential;
pub mod error;
pub mod resolver;

pub use credential::Credential;
pub use error::SecretError;
pub use resolver::{HttpSecretResolver, SecretResolver};
