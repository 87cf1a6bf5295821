//! Network boundary policy for the tradebeat dispatcher.
//!
//! This crate provides:
//!
//! - **Destination**: the only two endpoints the execution environment may dial
//! - **NetworkBoundary**: the declared, auditable table of allowed egress paths
//!
//! The execution environment deliberately has no general internet egress. In
//! production the boundary is enforced by the surrounding network fabric; the
//! clients in `tradebeat-secrets` and `tradebeat-remote` consult this table
//! before dialing so that a misconfigured path fails fast instead of hanging.

pub mod boundary;
pub mod error;

pub use boundary::{Destination, NetworkBoundary};
pub use error::BoundaryError;
