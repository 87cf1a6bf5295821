//! Authenticated backend calls for the tradebeat dispatcher.
//!
//! This crate provides:
//!
//! - **RemoteClient trait**: the seam the dispatcher depends on
//! - **HttpRemoteClient**: reqwest-backed implementation with a hard timeout
//! - **RemoteError**: the unreachable/timeout/backend failure classification
//!
//! The overall invocation wall-clock budget is fixed by the invoking
//! scheduler, so the client enforces a per-request timeout well below it and
//! fails with a classified error rather than running unbounded.

pub mod client;
pub mod error;

pub use client::{HttpRemoteClient, RemoteClient, RemoteResponse};
pub use error::RemoteError;
