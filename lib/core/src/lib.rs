//! Core domain types and utilities for the tradebeat dispatcher.
//!
//! This crate provides the foundational types shared by every other crate:
//! the `Result` alias used for layered error context and the strongly-typed
//! invocation identifier.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::InvocationId;
