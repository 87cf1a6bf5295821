//! Dispatch orchestration for the tradebeat dispatcher.
//!
//! This crate provides:
//!
//! - **Method**: the fixed table of remote methods and their backend routes
//! - **InvocationRequest**: the payload delivered for one trigger firing
//! - **Dispatcher**: validate, resolve credential, call backend, report
//! - **DispatchReport**: the structured per-invocation result
//!
//! A dispatcher execution is shared-nothing: it holds no mutable state, so
//! concurrent firings of overlapping triggers cannot interfere. Delivery is
//! assumed at-least-once; every method in the table must therefore be safe to
//! receive duplicate calls with the same payload within one scheduling
//! window. That contract belongs to the backend; the dispatcher performs no
//! deduplication and no internal retries.

pub mod dispatcher;
pub mod method;
pub mod report;
pub mod request;

pub use dispatcher::Dispatcher;
pub use method::Method;
pub use report::{CallStatus, DispatchReport, FailureKind};
pub use request::InvocationRequest;
