//! Trigger schema and schedule registry for the tradebeat dispatcher.
//!
//! This crate provides:
//!
//! - **ScheduleExpression**: parsed `rate(N unit)` / `cron(fields)` cadences
//! - **TriggerDefinition**: the shape every registered trigger must satisfy
//! - **ScheduleRegistry**: rule-name-unique collection of trigger definitions
//!
//! Firing is the scheduler's job (external or the binary's in-process loop);
//! this crate only owns the schema and its validation.

pub mod error;
pub mod registry;
pub mod schedule;
pub mod trigger;

pub use error::{RegistryError, ScheduleError};
pub use registry::ScheduleRegistry;
pub use schedule::{RateUnit, ScheduleExpression};
pub use trigger::TriggerDefinition;
