//! Error types for the registry crate.

use std::fmt;

/// Errors from schedule expression parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A `rate(...)` expression with a bad value or unit.
    InvalidRate { expression: String, reason: String },
    /// A `cron(...)` expression the cron parser rejected.
    InvalidCron { expression: String, reason: String },
    /// Neither `rate(...)` nor `cron(...)`.
    UnrecognizedForm { expression: String },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRate { expression, reason } => {
                write!(f, "invalid rate expression '{expression}': {reason}")
            }
            Self::InvalidCron { expression, reason } => {
                write!(f, "invalid cron expression '{expression}': {reason}")
            }
            Self::UnrecognizedForm { expression } => {
                write!(
                    f,
                    "unrecognized schedule expression '{expression}' \
                     (expected rate(...) or cron(...))"
                )
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Errors from trigger registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two triggers may not share a rule name.
    DuplicateRule { rule_name: String },
    /// Rule names identify triggers and cannot be empty.
    EmptyRuleName,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRule { rule_name } => {
                write!(f, "trigger rule '{rule_name}' is already registered")
            }
            Self::EmptyRuleName => write!(f, "trigger rule name cannot be empty"),
        }
    }
}

impl std::error::Error for RegistryError {}
