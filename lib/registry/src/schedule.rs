//! Schedule expressions.
//!
//! Two syntactic forms are accepted, matching what the provisioning layer's
//! scheduler understands:
//!
//! - `rate(N unit)`, e.g. `rate(5 minutes)` or `rate(1 day)`
//! - `cron(fields)`: 5 standard fields, or 6 with a trailing year field and
//!   `?` wildcards as schedulers in the wild emit them
//!
//! Cron fields are validated at parse time with the `cron` crate after
//! normalizing to its 7-field seconds-first form.

use crate::error::ScheduleError;
use chrono::{DateTime, Duration, Utc};
use cron::Schedule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The unit of a `rate(...)` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    Minutes,
    Hours,
    Days,
}

impl RateUnit {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "minute" | "minutes" => Some(Self::Minutes),
            "hour" | "hours" => Some(Self::Hours),
            "day" | "days" => Some(Self::Days),
            _ => None,
        }
    }

    fn label(self, value: u32) -> &'static str {
        match (self, value) {
            (Self::Minutes, 1) => "minute",
            (Self::Minutes, _) => "minutes",
            (Self::Hours, 1) => "hour",
            (Self::Hours, _) => "hours",
            (Self::Days, 1) => "day",
            (Self::Days, _) => "days",
        }
    }
}

/// A parsed, validated schedule expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScheduleExpression {
    /// Fixed-interval cadence.
    Rate { value: u32, unit: RateUnit },
    /// Cron-pinned cadence. The inner field string is kept as written.
    Cron { fields: String },
}

/// Converts scheduler-style cron fields to the `cron` crate's 7-field form.
///
/// Standard cron: `min hour dom month dow`
/// Scheduler cron: `min hour dom month dow year`, with `?` wildcards
fn normalize_cron_fields(fields: &str) -> String {
    let cleaned = fields.replace('?', "*");
    let count = cleaned.split_whitespace().count();
    match count {
        5 => format!("0 {cleaned} *"),
        6 => format!("0 {cleaned}"),
        _ => cleaned,
    }
}

impl ScheduleExpression {
    /// Parses a schedule expression.
    ///
    /// # Errors
    ///
    /// Returns an error for anything other than a well-formed `rate(...)` or
    /// `cron(...)` expression.
    pub fn parse(expression: &str) -> Result<Self, ScheduleError> {
        let trimmed = expression.trim();

        if let Some(inner) = trimmed
            .strip_prefix("rate(")
            .and_then(|s| s.strip_suffix(')'))
        {
            return Self::parse_rate(trimmed, inner);
        }

        if let Some(inner) = trimmed
            .strip_prefix("cron(")
            .and_then(|s| s.strip_suffix(')'))
        {
            return Self::parse_cron(trimmed, inner);
        }

        Err(ScheduleError::UnrecognizedForm {
            expression: trimmed.to_string(),
        })
    }

    fn parse_rate(expression: &str, inner: &str) -> Result<Self, ScheduleError> {
        let invalid = |reason: &str| ScheduleError::InvalidRate {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = inner.split_whitespace();
        let (Some(value), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid("expected '<value> <unit>'"));
        };

        let value: u32 = value
            .parse()
            .map_err(|_| invalid("value must be a positive integer"))?;
        if value == 0 {
            return Err(invalid("value must be at least 1"));
        }

        let unit = RateUnit::parse(unit)
            .ok_or_else(|| invalid("unit must be minute(s), hour(s), or day(s)"))?;

        Ok(Self::Rate { value, unit })
    }

    fn parse_cron(expression: &str, inner: &str) -> Result<Self, ScheduleError> {
        let fields = inner.trim();
        let count = fields.split_whitespace().count();
        if !(5..=6).contains(&count) {
            return Err(ScheduleError::InvalidCron {
                expression: expression.to_string(),
                reason: format!("expected 5 or 6 fields, got {count}"),
            });
        }

        Schedule::from_str(&normalize_cron_fields(fields)).map_err(|e| {
            ScheduleError::InvalidCron {
                expression: expression.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self::Cron {
            fields: fields.to_string(),
        })
    }

    /// The next firing time strictly after the given instant.
    ///
    /// Rate schedules are interval-from-now rather than wall-clock-aligned,
    /// matching the scheduler this mirrors. Returns `None` only for a cron
    /// schedule with no future occurrence (e.g. a pinned year in the past).
    #[must_use]
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Rate { value, unit } => {
                let interval = match unit {
                    RateUnit::Minutes => Duration::minutes(i64::from(*value)),
                    RateUnit::Hours => Duration::hours(i64::from(*value)),
                    RateUnit::Days => Duration::days(i64::from(*value)),
                };
                Some(after + interval)
            }
            Self::Cron { fields } => {
                // Validated at parse time, so re-parsing cannot fail.
                let schedule = Schedule::from_str(&normalize_cron_fields(fields)).ok()?;
                schedule.after(&after).next()
            }
        }
    }
}

impl fmt::Display for ScheduleExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rate { value, unit } => {
                write!(f, "rate({value} {})", unit.label(*value))
            }
            Self::Cron { fields } => write!(f, "cron({fields})"),
        }
    }
}

impl FromStr for ScheduleExpression {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ScheduleExpression {
    type Error = ScheduleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ScheduleExpression> for String {
    fn from(expression: ScheduleExpression) -> Self {
        expression.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rate_expressions() {
        assert_eq!(
            ScheduleExpression::parse("rate(5 minutes)").expect("parse"),
            ScheduleExpression::Rate {
                value: 5,
                unit: RateUnit::Minutes,
            }
        );
        assert_eq!(
            ScheduleExpression::parse("rate(1 day)").expect("parse"),
            ScheduleExpression::Rate {
                value: 1,
                unit: RateUnit::Days,
            }
        );
    }

    #[test]
    fn parses_scheduler_style_cron() {
        let expr = ScheduleExpression::parse("cron(0 13 * * ? *)").expect("parse");
        assert_eq!(
            expr,
            ScheduleExpression::Cron {
                fields: "0 13 * * ? *".to_string(),
            }
        );
    }

    #[test]
    fn parses_standard_five_field_cron() {
        assert!(ScheduleExpression::parse("cron(30 9 * * 1-5)").is_ok());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            ScheduleExpression::parse("every 5 minutes"),
            Err(ScheduleError::UnrecognizedForm { .. })
        ));
        assert!(matches!(
            ScheduleExpression::parse("rate(0 minutes)"),
            Err(ScheduleError::InvalidRate { .. })
        ));
        assert!(matches!(
            ScheduleExpression::parse("rate(5 fortnights)"),
            Err(ScheduleError::InvalidRate { .. })
        ));
        assert!(matches!(
            ScheduleExpression::parse("cron(99 99 * * *)"),
            Err(ScheduleError::InvalidCron { .. })
        ));
        assert!(matches!(
            ScheduleExpression::parse("cron(* *)"),
            Err(ScheduleError::InvalidCron { .. })
        ));
    }

    #[test]
    fn rate_next_after_adds_interval() {
        let expr = ScheduleExpression::parse("rate(5 minutes)").expect("parse");
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        assert_eq!(
            expr.next_after(now),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 5, 0).unwrap())
        );
    }

    #[test]
    fn cron_next_after_pins_to_schedule() {
        let expr = ScheduleExpression::parse("cron(0 13 * * ? *)").expect("parse");
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        assert_eq!(
            expr.next_after(now),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap())
        );

        // Already past today's firing: next is tomorrow.
        let later = Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap();
        assert_eq!(
            expr.next_after(later),
            Some(Utc.with_ymd_and_hms(2024, 3, 2, 13, 0, 0).unwrap())
        );
    }

    #[test]
    fn serde_roundtrips_through_string_form() {
        let expr = ScheduleExpression::parse("rate(1 day)").expect("parse");
        let json = serde_json::to_string(&expr).expect("serialize");
        assert_eq!(json, "\"rate(1 day)\"");

        let parsed: ScheduleExpression = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, expr);

        let err = serde_json::from_str::<ScheduleExpression>("\"whenever\"");
        assert!(err.is_err());
    }
}
