//! Trigger file loading.
//!
//! The provisioning layer materializes its trigger definitions as a JSON
//! array; this module loads them into a `ScheduleRegistry`, additionally
//! checking every target method against the dispatch table so a typo in
//! provisioning fails at startup instead of on the first firing.

use std::fmt;
use std::path::Path;
use tradebeat_dispatch::Method;
use tradebeat_registry::{RegistryError, ScheduleRegistry, TriggerDefinition};

/// Errors from loading a trigger file.
#[derive(Debug)]
pub enum TriggerLoadError {
    /// Reading the file failed.
    Io { path: String, reason: String },
    /// The file is not a JSON array of trigger definitions.
    Parse { path: String, reason: String },
    /// A trigger targets a method that is not in the dispatch table.
    UnknownMethod { rule_name: String, method: String },
    /// Registration failed (duplicate or empty rule name).
    Registry(RegistryError),
}

impl fmt::Display for TriggerLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, reason } => {
                write!(f, "failed to read trigger file '{path}': {reason}")
            }
            Self::Parse { path, reason } => {
                write!(f, "failed to parse trigger file '{path}': {reason}")
            }
            Self::UnknownMethod { rule_name, method } => {
                write!(f, "trigger '{rule_name}' targets unknown method '{method}'")
            }
            Self::Registry(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for TriggerLoadError {}

impl From<RegistryError> for TriggerLoadError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

/// Loads and validates a trigger file.
///
/// # Errors
///
/// Returns an error for unreadable or malformed files, unknown methods, and
/// duplicate rule names.
pub fn load(path: &Path) -> Result<ScheduleRegistry, TriggerLoadError> {
    let display = path.display().to_string();

    let contents = std::fs::read_to_string(path).map_err(|e| TriggerLoadError::Io {
        path: display.clone(),
        reason: e.to_string(),
    })?;

    let definitions: Vec<TriggerDefinition> =
        serde_json::from_str(&contents).map_err(|e| TriggerLoadError::Parse {
            path: display,
            reason: e.to_string(),
        })?;

    for definition in &definitions {
        if Method::parse(&definition.method).is_none() {
            return Err(TriggerLoadError::UnknownMethod {
                rule_name: definition.rule_name.clone(),
                method: definition.method.clone(),
            });
        }
    }

    Ok(ScheduleRegistry::from_definitions(definitions)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_triggers(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn loads_reference_trigger_set() {
        let file = write_triggers(
            r#"[
                {
                    "rule_name": "update-contracts-daily",
                    "schedule": "rate(1 day)",
                    "method": "update_contracts_table",
                    "params": {
                        "contracts_details": {
                            "underlying_symbol": "SPX",
                            "underlying_type": "index",
                            "exchange": "SMART"
                        }
                    }
                },
                {
                    "rule_name": "capture-account-summary-5m",
                    "schedule": "rate(5 minutes)",
                    "method": "capture_account_summary",
                    "params": { "account_number": "DUK273068" }
                },
                {
                    "rule_name": "refresh-orders-daily",
                    "schedule": "cron(0 13 * * ? *)",
                    "method": "refresh_orders"
                }
            ]"#,
        );

        let registry = load(file.path()).expect("load");

        assert_eq!(registry.len(), 3);
        let capture = registry.get("capture-account-summary-5m").expect("trigger");
        assert_eq!(capture.method, "capture_account_summary");
        assert_eq!(
            capture.params.get("account_number"),
            Some(&serde_json::json!("DUK273068"))
        );
    }

    #[test]
    fn rejects_unknown_method() {
        let file = write_triggers(
            r#"[{
                "rule_name": "bad",
                "schedule": "rate(5 minutes)",
                "method": "drop_all_tables"
            }]"#,
        );

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, TriggerLoadError::UnknownMethod { .. }));
        assert!(err.to_string().contains("drop_all_tables"));
    }

    #[test]
    fn rejects_duplicate_rule_names() {
        let file = write_triggers(
            r#"[
                { "rule_name": "dup", "schedule": "rate(5 minutes)", "method": "refresh_orders" },
                { "rule_name": "dup", "schedule": "rate(1 hour)", "method": "truncate_orders" }
            ]"#,
        );

        let err = load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            TriggerLoadError::Registry(RegistryError::DuplicateRule { .. })
        ));
    }

    #[test]
    fn rejects_invalid_schedule_expression() {
        let file = write_triggers(
            r#"[{
                "rule_name": "bad-schedule",
                "schedule": "whenever",
                "method": "refresh_orders"
            }]"#,
        );

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, TriggerLoadError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load(Path::new("/nonexistent/triggers.json")).unwrap_err();
        assert!(matches!(err, TriggerLoadError::Io { .. }));
    }
}
