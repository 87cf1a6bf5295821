//! The trigger definition schema.
//!
//! A trigger is created at provisioning time, fired repeatedly by the
//! scheduler, never mutated, and removed at deprovisioning. The params are a
//! fixed payload forwarded verbatim on every firing; the registry does not
//! interpret them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A registered trigger: cadence, target method, static params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerDefinition {
    /// Unique rule name identifying this trigger.
    pub rule_name: String,
    /// When the trigger fires.
    pub schedule: crate::schedule::ScheduleExpression,
    /// The remote method the firing invokes.
    pub method: String,
    /// Static method-specific parameters, forwarded on every firing.
    #[serde(default)]
    pub params: Map<String, JsonValue>,
}

impl TriggerDefinition {
    /// Builds the invocation payload for one firing: the method name plus the
    /// static params as flattened sibling fields.
    #[must_use]
    pub fn invocation_payload(&self) -> JsonValue {
        let mut payload = self.params.clone();
        payload.insert(
            "method".to_string(),
            JsonValue::String(self.method.clone()),
        );
        JsonValue::Object(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleExpression;
    use serde_json::json;

    fn contracts_trigger() -> TriggerDefinition {
        TriggerDefinition {
            rule_name: "update-contracts-daily".to_string(),
            schedule: ScheduleExpression::parse("rate(1 day)").expect("schedule"),
            method: "update_contracts_table".to_string(),
            params: json!({
                "contracts_details": {
                    "underlying_symbol": "SPX",
                    "underlying_type": "index",
                    "exchange": "SMART",
                }
            })
            .as_object()
            .expect("object")
            .clone(),
        }
    }

    #[test]
    fn invocation_payload_flattens_params_beside_method() {
        let payload = contracts_trigger().invocation_payload();

        assert_eq!(payload["method"], "update_contracts_table");
        assert_eq!(
            payload["contracts_details"]["underlying_symbol"],
            "SPX"
        );
    }

    #[test]
    fn deserializes_without_params() {
        let trigger: TriggerDefinition = serde_json::from_value(json!({
            "rule_name": "refresh-orders-daily",
            "schedule": "cron(0 13 * * ? *)",
            "method": "refresh_orders",
        }))
        .expect("deserialize");

        assert!(trigger.params.is_empty());
        assert_eq!(
            trigger.invocation_payload(),
            json!({ "method": "refresh_orders" })
        );
    }
}
