//! The rule-name-unique collection of trigger definitions.

use crate::error::RegistryError;
use crate::trigger::TriggerDefinition;
use std::collections::BTreeMap;

/// The set of registered triggers.
///
/// Conceptually owned by the provisioning layer; the dispatcher binary builds
/// one at startup from its trigger file and treats it as immutable thereafter.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRegistry {
    triggers: BTreeMap<String, TriggerDefinition>,
}

impl ScheduleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a trigger.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty or already-registered rule name.
    pub fn register(&mut self, trigger: TriggerDefinition) -> Result<(), RegistryError> {
        if trigger.rule_name.is_empty() {
            return Err(RegistryError::EmptyRuleName);
        }
        if self.triggers.contains_key(&trigger.rule_name) {
            return Err(RegistryError::DuplicateRule {
                rule_name: trigger.rule_name,
            });
        }
        self.triggers.insert(trigger.rule_name.clone(), trigger);
        Ok(())
    }

    /// Builds a registry from a list of definitions.
    ///
    /// # Errors
    ///
    /// Returns the first registration error encountered.
    pub fn from_definitions(
        definitions: Vec<TriggerDefinition>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Looks up a trigger by rule name.
    #[must_use]
    pub fn get(&self, rule_name: &str) -> Option<&TriggerDefinition> {
        self.triggers.get(rule_name)
    }

    /// Iterates over all registered triggers.
    pub fn iter(&self) -> impl Iterator<Item = &TriggerDefinition> {
        self.triggers.values()
    }

    /// Number of registered triggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Whether the registry has no triggers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}
