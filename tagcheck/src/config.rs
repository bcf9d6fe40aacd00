use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Declarative setup for a [`crate::Validator`], typically loaded from JSON.
///
/// ```json
/// { "schemas": ["signup", "profile"], "builtins": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Schema names to recognise from the start.
    pub schemas: Vec<String>,
    /// Seed the built-in rules.
    pub builtins: bool,
    /// Register [`crate::DEFAULT_SCHEMA`].
    pub default_schema: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            schemas: Vec::new(),
            builtins: true,
            default_schema: true,
        }
    }
}

impl ValidatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ValidatorConfig = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.schemas.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::EmptySchemaName);
        }
        Ok(())
    }
}
