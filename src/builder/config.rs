//! Calculator configuration.

use crate::builder::error::BuildError;
use crate::core::DEFAULT_CAPACITY;
use crate::machine::Variant;
use crate::store::{is_valid_key, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};

/// Settings for a calculator session.
///
/// Missing fields take their defaults when deserialized.
///
/// # Example
///
/// ```rust
/// use abacus::builder::CalculatorConfig;
/// use abacus::machine::Variant;
///
/// let config = CalculatorConfig::from_json(r#"{"variant": "basic"}"#).unwrap();
/// assert_eq!(config.variant, Variant::Basic);
/// assert_eq!(config.history_capacity, 20);
/// assert_eq!(config.storage_key, "calculatorHistory");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Which keypad and features are offered
    pub variant: Variant,
    /// Maximum number of history entries kept
    pub history_capacity: usize,
    /// Store slot holding the serialized history
    pub storage_key: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            history_capacity: DEFAULT_CAPACITY,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl CalculatorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.history_capacity == 0 {
            return Err(BuildError::ZeroCapacity);
        }
        if !is_valid_key(&self.storage_key) {
            return Err(BuildError::InvalidStorageKey(self.storage_key.clone()));
        }
        Ok(())
    }
}
