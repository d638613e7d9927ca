//! Client configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do with a deposit whose quantity is not a decimal number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidQuantityPolicy {
    /// Fail the whole aggregation with `InvalidQuantity`
    #[default]
    Fail,
    /// Leave the deposit's contribution out of the totals and log a warning
    Skip,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid client config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("ladder_depth must be at least 1")]
    ZeroLadderDepth,
}

/// Configuration for the client computation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Handling of unparseable deposit quantities.
    pub invalid_quantity: InvalidQuantityPolicy,
    /// Price levels shown on each side of the ladder; `None` shows all.
    pub ladder_depth: Option<usize>,
}

impl ClientConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ladder_depth == Some(0) {
            return Err(ConfigError::ZeroLadderDepth);
        }
        Ok(())
    }
}
