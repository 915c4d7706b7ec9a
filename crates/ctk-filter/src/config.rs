//! Filter configuration. The pattern tables are fixed; only the dedup threshold is tunable.

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::stage3_dedup::DEFAULT_SIMILARITY_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Minimum similarity ratio for a line to join a dedup run.
    pub similarity_threshold: f64,
}

impl FilterConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: FilterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // NaN fails the range check too
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(FilterError::InvalidThreshold(self.similarity_threshold));
        }
        Ok(())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}
