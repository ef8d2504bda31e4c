// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Arbiter configuration
//!
//! ```toml
//! auto_cleanup = true
//! max_resources = 1
//! preserve_active_resource = true
//! sample_interval = "30s"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Typed, defaulted arbiter options
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArbiterConfig {
    /// Run cleanup when a lease is detached
    pub auto_cleanup: bool,
    /// Warning threshold for the usage monitor
    pub max_resources: usize,
    /// Protect the most recently registered handle from cleanup
    pub preserve_active_resource: bool,
    /// How often the usage monitor samples
    #[serde(with = "humantime_serde")]
    pub sample_interval: Duration,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            auto_cleanup: true,
            max_resources: 1,
            preserve_active_resource: true,
            sample_interval: Duration::from_secs(30),
        }
    }
}

impl ArbiterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_cleanup(mut self, enabled: bool) -> Self {
        self.auto_cleanup = enabled;
        self
    }

    pub fn with_max_resources(mut self, max: usize) -> Self {
        self.max_resources = max;
        self
    }

    pub fn with_preserve_active_resource(mut self, enabled: bool) -> Self {
        self.preserve_active_resource = enabled;
        self
    }

    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_resources == 0 {
            return Err(ConfigError::Invalid(
                "max_resources must be at least 1".to_string(),
            ));
        }
        if self.sample_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "sample_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
