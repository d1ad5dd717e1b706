// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_NAME: &str = "Labbable";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);
pub const DEFAULT_ATTACH_HINT: &str = "labbable.attach(server)";
pub const DEFAULT_INIT_HINT: &str = "server.initialize() or labbable.attach(server)";

/// Coordinator configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabbableConfig {
    /// Name used in timeout messages
    pub name: String,
    /// Timeout for waits that don't set their own (`None` or zero waits forever)
    #[serde(with = "humantime_serde")]
    pub default_timeout: Option<Duration>,
    /// Call suggested when an immediate wait times out
    pub attach_hint: String,
    /// Call suggested when an init wait times out
    pub init_hint: String,
}

impl Default for LabbableConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            default_timeout: Some(DEFAULT_TIMEOUT),
            attach_hint: DEFAULT_ATTACH_HINT.to_string(),
            init_hint: DEFAULT_INIT_HINT.to_string(),
        }
    }
}

impl LabbableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Waits without an explicit timeout wait forever
    pub fn without_default_timeout(mut self) -> Self {
        self.default_timeout = None;
        self
    }

    pub fn with_hints(mut self, attach: impl Into<String>, init: impl Into<String>) -> Self {
        self.attach_hint = attach.into();
        self.init_hint = init.into();
        self
    }

    /// Default timeout with zero normalized to `None`
    pub fn effective_default_timeout(&self) -> Option<Duration> {
        self.default_timeout.filter(|d| !d.is_zero())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
