//! Configuration types for ormeta
//!
//! This module defines the configuration consumed by the metadata factory
//! and the static platform used by tooling.

use crate::error::{Error, Result};
use crate::types::IdGeneratorType;
use serde::{Deserialize, Serialize};

/// Root configuration for ormeta
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Metadata factory configuration
    pub factory: FactoryConfig,
    /// Target platform capabilities
    pub platform: PlatformConfig,
}

impl Config {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.factory.validate()
    }
}

/// Metadata factory configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Strategy `auto` resolves to when the platform does not prefer
    /// identity columns (default: table)
    pub fallback_id_generator: IdGeneratorType,
    /// Reject strategies the platform cannot provide
    pub check_platform_support: bool,
    /// Maximum number of mapped classes in one inheritance chain
    pub max_hierarchy_depth: usize,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            fallback_id_generator: IdGeneratorType::Table,
            check_platform_support: true,
            max_hierarchy_depth: 64,
        }
    }
}

impl FactoryConfig {
    /// Set the fallback strategy
    #[must_use]
    pub const fn with_fallback_id_generator(mut self, strategy: IdGeneratorType) -> Self {
        self.fallback_id_generator = strategy;
        self
    }

    /// Enable or disable platform support checks
    #[must_use]
    pub const fn with_platform_checks(mut self, enabled: bool) -> Self {
        self.check_platform_support = enabled;
        self
    }

    /// Set the maximum hierarchy depth
    #[must_use]
    pub const fn with_max_hierarchy_depth(mut self, depth: usize) -> Self {
        self.max_hierarchy_depth = depth;
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        match self.fallback_id_generator {
            IdGeneratorType::Auto | IdGeneratorType::None => {
                return Err(Error::configuration(format!(
                    "fallback_id_generator cannot be {}",
                    self.fallback_id_generator
                )));
            }
            _ => {}
        }
        if self.max_hierarchy_depth == 0 {
            return Err(Error::configuration(
                "max_hierarchy_depth must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Capabilities of the target database platform
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Platform name used in logs and errors
    pub name: String,
    /// Platform prefers identity columns over other generators
    pub prefers_identity_columns: bool,
    /// Platform has identity / auto-increment columns
    pub supports_identity_columns: bool,
    /// Platform has native sequences
    pub supports_sequences: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            name: "generic".to_string(),
            prefers_identity_columns: false,
            supports_identity_columns: true,
            supports_sequences: false,
        }
    }
}
