//! Database platform capability queries
//!
//! The engine only needs to know which identifier strategies a platform
//! prefers and supports; everything else about the platform lives elsewhere.

use ormeta_common::PlatformConfig;

/// Capability queries of the target storage engine
pub trait PlatformCapabilities: Send + Sync {
    /// Platform name for logging/errors
    fn name(&self) -> &str;

    /// Whether identity columns are the preferred way to generate ids
    fn prefers_identity_columns(&self) -> bool;

    fn supports_identity_columns(&self) -> bool {
        true
    }

    fn supports_sequences(&self) -> bool {
        false
    }
}

/// Platform whose capabilities are fixed at construction
#[derive(Debug, Clone)]
pub struct StaticPlatform {
    name: String,
    prefers_identity_columns: bool,
    supports_identity_columns: bool,
    supports_sequences: bool,
}

impl StaticPlatform {
    /// Create a platform that supports identity columns but prefers nothing
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefers_identity_columns: false,
            supports_identity_columns: true,
            supports_sequences: false,
        }
    }

    #[must_use]
    pub fn with_prefers_identity_columns(mut self, prefers: bool) -> Self {
        self.prefers_identity_columns = prefers;
        self
    }

    #[must_use]
    pub fn with_identity_columns(mut self, supported: bool) -> Self {
        self.supports_identity_columns = supported;
        self
    }

    #[must_use]
    pub fn with_sequences(mut self, supported: bool) -> Self {
        self.supports_sequences = supported;
        self
    }
}

impl Default for StaticPlatform {
    fn default() -> Self {
        Self::from(&PlatformConfig::default())
    }
}

impl From<&PlatformConfig> for StaticPlatform {
    fn from(config: &PlatformConfig) -> Self {
        Self {
            name: config.name.clone(),
            prefers_identity_columns: config.prefers_identity_columns,
            supports_identity_columns: config.supports_identity_columns,
            supports_sequences: config.supports_sequences,
        }
    }
}

impl PlatformCapabilities for StaticPlatform {
    fn name(&self) -> &str {
        &self.name
    }

    fn prefers_identity_columns(&self) -> bool {
        self.prefers_identity_columns
    }

    fn supports_identity_columns(&self) -> bool {
        self.supports_identity_columns
    }

    fn supports_sequences(&self) -> bool {
        self.supports_sequences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_platform_builder() {
        let platform = StaticPlatform::new("postgresql")
            .with_sequences(true)
            .with_prefers_identity_columns(false);
        assert_eq!(platform.name(), "postgresql");
        assert!(platform.supports_sequences());
        assert!(platform.supports_identity_columns());
        assert!(!platform.prefers_identity_columns());
    }

    #[test]
    fn test_static_platform_from_config() {
        let config = PlatformConfig {
            name: "mysql".to_string(),
            prefers_identity_columns: true,
            supports_identity_columns: true,
            supports_sequences: false,
        };
        let platform = StaticPlatform::from(&config);
        assert_eq!(platform.name(), "mysql");
        assert!(platform.prefers_identity_columns());
        assert!(!platform.supports_sequences());

        assert_eq!(StaticPlatform::default().name(), "generic");
    }
}
