//! Error types for ormeta
//!
//! Every resolution failure names the offending class and the specific
//! conflict so callers can fail the enclosing operation with a useful message.

use crate::types::{ClassName, IdGeneratorType, InheritanceType};
use thiserror::Error;

/// Common result type for ormeta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for ormeta
#[derive(Debug, Error)]
pub enum Error {
    // Lookup errors
    #[error("no mapping found for class {class}")]
    MappingNotFound { class: ClassName },

    // Hierarchy configuration errors
    #[error(
        "class {class} declares inheritance type {declared}, but its root {root} uses {root_type}"
    )]
    InheritanceTypeConflict {
        class: ClassName,
        declared: InheritanceType,
        root: ClassName,
        root_type: InheritanceType,
    },

    #[error(
        "class {class} declares id generator {declared}, but its root {root} uses {root_type}"
    )]
    IdGeneratorConflict {
        class: ClassName,
        declared: IdGeneratorType,
        root: ClassName,
        root_type: IdGeneratorType,
    },

    #[error("class {class} maps {name} both as a field and as an association")]
    DuplicateFieldAssociationName { class: ClassName, name: String },

    #[error("class {class} is its own ancestor")]
    CircularInheritance { class: ClassName },

    #[error("hierarchy of class {class} is deeper than {max_depth} levels")]
    HierarchyTooDeep { class: ClassName, max_depth: usize },

    // Platform errors
    #[error("class {class} uses id generator {strategy}, which platform {platform} does not support")]
    UnsupportedIdGenerator {
        class: ClassName,
        strategy: IdGeneratorType,
        platform: String,
    },

    // Collaborator / internal errors
    #[error("driver error: {0}")]
    Driver(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a mapping not found error
    pub fn mapping_not_found(class: impl Into<ClassName>) -> Self {
        Self::MappingNotFound {
            class: class.into(),
        }
    }

    /// Create a driver error
    pub fn driver(msg: impl Into<String>) -> Self {
        Self::Driver(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this is a not found error
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::MappingNotFound { .. })
    }

    /// Check if this error is caused by an invalid mapping configuration
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InheritanceTypeConflict { .. }
                | Self::IdGeneratorConflict { .. }
                | Self::DuplicateFieldAssociationName { .. }
                | Self::CircularInheritance { .. }
                | Self::HierarchyTooDeep { .. }
                | Self::UnsupportedIdGenerator { .. }
                | Self::Configuration(_)
        )
    }

    /// Class the error is about, if it names one
    #[must_use]
    pub const fn class_name(&self) -> Option<&ClassName> {
        match self {
            Self::MappingNotFound { class }
            | Self::InheritanceTypeConflict { class, .. }
            | Self::IdGeneratorConflict { class, .. }
            | Self::DuplicateFieldAssociationName { class, .. }
            | Self::CircularInheritance { class }
            | Self::HierarchyTooDeep { class, .. }
            | Self::UnsupportedIdGenerator { class, .. } => Some(class),
            Self::Driver(_) | Self::Configuration(_) | Self::Serialization(_) => None,
        }
    }
}
