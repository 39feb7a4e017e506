//! Core type definitions for ormeta
//!
//! This module defines the class identifier and the hierarchy-wide enums
//! (inheritance type, identifier generation strategy) shared by every
//! component of the metadata engine.

use crate::error::Error;
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Fully qualified name of a mapped class, the key of the metadata cache
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
#[display("{_0}")]
pub struct ClassName(String);

impl ClassName {
    /// Create a new class name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the class name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, e.g. `User` for `App\Entity\User` or `app::User`
    #[must_use]
    pub fn short_name(&self) -> &str {
        let tail = self.0.rsplit('\\').next().unwrap_or(&self.0);
        tail.rsplit("::").next().unwrap_or(tail)
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassName({})", self.0)
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<&String> for ClassName {
    fn from(name: &String) -> Self {
        Self(name.clone())
    }
}

impl Borrow<str> for ClassName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How a class hierarchy is laid out in tables
///
/// Hierarchy-wide: set by the root and propagated to every descendant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InheritanceType {
    /// No mapped inheritance
    #[default]
    None,
    /// Whole hierarchy in one table, rows told apart by a discriminator
    SingleTable,
    /// One table per class, joined on the primary key
    #[serde(alias = "joinedTable")]
    Joined,
    /// One self-contained table per concrete class
    TablePerClass,
}

impl InheritanceType {
    /// Get the canonical name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::SingleTable => "singleTable",
            Self::Joined => "joined",
            Self::TablePerClass => "tablePerClass",
        }
    }

    /// Whether rows of this hierarchy need a discriminator column
    #[must_use]
    pub const fn uses_discriminator(&self) -> bool {
        matches!(self, Self::SingleTable | Self::Joined)
    }
}

impl fmt::Display for InheritanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InheritanceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "singleTable" => Ok(Self::SingleTable),
            "joined" | "joinedTable" => Ok(Self::Joined),
            "tablePerClass" => Ok(Self::TablePerClass),
            other => Err(Error::configuration(format!(
                "unknown inheritance type: {other}"
            ))),
        }
    }
}

/// Identifier generation strategy
///
/// `Auto` is a placeholder resolved against the platform; it never survives
/// resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdGeneratorType {
    /// Identifiers are assigned by the application
    #[default]
    None,
    /// Pick the best strategy for the platform
    Auto,
    /// Database identity / auto-increment column
    Identity,
    /// Database sequence
    Sequence,
    /// Auxiliary table emulating a sequence
    Table,
    /// User supplied generator
    Custom,
}

impl IdGeneratorType {
    /// Get the canonical name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Auto => "auto",
            Self::Identity => "identity",
            Self::Sequence => "sequence",
            Self::Table => "table",
            Self::Custom => "custom",
        }
    }

    /// Whether identifiers are produced by the persistence layer
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether this is the unresolved placeholder
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl fmt::Display for IdGeneratorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdGeneratorType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "auto" => Ok(Self::Auto),
            "identity" => Ok(Self::Identity),
            "sequence" => Ok(Self::Sequence),
            "table" => Ok(Self::Table),
            "custom" => Ok(Self::Custom),
            other => Err(Error::configuration(format!(
                "unknown id generator type: {other}"
            ))),
        }
    }
}

/// Cardinality of an association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssociationKind {
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
}

impl AssociationKind {
    /// Whether the association holds a collection
    #[must_use]
    pub const fn is_to_many(&self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OneToOne => "oneToOne",
            Self::ManyToOne => "manyToOne",
            Self::OneToMany => "oneToMany",
            Self::ManyToMany => "manyToMany",
        };
        f.write_str(s)
    }
}

/// Lifecycle of one class metadata instance
///
/// Only ever moves forward: `Unresolved -> Resolving -> Resolved`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionState {
    /// Built from raw driver data, nothing inherited yet
    #[default]
    Unresolved,
    /// Being merged as part of an active hierarchy pass
    Resolving,
    /// Cached and immutable
    Resolved,
}
