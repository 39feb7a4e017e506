//! ormeta Mapping - class metadata resolution
//!
//! This crate provides:
//! - The [`ClassMetadata`] model and the raw, class-local data it is built from
//! - Pluggable mapping drivers ([`MappingDriver`]) and platform capability
//!   queries ([`PlatformCapabilities`])
//! - The [`ClassMetadataFactory`], which walks a class hierarchy root-first,
//!   merges inherited mappings, resolves the identifier strategy and caches
//!   the result
//!
//! # Example
//!
//! ```rust
//! use ormeta_mapping::{
//!     ClassMetadataFactory, FieldMapping, InMemoryDriver, RawClassMetadata, StaticPlatform,
//! };
//! use ormeta_common::IdGeneratorType;
//! use std::sync::Arc;
//!
//! let driver = InMemoryDriver::new();
//! driver
//!     .add(
//!         RawClassMetadata::new("Person")
//!             .with_field(FieldMapping::new("id", "integer").as_id())
//!             .with_id_generator(IdGeneratorType::Auto),
//!     )
//!     .add(RawClassMetadata::new("Employee").with_parent("Person"));
//!
//! let factory = ClassMetadataFactory::new(Arc::new(driver), Arc::new(StaticPlatform::default()));
//! let employee = factory.get_metadata_for("Employee").unwrap();
//! assert_eq!(employee.root_class_name().as_str(), "Person");
//! assert_eq!(employee.id_generator_type(), IdGeneratorType::Table);
//! ```

pub mod driver;
pub mod factory;
pub mod metadata;
pub mod platform;

pub use driver::{InMemoryDriver, MappingDriver};
pub use factory::ClassMetadataFactory;
pub use metadata::{
    AssociationMapping, ClassMetadata, DEFAULT_DISCRIMINATOR_COLUMN, DiscriminatorColumn,
    FieldMapping, RawClassMetadata,
};
pub use platform::{PlatformCapabilities, StaticPlatform};
