//! ormeta Common - Shared types and utilities
//!
//! This crate provides the error type, configuration structures and the
//! hierarchy-wide enums used by the metadata engine and its tooling.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, FactoryConfig, PlatformConfig};
pub use error::{Error, Result};
pub use types::*;
