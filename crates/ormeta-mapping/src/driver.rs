//! Pluggable mapping driver trait and the in-memory driver
//!
//! A driver answers, for exactly one class, what that class declares. It
//! never merges anything; inheritance is the factory's job.

use crate::metadata::RawClassMetadata;
use ormeta_common::{ClassName, Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Source of raw, class-local mapping data
pub trait MappingDriver: Send + Sync {
    /// Driver name for logging
    fn name(&self) -> &str;

    /// Load the raw metadata declared by `class_name` alone
    ///
    /// Fails with [`Error::MappingNotFound`] when the class is not mapped.
    fn load_metadata(&self, class_name: &str) -> Result<RawClassMetadata>;

    /// Direct superclass of `class_name`, mapped or not
    ///
    /// Called for every class while the factory discovers a hierarchy, before
    /// any raw metadata is loaded, so it should answer without going through
    /// [`MappingDriver::load_metadata`].
    fn parent_class(&self, class_name: &str) -> Result<Option<ClassName>>;

    /// Whether `class_name` exists in the chain but carries no mapping
    fn is_transient(&self, _class_name: &str) -> bool {
        false
    }

    /// Every mapped class this driver knows about
    fn all_class_names(&self) -> Result<Vec<ClassName>> {
        Ok(Vec::new())
    }
}

/// In-memory driver holding already-parsed mapping data
///
/// Transient classes are recorded only by their parent link.
pub struct InMemoryDriver {
    /// Raw metadata indexed by class name
    classes: RwLock<HashMap<ClassName, RawClassMetadata>>,
    /// Unmapped classes and their superclass
    transient: RwLock<HashMap<ClassName, Option<ClassName>>>,
}

impl Default for InMemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDriver {
    /// Create a new empty driver
    pub fn new() -> Self {
        Self {
            classes: RwLock::new(HashMap::new()),
            transient: RwLock::new(HashMap::new()),
        }
    }

    /// Create a driver from a JSON array of raw class metadata
    pub fn from_json(json: &str) -> Result<Self> {
        let classes: Vec<RawClassMetadata> =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;

        let driver = Self::new();
        for raw in classes {
            driver.add(raw);
        }
        Ok(driver)
    }

    /// Register (or replace) the mapping of a class
    pub fn add(&self, raw: RawClassMetadata) -> &Self {
        self.transient.write().remove(raw.class_name.as_str());
        self.classes.write().insert(raw.class_name.clone(), raw);
        self
    }

    /// Register an unmapped class sitting in an inheritance chain
    pub fn add_transient(
        &self,
        class_name: impl Into<ClassName>,
        parent: Option<ClassName>,
    ) -> &Self {
        let class_name = class_name.into();
        self.classes.write().remove(class_name.as_str());
        self.transient.write().insert(class_name, parent);
        self
    }

    /// Number of mapped classes
    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    /// Check if no class is mapped
    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }
}

impl MappingDriver for InMemoryDriver {
    fn name(&self) -> &str {
        "memory"
    }

    fn load_metadata(&self, class_name: &str) -> Result<RawClassMetadata> {
        self.classes
            .read()
            .get(class_name)
            .cloned()
            .ok_or_else(|| Error::mapping_not_found(class_name))
    }

    fn parent_class(&self, class_name: &str) -> Result<Option<ClassName>> {
        if let Some(raw) = self.classes.read().get(class_name) {
            return Ok(raw.parent_class.clone());
        }
        self.transient
            .read()
            .get(class_name)
            .cloned()
            .ok_or_else(|| Error::mapping_not_found(class_name))
    }

    fn is_transient(&self, class_name: &str) -> bool {
        self.transient.read().contains_key(class_name)
    }

    fn all_class_names(&self) -> Result<Vec<ClassName>> {
        let mut names: Vec<ClassName> = self.classes.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FieldMapping;

    #[test]
    fn test_load_and_parent() {
        let driver = InMemoryDriver::new();
        driver
            .add(RawClassMetadata::new("Person").with_field(FieldMapping::new("name", "string")))
            .add(RawClassMetadata::new("Employee").with_parent("Person"));

        assert_eq!(driver.len(), 2);
        assert_eq!(driver.name(), "memory");
        assert_eq!(driver.load_metadata("Person").unwrap().fields.len(), 1);
        assert_eq!(
            driver.parent_class("Employee").unwrap(),
            Some(ClassName::from("Person"))
        );
        assert_eq!(driver.parent_class("Person").unwrap(), None);
    }

    #[test]
    fn test_missing_class() {
        let driver = InMemoryDriver::new();
        assert!(driver.is_empty());
        let err = driver.load_metadata("Ghost").unwrap_err();
        assert!(err.is_not_found());
        assert!(driver.parent_class("Ghost").unwrap_err().is_not_found());
    }

    #[test]
    fn test_transient_class() {
        let driver = InMemoryDriver::new();
        driver
            .add(RawClassMetadata::new("Person"))
            .add_transient("Timestamped", Some("Person".into()))
            .add(RawClassMetadata::new("Employee").with_parent("Timestamped"));

        assert!(driver.is_transient("Timestamped"));
        assert!(!driver.is_transient("Person"));
        assert!(driver.load_metadata("Timestamped").unwrap_err().is_not_found());
        assert_eq!(
            driver.parent_class("Timestamped").unwrap(),
            Some(ClassName::from("Person"))
        );
        assert_eq!(
            driver.all_class_names().unwrap(),
            vec![ClassName::from("Employee"), ClassName::from("Person")]
        );
    }

    #[test]
    fn test_from_json() {
        let driver = InMemoryDriver::from_json(
            r#"[
                {"className": "Person", "idGeneratorType": "auto",
                 "fields": [{"fieldName": "id", "type": "integer", "id": true}]},
                {"className": "Employee", "parentClass": "Person"}
            ]"#,
        )
        .unwrap();
        assert_eq!(driver.len(), 2);
        assert!(driver.load_metadata("Person").unwrap().fields[0].id);

        let err = InMemoryDriver::from_json("{not json").err().unwrap();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
