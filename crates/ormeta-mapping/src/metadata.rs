//! Class metadata model
//!
//! [`RawClassMetadata`] is what a driver knows about exactly one class.
//! [`ClassMetadata`] is the merged, inheritance-aware view the factory
//! builds from it and caches.

use ormeta_common::{
    AssociationKind, ClassName, Error, IdGeneratorType, InheritanceType, ResolutionState, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column used when a discriminated hierarchy does not declare one
pub const DEFAULT_DISCRIMINATOR_COLUMN: &str = "dtype";

/// Mapping of a persistent field to a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    /// Field name on the class
    pub field_name: String,
    /// Mapping type name (e.g. "string", "integer")
    #[serde(rename = "type")]
    pub type_name: String,
    /// Column name, defaults to the field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    /// Part of the identifier
    #[serde(default)]
    pub id: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Class that declared this field when it was copied down from an ancestor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<ClassName>,
}

impl FieldMapping {
    /// Create a new field mapping
    pub fn new(field_name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            type_name: type_name.into(),
            column_name: None,
            id: false,
            nullable: false,
            unique: false,
            length: None,
            inherited_from: None,
        }
    }

    /// Set the column name
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column_name = Some(column.into());
        self
    }

    /// Mark the field as (part of) the identifier
    #[must_use]
    pub fn as_id(mut self) -> Self {
        self.id = true;
        self
    }

    /// Mark the column nullable
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column unique
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Set the column length
    #[must_use]
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Column name, falling back to the field name
    #[must_use]
    pub fn column_name(&self) -> &str {
        self.column_name.as_deref().unwrap_or(&self.field_name)
    }
}

/// Mapping of an association to another class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationMapping {
    /// Field name on the class
    pub field_name: String,
    /// Class on the other side
    pub target_entity: ClassName,
    /// Cardinality
    pub kind: AssociationKind,
    /// Owning-side field on the target (set on the inverse side only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_by: Option<String>,
    /// Inverse-side field on the target (set on the owning side only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inversed_by: Option<String>,
    /// Class that declared this association when it was copied down from an ancestor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<ClassName>,
}

impl AssociationMapping {
    /// Create a new association mapping
    pub fn new(
        field_name: impl Into<String>,
        target_entity: impl Into<ClassName>,
        kind: AssociationKind,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            target_entity: target_entity.into(),
            kind,
            mapped_by: None,
            inversed_by: None,
            inherited_from: None,
        }
    }

    pub fn one_to_one(field_name: impl Into<String>, target: impl Into<ClassName>) -> Self {
        Self::new(field_name, target, AssociationKind::OneToOne)
    }

    pub fn many_to_one(field_name: impl Into<String>, target: impl Into<ClassName>) -> Self {
        Self::new(field_name, target, AssociationKind::ManyToOne)
    }

    pub fn one_to_many(field_name: impl Into<String>, target: impl Into<ClassName>) -> Self {
        Self::new(field_name, target, AssociationKind::OneToMany)
    }

    pub fn many_to_many(field_name: impl Into<String>, target: impl Into<ClassName>) -> Self {
        Self::new(field_name, target, AssociationKind::ManyToMany)
    }

    /// Make this the inverse side, owned by `field` on the target
    #[must_use]
    pub fn with_mapped_by(mut self, field: impl Into<String>) -> Self {
        self.mapped_by = Some(field.into());
        self
    }

    /// Make this the owning side, with `field` as the inverse on the target
    #[must_use]
    pub fn with_inversed_by(mut self, field: impl Into<String>) -> Self {
        self.inversed_by = Some(field.into());
        self
    }

    /// The owning side is the one without `mapped_by`
    #[must_use]
    pub const fn is_owning_side(&self) -> bool {
        self.mapped_by.is_none()
    }

    #[must_use]
    pub const fn is_to_many(&self) -> bool {
        self.kind.is_to_many()
    }
}

/// Discriminator column of a single-table or joined hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscriminatorColumn {
    pub name: String,
    #[serde(rename = "type", default = "default_discriminator_type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

fn default_discriminator_type() -> String {
    "string".to_string()
}

impl DiscriminatorColumn {
    /// Create a string discriminator column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: default_discriminator_type(),
            length: None,
        }
    }

    /// Set the column type
    #[must_use]
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }
}

impl Default for DiscriminatorColumn {
    fn default() -> Self {
        Self {
            name: DEFAULT_DISCRIMINATOR_COLUMN.to_string(),
            type_name: default_discriminator_type(),
            length: Some(255),
        }
    }
}

/// Class-local mapping data as returned by a driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClassMetadata {
    pub class_name: ClassName,
    /// Direct superclass, mapped or not
    #[serde(default, alias = "parent", skip_serializing_if = "Option::is_none")]
    pub parent_class: Option<ClassName>,
    #[serde(default)]
    pub fields: Vec<FieldMapping>,
    #[serde(default)]
    pub associations: Vec<AssociationMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inheritance_type: Option<InheritanceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_generator_type: Option<IdGeneratorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator_column: Option<DiscriminatorColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator_value: Option<String>,
}

impl RawClassMetadata {
    /// Create empty raw metadata for a class
    pub fn new(class_name: impl Into<ClassName>) -> Self {
        Self {
            class_name: class_name.into(),
            parent_class: None,
            fields: Vec::new(),
            associations: Vec::new(),
            inheritance_type: None,
            id_generator_type: None,
            table_name: None,
            discriminator_column: None,
            discriminator_value: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<ClassName>) -> Self {
        self.parent_class = Some(parent.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldMapping) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_association(mut self, association: AssociationMapping) -> Self {
        self.associations.push(association);
        self
    }

    #[must_use]
    pub fn with_inheritance_type(mut self, inheritance_type: InheritanceType) -> Self {
        self.inheritance_type = Some(inheritance_type);
        self
    }

    #[must_use]
    pub fn with_id_generator(mut self, strategy: IdGeneratorType) -> Self {
        self.id_generator_type = Some(strategy);
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table_name = Some(table.into());
        self
    }

    #[must_use]
    pub fn with_discriminator_column(mut self, column: DiscriminatorColumn) -> Self {
        self.discriminator_column = Some(column);
        self
    }

    #[must_use]
    pub fn with_discriminator_value(mut self, value: impl Into<String>) -> Self {
        self.discriminator_value = Some(value.into());
        self
    }
}

/// Persistence metadata of one mapped class
///
/// Field and association names are unique and disjoint. Once published by
/// the factory an instance is shared behind an `Arc` and never mutated again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMetadata {
    name: ClassName,
    /// Mapped ancestors, nearest first, root last
    parent_classes: Vec<ClassName>,
    root_class_name: ClassName,
    inheritance_type: InheritanceType,
    #[serde(skip)]
    declared_inheritance_type: Option<InheritanceType>,
    id_generator_type: IdGeneratorType,
    #[serde(skip)]
    declared_id_generator_type: Option<IdGeneratorType>,
    identifier: Vec<String>,
    table_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    discriminator_column: Option<DiscriminatorColumn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discriminator_value: Option<String>,
    field_mappings: BTreeMap<String, FieldMapping>,
    association_mappings: BTreeMap<String, AssociationMapping>,
    state: ResolutionState,
}

impl ClassMetadata {
    /// Create empty, unresolved metadata for a root class
    pub fn new(name: impl Into<ClassName>) -> Self {
        let name = name.into();
        Self {
            root_class_name: name.clone(),
            table_name: name.short_name().to_string(),
            name,
            parent_classes: Vec::new(),
            inheritance_type: InheritanceType::None,
            declared_inheritance_type: None,
            id_generator_type: IdGeneratorType::None,
            declared_id_generator_type: None,
            identifier: Vec::new(),
            discriminator_column: None,
            discriminator_value: None,
            field_mappings: BTreeMap::new(),
            association_mappings: BTreeMap::new(),
            state: ResolutionState::Unresolved,
        }
    }

    /// Build unresolved metadata from class-local driver data
    pub fn from_raw(raw: RawClassMetadata) -> Result<Self> {
        let mut metadata = Self::new(raw.class_name);

        if let Some(inheritance_type) = raw.inheritance_type {
            metadata.set_inheritance_type(inheritance_type);
        }
        if let Some(strategy) = raw.id_generator_type {
            metadata.set_id_generator_type(strategy);
        }
        if let Some(table) = raw.table_name {
            metadata.table_name = table;
        }
        metadata.discriminator_column = raw.discriminator_column;
        metadata.discriminator_value = raw.discriminator_value;

        for field in raw.fields {
            metadata.map_field(field)?;
        }
        for association in raw.associations {
            metadata.map_association(association)?;
        }

        Ok(metadata)
    }

    // =========== Identity ===========

    #[must_use]
    pub const fn name(&self) -> &ClassName {
        &self.name
    }

    /// Mapped ancestors, nearest first, root last
    #[must_use]
    pub fn parent_classes(&self) -> &[ClassName] {
        &self.parent_classes
    }

    #[must_use]
    pub const fn root_class_name(&self) -> &ClassName {
        &self.root_class_name
    }

    /// Whether this class has no mapped ancestor
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_classes.is_empty()
    }

    /// Whole chain from the root down to this class
    #[must_use]
    pub fn hierarchy(&self) -> Vec<ClassName> {
        let mut chain: Vec<ClassName> = self.parent_classes.iter().rev().cloned().collect();
        chain.push(self.name.clone());
        chain
    }

    #[must_use]
    pub const fn state(&self) -> ResolutionState {
        self.state
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.state == ResolutionState::Resolved
    }

    // =========== Hierarchy-wide settings ===========

    #[must_use]
    pub const fn inheritance_type(&self) -> InheritanceType {
        self.inheritance_type
    }

    /// Inheritance type this class declared itself, if any
    #[must_use]
    pub const fn declared_inheritance_type(&self) -> Option<InheritanceType> {
        self.declared_inheritance_type
    }

    pub fn set_inheritance_type(&mut self, inheritance_type: InheritanceType) {
        self.declared_inheritance_type = Some(inheritance_type);
        self.inheritance_type = inheritance_type;
    }

    #[must_use]
    pub const fn id_generator_type(&self) -> IdGeneratorType {
        self.id_generator_type
    }

    /// Id generator this class declared itself, if any
    #[must_use]
    pub const fn declared_id_generator_type(&self) -> Option<IdGeneratorType> {
        self.declared_id_generator_type
    }

    pub fn set_id_generator_type(&mut self, strategy: IdGeneratorType) {
        self.declared_id_generator_type = Some(strategy);
        self.id_generator_type = strategy;
    }

    /// Whether identifiers are produced by the persistence layer
    #[must_use]
    pub const fn uses_id_generator(&self) -> bool {
        self.id_generator_type.is_generated()
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn set_table_name(&mut self, table: impl Into<String>) {
        self.table_name = table.into();
    }

    #[must_use]
    pub const fn discriminator_column(&self) -> Option<&DiscriminatorColumn> {
        self.discriminator_column.as_ref()
    }

    pub fn set_discriminator_column(&mut self, column: DiscriminatorColumn) {
        self.discriminator_column = Some(column);
    }

    #[must_use]
    pub fn discriminator_value(&self) -> Option<&str> {
        self.discriminator_value.as_deref()
    }

    pub fn set_discriminator_value(&mut self, value: impl Into<String>) {
        self.discriminator_value = Some(value.into());
    }

    // =========== Identifier ===========

    /// Identifier field names in declaration order, inherited ones first
    #[must_use]
    pub fn identifier(&self) -> &[String] {
        &self.identifier
    }

    #[must_use]
    pub fn is_identifier(&self, field_name: &str) -> bool {
        self.identifier.iter().any(|f| f == field_name)
    }

    /// The identifier field when the identifier is not composite
    #[must_use]
    pub fn single_identifier_field(&self) -> Option<&str> {
        match self.identifier.as_slice() {
            [field] => Some(field),
            _ => None,
        }
    }

    // =========== Fields ===========

    /// Map a field, replacing an existing field of the same name in place
    pub fn map_field(&mut self, mapping: FieldMapping) -> Result<()> {
        if self.association_mappings.contains_key(&mapping.field_name) {
            return Err(Error::DuplicateFieldAssociationName {
                class: self.name.clone(),
                name: mapping.field_name,
            });
        }

        let name = mapping.field_name.clone();
        if mapping.id {
            if !self.is_identifier(&name) {
                self.identifier.push(name.clone());
            }
        } else {
            self.identifier.retain(|f| f != &name);
        }
        self.field_mappings.insert(name, mapping);
        Ok(())
    }

    #[must_use]
    pub fn has_field(&self, field_name: &str) -> bool {
        self.field_mappings.contains_key(field_name)
    }

    #[must_use]
    pub fn field_mapping(&self, field_name: &str) -> Option<&FieldMapping> {
        self.field_mappings.get(field_name)
    }

    /// All field mappings ordered by field name
    pub fn field_mappings(&self) -> impl Iterator<Item = &FieldMapping> {
        self.field_mappings.values()
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.field_mappings.keys().map(String::as_str).collect()
    }

    /// Whether the field was copied down from an ancestor
    #[must_use]
    pub fn is_inherited_field(&self, field_name: &str) -> bool {
        self.field_mappings
            .get(field_name)
            .is_some_and(|f| f.inherited_from.is_some())
    }

    // =========== Associations ===========

    /// Map an association, replacing an existing one of the same name in place
    pub fn map_association(&mut self, mapping: AssociationMapping) -> Result<()> {
        if self.field_mappings.contains_key(&mapping.field_name) {
            return Err(Error::DuplicateFieldAssociationName {
                class: self.name.clone(),
                name: mapping.field_name,
            });
        }
        self.association_mappings
            .insert(mapping.field_name.clone(), mapping);
        Ok(())
    }

    #[must_use]
    pub fn has_association(&self, field_name: &str) -> bool {
        self.association_mappings.contains_key(field_name)
    }

    #[must_use]
    pub fn association_mapping(&self, field_name: &str) -> Option<&AssociationMapping> {
        self.association_mappings.get(field_name)
    }

    /// All association mappings ordered by field name
    pub fn association_mappings(&self) -> impl Iterator<Item = &AssociationMapping> {
        self.association_mappings.values()
    }

    #[must_use]
    pub fn association_count(&self) -> usize {
        self.association_mappings.len()
    }

    /// Whether the association was copied down from an ancestor
    #[must_use]
    pub fn is_inherited_association(&self, field_name: &str) -> bool {
        self.association_mappings
            .get(field_name)
            .is_some_and(|a| a.inherited_from.is_some())
    }

    // =========== Factory-side mutation ===========

    pub(crate) fn set_parent_classes(&mut self, parents: Vec<ClassName>) {
        self.parent_classes = parents;
    }

    pub(crate) fn set_root_class_name(&mut self, root: ClassName) {
        self.root_class_name = root;
    }

    pub(crate) fn set_resolved_inheritance_type(&mut self, inheritance_type: InheritanceType) {
        self.inheritance_type = inheritance_type;
    }

    pub(crate) fn set_resolved_id_generator_type(&mut self, strategy: IdGeneratorType) {
        self.id_generator_type = strategy;
    }

    /// Copy an ancestor's field down unless this class overrides it
    pub(crate) fn inherit_field(&mut self, mapping: &FieldMapping, declarer: &ClassName) -> Result<()> {
        if self.association_mappings.contains_key(&mapping.field_name) {
            return Err(Error::DuplicateFieldAssociationName {
                class: self.name.clone(),
                name: mapping.field_name.clone(),
            });
        }
        if self.field_mappings.contains_key(&mapping.field_name) {
            return Ok(());
        }

        let mut inherited = mapping.clone();
        inherited.inherited_from = mapping
            .inherited_from
            .clone()
            .or_else(|| Some(declarer.clone()));
        self.field_mappings
            .insert(inherited.field_name.clone(), inherited);
        Ok(())
    }

    /// Copy an ancestor's association down unless this class overrides it
    pub(crate) fn inherit_association(
        &mut self,
        mapping: &AssociationMapping,
        declarer: &ClassName,
    ) -> Result<()> {
        if self.field_mappings.contains_key(&mapping.field_name) {
            return Err(Error::DuplicateFieldAssociationName {
                class: self.name.clone(),
                name: mapping.field_name.clone(),
            });
        }
        if self.association_mappings.contains_key(&mapping.field_name) {
            return Ok(());
        }

        let mut inherited = mapping.clone();
        inherited.inherited_from = mapping
            .inherited_from
            .clone()
            .or_else(|| Some(declarer.clone()));
        self.association_mappings
            .insert(inherited.field_name.clone(), inherited);
        Ok(())
    }

    /// Identifier becomes the parent's (still-id) fields followed by local ones
    pub(crate) fn inherit_identifier(&mut self, parent_identifier: &[String]) {
        let mut merged: Vec<String> = parent_identifier
            .iter()
            .filter(|f| self.field_mappings.get(*f).is_some_and(|m| m.id))
            .cloned()
            .collect();
        for field in &self.identifier {
            if !merged.contains(field) {
                merged.push(field.clone());
            }
        }
        self.identifier = merged;
    }

    pub(crate) fn begin_resolving(&mut self) {
        debug_assert_eq!(self.state, ResolutionState::Unresolved);
        self.state = ResolutionState::Resolving;
    }

    pub(crate) fn mark_resolved(&mut self) {
        self.state = ResolutionState::Resolved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> RawClassMetadata {
        RawClassMetadata::new("app::Person")
            .with_field(FieldMapping::new("id", "integer").as_id())
            .with_field(FieldMapping::new("name", "string").with_length(100))
            .with_association(
                AssociationMapping::one_to_one("address", "app::Address").with_inversed_by("owner"),
            )
            .with_id_generator(IdGeneratorType::Auto)
    }

    #[test]
    fn test_new_metadata_defaults() {
        let cm = ClassMetadata::new("app::Person");
        assert!(cm.is_root());
        assert!(cm.parent_classes().is_empty());
        assert_eq!(cm.root_class_name().as_str(), "app::Person");
        assert_eq!(cm.inheritance_type(), InheritanceType::None);
        assert_eq!(cm.id_generator_type(), IdGeneratorType::None);
        assert_eq!(cm.declared_inheritance_type(), None);
        assert_eq!(cm.table_name(), "Person");
        assert_eq!(cm.state(), ResolutionState::Unresolved);
        assert_eq!(cm.hierarchy(), vec![ClassName::from("app::Person")]);
    }

    #[test]
    fn test_from_raw() {
        let cm = ClassMetadata::from_raw(person()).unwrap();
        assert!(cm.has_field("name"));
        assert!(cm.has_association("address"));
        assert!(!cm.has_field("address"));
        assert_eq!(cm.association_count(), 1);
        assert_eq!(cm.identifier(), ["id".to_string()]);
        assert_eq!(cm.single_identifier_field(), Some("id"));
        assert_eq!(cm.declared_id_generator_type(), Some(IdGeneratorType::Auto));
        assert_eq!(cm.field_mapping("name").unwrap().length, Some(100));
        assert_eq!(cm.field_mapping("name").unwrap().column_name(), "name");
        assert!(cm.association_mapping("address").unwrap().is_owning_side());
    }

    #[test]
    fn test_map_field_replaces_in_place() {
        let mut cm = ClassMetadata::from_raw(person()).unwrap();
        cm.map_field(FieldMapping::new("name", "text").with_column("full_name"))
            .unwrap();
        assert_eq!(cm.field_names(), vec!["id", "name"]);
        let name = cm.field_mapping("name").unwrap();
        assert_eq!(name.type_name, "text");
        assert_eq!(name.column_name(), "full_name");

        // Redeclaring the id field without `id` drops it from the identifier
        cm.map_field(FieldMapping::new("id", "integer")).unwrap();
        assert!(cm.identifier().is_empty());
    }

    #[test]
    fn test_field_association_collision() {
        let mut cm = ClassMetadata::from_raw(person()).unwrap();
        let err = cm
            .map_field(FieldMapping::new("address", "string"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateFieldAssociationName { ref name, .. } if name == "address"
        ));

        let err = cm
            .map_association(AssociationMapping::many_to_one("name", "app::Name"))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateFieldAssociationName { .. }));
    }

    #[test]
    fn test_from_raw_rejects_collision() {
        let raw = RawClassMetadata::new("app::Broken")
            .with_field(FieldMapping::new("owner", "string"))
            .with_association(AssociationMapping::many_to_one("owner", "app::User"));
        let err = ClassMetadata::from_raw(raw).unwrap_err();
        assert_eq!(err.class_name().map(ClassName::as_str), Some("app::Broken"));
    }

    #[test]
    fn test_inherit_field_keeps_override() {
        let parent = ClassMetadata::from_raw(person()).unwrap();
        let mut child = ClassMetadata::from_raw(
            RawClassMetadata::new("app::Employee").with_field(FieldMapping::new("name", "text")),
        )
        .unwrap();

        for field in parent.field_mappings() {
            child.inherit_field(field, parent.name()).unwrap();
        }

        assert_eq!(child.field_mapping("name").unwrap().type_name, "text");
        assert!(!child.is_inherited_field("name"));
        assert!(child.is_inherited_field("id"));
        assert_eq!(
            child.field_mapping("id").unwrap().inherited_from,
            Some(ClassName::from("app::Person"))
        );
    }

    #[test]
    fn test_inherit_identifier_order() {
        let mut child = ClassMetadata::from_raw(
            RawClassMetadata::new("app::Employee")
                .with_field(FieldMapping::new("badge", "string").as_id()),
        )
        .unwrap();
        child
            .inherit_field(&FieldMapping::new("id", "integer").as_id(), &"app::Person".into())
            .unwrap();
        child.inherit_identifier(&["id".to_string()]);
        assert_eq!(child.identifier(), ["id".to_string(), "badge".to_string()]);
    }

    #[test]
    fn test_raw_metadata_from_json() {
        let raw: RawClassMetadata = serde_json::from_str(
            r#"{
                "className": "app::Manager",
                "parent": "app::Employee",
                "fields": [{"fieldName": "level", "type": "integer"}],
                "associations": [
                    {"fieldName": "reports", "targetEntity": "app::Employee",
                     "kind": "oneToMany", "mappedBy": "manager"}
                ],
                "inheritanceType": "singleTable",
                "discriminatorValue": "manager"
            }"#,
        )
        .unwrap();
        assert_eq!(raw.parent_class, Some(ClassName::from("app::Employee")));
        assert_eq!(raw.inheritance_type, Some(InheritanceType::SingleTable));
        assert!(!raw.associations[0].is_owning_side());
        assert!(raw.associations[0].is_to_many());
        assert_eq!(raw.discriminator_value.as_deref(), Some("manager"));
    }
}
