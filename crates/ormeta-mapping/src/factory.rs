//! Class metadata factory
//!
//! Resolves the metadata of a class by discovering its mapped ancestors,
//! merging every level root-first onto the previous one, and resolving the
//! hierarchy's identifier strategy against the platform. Every class visited
//! by a pass is cached; a failed pass caches nothing.

use crate::driver::MappingDriver;
use crate::metadata::{ClassMetadata, DiscriminatorColumn};
use crate::platform::PlatformCapabilities;
use ormeta_common::{ClassName, Error, FactoryConfig, IdGeneratorType, InheritanceType, Result};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves and caches [`ClassMetadata`] for mapped classes
pub struct ClassMetadataFactory {
    driver: Arc<dyn MappingDriver>,
    platform: Arc<dyn PlatformCapabilities>,
    config: FactoryConfig,
    /// Resolved metadata indexed by class name
    loaded: RwLock<HashMap<ClassName, Arc<ClassMetadata>>>,
    /// Resolved `auto` strategy indexed by root class
    strategies: RwLock<HashMap<ClassName, IdGeneratorType>>,
    /// Serializes resolution passes
    resolve_lock: Mutex<()>,
}

/// Uncached part of a hierarchy, root-first, plus the cached ancestor it hangs off
struct Chain {
    classes: Vec<ClassName>,
    cached_parent: Option<Arc<ClassMetadata>>,
}

impl ClassMetadataFactory {
    /// Create a factory with the default configuration
    pub fn new(driver: Arc<dyn MappingDriver>, platform: Arc<dyn PlatformCapabilities>) -> Self {
        Self::with_config(driver, platform, FactoryConfig::default())
    }

    /// Create a factory with an explicit configuration
    pub fn with_config(
        driver: Arc<dyn MappingDriver>,
        platform: Arc<dyn PlatformCapabilities>,
        config: FactoryConfig,
    ) -> Self {
        Self {
            driver,
            platform,
            config,
            loaded: RwLock::new(HashMap::new()),
            strategies: RwLock::new(HashMap::new()),
            resolve_lock: Mutex::new(()),
        }
    }

    pub const fn config(&self) -> &FactoryConfig {
        &self.config
    }

    // =========== Public surface ===========

    /// Get the resolved metadata of a class, resolving its hierarchy if needed
    pub fn get_metadata_for(&self, class_name: &str) -> Result<Arc<ClassMetadata>> {
        if let Some(metadata) = self.cached(class_name) {
            return Ok(metadata);
        }

        let _guard = self.resolve_lock.lock();

        // Another pass may have resolved it while we waited
        if let Some(metadata) = self.cached(class_name) {
            return Ok(metadata);
        }

        self.load_hierarchy(class_name)
    }

    /// Check if resolved metadata for a class is cached
    pub fn has_metadata_for(&self, class_name: &str) -> bool {
        self.loaded.read().contains_key(class_name)
    }

    /// Cache pre-built metadata for a class, bypassing the driver
    ///
    /// An `auto` identifier strategy is resolved on the way in, the same way
    /// a resolution pass would.
    pub fn set_metadata_for(
        &self,
        class_name: impl Into<ClassName>,
        mut metadata: ClassMetadata,
    ) -> Result<Arc<ClassMetadata>> {
        let class_name = class_name.into();
        if &class_name != metadata.name() {
            return Err(Error::configuration(format!(
                "metadata for {} cannot be registered as {}",
                metadata.name(),
                class_name
            )));
        }

        let _guard = self.resolve_lock.lock();
        let memo = self.settle_id_generator(&mut metadata)?;
        metadata.mark_resolved();

        let metadata = Arc::new(metadata);
        self.loaded
            .write()
            .insert(class_name, Arc::clone(&metadata));
        if let Some((root, strategy)) = memo {
            self.strategies.write().insert(root, strategy);
        }
        Ok(metadata)
    }

    /// Drop every cached class and strategy
    pub fn reset(&self) {
        let _guard = self.resolve_lock.lock();
        self.loaded.write().clear();
        self.strategies.write().clear();
        debug!("Metadata cache cleared");
    }

    /// Resolve every class the driver knows about
    pub fn get_all_metadata(&self) -> Result<Vec<Arc<ClassMetadata>>> {
        self.driver
            .all_class_names()?
            .iter()
            .map(|name| self.get_metadata_for(name.as_str()))
            .collect()
    }

    /// Snapshot of the cache, ordered by class name
    pub fn loaded_metadata(&self) -> Vec<Arc<ClassMetadata>> {
        let mut all: Vec<Arc<ClassMetadata>> = self.loaded.read().values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// Build unresolved metadata for one class from the driver's raw data
    pub fn new_metadata_instance(&self, class_name: &str) -> Result<ClassMetadata> {
        let raw = self.driver.load_metadata(class_name)?;
        if raw.class_name.as_str() != class_name {
            return Err(Error::driver(format!(
                "driver {} returned metadata for {} when asked for {}",
                self.driver.name(),
                raw.class_name,
                class_name
            )));
        }
        ClassMetadata::from_raw(raw)
    }

    // =========== Resolution pass ===========

    fn cached(&self, class_name: &str) -> Option<Arc<ClassMetadata>> {
        self.loaded.read().get(class_name).cloned()
    }

    fn load_hierarchy(&self, class_name: &str) -> Result<Arc<ClassMetadata>> {
        let chain = self.discover_chain(class_name)?;
        debug!(
            "Resolving {} via {:?} (cached ancestor: {:?})",
            class_name,
            chain.classes,
            chain.cached_parent.as_ref().map(|p| p.name())
        );

        let mut resolved: Vec<ClassMetadata> = Vec::with_capacity(chain.classes.len());
        let mut memo = None;
        for name in &chain.classes {
            let mut class = self.new_metadata_instance(name.as_str())?;
            class.begin_resolving();

            match resolved.last().or(chain.cached_parent.as_deref()) {
                Some(parent) => inherit_from_parent(&mut class, parent)?,
                None => {
                    initialize_root(&mut class);
                    memo = self.settle_id_generator(&mut class)?;
                }
            }
            resolved.push(class);
        }

        let published: Vec<Arc<ClassMetadata>> = resolved
            .into_iter()
            .map(|mut class| {
                class.mark_resolved();
                Arc::new(class)
            })
            .collect();

        let Some(requested) = published.last().cloned() else {
            return Err(Error::mapping_not_found(class_name));
        };
        {
            let mut loaded = self.loaded.write();
            for class in published {
                loaded.insert(class.name().clone(), class);
            }
        }
        if let Some((root, strategy)) = memo {
            self.strategies.write().insert(root, strategy);
        }

        info!(
            "Resolved metadata for {} (root {}, {} ancestors, inheritance {}, id generator {})",
            class_name,
            requested.root_class_name(),
            requested.parent_classes().len(),
            requested.inheritance_type(),
            requested.id_generator_type()
        );
        Ok(requested)
    }

    /// Walk upward from `class_name` until the root or a cached ancestor
    fn discover_chain(&self, class_name: &str) -> Result<Chain> {
        if self.driver.is_transient(class_name) {
            return Err(Error::mapping_not_found(class_name));
        }

        let requested = ClassName::from(class_name);
        let mut classes = vec![requested.clone()];
        let mut seen: HashSet<ClassName> = HashSet::from([requested.clone()]);
        let mut cached_parent = None;
        let mut current = requested.clone();

        while let Some(parent) = self.driver.parent_class(current.as_str())? {
            if !seen.insert(parent.clone()) {
                return Err(Error::CircularInheritance { class: parent });
            }

            if self.driver.is_transient(parent.as_str()) {
                debug!("Skipping transient class {} above {}", parent, current);
                current = parent;
                continue;
            }

            if let Some(cached) = self.cached(parent.as_str()) {
                debug!("Hierarchy of {} reuses cached {}", class_name, parent);
                cached_parent = Some(cached);
                break;
            }

            classes.push(parent.clone());
            if classes.len() > self.config.max_hierarchy_depth {
                return Err(Error::HierarchyTooDeep {
                    class: requested,
                    max_depth: self.config.max_hierarchy_depth,
                });
            }
            current = parent;
        }

        let depth = classes.len() + cached_parent.as_ref().map_or(0, |p| p.parent_classes().len() + 1);
        if depth > self.config.max_hierarchy_depth {
            return Err(Error::HierarchyTooDeep {
                class: requested,
                max_depth: self.config.max_hierarchy_depth,
            });
        }

        classes.reverse();
        Ok(Chain {
            classes,
            cached_parent,
        })
    }

    /// Give a hierarchy root (or injected class) its concrete strategy
    ///
    /// Returns the memo entry to record once the result is published.
    fn settle_id_generator(
        &self,
        class: &mut ClassMetadata,
    ) -> Result<Option<(ClassName, IdGeneratorType)>> {
        let root = class.root_class_name().clone();
        let declared = class.id_generator_type();

        let strategy = if declared.is_auto() {
            match self.cached(root.as_str()).map(|c| c.id_generator_type()) {
                Some(strategy) if !strategy.is_auto() => strategy,
                _ => self.resolve_auto_id_generator(&root),
            }
        } else {
            declared
        };
        self.check_platform_support(&root, strategy)?;
        class.set_resolved_id_generator_type(strategy);

        Ok(declared.is_auto().then_some((root, strategy)))
    }

    /// Turn `auto` into a concrete strategy, at most one platform query per root
    fn resolve_auto_id_generator(&self, root: &ClassName) -> IdGeneratorType {
        if let Some(strategy) = self.strategies.read().get(root) {
            return *strategy;
        }

        let strategy = if self.platform.prefers_identity_columns() {
            IdGeneratorType::Identity
        } else {
            self.config.fallback_id_generator
        };
        debug!(
            "Platform {} resolves auto id generator of {} to {}",
            self.platform.name(),
            root,
            strategy
        );
        strategy
    }

    fn check_platform_support(&self, root: &ClassName, strategy: IdGeneratorType) -> Result<()> {
        if !self.config.check_platform_support {
            return Ok(());
        }

        let supported = match strategy {
            IdGeneratorType::Identity => self.platform.supports_identity_columns(),
            IdGeneratorType::Sequence => self.platform.supports_sequences(),
            _ => true,
        };
        if supported {
            Ok(())
        } else {
            Err(Error::UnsupportedIdGenerator {
                class: root.clone(),
                strategy,
                platform: self.platform.name().to_string(),
            })
        }
    }
}

/// Defaults for a class with no mapped ancestor
fn initialize_root(class: &mut ClassMetadata) {
    if class.inheritance_type().uses_discriminator() && class.discriminator_column().is_none() {
        class.set_discriminator_column(DiscriminatorColumn::default());
    }
}

/// Merge everything `parent` resolved so far into `class`
///
/// `parent` always carries its hierarchy's concrete identifier strategy,
/// whether it was resolved in this pass or an earlier one.
fn inherit_from_parent(class: &mut ClassMetadata, parent: &ClassMetadata) -> Result<()> {
    let root = parent.root_class_name();

    // Hierarchy-wide inheritance type; redeclaring the same one is fine
    if let Some(declared) = class.declared_inheritance_type()
        && declared != parent.inheritance_type()
    {
        return Err(Error::InheritanceTypeConflict {
            class: class.name().clone(),
            declared,
            root: root.clone(),
            root_type: parent.inheritance_type(),
        });
    }
    class.set_resolved_inheritance_type(parent.inheritance_type());

    // Hierarchy-wide id generator, already concrete on the parent; `auto` on
    // a subclass defers to the root
    if let Some(declared) = class.declared_id_generator_type()
        && !declared.is_auto()
        && declared != parent.id_generator_type()
    {
        return Err(Error::IdGeneratorConflict {
            class: class.name().clone(),
            declared,
            root: root.clone(),
            root_type: parent.id_generator_type(),
        });
    }
    class.set_resolved_id_generator_type(parent.id_generator_type());

    let mut parents = Vec::with_capacity(parent.parent_classes().len() + 1);
    parents.push(parent.name().clone());
    parents.extend(parent.parent_classes().iter().cloned());
    class.set_parent_classes(parents);
    class.set_root_class_name(root.clone());

    for field in parent.field_mappings() {
        class.inherit_field(field, parent.name())?;
    }
    for association in parent.association_mappings() {
        class.inherit_association(association, parent.name())?;
    }
    class.inherit_identifier(parent.identifier());

    if parent.inheritance_type() == InheritanceType::SingleTable
        && class.table_name() != parent.table_name()
    {
        if class.table_name() != class.name().short_name() {
            warn!(
                "Single-table subclass {} declares table {}, using {} of {}",
                class.name(),
                class.table_name(),
                parent.table_name(),
                root
            );
        }
        class.set_table_name(parent.table_name());
    }

    if let Some(column) = parent.discriminator_column() {
        if class.discriminator_column().is_some_and(|c| c != column) {
            warn!(
                "Subclass {} redeclares discriminator column, keeping {} of {}",
                class.name(),
                column.name,
                root
            );
        }
        class.set_discriminator_column(column.clone());
    }

    debug!(
        "Merged {} into {} ({} fields, {} associations)",
        parent.name(),
        class.name(),
        class.field_names().len(),
        class.association_count()
    );
    Ok(())
}
