//! Catalog - immutable reference data for characters, items, runes and talents

mod entities;
mod provider;
mod repository;

pub use entities::{CatalogEntry, Character, Gold, Item, Rune, Talent, TalentTree, TRINKET_TAG};
pub use provider::{default_catalog, CatalogData, CatalogProvider, TomlFileProvider};
pub use repository::CatalogRepository;

use crate::config::{ConfigError, EngineConfig, SchemaConfig};
use crate::error::BuildError;
use crate::types::CatalogRef;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Separator between a base item name and its enchantment in display names
pub const ENCHANTMENT_SEPARATOR: &str = " - ";

/// Entries of one kind, keyed by id and by name
#[derive(Debug, Clone)]
pub struct Registry<T> {
    by_id: BTreeMap<u32, Arc<T>>,
    by_name: HashMap<String, u32>,
}

impl<T: CatalogEntry> Registry<T> {
    /// Build a registry. Ids must be unique; a later entry with a duplicate
    /// name takes the name.
    pub fn new(entries: impl IntoIterator<Item = T>) -> Result<Self, ConfigError> {
        let mut by_id = BTreeMap::new();
        let mut by_name = HashMap::new();
        for entry in entries {
            if by_id.contains_key(&entry.id()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate {} id {} ('{}')",
                    T::KIND,
                    entry.id(),
                    entry.name()
                )));
            }
            by_name.insert(entry.name().to_string(), entry.id());
            by_id.insert(entry.id(), Arc::new(entry));
        }
        Ok(Registry { by_id, by_name })
    }

    pub fn by_id(&self, id: u32) -> Option<&Arc<T>> {
        self.by_id.get(&id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Arc<T>> {
        self.by_name.get(name).and_then(|id| self.by_id.get(id))
    }

    /// Resolve a reference to the shared catalog entry
    pub fn resolve(&self, key: &CatalogRef) -> Result<Arc<T>, BuildError> {
        let found = match key {
            CatalogRef::Id(id) => self.by_id(*id),
            CatalogRef::Name(name) => self.by_name(name),
        };
        found.cloned().ok_or_else(|| BuildError::NotFound {
            kind: T::KIND,
            key: key.clone(),
        })
    }

    /// Entries in id order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// An item reference resolved against the catalog
#[derive(Debug, Clone)]
pub struct ResolvedItem {
    /// The item that occupies a slot
    pub item: Arc<Item>,
    /// The enchantment named alongside it, if any
    pub enchantment: Option<Arc<Item>>,
}

/// Immutable snapshot of all reference data
#[derive(Debug, Clone)]
pub struct Catalog {
    pub characters: Registry<Character>,
    pub items: Registry<Item>,
    pub runes: Registry<Rune>,
    pub talents: Registry<Talent>,
    schema: SchemaConfig,
}

impl Catalog {
    /// Pull every entity from the provider and build the snapshot
    pub fn load(provider: &dyn CatalogProvider, config: &EngineConfig) -> Result<Self, ConfigError> {
        let characters = normalized(provider.characters()?);
        let mut items = normalized(provider.items()?);
        let runes = normalized(provider.runes()?);
        let talents = normalized(provider.talents()?);

        if let Some(map) = &config.catalog.map {
            let before = items.len();
            items.retain(|item| item.available_on(map));
            debug!(map = %map, dropped = before - items.len(), "filtered items by map");
        }

        let catalog = Catalog {
            characters: Registry::new(characters)?,
            items: Registry::new(items)?,
            runes: Registry::new(runes)?,
            talents: Registry::new(talents)?,
            schema: config.schema.clone(),
        };
        debug!(
            characters = catalog.characters.len(),
            items = catalog.items.len(),
            runes = catalog.runes.len(),
            talents = catalog.talents.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// The attribute schema this catalog was loaded with
    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    /// Resolve an item by id, name, or "Base - Enchantment" display name
    pub fn resolve_item(&self, key: &CatalogRef) -> Result<ResolvedItem, BuildError> {
        match key {
            CatalogRef::Name(name) if name.contains(ENCHANTMENT_SEPARATOR) => {
                self.resolve_enchanted(name)
            }
            _ => Ok(ResolvedItem {
                item: self.items.resolve(key)?,
                enchantment: None,
            }),
        }
    }

    fn resolve_enchanted(&self, display_name: &str) -> Result<ResolvedItem, BuildError> {
        let mut parts = display_name.split(ENCHANTMENT_SEPARATOR);
        let (base_name, suffix) = match (parts.next(), parts.next(), parts.next()) {
            (Some(base), Some(suffix), None) if !base.is_empty() && !suffix.is_empty() => {
                (base, suffix)
            }
            _ => return Err(BuildError::MalformedEnchantedName(display_name.to_string())),
        };

        let base = self.items.resolve(&CatalogRef::from(base_name))?;
        let candidates: Vec<&Arc<Item>> = self
            .items
            .iter()
            .filter(|item| item.name.contains(suffix) && item.has_component(base.id))
            .collect();

        match candidates.as_slice() {
            [enchantment] => Ok(ResolvedItem {
                item: base,
                enchantment: Some(Arc::clone(enchantment)),
            }),
            [] => Err(BuildError::EnchantmentNotFound {
                base: base_name.to_string(),
                enchantment: suffix.to_string(),
            }),
            many => Err(BuildError::AmbiguousEnchantment {
                base: base_name.to_string(),
                enchantment: suffix.to_string(),
                candidates: many.iter().map(|item| item.id).collect(),
            }),
        }
    }

    /// Display name listing an item's components, e.g. "Enchantment: Warrior (Stalker's Blade)"
    pub fn enchanted_name(&self, item: &Item) -> String {
        let components: Vec<&str> = item
            .components
            .iter()
            .filter_map(|id| self.items.by_id(*id))
            .map(|component| component.name.as_str())
            .collect();
        format!("{} ({})", item.name, components.join(", "))
    }
}

fn normalized<T: CatalogEntry>(mut entries: Vec<T>) -> Vec<T> {
    for entry in &mut entries {
        for record in entry.stats_mut() {
            record.normalize();
        }
    }
    entries
}
