//! EquipmentSet - Items carried by a build

use crate::build::StatAccumulator;
use crate::catalog::{Catalog, Item, ResolvedItem, ENCHANTMENT_SEPARATOR};
use crate::error::BuildError;
use crate::source::StatSource;
use crate::types::CatalogRef;
use std::sync::Arc;
use tracing::trace;

/// Maximum number of regular (non-trinket) items
pub const MAX_ITEMS: usize = 6;

/// An enchantment applied to a slotted base item
#[derive(Debug, Clone)]
pub struct Enchantment {
    /// Id of the enchanted base item
    pub base: u32,
    /// The enchantment's catalog entry
    pub item: Arc<Item>,
}

/// Up to six items, one trinket, and any number of enchantments
///
/// Enchantments ride on a slotted base item and never take a slot of their
/// own. Iteration yields slotted items in insertion order, then the trinket,
/// then enchantments.
#[derive(Debug, Clone)]
pub struct EquipmentSet {
    catalog: Arc<Catalog>,
    slots: Vec<Arc<Item>>,
    trinket: Option<Arc<Item>>,
    enchantments: Vec<Enchantment>,
}

impl EquipmentSet {
    /// Create an empty set
    pub fn new(catalog: Arc<Catalog>) -> Self {
        EquipmentSet {
            catalog,
            slots: Vec::new(),
            trinket: None,
            enchantments: Vec::new(),
        }
    }

    /// Create a set holding `items`, in order
    pub fn from_refs<I, R>(catalog: Arc<Catalog>, items: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = R>,
        R: Into<CatalogRef>,
    {
        let mut set = Self::new(catalog);
        set.overwrite(items)?;
        Ok(set)
    }

    /// Add an item by id, name, or "Base - Enchantment" name
    pub fn add(&mut self, item: impl Into<CatalogRef>) -> Result<(), BuildError> {
        let resolved = self.catalog.resolve_item(&item.into())?;
        self.insert(resolved)
    }

    fn insert(&mut self, resolved: ResolvedItem) -> Result<(), BuildError> {
        let ResolvedItem { item, enchantment } = resolved;
        if item.is_trinket() {
            if self.trinket.is_some() {
                return Err(BuildError::DuplicateTrinket);
            }
            trace!(item = %item.name, "equip trinket");
            self.trinket = Some(Arc::clone(&item));
        } else {
            if self.slots.len() >= MAX_ITEMS {
                return Err(BuildError::TooManyItems { max: MAX_ITEMS });
            }
            trace!(item = %item.name, "equip item");
            self.slots.push(Arc::clone(&item));
        }

        if let Some(enchantment) = enchantment {
            trace!(item = %item.name, enchantment = %enchantment.name, "enchant item");
            self.enchantments.push(Enchantment {
                base: item.id,
                item: enchantment,
            });
        }
        Ok(())
    }

    /// Remove the first carried copy of an item
    ///
    /// Naming an enchanted item removes the base and that enchantment. Removing
    /// a base by its plain name also drops an enchantment left without a base.
    pub fn remove(&mut self, item: impl Into<CatalogRef>) -> Result<Arc<Item>, BuildError> {
        let key = item.into();
        let ResolvedItem { item, enchantment } = self.catalog.resolve_item(&key)?;

        let enchantment_index = match &enchantment {
            Some(enchantment) => Some(
                self.enchantments
                    .iter()
                    .position(|e| e.base == item.id && e.item.id == enchantment.id)
                    .ok_or_else(|| BuildError::ItemNotCarried(key_name(&key)))?,
            ),
            None => None,
        };

        let removed = if self.trinket.as_ref().is_some_and(|t| t.id == item.id) {
            self.trinket.take()
        } else {
            self.slots
                .iter()
                .position(|slotted| slotted.id == item.id)
                .map(|index| self.slots.remove(index))
        };
        let removed = match removed {
            Some(removed) => removed,
            None if enchantment.is_none() => return self.remove_enchantment(&item, &key),
            None => return Err(BuildError::ItemNotCarried(key_name(&key))),
        };

        match enchantment_index {
            Some(index) => {
                self.enchantments.remove(index);
            }
            None => self.drop_orphaned_enchantment(removed.id),
        }
        trace!(item = %removed.name, "unequip item");
        Ok(removed)
    }

    /// Remove an enchantment named by its own id or name, leaving its base
    fn remove_enchantment(&mut self, item: &Item, key: &CatalogRef) -> Result<Arc<Item>, BuildError> {
        let index = self
            .enchantments
            .iter()
            .position(|e| e.item.id == item.id)
            .ok_or_else(|| BuildError::ItemNotCarried(key_name(key)))?;
        let removed = self.enchantments.remove(index).item;
        trace!(item = %removed.name, "remove enchantment");
        Ok(removed)
    }

    fn drop_orphaned_enchantment(&mut self, base: u32) {
        let carried = self.slots.iter().filter(|item| item.id == base).count()
            + usize::from(self.trinket.as_ref().is_some_and(|t| t.id == base));
        let enchanted = self.enchantments.iter().filter(|e| e.base == base).count();
        if enchanted > carried {
            if let Some(index) = self.enchantments.iter().rposition(|e| e.base == base) {
                self.enchantments.remove(index);
            }
        }
    }

    /// Swap one item for another. On failure the set is left unchanged.
    pub fn replace(
        &mut self,
        before: impl Into<CatalogRef>,
        after: impl Into<CatalogRef>,
    ) -> Result<(), BuildError> {
        let mut next = self.clone();
        next.remove(before)?;
        next.add(after)?;
        *self = next;
        Ok(())
    }

    /// Clear everything, then add `items` in order
    ///
    /// Stops at the first item that cannot be added; items added before it
    /// stay in the set.
    pub fn overwrite<I, R>(&mut self, items: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = R>,
        R: Into<CatalogRef>,
    {
        self.clear();
        for item in items {
            self.add(item)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.trinket = None;
        self.enchantments.clear();
    }

    pub fn trinket(&self) -> Option<&Arc<Item>> {
        self.trinket.as_ref()
    }

    /// Regular (non-trinket) items in slot order
    pub fn slots(&self) -> &[Arc<Item>] {
        &self.slots
    }

    pub fn enchantments(&self) -> &[Enchantment] {
        &self.enchantments
    }

    /// Every carried item, enchantments included
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Item>> {
        self.slots
            .iter()
            .chain(self.trinket.iter())
            .chain(self.enchantments.iter().map(|e| &e.item))
    }

    /// Total gold of every carried item
    pub fn cost(&self) -> u32 {
        self.iter().map(|item| item.gold.total).sum()
    }

    /// Whether an item with this id is carried (slots, trinket or enchantments)
    pub fn contains(&self, id: u32) -> bool {
        self.iter().any(|item| item.id == id)
    }

    /// Number of occupied slots, trinket included
    pub fn len(&self) -> usize {
        self.slots.len() + usize::from(self.trinket.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// References that rebuild this set when passed to [`EquipmentSet::overwrite`]
    pub fn refs(&self) -> Vec<CatalogRef> {
        let mut pending: Vec<&Enchantment> = self.enchantments.iter().collect();
        self.slots
            .iter()
            .chain(self.trinket.iter())
            .map(|item| {
                match pending.iter().position(|e| e.base == item.id) {
                    Some(index) => {
                        let enchantment = pending.remove(index);
                        CatalogRef::Name(format!(
                            "{}{}{}",
                            item.name, ENCHANTMENT_SEPARATOR, enchantment.item.name
                        ))
                    }
                    None => CatalogRef::Id(item.id),
                }
            })
            .collect()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}

fn key_name(key: &CatalogRef) -> String {
    match key {
        CatalogRef::Id(id) => id.to_string(),
        CatalogRef::Name(name) => name.clone(),
    }
}

impl StatSource for EquipmentSet {
    fn id(&self) -> &str {
        "equipment"
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for item in self.iter() {
            stats.add_record(&item.stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::config::EngineConfig;
    use crate::error::ErrorKind;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::load(&default_catalog().unwrap(), &EngineConfig::default()).unwrap())
    }

    const SIX: [&str; 6] = [
        "Infinity Edge",
        "Berserker's Greaves",
        "Lord Dominik's Regards",
        "The Bloodthirster",
        "Mercurial Scimitar",
        "Banshee's Veil",
    ];

    #[test]
    fn test_seventh_item_rejected() {
        let mut set = EquipmentSet::from_refs(catalog(), SIX).unwrap();
        let err = set.add("Long Sword").unwrap_err();
        assert!(matches!(err, BuildError::TooManyItems { max: 6 }));
        assert_eq!(err.kind(), ErrorKind::Capacity);
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_six_items_and_trinket() {
        let mut set = EquipmentSet::from_refs(catalog(), SIX).unwrap();
        set.add("Warding Totem (Trinket)").unwrap();
        assert_eq!(set.len(), 7);
        assert_eq!(set.trinket().map(|t| t.id), Some(3340));
    }

    #[test]
    fn test_second_trinket_rejected() {
        let mut set = EquipmentSet::new(catalog());
        set.add(3340u32).unwrap();
        let err = set.add("Sweeping Lens (Trinket)").unwrap_err();
        assert!(matches!(err, BuildError::DuplicateTrinket));
        assert_eq!(set.trinket().map(|t| t.id), Some(3340));
    }

    #[test]
    fn test_remove_first_match() {
        let mut set =
            EquipmentSet::from_refs(catalog(), ["Long Sword", "Cloth Armor", "Long Sword"]).unwrap();
        let removed = set.remove(1036u32).unwrap();
        assert_eq!(removed.name, "Long Sword");
        let names: Vec<&str> = set.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Cloth Armor", "Long Sword"]);
    }

    #[test]
    fn test_remove_absent_item() {
        let mut set = EquipmentSet::from_refs(catalog(), ["Long Sword"]).unwrap();
        let err = set.remove("Cloth Armor").unwrap_err();
        assert!(matches!(err, BuildError::ItemNotCarried(ref name) if name == "Cloth Armor"));
        assert_eq!(err.kind(), ErrorKind::Lookup);

        let err = set.remove("Not An Item").unwrap_err();
        assert!(matches!(err, BuildError::NotFound { .. }));
    }

    #[test]
    fn test_remove_trinket() {
        let mut set = EquipmentSet::from_refs(catalog(), ["Long Sword", "Warding Totem (Trinket)"]).unwrap();
        set.remove("Warding Totem (Trinket)").unwrap();
        assert!(set.trinket().is_none());
        set.add("Sweeping Lens (Trinket)").unwrap();
    }

    #[test]
    fn test_enchanted_item_takes_one_slot() {
        let mut set = EquipmentSet::from_refs(catalog(), ["Stalker's Blade - Cinderhulk"]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.enchantments().len(), 1);
        assert!(set.contains(3706));
        assert!(set.contains(1401));
        // Blade 1000 + enchantment 1625
        assert_eq!(set.cost(), 2625);

        for item in &SIX[..5] {
            set.add(*item).unwrap();
        }
        assert!(set.add("Long Sword").is_err());
    }

    #[test]
    fn test_remove_enchanted_item() {
        let mut set = EquipmentSet::from_refs(
            catalog(),
            ["Stalker's Blade - Cinderhulk", "Stalker's Blade - Warrior"],
        )
        .unwrap();

        set.remove("Stalker's Blade - Warrior").unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(1401));
        assert!(!set.contains(1400));

        // Warrior is no longer on any blade
        let err = set.remove("Stalker's Blade - Warrior").unwrap_err();
        assert!(matches!(err, BuildError::ItemNotCarried(_)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_enchantment_by_own_id_or_name() {
        let mut set = EquipmentSet::from_refs(catalog(), ["Stalker's Blade - Cinderhulk"]).unwrap();
        assert!(set.contains(1401));

        let removed = set.remove(1401u32).unwrap();
        assert_eq!(removed.name, "Enchantment: Cinderhulk");
        assert!(!set.contains(1401));
        // The base keeps its slot
        assert_eq!(set.len(), 1);
        assert!(set.contains(3706));

        let mut set = EquipmentSet::from_refs(catalog(), ["Stalker's Blade - Cinderhulk"]).unwrap();
        set.remove("Enchantment: Cinderhulk").unwrap();
        assert!(set.enchantments().is_empty());

        let err = set.remove("Enchantment: Cinderhulk").unwrap_err();
        assert!(matches!(err, BuildError::ItemNotCarried(_)));
    }

    #[test]
    fn test_removing_base_drops_its_enchantment() {
        let mut set = EquipmentSet::from_refs(catalog(), ["Stalker's Blade - Cinderhulk"]).unwrap();
        set.remove("Stalker's Blade").unwrap();
        assert!(set.is_empty());
        assert!(set.enchantments().is_empty());
        assert_eq!(set.cost(), 0);
    }

    #[test]
    fn test_replace() {
        let mut set = EquipmentSet::from_refs(catalog(), ["Long Sword", "Cloth Armor"]).unwrap();
        set.replace("Long Sword", "Infinity Edge").unwrap();
        let ids: Vec<u32> = set.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1029, 3031]);
    }

    #[test]
    fn test_failed_replace_leaves_set_unchanged() {
        let mut set =
            EquipmentSet::from_refs(catalog(), ["Long Sword", "Warding Totem (Trinket)"]).unwrap();
        let err = set.replace("Long Sword", "Sweeping Lens (Trinket)").unwrap_err();
        assert!(matches!(err, BuildError::DuplicateTrinket));
        assert!(set.contains(1036));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_overwrite_is_idempotent() {
        let mut set = EquipmentSet::new(catalog());
        set.overwrite(SIX).unwrap();
        let first_cost = set.cost();
        let first: Vec<u32> = set.iter().map(|i| i.id).collect();

        set.overwrite(SIX).unwrap();
        assert_eq!(set.cost(), first_cost);
        assert_eq!(set.iter().map(|i| i.id).collect::<Vec<_>>(), first);
    }

    #[test]
    fn test_overwrite_fails_eagerly() {
        let mut set = EquipmentSet::from_refs(catalog(), ["Cloth Armor"]).unwrap();
        let err = set
            .overwrite(["Long Sword", "Warding Totem (Trinket)", "Sweeping Lens (Trinket)", "Infinity Edge"])
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateTrinket));
        // Cleared, then filled up to the offending item
        let ids: Vec<u32> = set.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1036, 3340]);
    }

    #[test]
    fn test_refs_rebuild_the_set() {
        let catalog = catalog();
        let set = EquipmentSet::from_refs(
            Arc::clone(&catalog),
            ["Stalker's Blade - Warrior", "Cloth Armor", "Warding Totem (Trinket)"],
        )
        .unwrap();

        let rebuilt = EquipmentSet::from_refs(catalog, set.refs()).unwrap();
        assert_eq!(
            rebuilt.iter().map(|i| i.id).collect::<Vec<_>>(),
            set.iter().map(|i| i.id).collect::<Vec<_>>()
        );
        assert_eq!(rebuilt.cost(), set.cost());
    }
}
