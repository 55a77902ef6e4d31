//! Catalog entities: characters, items, runes and talents

use crate::modifier::ModifierRecord;
use crate::types::EntityKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tag marking an item as a trinket
pub const TRINKET_TAG: &str = "Trinket";

/// Anything stored in a [`super::Registry`]
pub trait CatalogEntry {
    const KIND: EntityKind;

    fn id(&self) -> u32;
    fn name(&self) -> &str;
    fn stats_mut(&mut self) -> Vec<&mut ModifierRecord>;
}

/// A playable character and its level-1 stats plus per-level growth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    /// Only `flat` and `per_level` are meaningful here
    #[serde(default)]
    pub stats: ModifierRecord,
}

/// Gold values of an item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gold {
    /// Price of the item on top of its components
    #[serde(default)]
    pub base: u32,
    /// Full price including components
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub sell: u32,
}

/// A purchasable item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub gold: Gold,
    /// Ids of the items this one is built from
    #[serde(default)]
    pub components: Vec<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Map key to availability. An empty table means available everywhere.
    #[serde(default)]
    pub maps: BTreeMap<String, bool>,
    #[serde(default)]
    pub stats: ModifierRecord,
}

impl Item {
    pub fn is_trinket(&self) -> bool {
        self.tags.iter().any(|tag| tag == TRINKET_TAG)
    }

    pub fn has_component(&self, id: u32) -> bool {
        self.components.contains(&id)
    }

    pub fn available_on(&self, map: &str) -> bool {
        self.maps.is_empty() || self.maps.get(map).copied().unwrap_or(false)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// A rune (minor bonus), selected in counts on a rune page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rune {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub stats: ModifierRecord,
}

/// The three parallel talent trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalentTree {
    Ferocity,
    Cunning,
    Resolve,
}

impl TalentTree {
    /// Get all trees
    pub fn all() -> &'static [TalentTree] {
        &[TalentTree::Ferocity, TalentTree::Cunning, TalentTree::Resolve]
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            TalentTree::Ferocity => 0,
            TalentTree::Cunning => 1,
            TalentTree::Resolve => 2,
        }
    }
}

impl fmt::Display for TalentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TalentTree::Ferocity => "Ferocity",
            TalentTree::Cunning => "Cunning",
            TalentTree::Resolve => "Resolve",
        };
        f.write_str(name)
    }
}

/// A talent (mastery) whose effect depends on the points invested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Talent {
    pub id: u32,
    pub name: String,
    pub tree: TalentTree,
    /// Modifiers per rank; entry 0 is rank 1
    #[serde(default)]
    pub ranks: Vec<ModifierRecord>,
}

impl Talent {
    /// Row within the tree, encoded in the tens digit of the id
    pub fn row(&self) -> u32 {
        (self.id / 10) % 10
    }

    pub fn max_rank(&self) -> u32 {
        self.ranks.len() as u32
    }

    /// Modifiers at `points` invested. Ranks without data contribute nothing.
    pub fn at_rank(&self, points: u32) -> ModifierRecord {
        points
            .checked_sub(1)
            .and_then(|index| self.ranks.get(index as usize))
            .cloned()
            .unwrap_or_default()
    }
}

impl CatalogEntry for Character {
    const KIND: EntityKind = EntityKind::Character;

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn stats_mut(&mut self) -> Vec<&mut ModifierRecord> {
        vec![&mut self.stats]
    }
}

impl CatalogEntry for Item {
    const KIND: EntityKind = EntityKind::Item;

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn stats_mut(&mut self) -> Vec<&mut ModifierRecord> {
        vec![&mut self.stats]
    }
}

impl CatalogEntry for Rune {
    const KIND: EntityKind = EntityKind::Rune;

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn stats_mut(&mut self) -> Vec<&mut ModifierRecord> {
        vec![&mut self.stats]
    }
}

impl CatalogEntry for Talent {
    const KIND: EntityKind = EntityKind::Talent;

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn stats_mut(&mut self) -> Vec<&mut ModifierRecord> {
        self.ranks.iter_mut().collect()
    }
}
