//! Core types shared across the build engine

use crate::error::BuildError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A character attribute
///
/// The set is closed: every modifier record, query and snapshot works over
/// exactly these keys. Serialized names double as the string keys accepted
/// by [`crate::build::Build::query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    // Offense
    AttackDamage,
    AbilityPower,
    AttackSpeed,
    CritChance,
    CritDamage,
    AttackRange,
    ArmorPenetration,
    MagicPenetration,
    Lethality,
    // Defense
    Armor,
    MagicResist,
    Health,
    HealthRegen,
    Tenacity,
    // Resources
    Mana,
    ManaRegen,
    Energy,
    EnergyRegen,
    // Sustain
    LifeSteal,
    SpellVamp,
    // Utility
    CooldownReduction,
    MovementSpeed,
}

impl Attribute {
    /// Get all attributes
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::AttackDamage,
            Attribute::AbilityPower,
            Attribute::AttackSpeed,
            Attribute::CritChance,
            Attribute::CritDamage,
            Attribute::AttackRange,
            Attribute::ArmorPenetration,
            Attribute::MagicPenetration,
            Attribute::Lethality,
            Attribute::Armor,
            Attribute::MagicResist,
            Attribute::Health,
            Attribute::HealthRegen,
            Attribute::Tenacity,
            Attribute::Mana,
            Attribute::ManaRegen,
            Attribute::Energy,
            Attribute::EnergyRegen,
            Attribute::LifeSteal,
            Attribute::SpellVamp,
            Attribute::CooldownReduction,
            Attribute::MovementSpeed,
        ]
    }

    /// The snake_case key for this attribute
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::AttackDamage => "attack_damage",
            Attribute::AbilityPower => "ability_power",
            Attribute::AttackSpeed => "attack_speed",
            Attribute::CritChance => "crit_chance",
            Attribute::CritDamage => "crit_damage",
            Attribute::AttackRange => "attack_range",
            Attribute::ArmorPenetration => "armor_penetration",
            Attribute::MagicPenetration => "magic_penetration",
            Attribute::Lethality => "lethality",
            Attribute::Armor => "armor",
            Attribute::MagicResist => "magic_resist",
            Attribute::Health => "health",
            Attribute::HealthRegen => "health_regen",
            Attribute::Tenacity => "tenacity",
            Attribute::Mana => "mana",
            Attribute::ManaRegen => "mana_regen",
            Attribute::Energy => "energy",
            Attribute::EnergyRegen => "energy_regen",
            Attribute::LifeSteal => "life_steal",
            Attribute::SpellVamp => "spell_vamp",
            Attribute::CooldownReduction => "cooldown_reduction",
            Attribute::MovementSpeed => "movement_speed",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Attribute {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::all()
            .iter()
            .copied()
            .find(|attr| attr.key() == s)
            .ok_or_else(|| BuildError::UnknownAttribute(s.to_string()))
    }
}

/// Reference to a catalog entry, either by stable id or by display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogRef {
    Id(u32),
    Name(String),
}

impl From<u32> for CatalogRef {
    fn from(id: u32) -> Self {
        CatalogRef::Id(id)
    }
}

impl From<&str> for CatalogRef {
    fn from(s: &str) -> Self {
        CatalogRef::Name(s.to_string())
    }
}

impl From<String> for CatalogRef {
    fn from(s: String) -> Self {
        CatalogRef::Name(s)
    }
}

impl From<&CatalogRef> for CatalogRef {
    fn from(r: &CatalogRef) -> Self {
        r.clone()
    }
}

impl fmt::Display for CatalogRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogRef::Id(id) => write!(f, "#{}", id),
            CatalogRef::Name(name) => write!(f, "'{}'", name),
        }
    }
}

/// The kind of catalog entry a lookup was aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Character,
    Item,
    Rune,
    Talent,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Character => "character",
            EntityKind::Item => "item",
            EntityKind::Rune => "rune",
            EntityKind::Talent => "talent",
        };
        f.write_str(name)
    }
}
