//! build_core - Stat aggregation library for character builds
//!
//! This library provides:
//! - Catalog: Immutable reference data for characters, items, runes and talents
//! - ModifierRecord: The six-coefficient bundle every stat source carries
//! - EquipmentSet / TalentPage / BonusPage: Validated selections
//! - EventReplayer: Rebuilds an EquipmentSet from an item event log
//! - Build: Per-attribute base, bonus and total queries

pub mod build;
pub mod catalog;
pub mod config;
pub mod error;
pub mod modifier;
pub mod prelude;
pub mod source;
pub mod types;

// Re-export core types for convenience
pub use build::{grow, Build, BuildDefinition, Selection, StatAccumulator, StatQuery, StatValue, MAX_LEVEL};
pub use catalog::{
    default_catalog, Catalog, CatalogData, CatalogProvider, CatalogRepository, Character, Item,
    Rune, Talent, TalentTree, TomlFileProvider,
};
pub use config::{ConfigError, EngineConfig};
pub use error::{BuildError, ErrorKind};
pub use modifier::{Coefficients, DefaultMap, ModifierRecord};
pub use source::{
    BonusPage, EquipmentSet, EventReplayer, ItemEvent, ItemEventKind, StatSource, TalentPage,
};
pub use types::{Attribute, CatalogRef, EntityKind};
