//! Engine errors

use crate::catalog::TalentTree;
use crate::config::ConfigError;
use crate::source::ItemEventKind;
use crate::types::{Attribute, CatalogRef, EntityKind};
use thiserror::Error;

/// Broad category of a [`BuildError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An id or name did not resolve in the catalog
    Lookup,
    /// Equipment slots or the talent point budget are exhausted
    Capacity,
    /// Talent rows are overfilled or filled out of order
    Structural,
    /// An argument had the wrong shape
    Argument,
    /// A level outside 1..=18
    Range,
    /// The catalog provider failed to supply data
    Catalog,
}

/// Errors raised while assembling or evaluating a build
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("{kind} {key} not found in catalog")]
    NotFound { kind: EntityKind, key: CatalogRef },
    #[error("item '{0}' is not in the item set")]
    ItemNotCarried(String),
    #[error("enchantment '{enchantment}' for '{base}' not found")]
    EnchantmentNotFound { base: String, enchantment: String },
    #[error("enchantment '{enchantment}' for '{base}' matches several items: {candidates:?}")]
    AmbiguousEnchantment {
        base: String,
        enchantment: String,
        candidates: Vec<u32>,
    },
    #[error("an item set can have only one trinket")]
    DuplicateTrinket,
    #[error("an item set can have at most {max} items (plus a trinket)")]
    TooManyItems { max: usize },
    #[error("a mastery page can have at most {max} points, got {points}")]
    TalentBudgetExceeded { points: u32, max: u32 },
    #[error("{tree} row {row} holds {points} points, at most {max} allowed")]
    RowOverfilled {
        tree: TalentTree,
        row: u32,
        points: u32,
        max: u32,
    },
    #[error("{tree} row {row} has points but row {missing} is not full")]
    MissingPrerequisite {
        tree: TalentTree,
        row: u32,
        missing: u32,
    },
    #[error("talent {id} sits in row {row}, outside rows 1 to 6")]
    InvalidRow { id: u32, row: u32 },
    #[error("talent '{talent}' has {max} ranks, got {points} points")]
    RankOutOfRange { talent: String, points: u32, max: u32 },
    #[error("{0} was built against a different catalog")]
    CatalogMismatch(&'static str),
    #[error("unknown attribute key '{0}'")]
    UnknownAttribute(String),
    #[error("'{0}' is not a basic attribute")]
    NotBasicAttribute(Attribute),
    #[error("malformed enchanted item name '{0}'")]
    MalformedEnchantedName(String),
    #[error("{kind:?} event at position {position} carries no item")]
    MissingEventItem {
        kind: ItemEventKind,
        position: usize,
    },
    #[error("undo at position {0} has no preceding event")]
    NothingToUndo(usize),
    #[error("level {0} must be between 1 and 18")]
    LevelOutOfRange(u32),
    #[error("failed to load catalog: {0}")]
    Catalog(#[from] ConfigError),
}

impl BuildError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::NotFound { .. }
            | BuildError::ItemNotCarried(_)
            | BuildError::EnchantmentNotFound { .. }
            | BuildError::AmbiguousEnchantment { .. } => ErrorKind::Lookup,
            BuildError::DuplicateTrinket
            | BuildError::TooManyItems { .. }
            | BuildError::TalentBudgetExceeded { .. } => ErrorKind::Capacity,
            BuildError::RowOverfilled { .. }
            | BuildError::MissingPrerequisite { .. }
            | BuildError::InvalidRow { .. } => ErrorKind::Structural,
            BuildError::UnknownAttribute(_)
            | BuildError::NotBasicAttribute(_)
            | BuildError::MalformedEnchantedName(_)
            | BuildError::RankOutOfRange { .. }
            | BuildError::CatalogMismatch(_)
            | BuildError::MissingEventItem { .. }
            | BuildError::NothingToUndo(_) => ErrorKind::Argument,
            BuildError::LevelOutOfRange(_) => ErrorKind::Range,
            BuildError::Catalog(_) => ErrorKind::Catalog,
        }
    }
}
