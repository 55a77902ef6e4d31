//! Prelude module for convenient imports
//!
//! ```rust
//! use build_core::prelude::*;
//! ```

// Core types
pub use crate::build::{Build, BuildDefinition, StatValue};
pub use crate::types::{Attribute, CatalogRef};

// Catalog
pub use crate::catalog::{default_catalog, Catalog, CatalogRepository};

// Sources
pub use crate::source::{BonusPage, EquipmentSet, EventReplayer, ItemEvent, StatSource, TalentPage};

// Errors and config
pub use crate::config::EngineConfig;
pub use crate::error::{BuildError, ErrorKind};
