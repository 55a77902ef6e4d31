//! BuildDefinition - Serializable description of a build's selections

use crate::config::{self, ConfigError};
use crate::types::CatalogRef;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A catalog reference with a count (rune copies or talent points)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub key: CatalogRef,
    #[serde(alias = "points")]
    pub count: u32,
}

impl Selection {
    pub fn new(key: impl Into<CatalogRef>, count: u32) -> Self {
        Selection {
            key: key.into(),
            count,
        }
    }
}

impl From<(CatalogRef, u32)> for Selection {
    fn from((key, count): (CatalogRef, u32)) -> Self {
        Selection { key, count }
    }
}

/// Champion, level and every selection of a build
///
/// ```toml
/// champion = "Jinx"
/// level = 18
/// items = ["Infinity Edge", 3006]
/// runes = [{ key = 5245, count = 9 }]
/// masteries = [{ key = "Fury", points = 5 }]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildDefinition {
    pub champion: CatalogRef,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub items: Vec<CatalogRef>,
    #[serde(default)]
    pub runes: Vec<Selection>,
    #[serde(default)]
    pub masteries: Vec<Selection>,
}

fn default_level() -> u32 {
    1
}

impl BuildDefinition {
    pub fn new(champion: impl Into<CatalogRef>) -> Self {
        BuildDefinition {
            champion: champion.into(),
            level: default_level(),
            items: Vec::new(),
            runes: Vec::new(),
            masteries: Vec::new(),
        }
    }

    /// Parse a definition from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        config::parse_toml(content)
    }

    /// Load a definition from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        config::load_toml(path)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
