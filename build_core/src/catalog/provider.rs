//! CatalogProvider - Trait and implementations for reference data suppliers

use super::entities::{Character, Item, Rune, Talent};
use crate::config::{self, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Supplier of raw catalog data, typically backed by a remote game-data service
pub trait CatalogProvider: Send + Sync {
    fn characters(&self) -> Result<Vec<Character>, ConfigError>;
    fn items(&self) -> Result<Vec<Item>, ConfigError>;
    fn runes(&self) -> Result<Vec<Rune>, ConfigError>;
    fn talents(&self) -> Result<Vec<Talent>, ConfigError>;
}

/// In-memory catalog data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub runes: Vec<Rune>,
    #[serde(default)]
    pub talents: Vec<Talent>,
}

impl CatalogData {
    /// Parse catalog data from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        config::parse_toml(content)
    }

    /// Load catalog data from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        config::load_toml(path)
    }
}

impl CatalogProvider for CatalogData {
    fn characters(&self) -> Result<Vec<Character>, ConfigError> {
        Ok(self.characters.clone())
    }

    fn items(&self) -> Result<Vec<Item>, ConfigError> {
        Ok(self.items.clone())
    }

    fn runes(&self) -> Result<Vec<Rune>, ConfigError> {
        Ok(self.runes.clone())
    }

    fn talents(&self) -> Result<Vec<Talent>, ConfigError> {
        Ok(self.talents.clone())
    }
}

/// Reads a TOML catalog file on demand
///
/// Nothing touches the disk until the first request, so wrapping this in a
/// [`super::CatalogRepository`] defers I/O to first use.
#[derive(Debug, Clone)]
pub struct TomlFileProvider {
    path: PathBuf,
}

impl TomlFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TomlFileProvider { path: path.into() }
    }

    fn data(&self) -> Result<CatalogData, ConfigError> {
        CatalogData::load(&self.path)
    }
}

impl CatalogProvider for TomlFileProvider {
    fn characters(&self) -> Result<Vec<Character>, ConfigError> {
        Ok(self.data()?.characters)
    }

    fn items(&self) -> Result<Vec<Item>, ConfigError> {
        Ok(self.data()?.items)
    }

    fn runes(&self) -> Result<Vec<Rune>, ConfigError> {
        Ok(self.data()?.runes)
    }

    fn talents(&self) -> Result<Vec<Talent>, ConfigError> {
        Ok(self.data()?.talents)
    }
}

/// The sample catalog shipped with the crate
pub fn default_catalog() -> Result<CatalogData, ConfigError> {
    CatalogData::parse(include_str!("../../config/catalog.toml"))
}
