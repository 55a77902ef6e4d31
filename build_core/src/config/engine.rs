//! Engine configuration

use super::ConfigError;
use crate::types::Attribute;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Startup configuration for the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            schema: SchemaConfig::default(),
            catalog: CatalogConfig::default(),
            replay: ReplayConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load engine configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: EngineConfig = super::load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse engine configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = super::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The configuration shipped with the crate
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::parse(include_str!("../../config/engine.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.schema.basic.is_empty() {
            return Err(ConfigError::ValidationError(
                "schema.basic must list at least one attribute".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which attributes are reported by snapshots and total-only lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default = "default_basic")]
    pub basic: Vec<Attribute>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        SchemaConfig {
            basic: default_basic(),
        }
    }
}

impl SchemaConfig {
    pub fn is_basic(&self, attr: Attribute) -> bool {
        self.basic.contains(&attr)
    }
}

fn default_basic() -> Vec<Attribute> {
    Attribute::all()
        .iter()
        .copied()
        .filter(|attr| !matches!(attr, Attribute::Energy | Attribute::EnergyRegen))
        .collect()
}

/// Catalog loading options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Items unavailable on this map are dropped at load. `None` keeps all items.
    #[serde(default = "default_map")]
    pub map: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig { map: default_map() }
    }
}

fn default_map() -> Option<String> {
    Some("summoners_rift".to_string())
}

/// Event replay options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Item names stripped from event logs before replay
    #[serde(default = "default_consumables")]
    pub consumables: Vec<String>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            consumables: default_consumables(),
        }
    }
}

fn default_consumables() -> Vec<String> {
    vec![
        "Health Potion".to_string(),
        "Total Biscuit of Rejuvenation".to_string(),
    ]
}
