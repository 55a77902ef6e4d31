//! CatalogRepository - Lazily loaded, shared catalog snapshot

use super::provider::CatalogProvider;
use super::Catalog;
use crate::config::EngineConfig;
use crate::error::BuildError;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// Owns a provider and the catalog it produces
///
/// The first call to [`CatalogRepository::catalog`] loads the snapshot; every
/// later call (from any thread) shares the same `Arc`. Concurrent first calls
/// block on a single initialization, and a failed load leaves the repository
/// empty so the next call retries.
pub struct CatalogRepository {
    provider: Box<dyn CatalogProvider>,
    config: EngineConfig,
    catalog: OnceCell<Arc<Catalog>>,
}

impl CatalogRepository {
    pub fn new(provider: impl CatalogProvider + 'static, config: EngineConfig) -> Self {
        CatalogRepository {
            provider: Box::new(provider),
            config,
            catalog: OnceCell::new(),
        }
    }

    /// Repository with the default engine configuration
    pub fn with_provider(provider: impl CatalogProvider + 'static) -> Self {
        Self::new(provider, EngineConfig::default())
    }

    /// The shared catalog, loading it on first use
    pub fn catalog(&self) -> Result<Arc<Catalog>, BuildError> {
        let catalog = self.catalog.get_or_try_init(|| {
            debug!("loading catalog from provider");
            Catalog::load(self.provider.as_ref(), &self.config).map(Arc::new)
        })?;
        Ok(Arc::clone(catalog))
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.get().is_some()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
