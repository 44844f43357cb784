use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::db::{CatalogStore, FileCatalogStore, InMemoryCatalogStore};
use crate::error::AppResult;
use crate::services::catalog::{CatalogService, DEFAULT_CATALOG_TTL};
use crate::services::profile_source::{MockProfileSource, ProfileSource};
use crate::services::providers::{CatalogSource, ItunesSource};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub profiles: Arc<dyn ProfileSource>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogService>, profiles: Arc<dyn ProfileSource>) -> Self {
        Self { catalog, profiles }
    }

    /// Wires the file cache, the iTunes feed and the mock profile source
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let file_store = FileCatalogStore::new(&config.catalog_cache_path);
        tracing::info!(
            path = %file_store.path().display(),
            ttl_secs = config.catalog_ttl_secs,
            "Catalog cache configured"
        );
        let store: Arc<dyn CatalogStore> = Arc::new(file_store);
        let itunes = ItunesSource::new(
            config.itunes_feed_url.clone(),
            Duration::from_secs(config.fetch_timeout_secs),
        )?;
        let sources: Vec<Arc<dyn CatalogSource>> = vec![Arc::new(itunes)];

        let catalog = CatalogService::new(
            store,
            sources,
            Duration::from_secs(config.catalog_ttl_secs),
        );

        Ok(Self::new(Arc::new(catalog), Arc::new(MockProfileSource)))
    }

    /// Offline state: in-memory cache, no external sources, so the catalog
    /// is always the built-in sample set
    pub fn offline() -> Self {
        let catalog = CatalogService::new(
            Arc::new(InMemoryCatalogStore::new()),
            Vec::new(),
            DEFAULT_CATALOG_TTL,
        );
        Self::new(Arc::new(catalog), Arc::new(MockProfileSource))
    }
}
