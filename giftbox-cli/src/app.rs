use anyhow::{Context, Result};
use giftbox_core::store::{MemoryStoreFactory, StoreRegistry};
use giftbox_core::{CatalogItem, Studio};
use giftbox_data::CatalogLoader;
use giftbox_db_sqlite::SqliteStoreFactory;
use tracing::info;

use crate::config::{AppConfig, CatalogConfig};

/// Build a [`StoreRegistry`] with every compiled-in backend registered.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(MemoryStoreFactory));
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

/// Opens the configured design store and a studio over it.
pub async fn open_studio(config: &AppConfig) -> Result<Studio> {
    let store = build_registry()
        .create(&config.store)
        .await
        .with_context(|| format!("Failed to open '{}' design store", config.store.backend))?;
    let studio = Studio::open(store, config.pricing.clone())
        .await
        .context("Failed to read saved designs")?;
    Ok(studio)
}

/// The configured catalog, or the bundled one.
pub fn load_catalog(config: &CatalogConfig) -> Result<Vec<CatalogItem>> {
    let items = match &config.path {
        Some(path) => CatalogLoader::load_path(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
        None => CatalogLoader::builtin().context("Bundled catalog is invalid")?,
    };
    info!(items = items.len(), "catalog loaded");
    Ok(items)
}
