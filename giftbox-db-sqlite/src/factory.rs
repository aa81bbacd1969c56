use async_trait::async_trait;
use giftbox_core::store::{DesignStoreFactory, StoreConfig};
use giftbox_core::{DesignStore, StoreError};

use crate::repository::SqliteDesignStore;

/// [`DesignStoreFactory`] for SQLite.
///
/// Register this with a [`giftbox_core::store::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use giftbox_core::store::StoreRegistry;
/// use giftbox_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl DesignStoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens `config.connection_string` (a file path, a `sqlite:` URL or
    /// `:memory:`) and brings its schema up to date.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn DesignStore>, StoreError> {
        let store = SqliteDesignStore::new(&config.connection_string)
            .await
            .map_err(|e| StoreError::Connection(format!("{e:#}")))?;
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Database(format!("{e:#}")))?;
        Ok(Box::new(store))
    }
}
