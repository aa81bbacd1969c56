use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::factory::{DesignStoreFactory, StoreConfig};
use super::repository::{DesignStore, StoreError};
use crate::SavedDesign;

/// A [`DesignStore`] that keeps the collection in process memory.
///
/// Clones share the same collection, so a test can hand one clone to a
/// [`crate::Studio`] and inspect what was saved through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryDesignStore {
    designs: Arc<Mutex<Vec<SavedDesign>>>,
}

impl MemoryDesignStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `designs`.
    pub fn with_designs(designs: Vec<SavedDesign>) -> Self {
        Self {
            designs: Arc::new(Mutex::new(designs)),
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Result<Vec<SavedDesign>, StoreError> {
        self.designs
            .lock()
            .map(|designs| designs.clone())
            .map_err(|e| StoreError::Database(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl DesignStore for MemoryDesignStore {
    async fn load(&self) -> Result<Vec<SavedDesign>, StoreError> {
        self.snapshot()
    }

    async fn save(
        &self,
        designs: &[SavedDesign],
    ) -> Result<(), StoreError> {
        let mut stored = self
            .designs
            .lock()
            .map_err(|e| StoreError::Database(format!("memory store poisoned: {e}")))?;
        *stored = designs.to_vec();
        Ok(())
    }
}

/// [`DesignStoreFactory`] for the `"memory"` backend. The connection string
/// is ignored and every call starts from an empty collection.
pub struct MemoryStoreFactory;

#[async_trait]
impl DesignStoreFactory for MemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &StoreConfig,
    ) -> Result<Box<dyn DesignStore>, StoreError> {
        Ok(Box::new(MemoryDesignStore::new()))
    }
}
