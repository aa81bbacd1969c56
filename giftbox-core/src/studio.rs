//! The application context: one live builder, the saved-design collection,
//! and the store the collection is persisted to.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::designs::{Clock, DesignRepository, SystemClock};
use crate::pricing::PricingConfig;
use crate::store::{DesignStore, StoreError};
use crate::{Builder, DesignId};

/// Constructed once per process and handed to whatever drives it.
///
/// Design mutations only touch memory and mark the studio dirty; nothing
/// reaches the store until [`Studio::persist`] is called.
pub struct Studio {
    builder: Builder,
    designs: DesignRepository,
    store: Box<dyn DesignStore>,
    dirty: bool,
}

impl Studio {
    /// Opens a studio over `store`, reading the saved designs from it.
    pub async fn open(
        store: Box<dyn DesignStore>,
        pricing: PricingConfig,
    ) -> Result<Self, StoreError> {
        Self::open_with_clock(store, pricing, Arc::new(SystemClock)).await
    }

    pub async fn open_with_clock(
        store: Box<dyn DesignStore>,
        pricing: PricingConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoreError> {
        let mut designs = DesignRepository::with_clock(clock);
        designs.hydrate(store.load().await?);
        info!(designs = designs.len(), "studio opened");

        Ok(Self {
            builder: Builder::new(pricing),
            designs,
            store,
            dirty: false,
        })
    }

    pub fn builder(&self) -> &Builder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut Builder {
        &mut self.builder
    }

    pub fn designs(&self) -> &DesignRepository {
        &self.designs
    }

    /// True when the collection changed since it was opened or last persisted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Saves a snapshot of the live state. See [`DesignRepository::save`].
    pub fn save_design(
        &mut self,
        name: Option<&str>,
    ) -> DesignId {
        self.dirty = true;
        self.designs.save(self.builder.state(), name)
    }

    /// Replaces the live state with the saved one. Returns `false` and
    /// leaves the live state alone if `id` is unknown.
    pub fn load_design(
        &mut self,
        id: DesignId,
    ) -> bool {
        match self.designs.load(id) {
            Some(state) => {
                self.builder.restore(state);
                debug!(%id, "design loaded into builder");
                true
            }
            None => false,
        }
    }

    pub fn delete_design(
        &mut self,
        id: DesignId,
    ) -> bool {
        let deleted = self.designs.delete(id);
        self.dirty |= deleted;
        deleted
    }

    pub fn rename_design(
        &mut self,
        id: DesignId,
        name: &str,
    ) -> bool {
        let renamed = self.designs.rename(id, name);
        self.dirty |= renamed;
        renamed
    }

    pub fn duplicate_design(
        &mut self,
        id: DesignId,
    ) -> Option<DesignId> {
        let copy = self.designs.duplicate(id);
        self.dirty |= copy.is_some();
        copy
    }

    /// Writes the whole collection to the store, replacing what it held.
    pub async fn persist(&mut self) -> Result<(), StoreError> {
        self.store.save(self.designs.designs()).await?;
        self.dirty = false;
        info!(designs = self.designs.len(), "designs persisted");
        Ok(())
    }
}

impl fmt::Debug for Studio {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Studio")
            .field("builder", &self.builder)
            .field("designs", &self.designs)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
