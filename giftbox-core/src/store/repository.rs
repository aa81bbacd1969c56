use async_trait::async_trait;
use thiserror::Error;

use crate::SavedDesign;

/// Version of the persisted design layout. Stores record it next to each
/// design and refuse rows written by a newer layout.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Durable home of the saved-design collection.
///
/// The collection is read and written as a whole. `save` replaces whatever
/// was stored before, so concurrent writers resolve as last-writer-wins.
#[async_trait]
pub trait DesignStore: Send + Sync {
    /// Every stored design, in collection order. Empty when nothing has
    /// been saved yet.
    async fn load(&self) -> Result<Vec<SavedDesign>, StoreError>;

    /// Replaces the stored collection with `designs`.
    async fn save(
        &self,
        designs: &[SavedDesign],
    ) -> Result<(), StoreError>;
}
