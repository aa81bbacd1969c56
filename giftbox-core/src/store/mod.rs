pub mod factory;
pub mod memory;
pub mod repository;

pub use factory::{DesignStoreFactory, StoreConfig, StoreRegistry};
pub use memory::{MemoryDesignStore, MemoryStoreFactory};
pub use repository::{DesignStore, SCHEMA_VERSION, StoreError};
