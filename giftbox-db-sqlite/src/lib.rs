mod codec;
pub mod factory;
pub mod repository;

pub use factory::SqliteStoreFactory;
pub use repository::SqliteDesignStore;
