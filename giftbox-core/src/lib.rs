pub mod builder;
pub mod catalog;
pub mod designs;
pub mod models;
pub mod pricing;
pub mod store;
pub mod studio;

pub use builder::{AddItemOutcome, Builder, BuilderPatch};
pub use designs::{Clock, DesignRepository, SystemClock};
pub use models::*;
pub use pricing::{PriceBreakdown, PricingConfig, PricingConfigError};
pub use store::{DesignStore, SCHEMA_VERSION, StoreError};
pub use studio::Studio;
