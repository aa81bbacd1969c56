//! Price computation for gift boxes.
//!
//! [`PricingConfig`] holds the box-size, packaging and card tables;
//! [`PriceCalculator`] turns a [`crate::BuilderState`] into a
//! [`PriceBreakdown`] using those tables.

pub mod common;
pub mod config;
pub mod quote;

pub use config::{BoxSizeTable, BoxTier, PackagingTable, PackagingTier, PricingConfig, PricingConfigError};
pub use quote::{PriceBreakdown, PriceCalculator};
