//! Lookup tables that drive pricing and box capacity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BoxSize, PackagingStyle};

/// Errors reported by [`PricingConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingConfigError {
    #[error("base price for box size {0} must not be negative, got {1}")]
    NegativeBasePrice(BoxSize, Decimal),

    #[error("box size {0} must hold at least one item")]
    ZeroCapacity(BoxSize),

    #[error("multiplier for packaging style {0} must be positive, got {1}")]
    NonPositiveMultiplier(PackagingStyle, Decimal),

    #[error("card price must not be negative, got {0}")]
    NegativeCardPrice(Decimal),
}

/// Price and capacity of one box size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxTier {
    pub label: String,
    pub base_price: Decimal,
    pub max_items: usize,
}

/// Price multiplier of one packaging style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagingTier {
    pub label: String,
    pub multiplier: Decimal,
}

/// One [`BoxTier`] per [`BoxSize`], keyed by the short code in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxSizeTable {
    #[serde(rename = "S")]
    pub small: BoxTier,
    #[serde(rename = "M")]
    pub medium: BoxTier,
    #[serde(rename = "L")]
    pub large: BoxTier,
}

impl Default for BoxSizeTable {
    fn default() -> Self {
        Self {
            small: BoxTier {
                label: "Small".to_string(),
                base_price: Decimal::new(15, 0),
                max_items: 3,
            },
            medium: BoxTier {
                label: "Medium".to_string(),
                base_price: Decimal::new(25, 0),
                max_items: 6,
            },
            large: BoxTier {
                label: "Large".to_string(),
                base_price: Decimal::new(40, 0),
                max_items: 10,
            },
        }
    }
}

/// One [`PackagingTier`] per [`PackagingStyle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingTable {
    pub classic: PackagingTier,
    pub luxury: PackagingTier,
    pub eco: PackagingTier,
}

impl Default for PackagingTable {
    fn default() -> Self {
        Self {
            classic: PackagingTier {
                label: "Classic".to_string(),
                multiplier: Decimal::ONE,
            },
            luxury: PackagingTier {
                label: "Luxury".to_string(),
                multiplier: Decimal::new(15, 1),
            },
            eco: PackagingTier {
                label: "Eco-Friendly".to_string(),
                multiplier: Decimal::new(12, 1),
            },
        }
    }
}

/// Pricing inputs for the builder.
///
/// Every enum variant has an entry, so lookups cannot miss. The default is
/// the reference price list:
///
/// | size | base | max items |   | packaging | multiplier |
/// |------|------|-----------|---|-----------|------------|
/// | S    | 15   | 3         |   | classic   | 1          |
/// | M    | 25   | 6         |   | luxury    | 1.5        |
/// | L    | 40   | 10        |   | eco       | 1.2        |
///
/// plus a flat card price of 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub box_sizes: BoxSizeTable,
    pub packaging: PackagingTable,
    pub card_price: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            box_sizes: BoxSizeTable::default(),
            packaging: PackagingTable::default(),
            card_price: Decimal::new(3, 0),
        }
    }
}

impl PricingConfig {
    pub fn box_tier(
        &self,
        size: BoxSize,
    ) -> &BoxTier {
        match size {
            BoxSize::Small => &self.box_sizes.small,
            BoxSize::Medium => &self.box_sizes.medium,
            BoxSize::Large => &self.box_sizes.large,
        }
    }

    pub fn packaging_tier(
        &self,
        style: PackagingStyle,
    ) -> &PackagingTier {
        match style {
            PackagingStyle::Classic => &self.packaging.classic,
            PackagingStyle::Luxury => &self.packaging.luxury,
            PackagingStyle::Eco => &self.packaging.eco,
        }
    }

    pub fn base_price(
        &self,
        size: BoxSize,
    ) -> Decimal {
        self.box_tier(size).base_price
    }

    pub fn max_items(
        &self,
        size: BoxSize,
    ) -> usize {
        self.box_tier(size).max_items
    }

    pub fn multiplier(
        &self,
        style: PackagingStyle,
    ) -> Decimal {
        self.packaging_tier(style).multiplier
    }

    /// Checks that every table entry is usable for pricing.
    ///
    /// # Errors
    ///
    /// Returns [`PricingConfigError`] if:
    /// - a box size has a negative base price or a capacity of zero
    /// - a packaging style has a multiplier of zero or less
    /// - the card price is negative
    pub fn validate(&self) -> Result<(), PricingConfigError> {
        for size in BoxSize::all() {
            let tier = self.box_tier(*size);
            if tier.base_price < Decimal::ZERO {
                return Err(PricingConfigError::NegativeBasePrice(*size, tier.base_price));
            }
            if tier.max_items == 0 {
                return Err(PricingConfigError::ZeroCapacity(*size));
            }
        }
        for style in PackagingStyle::all() {
            let multiplier = self.multiplier(*style);
            if multiplier <= Decimal::ZERO {
                return Err(PricingConfigError::NonPositiveMultiplier(*style, multiplier));
            }
        }
        if self.card_price < Decimal::ZERO {
            return Err(PricingConfigError::NegativeCardPrice(self.card_price));
        }
        Ok(())
    }
}
