//! Total price of a configured gift box.
//!
//! ```text
//! total = round((box base price + sum of item prices) * packaging multiplier + card price)
//! ```
//!
//! The card price only applies when `include_card` is set. Rounding is to a
//! whole unit, half up.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use giftbox_core::pricing::{PriceCalculator, PricingConfig};
//! use giftbox_core::{BoxSize, BuilderState, CatalogItem, PackagingStyle};
//!
//! let state = BuilderState {
//!     box_size: BoxSize::Medium,
//!     packaging_style: PackagingStyle::Luxury,
//!     include_card: true,
//!     selected_items: vec![
//!         CatalogItem::new("a", "chocolates", dec!(10)),
//!         CatalogItem::new("b", "candles", dec!(5)),
//!     ],
//!     ..Default::default()
//! };
//!
//! let config = PricingConfig::default();
//! let breakdown = PriceCalculator::new(&config).calculate(&state);
//!
//! assert_eq!(breakdown.packaged_subtotal, dec!(60.0));
//! assert_eq!(breakdown.total, dec!(63));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::BuilderState;
use crate::pricing::common::round_to_whole;
use crate::pricing::config::PricingConfig;

/// Every intermediate value of a price computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Base price of the selected box size.
    pub box_price: Decimal,

    /// Sum of the selected item prices.
    pub items_subtotal: Decimal,

    /// Multiplier of the selected packaging style.
    pub packaging_multiplier: Decimal,

    /// `(box_price + items_subtotal) * packaging_multiplier`, unrounded.
    pub packaged_subtotal: Decimal,

    /// Card price, or zero when no card is included.
    pub card_price: Decimal,

    /// Rounded total to charge.
    pub total: Decimal,
}

/// Computes [`PriceBreakdown`]s against a borrowed [`PricingConfig`].
#[derive(Debug, Clone)]
pub struct PriceCalculator<'a> {
    config: &'a PricingConfig,
}

impl<'a> PriceCalculator<'a> {
    pub fn new(config: &'a PricingConfig) -> Self {
        Self { config }
    }

    /// Prices `state`. Pure: the same state and config always give the
    /// same breakdown.
    pub fn calculate(
        &self,
        state: &BuilderState,
    ) -> PriceBreakdown {
        let box_price = self.config.base_price(state.box_size);
        let items_subtotal = self.items_subtotal(state);
        let packaging_multiplier = self.config.multiplier(state.packaging_style);
        let packaged_subtotal = (box_price + items_subtotal) * packaging_multiplier;
        let card_price = self.card_price(state.include_card);
        let total = round_to_whole(packaged_subtotal + card_price);

        PriceBreakdown {
            box_price,
            items_subtotal,
            packaging_multiplier,
            packaged_subtotal,
            card_price,
            total,
        }
    }

    /// Rounded total; shorthand for `calculate(state).total`.
    pub fn total(
        &self,
        state: &BuilderState,
    ) -> Decimal {
        self.calculate(state).total
    }

    fn items_subtotal(
        &self,
        state: &BuilderState,
    ) -> Decimal {
        state.selected_items.iter().map(|item| item.price).sum()
    }

    fn card_price(
        &self,
        include_card: bool,
    ) -> Decimal {
        if include_card {
            self.config.card_price
        } else {
            Decimal::ZERO
        }
    }
}
