use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BoxSize, CatalogItem, PackagingStyle};

/// Number of steps in the builder wizard.
pub const TOTAL_STEPS: usize = 9;

/// The wizard steps, in the order the builder walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuilderStep {
    Occasion,
    Recipient,
    Budget,
    Packaging,
    Theme,
    Items,
    Card,
    Preview,
    Checkout,
}

impl BuilderStep {
    pub fn all() -> &'static [BuilderStep; TOTAL_STEPS] {
        &[
            BuilderStep::Occasion,
            BuilderStep::Recipient,
            BuilderStep::Budget,
            BuilderStep::Packaging,
            BuilderStep::Theme,
            BuilderStep::Items,
            BuilderStep::Card,
            BuilderStep::Preview,
            BuilderStep::Checkout,
        ]
    }

    /// Step at `index`, or `None` past the last step.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Occasion => "occasion",
            Self::Recipient => "recipient",
            Self::Budget => "budget",
            Self::Packaging => "packaging",
            Self::Theme => "theme",
            Self::Items => "items",
            Self::Card => "card",
            Self::Preview => "preview",
            Self::Checkout => "checkout",
        }
    }
}

/// Every selection the builder wizard collects.
///
/// Only [`crate::Builder`] mutates a live instance; it upholds the step
/// bounds and the no-duplicate and capacity rules on `selected_items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderState {
    pub current_step: usize,

    // Occasion and recipient
    pub occasion: String,
    pub recipient_relationship: String,
    pub recipient_name: String,
    pub recipient_interests: Vec<String>,

    pub budget: Decimal,

    // Box
    pub box_size: BoxSize,
    pub packaging_style: PackagingStyle,
    pub theme_palette: String,
    pub theme_pattern: String,
    pub selected_items: Vec<CatalogItem>,

    // Card
    pub include_card: bool,
    pub card_tone: String,
    pub card_message: String,

    // Delivery
    pub delivery_name: String,
    pub delivery_address: String,
    pub delivery_city: String,
    pub delivery_zip: String,
    pub delivery_country: String,
    pub delivery_date: String,
    pub delivery_notes: String,

    pub order_placed: bool,
}

impl Default for BuilderState {
    fn default() -> Self {
        Self {
            current_step: 0,
            occasion: String::new(),
            recipient_relationship: String::new(),
            recipient_name: String::new(),
            recipient_interests: Vec::new(),
            budget: Decimal::new(50, 0),
            box_size: BoxSize::Medium,
            packaging_style: PackagingStyle::Classic,
            theme_palette: "rose".to_string(),
            theme_pattern: "none".to_string(),
            selected_items: Vec::new(),
            include_card: true,
            card_tone: String::new(),
            card_message: String::new(),
            delivery_name: String::new(),
            delivery_address: String::new(),
            delivery_city: String::new(),
            delivery_zip: String::new(),
            delivery_country: String::new(),
            delivery_date: String::new(),
            delivery_notes: String::new(),
            order_placed: false,
        }
    }
}

impl BuilderState {
    /// True when every required delivery field has non-blank content.
    ///
    /// `delivery_date` and `delivery_notes` are optional.
    pub fn delivery_is_complete(&self) -> bool {
        [
            &self.delivery_name,
            &self.delivery_address,
            &self.delivery_city,
            &self.delivery_zip,
            &self.delivery_country,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}
