use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BoxSize, BuilderState, PackagingStyle};

/// A partial update for [`BuilderState`].
///
/// Each `Some` field replaces the corresponding state field when applied
/// through [`crate::Builder::set_partial`]. Selected items are not part of
/// the patch; they change only through `add_item` and `remove_item`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuilderPatch {
    /// Clamped into the valid step range when applied.
    pub current_step: Option<i64>,
    pub occasion: Option<String>,
    pub recipient_relationship: Option<String>,
    pub recipient_name: Option<String>,
    pub recipient_interests: Option<Vec<String>>,
    pub budget: Option<Decimal>,
    pub box_size: Option<BoxSize>,
    pub packaging_style: Option<PackagingStyle>,
    pub theme_palette: Option<String>,
    pub theme_pattern: Option<String>,
    pub include_card: Option<bool>,
    pub card_tone: Option<String>,
    pub card_message: Option<String>,
    pub delivery_name: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_city: Option<String>,
    pub delivery_zip: Option<String>,
    pub delivery_country: Option<String>,
    pub delivery_date: Option<String>,
    pub delivery_notes: Option<String>,
    pub order_placed: Option<bool>,
}

impl BuilderPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Copies the plain fields into `state`.
    ///
    /// `current_step` and `box_size` carry invariants, so the builder
    /// applies those two itself.
    pub(crate) fn apply_fields(
        self,
        state: &mut BuilderState,
    ) {
        fn set<T>(
            target: &mut T,
            value: Option<T>,
        ) {
            if let Some(value) = value {
                *target = value;
            }
        }

        set(&mut state.occasion, self.occasion);
        set(&mut state.recipient_relationship, self.recipient_relationship);
        set(&mut state.recipient_name, self.recipient_name);
        set(&mut state.recipient_interests, self.recipient_interests);
        set(&mut state.budget, self.budget);
        set(&mut state.packaging_style, self.packaging_style);
        set(&mut state.theme_palette, self.theme_palette);
        set(&mut state.theme_pattern, self.theme_pattern);
        set(&mut state.include_card, self.include_card);
        set(&mut state.card_tone, self.card_tone);
        set(&mut state.card_message, self.card_message);
        set(&mut state.delivery_name, self.delivery_name);
        set(&mut state.delivery_address, self.delivery_address);
        set(&mut state.delivery_city, self.delivery_city);
        set(&mut state.delivery_zip, self.delivery_zip);
        set(&mut state.delivery_country, self.delivery_country);
        set(&mut state.delivery_date, self.delivery_date);
        set(&mut state.delivery_notes, self.delivery_notes);
        set(&mut state.order_placed, self.order_placed);
    }
}
