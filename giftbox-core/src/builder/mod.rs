//! The builder state machine.
//!
//! [`Builder`] owns the live [`BuilderState`] of a session and is the only
//! way to change it. Its operations never fail: out-of-range steps are
//! clamped, and adding to a full box or adding an already selected item is
//! ignored. Callers that need to know whether something changed can look at
//! the returned [`AddItemOutcome`] or `bool`.

mod patch;

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::debug;

pub use patch::BuilderPatch;

use crate::pricing::common::progress_percent;
use crate::pricing::{PriceBreakdown, PriceCalculator, PricingConfig};
use crate::{BuilderState, BuilderStep, CatalogItem, TOTAL_STEPS};

const LAST_STEP: usize = TOTAL_STEPS - 1;

/// What [`Builder::add_item`] did with the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddItemOutcome {
    Added,
    /// The box already holds `max_items` items; nothing changed.
    BoxFull,
    /// An item with the same id is already selected; nothing changed.
    AlreadySelected,
}

impl AddItemOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Owns the live builder state and the pricing tables it is checked against.
#[derive(Debug, Clone)]
pub struct Builder {
    state: BuilderState,
    pricing: PricingConfig,
}

impl Builder {
    /// A builder holding the default state.
    pub fn new(pricing: PricingConfig) -> Self {
        Self {
            state: BuilderState::default(),
            pricing,
        }
    }

    pub fn state(&self) -> &BuilderState {
        &self.state
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    // ─── field updates ──────────────────────────────────────────────────

    /// Merges every `Some` field of `patch` into the state.
    ///
    /// There is no validation beyond the structural rules: a step is
    /// clamped like [`Builder::go_to_step`], and switching to a smaller box
    /// drops the most recently added items that no longer fit.
    pub fn set_partial(
        &mut self,
        mut patch: BuilderPatch,
    ) {
        if let Some(step) = patch.current_step.take() {
            self.go_to_step(step);
        }
        if let Some(box_size) = patch.box_size.take() {
            self.state.box_size = box_size;
            self.enforce_capacity();
        }
        patch.apply_fields(&mut self.state);
    }

    /// Adds `interest` if absent, removes it if present. Returns whether
    /// the interest is selected afterwards.
    pub fn toggle_interest(
        &mut self,
        interest: &str,
    ) -> bool {
        let interests = &mut self.state.recipient_interests;
        if interests.iter().any(|i| i == interest) {
            interests.retain(|i| i != interest);
            false
        } else {
            interests.push(interest.to_string());
            true
        }
    }

    // ─── step navigation ────────────────────────────────────────────────

    /// Jumps to `step`, clamped to `0..TOTAL_STEPS`.
    pub fn go_to_step(
        &mut self,
        step: i64,
    ) {
        let clamped = step.clamp(0, LAST_STEP as i64) as usize;
        debug!(requested = step, step = clamped, "go to step");
        self.state.current_step = clamped;
    }

    /// Moves forward one step; stays put on the last step.
    pub fn advance(&mut self) {
        self.state.current_step = (self.state.current_step + 1).min(LAST_STEP);
    }

    /// Moves back one step; stays put on the first step.
    pub fn retreat(&mut self) {
        self.state.current_step = self.state.current_step.saturating_sub(1);
    }

    pub fn current_step(&self) -> BuilderStep {
        // current_step is kept in range by every mutator
        BuilderStep::from_index(self.state.current_step).unwrap_or(BuilderStep::Checkout)
    }

    pub fn progress_percent(&self) -> u32 {
        progress_percent(self.state.current_step, TOTAL_STEPS)
    }

    // ─── item selection ─────────────────────────────────────────────────

    /// Appends `item` unless the box is full or the id is already selected.
    pub fn add_item(
        &mut self,
        item: CatalogItem,
    ) -> AddItemOutcome {
        if self.is_box_full() {
            debug!(item_id = %item.id, max_items = self.max_items(), "box full; item ignored");
            return AddItemOutcome::BoxFull;
        }
        if self.is_selected(&item.id) {
            debug!(item_id = %item.id, "item already selected; ignored");
            return AddItemOutcome::AlreadySelected;
        }
        debug!(item_id = %item.id, "item added");
        self.state.selected_items.push(item);
        AddItemOutcome::Added
    }

    /// Removes the item with `item_id`. Returns `false` if it was not selected.
    pub fn remove_item(
        &mut self,
        item_id: &str,
    ) -> bool {
        let before = self.state.selected_items.len();
        self.state.selected_items.retain(|item| item.id != item_id);
        before != self.state.selected_items.len()
    }

    pub fn is_selected(
        &self,
        item_id: &str,
    ) -> bool {
        self.state.selected_items.iter().any(|item| item.id == item_id)
    }

    pub fn max_items(&self) -> usize {
        self.pricing.max_items(self.state.box_size)
    }

    pub fn remaining_capacity(&self) -> usize {
        self.max_items().saturating_sub(self.state.selected_items.len())
    }

    pub fn is_box_full(&self) -> bool {
        self.remaining_capacity() == 0
    }

    // ─── whole-state operations ─────────────────────────────────────────

    /// Replaces the state with a fresh default.
    pub fn reset(&mut self) {
        debug!("builder reset");
        self.state = BuilderState::default();
    }

    /// Replaces the state with `state`, then re-applies the step bound and
    /// the uniqueness and capacity rules in case `state` came from storage
    /// written under different pricing tables.
    pub fn restore(
        &mut self,
        state: BuilderState,
    ) {
        self.state = state;
        self.state.current_step = self.state.current_step.min(LAST_STEP);
        let mut seen = HashSet::new();
        self.state
            .selected_items
            .retain(|item| seen.insert(item.id.clone()));
        self.enforce_capacity();
    }

    fn enforce_capacity(&mut self) {
        let max_items = self.max_items();
        if self.state.selected_items.len() > max_items {
            let dropped: Vec<String> = self.state.selected_items[max_items..]
                .iter()
                .map(|item| item.id.clone())
                .collect();
            debug!(max_items, ?dropped, "selection trimmed to box capacity");
            self.state.selected_items.truncate(max_items);
        }
    }

    // ─── pricing ────────────────────────────────────────────────────────

    pub fn price_breakdown(&self) -> PriceBreakdown {
        PriceCalculator::new(&self.pricing).calculate(&self.state)
    }

    pub fn compute_total(&self) -> Decimal {
        self.price_breakdown().total
    }

    // ─── checkout ───────────────────────────────────────────────────────

    pub fn delivery_is_complete(&self) -> bool {
        self.state.delivery_is_complete()
    }

    /// Marks the order as placed. Refused (returns `false`) while a required
    /// delivery field is blank.
    pub fn place_order(&mut self) -> bool {
        if !self.delivery_is_complete() {
            debug!("order refused; delivery details incomplete");
            return false;
        }
        self.state.order_placed = true;
        true
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{BoxSize, PackagingStyle};

    fn item(id: &str) -> CatalogItem {
        CatalogItem::new(id, "test", dec!(1))
    }

    fn priced(
        id: &str,
        price: Decimal,
    ) -> CatalogItem {
        CatalogItem::new(id, "test", price)
    }

    fn small_builder() -> Builder {
        let mut builder = Builder::default();
        builder.set_partial(BuilderPatch {
            box_size: Some(BoxSize::Small),
            ..Default::default()
        });
        builder
    }

    // =========================================================================
    // step navigation
    // =========================================================================

    #[test]
    fn go_to_step_clamps_every_integer() {
        let mut builder = Builder::default();

        for n in [-100_i64, -1, 0, 1, 4, 8, 9, 42, i64::MIN, i64::MAX] {
            builder.go_to_step(n);
            assert_eq!(builder.state().current_step as i64, n.clamp(0, 8), "n = {n}");
        }
    }

    #[test]
    fn go_to_step_touches_nothing_else() {
        let mut builder = Builder::default();
        builder.add_item(item("a"));
        let mut expected = builder.state().clone();

        builder.go_to_step(5);

        expected.current_step = 5;
        assert_eq!(builder.state(), &expected);
    }

    #[test]
    fn advance_saturates_at_last_step() {
        let mut builder = Builder::default();
        builder.go_to_step(8);

        for _ in 0..5 {
            builder.advance();
        }

        assert_eq!(builder.state().current_step, 8);
        assert_eq!(builder.current_step(), BuilderStep::Checkout);
    }

    #[test]
    fn retreat_saturates_at_first_step() {
        let mut builder = Builder::default();

        for _ in 0..5 {
            builder.retreat();
        }

        assert_eq!(builder.state().current_step, 0);
        assert_eq!(builder.current_step(), BuilderStep::Occasion);
    }

    #[test]
    fn advance_and_retreat_walk_the_wizard() {
        let mut builder = Builder::default();

        builder.advance();
        builder.advance();
        builder.retreat();

        assert_eq!(builder.current_step(), BuilderStep::Recipient);
        assert_eq!(builder.progress_percent(), 22);
    }

    // =========================================================================
    // item selection
    // =========================================================================

    #[test]
    fn small_box_holds_three_items() {
        let mut builder = small_builder();

        let outcomes: Vec<_> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|id| builder.add_item(item(id)))
            .collect();

        assert_eq!(
            outcomes,
            vec![
                AddItemOutcome::Added,
                AddItemOutcome::Added,
                AddItemOutcome::Added,
                AddItemOutcome::BoxFull
            ]
        );
        assert_eq!(builder.state().selected_items.len(), 3);
        assert!(!builder.is_selected("d"));
        assert!(builder.is_box_full());
    }

    #[test]
    fn duplicate_id_is_ignored() {
        let mut builder = Builder::default();

        builder.add_item(item("a"));
        let outcome = builder.add_item(priced("a", dec!(99)));

        assert_eq!(outcome, AddItemOutcome::AlreadySelected);
        assert_eq!(builder.state().selected_items.len(), 1);
        assert_eq!(builder.state().selected_items[0].price, dec!(1));
    }

    #[test]
    fn items_keep_insertion_order() {
        let mut builder = Builder::default();

        for id in ["c", "a", "b"] {
            builder.add_item(item(id));
        }

        let ids: Vec<_> = builder
            .state()
            .selected_items
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn remove_item_reports_whether_anything_changed() {
        let mut builder = Builder::default();
        builder.add_item(item("a"));

        assert!(builder.remove_item("a"));
        assert!(!builder.remove_item("a"));
        assert!(builder.state().selected_items.is_empty());
    }

    #[test]
    fn removing_frees_capacity() {
        let mut builder = small_builder();
        for id in ["a", "b", "c"] {
            builder.add_item(item(id));
        }

        builder.remove_item("b");

        assert_eq!(builder.remaining_capacity(), 1);
        assert!(builder.add_item(item("d")).is_added());
    }

    #[test]
    fn shrinking_the_box_drops_latest_items() {
        let mut builder = Builder::default();
        for id in ["a", "b", "c", "d", "e"] {
            builder.add_item(item(id));
        }

        builder.set_partial(BuilderPatch {
            box_size: Some(BoxSize::Small),
            ..Default::default()
        });

        let ids: Vec<_> = builder
            .state()
            .selected_items
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    // =========================================================================
    // set_partial / toggle_interest
    // =========================================================================

    #[test]
    fn set_partial_merges_fields() {
        let mut builder = Builder::default();

        builder.set_partial(BuilderPatch {
            occasion: Some("birthday".to_string()),
            budget: Some(dec!(120)),
            packaging_style: Some(PackagingStyle::Eco),
            ..Default::default()
        });
        builder.set_partial(BuilderPatch {
            recipient_name: Some("Jo".to_string()),
            ..Default::default()
        });

        let state = builder.state();
        assert_eq!(state.occasion, "birthday");
        assert_eq!(state.budget, dec!(120));
        assert_eq!(state.packaging_style, PackagingStyle::Eco);
        assert_eq!(state.recipient_name, "Jo");
    }

    #[test]
    fn set_partial_clamps_step() {
        let mut builder = Builder::default();

        builder.set_partial(BuilderPatch {
            current_step: Some(20),
            ..Default::default()
        });

        assert_eq!(builder.state().current_step, 8);
    }

    #[test]
    fn set_partial_does_not_validate_budget() {
        let mut builder = Builder::default();

        builder.set_partial(BuilderPatch {
            budget: Some(dec!(5000)),
            ..Default::default()
        });

        assert_eq!(builder.state().budget, dec!(5000));
    }

    #[test]
    fn toggle_interest_has_set_semantics() {
        let mut builder = Builder::default();

        assert!(builder.toggle_interest("books"));
        assert!(builder.toggle_interest("tea"));
        assert!(!builder.toggle_interest("books"));

        assert_eq!(builder.state().recipient_interests, vec!["tea".to_string()]);
    }

    #[test]
    fn toggle_interest_drops_every_duplicate() {
        let mut builder = Builder::default();
        builder.set_partial(BuilderPatch {
            recipient_interests: Some(vec!["tea".into(), "books".into(), "tea".into()]),
            ..Default::default()
        });

        assert!(!builder.toggle_interest("tea"));
        assert_eq!(builder.state().recipient_interests, vec!["books".to_string()]);
        assert!(builder.toggle_interest("tea"));
    }

    // =========================================================================
    // reset / restore
    // =========================================================================

    #[test]
    fn reset_returns_to_default_from_any_state() {
        let mut builder = Builder::default();
        builder.go_to_step(6);
        builder.add_item(item("a"));
        builder.set_partial(BuilderPatch {
            box_size: Some(BoxSize::Large),
            order_placed: Some(true),
            budget: Some(dec!(10)),
            ..Default::default()
        });

        builder.reset();
        assert_eq!(builder.state(), &BuilderState::default());

        builder.reset();
        assert_eq!(builder.state(), &BuilderState::default());
    }

    #[test]
    fn restore_repairs_out_of_range_state() {
        let mut builder = Builder::default();
        let state = BuilderState {
            current_step: 30,
            box_size: BoxSize::Small,
            selected_items: vec![item("a"), item("a"), item("b"), item("c"), item("d")],
            ..Default::default()
        };

        builder.restore(state);

        let ids: Vec<_> = builder
            .state()
            .selected_items
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(builder.state().current_step, 8);
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    // =========================================================================
    // pricing / checkout
    // =========================================================================

    #[test]
    fn compute_total_matches_reference_example() {
        let mut builder = Builder::default();
        builder.set_partial(BuilderPatch {
            box_size: Some(BoxSize::Medium),
            packaging_style: Some(PackagingStyle::Luxury),
            include_card: Some(true),
            ..Default::default()
        });
        builder.add_item(priced("a", dec!(10)));
        builder.add_item(priced("b", dec!(5)));

        assert_eq!(builder.compute_total(), dec!(63));
        assert_eq!(builder.price_breakdown().total, builder.compute_total());
    }

    #[test]
    fn compute_total_is_deterministic() {
        let mut builder = Builder::default();
        builder.add_item(priced("a", dec!(7.25)));

        assert_eq!(builder.compute_total(), builder.compute_total());
    }

    #[test]
    fn place_order_requires_delivery_details() {
        let mut builder = Builder::default();

        assert!(!builder.place_order());
        assert!(!builder.state().order_placed);

        builder.set_partial(BuilderPatch {
            delivery_name: Some("Ada".to_string()),
            delivery_address: Some("1 Main St".to_string()),
            delivery_city: Some("Springfield".to_string()),
            delivery_zip: Some("12345".to_string()),
            delivery_country: Some("US".to_string()),
            ..Default::default()
        });

        assert!(builder.place_order());
        assert!(builder.state().order_placed);
    }
}
