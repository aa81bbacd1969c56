//! End-to-end behavior of the builder and the design collection through the
//! public API.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use giftbox_core::catalog::{self, CatalogQuery, CatalogSort};
use giftbox_core::store::MemoryDesignStore;
use giftbox_core::{
    AddItemOutcome, BoxSize, Builder, BuilderPatch, BuilderState, CatalogItem, Clock,
    DesignRepository, PackagingStyle, PricingConfig, Studio, TOTAL_STEPS,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

struct TickingClock(Mutex<DateTime<Utc>>);

impl TickingClock {
    fn new() -> Self {
        Self(Mutex::new(Utc.with_ymd_and_hms(2026, 12, 24, 12, 0, 0).unwrap()))
    }
}

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut now = self.0.lock().unwrap();
        let current = *now;
        *now += Duration::minutes(1);
        current
    }
}

fn item(
    id: &str,
    price: rust_decimal::Decimal,
) -> CatalogItem {
    CatalogItem::new(id, "misc", price)
}

#[test]
fn go_to_step_clamps_any_integer() {
    let mut builder = Builder::default();

    for (requested, expected) in [
        (i64::MIN, 0),
        (-1, 0),
        (0, 0),
        (4, 4),
        (8, 8),
        (9, 8),
        (i64::MAX, 8),
    ] {
        builder.go_to_step(requested);
        assert_eq!(builder.state().current_step, expected, "requested {requested}");
    }
}

#[test]
fn advance_and_retreat_saturate() {
    let mut builder = Builder::default();

    for _ in 0..TOTAL_STEPS + 3 {
        builder.advance();
    }
    assert_eq!(builder.state().current_step, TOTAL_STEPS - 1);
    assert_eq!(builder.progress_percent(), 100);

    for _ in 0..TOTAL_STEPS + 3 {
        builder.retreat();
    }
    assert_eq!(builder.state().current_step, 0);
}

#[test]
fn small_box_holds_three_and_ignores_duplicates() {
    let mut builder = Builder::default();
    builder.set_partial(BuilderPatch {
        box_size: Some(BoxSize::Small),
        ..Default::default()
    });

    assert_eq!(builder.add_item(item("a", dec!(1))), AddItemOutcome::Added);
    assert_eq!(builder.add_item(item("a", dec!(1))), AddItemOutcome::AlreadySelected);
    assert_eq!(builder.add_item(item("b", dec!(1))), AddItemOutcome::Added);
    assert_eq!(builder.add_item(item("c", dec!(1))), AddItemOutcome::Added);
    assert_eq!(builder.add_item(item("d", dec!(1))), AddItemOutcome::BoxFull);

    let ids: Vec<&str> = builder
        .state()
        .selected_items
        .iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert!(builder.is_box_full());
}

#[test]
fn medium_luxury_with_card_prices_at_63() {
    let mut builder = Builder::new(PricingConfig::default());
    builder.set_partial(BuilderPatch {
        box_size: Some(BoxSize::Medium),
        packaging_style: Some(PackagingStyle::Luxury),
        include_card: Some(true),
        ..Default::default()
    });
    builder.add_item(item("ten", dec!(10)));
    builder.add_item(item("five", dec!(5)));

    assert_eq!(builder.compute_total(), dec!(63));
}

#[test]
fn reset_restores_default_state() {
    let mut builder = Builder::default();
    builder.set_partial(BuilderPatch {
        occasion: Some("wedding".to_string()),
        budget: Some(dec!(120)),
        current_step: Some(5),
        ..Default::default()
    });
    builder.add_item(item("a", dec!(3)));

    builder.reset();

    assert_eq!(builder.state(), &BuilderState::default());
}

#[tokio::test]
async fn save_reset_load_round_trip_without_aliasing() {
    let store = MemoryDesignStore::new();
    let mut studio = Studio::open_with_clock(
        Box::new(store.clone()),
        PricingConfig::default(),
        Arc::new(TickingClock::new()),
    )
    .await
    .unwrap();
    studio.builder_mut().set_partial(BuilderPatch {
        recipient_name: Some("Sam".to_string()),
        packaging_style: Some(PackagingStyle::Eco),
        ..Default::default()
    });
    studio.builder_mut().add_item(item("a", dec!(8)));
    let before = studio.builder().state().clone();

    let id = studio.save_design(Some("For Sam"));
    studio.builder_mut().reset();
    studio.builder_mut().add_item(item("b", dec!(2)));
    assert_eq!(studio.designs().get(id).map(|d| d.state.clone()), Some(before.clone()));

    assert!(studio.load_design(id));
    assert_eq!(studio.builder().state(), &before);

    studio.builder_mut().remove_item("a");
    assert_eq!(studio.designs().get(id).map(|d| d.state.selected_items.len()), Some(1));
}

#[test]
fn duplicate_names_copy_and_stamps_later() {
    let mut designs = DesignRepository::with_clock(Arc::new(TickingClock::new()));
    let id = designs.save(&BuilderState::default(), Some("Holiday"));

    let copy_id = designs.duplicate(id).unwrap();

    let original = designs.get(id).unwrap();
    let copy = designs.get(copy_id).unwrap();
    assert_ne!(copy_id, id);
    assert_eq!(copy.name, "Holiday (Copy)");
    assert!(copy.saved_at > original.saved_at);
    assert_eq!(copy.state, original.state);
}

#[test]
fn default_name_uses_save_date() {
    let mut designs = DesignRepository::with_clock(Arc::new(TickingClock::new()));

    let unnamed = designs.save(&BuilderState::default(), None);
    let blank = designs.save(&BuilderState::default(), Some(""));

    assert_eq!(designs.get(unnamed).unwrap().name, "Gift Box 12/24/2026");
    assert_eq!(designs.get(blank).unwrap().name, "Gift Box 12/24/2026");
}

#[test]
fn missing_ids_leave_collection_unchanged() {
    let mut designs = DesignRepository::with_clock(Arc::new(TickingClock::new()));
    designs.save(&BuilderState::default(), Some("Keep"));
    let before = designs.designs().to_vec();
    let unknown = uuid::Uuid::now_v7();

    assert!(!designs.delete(unknown));
    assert!(!designs.rename(unknown, "Other"));
    assert_eq!(designs.duplicate(unknown), None);
    assert_eq!(designs.load(unknown), None);
    assert_eq!(designs.designs(), before.as_slice());
}

#[test]
fn browsing_feeds_the_builder() {
    let catalog = vec![
        CatalogItem {
            popular: true,
            ..CatalogItem::new("candle", "candles", dec!(12))
        },
        CatalogItem::new("tea", "drinks", dec!(7)),
        CatalogItem::new("cocoa", "drinks", dec!(6)),
    ];
    let query = CatalogQuery {
        category: Some("drinks".to_string()),
        sort: CatalogSort::PriceLow,
        ..Default::default()
    };
    let mut builder = Builder::default();

    for item in catalog::browse(&catalog, &query) {
        builder.add_item(item.clone());
    }

    // M box: 25 + 13, classic, card 3
    assert_eq!(builder.compute_total(), dec!(41));
    assert_eq!(catalog::categories(&catalog), vec!["candles", "drinks"]);
}
