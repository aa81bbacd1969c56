use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::clock::{Clock, SystemClock};
use crate::{BuilderState, DesignId, SavedDesign};

/// The collection of saved designs.
///
/// Lookups that miss are no-ops that report the miss through their return
/// value; nothing here fails. Ids are unique for the lifetime of the
/// collection.
#[derive(Debug, Clone)]
pub struct DesignRepository {
    designs: Vec<SavedDesign>,
    clock: Arc<dyn Clock>,
}

impl DesignRepository {
    /// An empty collection stamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            designs: Vec::new(),
            clock,
        }
    }

    /// Replaces the collection with `designs` as read back from storage.
    ///
    /// A design whose id was already seen earlier in `designs` is dropped.
    pub fn hydrate(
        &mut self,
        designs: Vec<SavedDesign>,
    ) {
        let mut seen = HashSet::new();
        self.designs = designs
            .into_iter()
            .filter(|design| {
                let fresh = seen.insert(design.id);
                if !fresh {
                    warn!(id = %design.id, name = %design.name, "duplicate design id dropped");
                }
                fresh
            })
            .collect();
        debug!(count = self.designs.len(), "designs hydrated");
    }

    pub fn designs(&self) -> &[SavedDesign] {
        &self.designs
    }

    pub fn get(
        &self,
        id: DesignId,
    ) -> Option<&SavedDesign> {
        self.designs.iter().find(|design| design.id == id)
    }

    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    /// Stores a copy of `state` and returns the new design's id.
    ///
    /// A missing or empty `name` becomes `"Gift Box {M/D/YYYY}"` for the
    /// current local date.
    pub fn save(
        &mut self,
        state: &BuilderState,
        name: Option<&str>,
    ) -> DesignId {
        let saved_at = self.clock.now();
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_name(saved_at),
        };
        let id = self.next_id();

        info!(%id, %name, "design saved");
        self.designs.push(SavedDesign {
            id,
            name,
            saved_at,
            state: state.clone(),
        });
        id
    }

    /// A copy of the stored state, or `None` if `id` is unknown.
    pub fn load(
        &self,
        id: DesignId,
    ) -> Option<BuilderState> {
        let state = self.get(id).map(|design| design.state.clone());
        if state.is_none() {
            warn!(%id, "load of unknown design ignored");
        }
        state
    }

    /// Removes the design. Returns `false` if `id` is unknown.
    pub fn delete(
        &mut self,
        id: DesignId,
    ) -> bool {
        let before = self.designs.len();
        self.designs.retain(|design| design.id != id);
        let deleted = before != self.designs.len();
        if deleted {
            info!(%id, "design deleted");
        } else {
            warn!(%id, "delete of unknown design ignored");
        }
        deleted
    }

    /// Renames the design. Any string is accepted, including an empty one.
    /// Returns `false` if `id` is unknown.
    pub fn rename(
        &mut self,
        id: DesignId,
        name: &str,
    ) -> bool {
        match self.designs.iter_mut().find(|design| design.id == id) {
            Some(design) => {
                info!(%id, from = %design.name, to = %name, "design renamed");
                design.name = name.to_string();
                true
            }
            None => {
                warn!(%id, "rename of unknown design ignored");
                false
            }
        }
    }

    /// Appends a copy named `"{name} (Copy)"` with a fresh id and timestamp.
    /// Returns the copy's id, or `None` if `id` is unknown.
    pub fn duplicate(
        &mut self,
        id: DesignId,
    ) -> Option<DesignId> {
        let Some(original) = self.get(id) else {
            warn!(%id, "duplicate of unknown design ignored");
            return None;
        };
        let copy = SavedDesign {
            id: self.next_id(),
            name: format!("{} (Copy)", original.name),
            saved_at: self.clock.now(),
            state: original.state.clone(),
        };
        let copy_id = copy.id;

        info!(%id, %copy_id, "design duplicated");
        self.designs.push(copy);
        Some(copy_id)
    }

    fn next_id(&self) -> DesignId {
        loop {
            let id = Uuid::now_v7();
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}

impl Default for DesignRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn default_name(saved_at: DateTime<Utc>) -> String {
    format!(
        "Gift Box {}",
        saved_at.with_timezone(&Local).format("%-m/%-d/%Y")
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{BoxSize, CatalogItem};

    /// Starts at a fixed instant and moves one second forward per reading.
    struct SteppingClock(Mutex<DateTime<Utc>>);

    impl SteppingClock {
        fn starting_at(start: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self(Mutex::new(start)))
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut now = self.0.lock().unwrap();
            let current = *now;
            *now = current + Duration::seconds(1);
            current
        }
    }

    fn repo() -> DesignRepository {
        let start = Utc.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).unwrap();
        DesignRepository::with_clock(SteppingClock::starting_at(start))
    }

    fn sample_state() -> BuilderState {
        BuilderState {
            occasion: "anniversary".to_string(),
            box_size: BoxSize::Large,
            selected_items: vec![CatalogItem::new("tea-1", "drinks", dec!(8))],
            ..Default::default()
        }
    }

    #[test]
    fn save_stores_a_copy_under_a_new_id() {
        let mut repo = repo();
        let state = sample_state();

        let id = repo.save(&state, Some("Trip"));

        let design = repo.get(id).unwrap();
        assert_eq!(design.name, "Trip");
        assert_eq!(design.state, state);
        assert_eq!(
            design.saved_at,
            Utc.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn save_without_name_uses_dated_default() {
        let mut repo = repo();

        let unnamed = repo.save(&sample_state(), None);
        let blank = repo.save(&sample_state(), Some(""));

        assert_eq!(repo.get(unnamed).unwrap().name, "Gift Box 3/7/2026");
        assert_eq!(repo.get(blank).unwrap().name, "Gift Box 3/7/2026");
    }

    #[test]
    fn default_name_follows_local_calendar_date() {
        let late_evening_utc = Utc.with_ymd_and_hms(2026, 3, 7, 23, 30, 0).unwrap();
        let mut repo = DesignRepository::with_clock(SteppingClock::starting_at(late_evening_utc));

        let id = repo.save(&sample_state(), None);

        let local = late_evening_utc.with_timezone(&Local);
        assert_eq!(
            repo.get(id).unwrap().name,
            format!("Gift Box {}", local.format("%-m/%-d/%Y"))
        );
    }

    #[test]
    fn saved_ids_are_unique() {
        let mut repo = repo();

        let ids: HashSet<_> = (0..50).map(|_| repo.save(&sample_state(), None)).collect();

        assert_eq!(ids.len(), 50);
        assert_eq!(repo.len(), 50);
    }

    #[test]
    fn load_returns_an_independent_copy() {
        let mut repo = repo();
        let id = repo.save(&sample_state(), Some("X"));

        let mut loaded = repo.load(id).unwrap();
        loaded.selected_items.clear();
        loaded.occasion = "changed".to_string();

        assert_eq!(repo.get(id).unwrap().state, sample_state());
    }

    #[test]
    fn load_unknown_id_is_none() {
        assert_eq!(repo().load(Uuid::now_v7()), None);
    }

    #[test]
    fn duplicate_appends_named_copy() {
        let mut repo = repo();
        let id = repo.save(&sample_state(), Some("Trip"));

        let copy_id = repo.duplicate(id).unwrap();

        let original = repo.get(id).unwrap().clone();
        let copy = repo.get(copy_id).unwrap();
        assert_ne!(copy_id, id);
        assert_eq!(copy.name, "Trip (Copy)");
        assert!(copy.saved_at > original.saved_at);
        assert_eq!(copy.state, original.state);
        assert_eq!(repo.designs().last().unwrap().id, copy_id);
    }

    #[test]
    fn duplicate_of_a_copy_stacks_suffix() {
        let mut repo = repo();
        let id = repo.save(&sample_state(), Some("Trip"));
        let copy = repo.duplicate(id).unwrap();

        let copy_of_copy = repo.duplicate(copy).unwrap();

        assert_eq!(repo.get(copy_of_copy).unwrap().name, "Trip (Copy) (Copy)");
    }

    #[test]
    fn rename_changes_only_the_name() {
        let mut repo = repo();
        let id = repo.save(&sample_state(), Some("Old"));
        let before = repo.get(id).unwrap().clone();

        assert!(repo.rename(id, "New"));

        let after = repo.get(id).unwrap();
        assert_eq!(after.name, "New");
        assert_eq!(after.saved_at, before.saved_at);
        assert_eq!(after.state, before.state);
    }

    #[test]
    fn rename_accepts_empty_name() {
        let mut repo = repo();
        let id = repo.save(&sample_state(), Some("Old"));

        assert!(repo.rename(id, ""));
        assert_eq!(repo.get(id).unwrap().name, "");
    }

    #[test]
    fn delete_removes_only_the_target() {
        let mut repo = repo();
        let keep = repo.save(&sample_state(), Some("Keep"));
        let drop = repo.save(&sample_state(), Some("Drop"));

        assert!(repo.delete(drop));

        assert_eq!(repo.len(), 1);
        assert!(repo.get(keep).is_some());
    }

    #[test]
    fn missing_ids_leave_collection_unchanged() {
        let mut repo = repo();
        repo.save(&sample_state(), Some("Only"));
        let before = repo.designs().to_vec();
        let missing = Uuid::now_v7();

        assert!(!repo.delete(missing));
        assert!(!repo.rename(missing, "X"));
        assert_eq!(repo.duplicate(missing), None);

        assert_eq!(repo.designs(), before.as_slice());
    }

    #[test]
    fn hydrate_drops_repeated_ids() {
        let mut source = repo();
        let id = source.save(&sample_state(), Some("First"));
        let mut designs = source.designs().to_vec();
        let mut repeat = designs[0].clone();
        repeat.name = "Second".to_string();
        designs.push(repeat);

        let mut repo = repo();
        repo.hydrate(designs);

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get(id).unwrap().name, "First");
    }
}
