use super::backend::StorageBackend;
use crate::colors::toggle_in;
use crate::error::Result;
use crate::model::{ColorId, ColorKind, FilterCriteria, FilterUpdate};

/// Callback invoked with the new criteria after every mutation.
pub type Listener = Box<dyn FnMut(&FilterCriteria)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The single current [`FilterCriteria`], persisted and broadcast on every change.
///
/// Instances are independent: tests build one per case over a [`super::MemBackend`],
/// the CLI builds one over a [`super::FsBackend`].
pub struct FilterStore<B: StorageBackend> {
    backend: B,
    name: String,
    criteria: FilterCriteria,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    last_persist_error: Option<String>,
}

impl<B: StorageBackend> FilterStore<B> {
    /// Open the store, restoring the criteria saved under `name` if there are any.
    ///
    /// An unreadable or corrupt blob is logged and replaced by empty criteria.
    pub fn open(backend: B, name: impl Into<String>) -> Self {
        let name = name.into();
        let criteria = match restore(&backend, &name) {
            Ok(Some(criteria)) => criteria,
            Ok(None) => FilterCriteria::default(),
            Err(e) => {
                tracing::warn!(store = %name, error = %e, "discarding unreadable filter state");
                FilterCriteria::default()
            }
        };

        Self {
            backend,
            name,
            criteria,
            listeners: Vec::new(),
            next_subscription: 0,
            last_persist_error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn get_filters(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the entire criteria.
    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.commit();
    }

    /// Merge one field, preserving the others.
    pub fn update_filter(&mut self, update: FilterUpdate) {
        tracing::debug!(key = %update.key(), "updating filter");
        self.criteria.apply(update);
        self.commit();
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.commit();
    }

    /// Add `id` to the `kind` list when absent, remove it when present.
    pub fn toggle_color_filter(&mut self, kind: ColorKind, id: ColorId) {
        toggle_in(self.criteria.colors_mut(kind), id);
        self.commit();
    }

    /// Empty both color lists, leaving every other field alone.
    pub fn reset_color_filters(&mut self) {
        self.criteria.exterior_colors.clear();
        self.criteria.interior_colors.clear();
        self.commit();
    }

    /// Set both price bounds at once. Rejected (no change, returns `false`)
    /// unless `min < max`.
    pub fn set_price_range(&mut self, min: f64, max: f64) -> bool {
        // NaN bounds fail this check too.
        if min.partial_cmp(&max) != Some(std::cmp::Ordering::Less) {
            tracing::debug!(min, max, "ignoring inverted price range");
            return false;
        }
        self.criteria.min_price = Some(min);
        self.criteria.max_price = Some(max);
        self.commit();
        true
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// The most recent persistence failure, cleared by the next successful save.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    fn commit(&mut self) {
        match self.persist() {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                tracing::warn!(store = %self.name, error = %e, "failed to persist filters, keeping in-memory state");
                self.last_persist_error = Some(e.to_string());
            }
        }

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.criteria);
        }
    }

    fn persist(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.criteria)?;
        self.backend.save(&self.name, &blob)
    }
}

fn restore<B: StorageBackend>(backend: &B, name: &str) -> Result<Option<FilterCriteria>> {
    match backend.load(name)? {
        Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemBackend;
    use crate::test_utils::TestEnv;
    use std::cell::RefCell;
    use std::rc::Rc;

    const NAME: &str = "filter-storage";

    fn store() -> FilterStore<MemBackend> {
        FilterStore::open(MemBackend::new(), NAME)
    }

    #[test]
    fn starts_empty_without_saved_state() {
        assert!(store().get_filters().is_empty());
    }

    #[test]
    fn restores_saved_state() {
        let backend = MemBackend::new().with_blob(NAME, r#"{"manufacturer":"Tesla","minYear":2020}"#);
        let store = FilterStore::open(backend, NAME);
        assert_eq!(store.get_filters().manufacturer.as_deref(), Some("Tesla"));
        assert_eq!(store.get_filters().min_year, Some(2020));
    }

    #[test]
    fn corrupt_state_starts_empty() {
        let backend = MemBackend::new().with_blob(NAME, "not json");
        let store = FilterStore::open(backend, NAME);
        assert!(store.get_filters().is_empty());
    }

    #[test]
    fn update_preserves_other_fields_and_persists() {
        let mut store = store();
        store.update_filter(FilterUpdate::Manufacturer(Some("Kia".into())));
        store.update_filter(FilterUpdate::Model(Some("EV6".into())));

        assert_eq!(store.get_filters().manufacturer.as_deref(), Some("Kia"));
        assert_eq!(store.get_filters().model.as_deref(), Some("EV6"));

        let saved = store.backend().blob(NAME).unwrap();
        let restored: FilterCriteria = serde_json::from_str(&saved).unwrap();
        assert_eq!(&restored, store.get_filters());
    }

    #[test]
    fn update_with_none_clears_field() {
        let mut store = store();
        store.update_filter(FilterUpdate::Category(Some("Sedan".into())));
        store.update_filter(FilterUpdate::Category(None));
        assert!(store.get_filters().category.is_none());
        assert!(store.get_filters().is_empty());
    }

    #[test]
    fn clear_filters_empties_memory_and_storage() {
        let mut store = store();
        store.update_filter(FilterUpdate::Featured(Some(true)));
        store.toggle_color_filter(ColorKind::Exterior, ColorId(1));
        store.clear_filters();

        assert!(store.get_filters().is_empty());
        let saved = store.backend().blob(NAME).unwrap();
        let restored: FilterCriteria = serde_json::from_str(&saved).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn state_survives_restart_on_disk() {
        let mut env = TestEnv::new();
        env.store
            .update_filter(FilterUpdate::Manufacturer(Some("Rivian".into())));
        env.store.toggle_color_filter(ColorKind::Interior, ColorId(3));
        assert!(env.store.set_price_range(40000.0, 90000.0));

        let reopened = env.reopen();
        assert_eq!(reopened.get_filters(), env.store.get_filters());
        assert_eq!(reopened.get_filters().interior_colors, vec![ColorId(3)]);

        env.store.clear_filters();
        assert!(env.reopen().get_filters().is_empty());
    }

    #[test]
    fn toggle_twice_restores_original_list() {
        let mut store = store();
        store.toggle_color_filter(ColorKind::Exterior, ColorId(2));
        let before = store.get_filters().exterior_colors.clone();

        store.toggle_color_filter(ColorKind::Exterior, ColorId(5));
        store.toggle_color_filter(ColorKind::Exterior, ColorId(5));
        assert_eq!(store.get_filters().exterior_colors, before);
    }

    #[test]
    fn toggle_is_namespaced_by_kind() {
        let mut store = store();
        store.toggle_color_filter(ColorKind::Exterior, ColorId(7));
        assert_eq!(store.get_filters().exterior_colors, vec![ColorId(7)]);
        assert!(store.get_filters().interior_colors.is_empty());
    }

    #[test]
    fn reset_colors_keeps_other_fields() {
        let mut store = store();
        store.update_filter(FilterUpdate::Model(Some("Leaf".into())));
        store.toggle_color_filter(ColorKind::Exterior, ColorId(1));
        store.toggle_color_filter(ColorKind::Interior, ColorId(9));
        store.reset_color_filters();

        assert!(store.get_filters().exterior_colors.is_empty());
        assert!(store.get_filters().interior_colors.is_empty());
        assert_eq!(store.get_filters().model.as_deref(), Some("Leaf"));
    }

    #[test]
    fn price_range_requires_strict_order() {
        let mut store = store();
        assert!(store.set_price_range(20000.0, 50000.0));
        assert!(!store.set_price_range(50000.0, 50000.0));
        assert!(!store.set_price_range(60000.0, 10000.0));

        assert_eq!(store.get_filters().min_price, Some(20000.0));
        assert_eq!(store.get_filters().max_price, Some(50000.0));
    }

    #[test]
    fn rejected_price_range_does_not_persist() {
        let mut store = store();
        assert!(!store.set_price_range(5.0, 1.0));
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn write_failure_keeps_in_memory_state() {
        let mut store = store();
        store.backend().set_simulate_write_error(true);
        store.update_filter(FilterUpdate::Manufacturer(Some("BYD".into())));

        assert_eq!(store.get_filters().manufacturer.as_deref(), Some("BYD"));
        assert!(store.last_persist_error().is_some());

        store.backend().set_simulate_write_error(false);
        store.update_filter(FilterUpdate::Model(Some("Seal".into())));
        assert!(store.last_persist_error().is_none());
    }

    #[test]
    fn subscribers_see_every_mutation_until_unsubscribed() {
        let mut store = store();
        let seen: Rc<RefCell<Vec<FilterCriteria>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let id = store.subscribe(Box::new(move |c| sink.borrow_mut().push(c.clone())));

        store.update_filter(FilterUpdate::MinYear(Some(2021)));
        store.clear_filters();
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[0].min_year, Some(2021));
        assert!(seen.borrow()[1].is_empty());

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.update_filter(FilterUpdate::MinYear(Some(2022)));
        assert_eq!(seen.borrow().len(), 2);
    }
}
