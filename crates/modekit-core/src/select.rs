// ── Memoized selectors ──
//
// Selectors denormalize a cached list (ids -> entities) or an entity
// namespace (id -> entity map). The output is memoized per key and only
// recomputed when the containers it was derived from have been replaced,
// so repeated reads of an unchanged state return the same `Arc`.
//
// The memo holds `Weak` handles to those containers. A live `Weak` pins
// its allocation, so an address can't be reused by a different map while
// the memo still refers to it.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use dashmap::DashMap;

use crate::model::{Alert, Device, Entity, Home, KeyValue, Normalized, TableKey, TimeSeries};
use crate::query::QueryKey;
use crate::store::{Entries, Rows, Slice};

/// Denormalized list output.
pub type List<T> = Arc<Vec<Arc<T>>>;

// ── List selector ────────────────────────────────────────────────────

struct ListMemo<T: Normalized> {
    rows: Weak<Rows<T>>,
    entries: Weak<Entries<T::Scope, TableKey<T>>>,
    output: List<T>,
}

impl<T: Normalized> ListMemo<T> {
    fn is_current(&self, slice: &Slice<T>) -> bool {
        std::ptr::eq(self.rows.as_ptr(), Arc::as_ptr(slice.entities().rows()))
            && std::ptr::eq(self.entries.as_ptr(), Arc::as_ptr(slice.lists().entries()))
    }
}

/// Selects the entities of one cached list query, in fetch order.
pub struct ListSelector<T: Normalized> {
    memo: DashMap<(T::Scope, QueryKey), ListMemo<T>>,
}

impl<T: Normalized> Default for ListSelector<T> {
    fn default() -> Self {
        Self {
            memo: DashMap::new(),
        }
    }
}

impl<T: Normalized> ListSelector<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities for `query` in `scope`.
    ///
    /// `None` means the query has never been fetched (or was invalidated),
    /// which callers treat as "not loaded" rather than "empty". Ids whose
    /// entity has since been removed are skipped.
    pub fn select(&self, slice: &Slice<T>, scope: &T::Scope, query: &QueryKey) -> Option<List<T>> {
        let key = (scope.clone(), query.clone());
        let Some(result) = slice.lists().get(scope, query) else {
            self.memo.remove(&key);
            return None;
        };

        let cached = self
            .memo
            .get(&key)
            .filter(|memo| memo.is_current(slice))
            .map(|memo| Arc::clone(&memo.output));
        if cached.is_some() {
            return cached;
        }

        let output: List<T> = Arc::new(
            result
                .ids
                .iter()
                .filter_map(|id| slice.entities().get_key(id))
                .collect(),
        );
        self.memo.insert(
            key,
            ListMemo {
                rows: Arc::downgrade(slice.entities().rows()),
                entries: Arc::downgrade(slice.lists().entries()),
                output: Arc::clone(&output),
            },
        );
        Some(output)
    }

    /// Total item count the platform reported for the query.
    pub fn total(&self, slice: &Slice<T>, scope: &T::Scope, query: &QueryKey) -> Option<u64> {
        slice.lists().get(scope, query).map(|r| r.range.total)
    }

    /// Drop every memoized output.
    pub fn reset(&self) {
        self.memo.clear();
    }
}

// ── Namespace selector ───────────────────────────────────────────────

struct MapMemo<T: Normalized> {
    rows: Weak<Rows<T>>,
    output: Arc<HashMap<T::Id, Arc<T>>>,
}

/// Selects every cached entity in one namespace as an id-keyed map.
pub struct ScopeSelector<T: Normalized> {
    memo: DashMap<T::Namespace, MapMemo<T>>,
}

impl<T: Normalized> Default for ScopeSelector<T> {
    fn default() -> Self {
        Self {
            memo: DashMap::new(),
        }
    }
}

impl<T: Normalized> ScopeSelector<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&self, slice: &Slice<T>, namespace: &T::Namespace) -> Arc<HashMap<T::Id, Arc<T>>> {
        let rows = slice.entities().rows();
        let cached = self
            .memo
            .get(namespace)
            .filter(|memo| std::ptr::eq(memo.rows.as_ptr(), Arc::as_ptr(rows)))
            .map(|memo| Arc::clone(&memo.output));
        if let Some(output) = cached {
            return output;
        }

        let output = Arc::new(slice.entities().scope(namespace));
        self.memo.insert(
            namespace.clone(),
            MapMemo {
                rows: Arc::downgrade(rows),
                output: Arc::clone(&output),
            },
        );
        output
    }
}

// ── Selector set ─────────────────────────────────────────────────────

/// One memoized selector per cached list and namespace view.
#[derive(Default)]
pub struct Selectors {
    pub homes: ListSelector<Home>,
    pub devices: ListSelector<Device>,
    pub key_values: ListSelector<KeyValue>,
    pub key_value_map: ScopeSelector<KeyValue>,
    pub entities: ListSelector<Entity>,
    pub time_series: ListSelector<TimeSeries>,
    pub alerts: ListSelector<Alert>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::fixtures::{home, kv};
    use crate::model::{ItemRange, KvOwner};
    use crate::query::Page;
    use crate::store::{Action, RootState, SliceAction};
    use pretty_assertions::assert_eq;

    fn homes_page(user: u64, page: Page, homes: Vec<Home>) -> Action {
        let range = ItemRange::new(page.skip(), page.skip() + 2, 2);
        SliceAction::set_list(user, page.key(), (), range, homes).into()
    }

    fn names(list: &List<Home>) -> Vec<String> {
        list.iter().map(|h| h.name.clone()).collect()
    }

    #[test]
    fn unfetched_query_is_none() {
        let selector = ListSelector::<Home>::new();
        let state = RootState::default();
        assert!(selector.select(&state.homes, &1, &Page::first(10).key()).is_none());
    }

    #[test]
    fn list_follows_fetch_order() {
        let selector = ListSelector::<Home>::new();
        let state = RootState::default()
            .reduce(&homes_page(1, Page::first(10), vec![home(2, "B"), home(1, "A")]));
        let list = selector.select(&state.homes, &1, &Page::first(10).key()).unwrap();
        assert_eq!(names(&list), vec!["B", "A"]);
    }

    #[test]
    fn repeated_reads_return_same_output() {
        let selector = ListSelector::<Home>::new();
        let state = RootState::default()
            .reduce(&homes_page(1, Page::first(10), vec![home(1, "A")]));
        let first = selector.select(&state.homes, &1, &Page::first(10).key()).unwrap();
        let second = selector.select(&state.homes, &1, &Page::first(10).key()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn unrelated_dispatch_keeps_output() {
        let selector = ListSelector::<Home>::new();
        let state = RootState::default()
            .reduce(&homes_page(1, Page::first(10), vec![home(1, "A")]));
        let first = selector.select(&state.homes, &1, &Page::first(10).key()).unwrap();

        let next = state.reduce(&SliceAction::<KeyValue>::set_one(KvOwner::Home(1), kv("k", 1.into())).into());
        let second = selector.select(&next.homes, &1, &Page::first(10).key()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn entity_update_recomputes_output() {
        let selector = ListSelector::<Home>::new();
        let state = RootState::default()
            .reduce(&homes_page(1, Page::first(10), vec![home(1, "A")]));
        let first = selector.select(&state.homes, &1, &Page::first(10).key()).unwrap();

        let next = state.reduce(&SliceAction::<Home>::set_one((), home(1, "Renamed")).into());
        let second = selector.select(&next.homes, &1, &Page::first(10).key()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(names(&second), vec!["Renamed"]);
        assert_eq!(names(&first), vec!["A"]);
    }

    #[test]
    fn removed_entities_are_skipped() {
        let selector = ListSelector::<Home>::new();
        let state = RootState::default()
            .reduce(&homes_page(1, Page::first(10), vec![home(1, "A"), home(2, "B")]))
            .reduce(&SliceAction::<Home>::remove((), 1).into());
        let list = selector.select(&state.homes, &1, &Page::first(10).key()).unwrap();
        assert_eq!(names(&list), vec!["B"]);
    }

    #[test]
    fn removing_a_middle_entity_keeps_neighbours_in_order() {
        let selector = ListSelector::<Home>::new();
        let state = RootState::default()
            .reduce(&homes_page(
                1,
                Page::first(10),
                vec![home(1, "a"), home(2, "b"), home(3, "c")],
            ))
            .reduce(&SliceAction::<Home>::remove((), 2).into());
        let list = selector.select(&state.homes, &1, &Page::first(10).key()).unwrap();
        assert_eq!(names(&list), vec!["a", "c"]);
    }

    #[test]
    fn cleared_lists_read_as_unloaded() {
        let selector = ListSelector::<Home>::new();
        let state = RootState::default()
            .reduce(&homes_page(1, Page::first(10), vec![home(1, "A")]));
        assert!(selector.select(&state.homes, &1, &Page::first(10).key()).is_some());

        let cleared = state.reduce(&SliceAction::<Home>::clear_lists(1).into());
        assert!(selector.select(&cleared.homes, &1, &Page::first(10).key()).is_none());
        assert_eq!(selector.total(&state.homes, &1, &Page::first(10).key()), Some(2));
    }

    #[test]
    fn namespace_map_is_memoized() {
        let selector = ScopeSelector::<KeyValue>::new();
        let owner = KvOwner::Device(4);
        let state = RootState::default()
            .reduce(&SliceAction::<KeyValue>::set_one(owner, kv("mode", "eco".into())).into());

        let first = selector.select(&state.key_values, &owner);
        let second = selector.select(&state.key_values, &owner);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first["mode"].value, "eco");

        let next = state.reduce(&SliceAction::<KeyValue>::set_one(owner, kv("mode", "away".into())).into());
        let third = selector.select(&next.key_values, &owner);
        assert_eq!(third["mode"].value, "away");
    }
}
