// ── Normalized entity table ──
//
// One row per entity, keyed by (namespace, id). The row map sits behind
// an `Arc` and is copied on write, so a state snapshot taken before an
// update never observes it, and an untouched table keeps its pointer
// across updates (which is what selector memoization compares).

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{Normalized, TableKey};

pub(crate) type Rows<T> = HashMap<TableKey<T>, Arc<T>>;

#[derive(Debug, Clone, PartialEq)]
pub struct EntityTable<T: Normalized> {
    rows: Arc<Rows<T>>,
}

impl<T: Normalized> Default for EntityTable<T> {
    fn default() -> Self {
        Self {
            rows: Arc::new(HashMap::new()),
        }
    }
}

impl<T: Normalized> EntityTable<T> {
    // ── Writes ───────────────────────────────────────────────────────

    /// Insert or replace each entity under `namespace`. Later entries
    /// win when the batch repeats an id.
    pub fn upsert_many<I>(&mut self, namespace: &T::Namespace, entities: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut entities = entities.into_iter().peekable();
        if entities.peek().is_none() {
            return;
        }
        let rows = Arc::make_mut(&mut self.rows);
        for entity in entities {
            rows.insert((namespace.clone(), entity.id()), Arc::new(entity));
        }
    }

    pub fn upsert_one(&mut self, namespace: &T::Namespace, entity: T) {
        self.upsert_many(namespace, std::iter::once(entity));
    }

    /// Remove one row. Absent rows leave the table untouched.
    pub fn remove(&mut self, namespace: &T::Namespace, id: &T::Id) -> Option<Arc<T>> {
        let key = (namespace.clone(), id.clone());
        if !self.rows.contains_key(&key) {
            return None;
        }
        Arc::make_mut(&mut self.rows).remove(&key)
    }

    /// Drop every row in `namespace`; returns how many were removed.
    pub fn clear_scope(&mut self, namespace: &T::Namespace) -> usize {
        if !self.rows.keys().any(|(ns, _)| ns == namespace) {
            return 0;
        }
        let rows = Arc::make_mut(&mut self.rows);
        let before = rows.len();
        rows.retain(|(ns, _), _| ns != namespace);
        before - rows.len()
    }

    pub fn clear(&mut self) {
        if !self.rows.is_empty() {
            self.rows = Arc::new(HashMap::new());
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn get(&self, namespace: &T::Namespace, id: &T::Id) -> Option<Arc<T>> {
        self.get_key(&(namespace.clone(), id.clone()))
    }

    pub fn get_key(&self, key: &TableKey<T>) -> Option<Arc<T>> {
        self.rows.get(key).cloned()
    }

    /// All rows in one namespace, keyed by id.
    pub fn scope(&self, namespace: &T::Namespace) -> HashMap<T::Id, Arc<T>> {
        self.rows
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .map(|((_, id), entity)| (id.clone(), Arc::clone(entity)))
            .collect()
    }

    pub fn values(&self) -> impl Iterator<Item = &Arc<T>> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Backing container, for identity comparisons.
    pub(crate) fn rows(&self) -> &Arc<Rows<T>> {
        &self.rows
    }
}
