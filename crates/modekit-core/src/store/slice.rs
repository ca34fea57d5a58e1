// ── Resource slice ──
//
// Entity table + query index for one resource type, and the reducer
// that applies that type's slice actions. Reducers only ever see the
// root action and ignore everything not addressed to them.

use std::sync::Arc;

use tracing::trace;

use super::action::{Action, SliceAction};
use super::entity_table::EntityTable;
use super::query_index::{QueryIndex, ResultSet};
use crate::model::{Normalized, TableKey};
use crate::query::QueryKey;

#[derive(Debug, Clone, PartialEq)]
pub struct Slice<T: Normalized> {
    entities: EntityTable<T>,
    lists: QueryIndex<T::Scope, TableKey<T>>,
}

impl<T: Normalized> Default for Slice<T> {
    fn default() -> Self {
        Self {
            entities: EntityTable::default(),
            lists: QueryIndex::default(),
        }
    }
}

impl<T: Normalized> Slice<T> {
    pub fn entities(&self) -> &EntityTable<T> {
        &self.entities
    }

    pub fn lists(&self) -> &QueryIndex<T::Scope, TableKey<T>> {
        &self.lists
    }

    pub fn get(&self, namespace: &T::Namespace, id: &T::Id) -> Option<Arc<T>> {
        self.entities.get(namespace, id)
    }

    /// Whether `query` in `scope` has a cached result.
    pub fn has_list(&self, scope: &T::Scope, query: &QueryKey) -> bool {
        self.lists.get(scope, query).is_some()
    }

    // ── Reducer ──────────────────────────────────────────────────────

    /// Apply `action` if it targets this slice.
    pub fn reduce(&mut self, action: &Action) {
        if matches!(action, Action::Reset) {
            *self = Self::default();
            return;
        }
        if let Some(action) = T::slice_action(action) {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: &SliceAction<T>) {
        match action {
            SliceAction::SetList {
                scope,
                query,
                namespace,
                range,
                items,
            } => {
                let ids = items
                    .iter()
                    .map(|item| (namespace.clone(), item.id()))
                    .collect();
                self.entities.upsert_many(namespace, items.iter().cloned());
                self.lists.set_result(
                    scope.clone(),
                    query.clone(),
                    ResultSet { range: *range, ids },
                );
                trace!(kind = T::KIND, ?scope, %query, count = items.len(), "list stored");
            }
            SliceAction::SetOne { namespace, entity } => {
                self.entities.upsert_one(namespace, entity.clone());
            }
            SliceAction::Remove { namespace, id } => {
                // List memberships are left alone; selectors drop dangling ids.
                self.entities.remove(namespace, id);
            }
            SliceAction::ClearLists { scope } => {
                let cleared = self.lists.clear_scope(scope);
                trace!(kind = T::KIND, ?scope, cleared, "lists invalidated");
            }
            SliceAction::ClearNamespace { namespace } => {
                self.entities.clear_scope(namespace);
            }
        }
    }
}
