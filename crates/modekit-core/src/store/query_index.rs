// ── Paginated query index ──
//
// Maps (scope, query key) to the ordered ids a list fetch returned plus
// the range the platform reported. Entities themselves live in the
// entity table; this only remembers membership and order.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{ItemRange, Key};
use crate::query::QueryKey;

/// Result of one list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet<K> {
    pub range: ItemRange,
    pub ids: Vec<K>,
}

pub(crate) type Entries<S, K> = HashMap<(S, QueryKey), Arc<ResultSet<K>>>;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryIndex<S: Key, K: Key> {
    entries: Arc<Entries<S, K>>,
}

impl<S: Key, K: Key> Default for QueryIndex<S, K> {
    fn default() -> Self {
        Self {
            entries: Arc::new(HashMap::new()),
        }
    }
}

impl<S: Key, K: Key> QueryIndex<S, K> {
    /// Record (or replace) the result for one query in one scope.
    pub fn set_result(&mut self, scope: S, query: QueryKey, result: ResultSet<K>) {
        Arc::make_mut(&mut self.entries).insert((scope, query), Arc::new(result));
    }

    /// Forget every query recorded for `scope`; other scopes are kept.
    pub fn clear_scope(&mut self, scope: &S) -> usize {
        if !self.entries.keys().any(|(s, _)| s == scope) {
            return 0;
        }
        let entries = Arc::make_mut(&mut self.entries);
        let before = entries.len();
        entries.retain(|(s, _), _| s != scope);
        before - entries.len()
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries = Arc::new(HashMap::new());
        }
    }

    /// `None` when the query was never fetched (or has been invalidated).
    pub fn get(&self, scope: &S, query: &QueryKey) -> Option<&Arc<ResultSet<K>>> {
        self.entries.get(&(scope.clone(), query.clone()))
    }

    /// Every query recorded for `scope`.
    pub fn queries(&self, scope: &S) -> Vec<&QueryKey> {
        let mut keys: Vec<&QueryKey> = self
            .entries
            .keys()
            .filter(|(s, _)| s == scope)
            .map(|(_, q)| q)
            .collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &Arc<Entries<S, K>> {
        &self.entries
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::query::Page;

    fn result(ids: &[u64]) -> ResultSet<u64> {
        ResultSet {
            range: ItemRange::whole(ids.len()),
            ids: ids.to_vec(),
        }
    }

    #[test]
    fn results_are_scoped() {
        let mut index = QueryIndex::<u64, u64>::default();
        let q = Page::first(10).key();
        index.set_result(1, q.clone(), result(&[10, 11]));
        index.set_result(2, q.clone(), result(&[20]));

        assert_eq!(index.get(&1, &q).unwrap().ids, vec![10, 11]);
        assert_eq!(index.get(&2, &q).unwrap().ids, vec![20]);
        assert!(index.get(&3, &q).is_none());
    }

    #[test]
    fn clear_scope_leaves_other_scopes() {
        let mut index = QueryIndex::<u64, u64>::default();
        index.set_result(1, Page::new(0, 10).key(), result(&[1]));
        index.set_result(1, Page::new(1, 10).key(), result(&[2]));
        index.set_result(2, Page::new(0, 10).key(), result(&[3]));

        assert_eq!(index.clear_scope(&1), 2);
        assert!(index.queries(&1).is_empty());
        assert_eq!(index.queries(&2).len(), 1);
        assert_eq!(index.clear_scope(&1), 0);
    }

    #[test]
    fn set_result_replaces_previous_window() {
        let mut index = QueryIndex::<u64, u64>::default();
        let q = QueryKey::all();
        index.set_result(1, q.clone(), result(&[1, 2, 3]));
        index.set_result(
            1,
            q.clone(),
            ResultSet {
                range: ItemRange::new(0, 1, 1),
                ids: vec![9],
            },
        );
        let stored = index.get(&1, &q).unwrap();
        assert_eq!(stored.ids, vec![9]);
        assert_eq!(stored.range.total, 1);
    }
}
