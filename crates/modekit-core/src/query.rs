// ── Query keys and pagination ──
//
// A list result is stored under the canonical string form of the
// filter/pagination object that produced it. Two parameter objects that
// differ only in key order, or in keys whose value is null, share a key.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Canonical, order-independent form of a list query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryKey(String);

impl QueryKey {
    /// Key for an unfiltered, unpaginated list.
    pub fn all() -> Self {
        Self::default()
    }

    /// Canonicalize any serializable parameter object.
    ///
    /// The value must serialize to a map (or to `null`, meaning no
    /// parameters). Null entries are dropped and keys are sorted, so
    /// `{limit, skip}` and `{skip, limit}` produce the same key.
    pub fn from_params<P: Serialize + ?Sized>(params: &P) -> Result<Self, CoreError> {
        let value = serde_json::to_value(params).map_err(|e| CoreError::Validation {
            message: format!("query parameters are not serializable: {e}"),
        })?;
        match value {
            Value::Null => Ok(Self::all()),
            Value::Object(map) => Ok(Self::from_pairs(
                map.into_iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k, scalar_text(&v))),
            )),
            other => Err(CoreError::Validation {
                message: format!("query parameters must be a map, got {other}"),
            }),
        }
    }

    /// Build a key from already-stringified pairs. Order does not matter.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let sorted: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let mut encoder = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in &sorted {
            encoder.append_pair(k, v);
        }
        Self(encoder.finish())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<all>")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Text form of one parameter value. Arrays and nested objects use
/// sorted-key JSON so element boundaries survive and the key stays
/// independent of insertion order at every depth.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => canonical_json(value),
        other => other.to_string(),
    }
}

fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, &Value> =
                map.iter().filter(|(_, v)| !v.is_null()).collect();
            let body = sorted
                .into_iter()
                .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), canonical_json(v)))
                .collect::<Vec<_>>()
                .join(",");
            format!("{{{body}}}")
        }
        Value::Array(items) => {
            let body = items.iter().map(canonical_json).collect::<Vec<_>>().join(",");
            format!("[{body}]")
        }
        other => other.to_string(),
    }
}

// ── Pagination ───────────────────────────────────────────────────────

/// Zero-based page request, translated to `skip`/`limit` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page_number: u64,
    pub page_size: u64,
}

impl Page {
    pub fn new(page_number: u64, page_size: u64) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    pub fn first(page_size: u64) -> Self {
        Self::new(0, page_size)
    }

    pub fn skip(&self) -> u64 {
        self.page_number.saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }

    /// `(skip, limit)` as sent on the wire.
    pub fn to_skip_limit(&self) -> (u64, u64) {
        (self.skip(), self.limit())
    }

    /// The cache key this page's results are stored under.
    pub fn key(&self) -> QueryKey {
        QueryKey::from_pairs([
            ("pageNumber", self.page_number.to_string()),
            ("pageSize", self.page_size.to_string()),
        ])
    }
}

/// Filter for smart-module entity lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_class: Option<String>,
}

impl EntityQuery {
    pub fn class(entity_class: impl Into<String>) -> Self {
        Self {
            entity_class: Some(entity_class.into()),
        }
    }

    pub fn key(&self) -> QueryKey {
        QueryKey::from_pairs(
            self.entity_class
                .iter()
                .map(|class| ("entityClass", class.clone())),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn key_ignores_property_order() {
        let a = QueryKey::from_params(&json!({ "skip": 0, "limit": 10 })).unwrap();
        let b = QueryKey::from_params(&json!({ "limit": 10, "skip": 0 })).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "limit=10&skip=0");
    }

    #[test]
    fn key_drops_null_entries() {
        let a = QueryKey::from_params(&json!({ "entityClass": null, "pageSize": 5 })).unwrap();
        let b = QueryKey::from_params(&json!({ "pageSize": 5 })).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn key_differs_by_value() {
        let a = QueryKey::from_params(&json!({ "pageNumber": 0 })).unwrap();
        let b = QueryKey::from_params(&json!({ "pageNumber": 1 })).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn nested_objects_are_order_independent() {
        let a = QueryKey::from_params(&json!({ "f": { "x": 1, "y": 2 } })).unwrap();
        let b = QueryKey::from_params(&json!({ "f": { "y": 2, "x": 1 } })).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn array_elements_keep_their_boundaries() {
        let joined = QueryKey::from_params(&json!({ "ids": ["a,b"] })).unwrap();
        let split = QueryKey::from_params(&json!({ "ids": ["a", "b"] })).unwrap();
        assert_ne!(joined, split);
    }

    #[test]
    fn nested_nulls_are_dropped() {
        let a = QueryKey::from_params(&json!({ "f": { "x": null } })).unwrap();
        let b = QueryKey::from_params(&json!({ "f": {} })).unwrap();
        assert_eq!(a, b);

        let c = QueryKey::from_params(&json!({ "f": { "x": null, "y": [1, { "z": null }] } })).unwrap();
        let d = QueryKey::from_params(&json!({ "f": { "y": [1, {}] } })).unwrap();
        assert_eq!(c, d);
    }

    #[test]
    fn null_params_mean_all() {
        let key = QueryKey::from_params(&Option::<Page>::None).unwrap();
        assert!(key.is_all());
        assert_eq!(key.to_string(), "<all>");
    }

    #[test]
    fn non_map_params_are_rejected() {
        let err = QueryKey::from_params(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }

    #[test]
    fn page_key_matches_serialized_page() {
        let page = Page::new(2, 10);
        assert_eq!(page.key(), QueryKey::from_params(&page).unwrap());
        assert_eq!(page.to_skip_limit(), (20, 10));
        assert_eq!(Page::first(25).to_skip_limit(), (0, 25));
    }

    #[test]
    fn entity_query_key_matches_serialized_query() {
        let unfiltered = EntityQuery::default();
        assert_eq!(unfiltered.key(), QueryKey::all());
        assert_eq!(unfiltered.key(), QueryKey::from_params(&unfiltered).unwrap());

        let sensors = EntityQuery::class("sensor");
        assert_eq!(sensors.key(), QueryKey::from_params(&sensors).unwrap());
    }
}
