#![allow(clippy::unwrap_used)]
// End-to-end cache flows: wiremock platform -> Fetcher -> Store -> selectors.

use std::collections::BTreeMap;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use modekit_api::{ApiClient, TransportConfig};
use modekit_core::{
    CoreError, EntityQuery, Fetcher, KvOwner, ListSelector, NewHome, Page, QueryKey,
    ScopeSelector, Store, Suppress, TimeSeries,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Fetcher) {
    let server = MockServer::start().await;
    let api = ApiClient::new(&server.uri(), &TransportConfig::default()).unwrap();
    let fetcher = Fetcher::new(Arc::new(api), Arc::new(Store::new()));
    (server, fetcher)
}

fn home_json(id: u64, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "projectId": 1 })
}

async fn mount_homes(server: &MockServer, user_id: u64, homes: Vec<serde_json::Value>) {
    homes_mock(user_id, homes).mount(server).await;
}

fn homes_mock(user_id: u64, homes: Vec<serde_json::Value>) -> Mock {
    let total = homes.len();
    Mock::given(method("GET"))
        .and(path("/homes"))
        .and(query_param("userId", user_id.to_string()))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-range", format!("0-{total}/{total}").as_str())
                .set_body_json(homes),
        )
}

// ── Paged lists ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetched_page_is_selectable_in_order() {
    let (server, fetcher) = setup().await;
    mount_homes(
        &server,
        42,
        vec![home_json(3, "Cabin"), home_json(1, "Main"), home_json(2, "Loft")],
    )
    .await;

    fetcher.fetch_homes(42, Page::new(0, 10)).await.unwrap();

    let selector = ListSelector::new();
    let state = fetcher.state();
    let homes = selector
        .select(&state.homes, &42, &Page::new(0, 10).key())
        .unwrap();
    let names: Vec<&str> = homes.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Cabin", "Main", "Loft"]);
    assert_eq!(selector.total(&state.homes, &42, &Page::new(0, 10).key()), Some(3));

    assert!(
        selector
            .select(&state.homes, &42, &Page::new(1, 10).key())
            .is_none()
    );
}

#[tokio::test]
async fn test_page_translates_to_skip_and_limit() {
    let (server, fetcher) = setup().await;

    Mock::given(method("GET"))
        .and(path("/homes/9/alerts"))
        .and(query_param("skip", "40"))
        .and(query_param("limit", "20"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-range", "40-41/41")
                .set_body_json(json!([{ "id": 77, "homeId": 9, "level": "critical" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    fetcher.fetch_alerts(9, Page::new(2, 20)).await.unwrap();

    let alerts = ListSelector::new()
        .select(&fetcher.state().alerts, &9, &Page::new(2, 20).key())
        .unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].id, 77);
}

#[tokio::test]
async fn test_missing_range_header_caches_empty_page() {
    let (server, fetcher) = setup().await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    fetcher.fetch_devices(5, Page::first(10)).await.unwrap();

    let state = fetcher.state();
    let devices = ListSelector::new()
        .select(&state.devices, &5, &Page::first(10).key())
        .unwrap();
    assert!(devices.is_empty());
}

// ── Mutations invalidate ────────────────────────────────────────────

#[tokio::test]
async fn test_create_home_clears_user_lists_only() {
    let (server, fetcher) = setup().await;
    homes_mock(42, vec![home_json(1, "Main")])
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .and(query_param("homeId", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-range", "0-1/1")
                .set_body_json(json!([{ "id": 10, "projectId": 1, "homeId": 1, "deviceClass": "plug" }])),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/homes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(home_json(2, "New")))
        .mount(&server)
        .await;

    fetcher.fetch_homes(42, Page::new(0, 10)).await.unwrap();
    fetcher.fetch_devices(1, Page::new(0, 10)).await.unwrap();

    let created = fetcher
        .create_home(
            42,
            &NewHome {
                name: "New".into(),
                timezone: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id, 2);

    let state = fetcher.state();
    assert!(!state.homes.has_list(&42, &Page::new(0, 10).key()));
    assert!(state.homes.get(&(), &1).is_some());
    assert!(state.devices.has_list(&1, &Page::new(0, 10).key()));
    assert!(state.devices.get(&(), &10).is_some());

    fetcher.fetch_homes(42, Page::new(0, 10)).await.unwrap();
    assert!(fetcher.state().homes.has_list(&42, &Page::new(0, 10).key()));
}

#[tokio::test]
async fn test_delete_key_value_drops_key_and_lists() {
    let (server, fetcher) = setup().await;
    let owner = KvOwner::Device(5);

    Mock::given(method("GET"))
        .and(path("/devices/5/kv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "key": "mode", "value": "eco" },
            { "key": "target", "value": 21 }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/devices/5/kv/mode"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    fetcher.fetch_key_values(owner, Suppress::Never).await.unwrap();

    let by_key = ScopeSelector::new();
    let keys = ListSelector::new();
    let before = fetcher.state();
    assert_eq!(by_key.select(&before.key_values, &owner).len(), 2);
    assert_eq!(
        keys.select(&before.key_values, &owner, &QueryKey::all())
            .unwrap()
            .len(),
        2
    );

    fetcher.delete_key_value(owner, "mode").await.unwrap();

    let after = fetcher.state();
    let map = by_key.select(&after.key_values, &owner);
    assert!(!map.contains_key("mode"));
    assert!(map.contains_key("target"));
    assert!(keys.select(&after.key_values, &owner, &QueryKey::all()).is_none());
}

// ── Optional sub-resources ──────────────────────────────────────────

#[tokio::test]
async fn test_suppressed_time_series_caches_default() {
    let (server, fetcher) = setup().await;

    Mock::given(method("GET"))
        .and(path("/homes/7/smartModules/tsdb/timeSeries"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "reason": "MODULE_NOT_FOUND" })))
        .mount(&server)
        .await;

    fetcher
        .fetch_time_series(7, Suppress::With(Vec::new()))
        .await
        .unwrap();
    let series = ListSelector::new()
        .select(&fetcher.state().time_series, &7, &QueryKey::all())
        .unwrap();
    assert!(series.is_empty());

    let err = fetcher
        .fetch_time_series(7, Suppress::Never)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { ref identifier, .. } if identifier == "MODULE_NOT_FOUND"));
}

fn series_fallback(home_id: u64) -> TimeSeries {
    TimeSeries {
        id: String::new(),
        home_id,
        module_id: "tsdb".into(),
        tags: BTreeMap::new(),
        first_timestamp: None,
        last_timestamp: None,
    }
}

#[tokio::test]
async fn test_series_info_is_keyed_by_returned_id() {
    let (server, fetcher) = setup().await;

    Mock::given(method("GET"))
        .and(path("/homes/7/smartModules/tsdb/timeSeries/kitchen-temp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "kitchen.temp",
            "homeId": 7,
            "moduleId": "tsdb"
        })))
        .mount(&server)
        .await;

    fetcher
        .fetch_time_series_info(7, "kitchen-temp", Suppress::With(series_fallback(7)))
        .await
        .unwrap();

    let state = fetcher.state();
    assert!(state.time_series.get(&7, &"kitchen.temp".to_owned()).is_some());
    assert!(state.time_series.get(&7, &"kitchen-temp".to_owned()).is_none());
}

#[tokio::test]
async fn test_suppressed_series_info_is_keyed_by_requested_id() {
    let (server, fetcher) = setup().await;

    Mock::given(method("GET"))
        .and(path("/homes/7/smartModules/tsdb/timeSeries/humidity"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "reason": "SERIES_NOT_FOUND" })))
        .mount(&server)
        .await;

    fetcher
        .fetch_time_series_info(7, "humidity", Suppress::With(series_fallback(7)))
        .await
        .unwrap();

    let cached = fetcher
        .state()
        .time_series
        .get(&7, &"humidity".to_owned())
        .unwrap();
    assert_eq!(cached.id, "humidity");
    assert_eq!(cached.module_id, "tsdb");
}

#[tokio::test]
async fn test_failed_fetch_leaves_state_alone() {
    let (server, fetcher) = setup().await;

    Mock::given(method("GET"))
        .and(path("/homes/3/smartModules/entities"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let before = fetcher.state();
    let err = fetcher
        .fetch_entities(3, &EntityQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
    assert!(Arc::ptr_eq(&before, &fetcher.state()));
}

#[tokio::test]
async fn test_entities_are_namespaced_by_home() {
    let (server, fetcher) = setup().await;

    for (home, class) in [(1, "light"), (2, "sensor")] {
        Mock::given(method("GET"))
            .and(path(format!("/homes/{home}/smartModules/entities")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "entityId": "e1", "entityClass": class }
            ])))
            .mount(&server)
            .await;
    }

    fetcher.fetch_entities(1, &EntityQuery::default()).await.unwrap();
    fetcher.fetch_entities(2, &EntityQuery::default()).await.unwrap();

    let state = fetcher.state();
    let e1 = "e1".to_owned();
    assert_eq!(state.entities.get(&1, &e1).unwrap().entity_class, "light");
    assert_eq!(state.entities.get(&2, &e1).unwrap().entity_class, "sensor");
}

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_logout_resets_cache() {
    let (server, fetcher) = setup().await;
    mount_homes(&server, 42, vec![home_json(1, "Main")]).await;

    Mock::given(method("DELETE"))
        .and(path("/auth/user"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    fetcher.fetch_homes(42, Page::new(0, 10)).await.unwrap();
    assert!(!fetcher.state().homes.entities().is_empty());

    fetcher.logout().await.unwrap();
    assert!(fetcher.state().homes.entities().is_empty());
}

#[tokio::test]
async fn test_rejected_logout_still_resets_cache() {
    let (server, fetcher) = setup().await;
    mount_homes(&server, 42, vec![home_json(1, "Main")]).await;

    Mock::given(method("DELETE"))
        .and(path("/auth/user"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    fetcher.fetch_homes(42, Page::new(0, 10)).await.unwrap();
    assert!(!fetcher.state().homes.entities().is_empty());

    let err = fetcher.logout().await.unwrap_err();
    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    assert!(!fetcher.api().has_token());

    let state = fetcher.state();
    assert!(state.homes.entities().is_empty());
    assert!(!state.homes.has_list(&42, &Page::new(0, 10).key()));
}
