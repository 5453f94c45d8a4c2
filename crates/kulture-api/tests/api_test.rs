//! Router tests against the built-in static dataset

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use kulture_api::{create_router, AppState, SessionLimits};
use kulture_core::config::INDIA_CENTROID;
use kulture_core::error::{KultureError, Result};
use kulture_core::models::{Category, CulturalRecord, DateRange, FestivalEvent, Region, RegionId};
use kulture_core::ports::CultureStore;
use kulture_core::RegionAggregator;
use kulture_store::{MemoryCultureStore, StaticDataset};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(store: Arc<dyn CultureStore>) -> Router {
    let aggregator = Arc::new(RegionAggregator::new(store, INDIA_CENTROID));
    create_router(Arc::new(AppState::new(aggregator)))
}

fn app() -> Router {
    let store = MemoryCultureStore::from_dataset(StaticDataset::builtin().unwrap()).unwrap();
    app_with(Arc::new(store))
}

fn app_with_limits(limits: SessionLimits) -> Router {
    let store = MemoryCultureStore::from_dataset(StaticDataset::builtin().unwrap()).unwrap();
    let aggregator = Arc::new(RegionAggregator::new(Arc::new(store), INDIA_CENTROID));
    create_router(Arc::new(AppState::with_limits(aggregator, limits)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

/// Store whose database is unreachable
struct OfflineStore;

#[async_trait]
impl CultureStore for OfflineStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list_regions(&self) -> Result<Vec<Region>> {
        Err(KultureError::source_unavailable("connection refused"))
    }

    async fn find_region(&self, _name: &str) -> Result<Option<Region>> {
        Err(KultureError::source_unavailable("connection refused"))
    }

    async fn fetch_category(
        &self,
        _region: &RegionId,
        _category: Category,
    ) -> Result<Vec<CulturalRecord>> {
        Err(KultureError::source_unavailable("connection refused"))
    }

    async fn list_festival_events(&self, _range: &DateRange) -> Result<Vec<FestivalEvent>> {
        Err(KultureError::source_unavailable("connection refused"))
    }
}

#[tokio::test]
async fn test_health_reports_backend() {
    let (status, body) = get(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "static");
}

#[tokio::test]
async fn test_list_regions() {
    let (status, body) = get(&app(), "/api/v1/regions").await;
    assert_eq!(status, StatusCode::OK);

    let regions = body["regions"].as_array().unwrap();
    assert_eq!(regions.len(), 6);
    assert_eq!(regions[0]["name"], "Goa");
}

#[tokio::test]
async fn test_get_region_by_encoded_name() {
    let (status, body) = get(&app(), "/api/v1/regions/tamil%20nadu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Tamil Nadu");
    assert_eq!(body["id"], "tamil-nadu");
}

#[tokio::test]
async fn test_unknown_region_is_404() {
    let (status, body) = get(&app(), "/api/v1/regions/Atlantis/bundle").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn test_bundle_has_every_category() {
    let (status, body) = get(&app(), "/api/v1/regions/goa/bundle").await;
    assert_eq!(status, StatusCode::OK);

    let records = body["bundle"]["records"].as_object().unwrap();
    assert_eq!(records.len(), 5);
    assert!(records["scheme"].as_array().unwrap().is_empty());
    assert_eq!(records["heritage"][0]["title"], "Basilica of Bom Jesus");
    assert!(body["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_map_is_geojson_in_lon_lat_order() {
    let (status, body) = get(&app(), "/api/v1/regions/Kerala/map").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["features"].as_array().unwrap().len(), 4);

    let first = &body["features"][0];
    assert_eq!(first["properties"]["title"], "Mattancherry Palace");
    assert_eq!(first["geometry"]["coordinates"], json!([76.2594, 9.9583]));

    assert_eq!(body["center"], json!([76.2594, 9.9583]));
    assert_eq!(body["region"], "Kerala");
}

#[tokio::test]
async fn test_events_in_range() {
    let (status, body) = get(&app(), "/api/v1/events?start=2025-03-01&end=2025-03-31").await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = body["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Goa Carnival", "Hola Mohalla", "Shigmo"]);
}

#[tokio::test]
async fn test_events_reject_bad_input() {
    let app = app();

    let (status, _) = get(&app, "/api/v1/events?start=2025-05-01&end=2025-04-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/api/v1/events?start=soon&end=2025-04-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/api/v1/events").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_guide_has_four_sections() {
    let (status, body) = get(&app(), "/api/v1/guide").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sections"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_offline_store_is_503_without_backend_detail() {
    let app = app_with(Arc::new(OfflineStore));

    let (status, body) = get(&app, "/api/v1/regions").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(!body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_session_navigation_flow() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/api/v1/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["view"]["screen"], "home");
    let id = created["id"].as_str().unwrap().to_string();
    let actions = format!("/api/v1/sessions/{id}/actions");

    let (status, map) = send(
        &app,
        Method::POST,
        &actions,
        Some(json!({"action": "show_map", "region": "rajasthan"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(map["state"]["screen"], "map");
    assert_eq!(map["view"]["screen"], "map");
    assert_eq!(map["view"]["region"]["name"], "Rajasthan");

    let (_, detail) =
        send(&app, Method::POST, &actions, Some(json!({"action": "explore_details"}))).await;
    assert_eq!(detail["view"]["screen"], "detail");
    assert_eq!(detail["view"]["bundle"]["records"]["heritage"].as_array().unwrap().len(), 3);

    let (_, back) = send(&app, Method::POST, &actions, Some(json!({"action": "back_to_map"}))).await;
    assert_eq!(back["view"]["screen"], "map");

    let (_, detail) =
        send(&app, Method::POST, &actions, Some(json!({"action": "explore_details"}))).await;
    assert_eq!(detail["view"]["screen"], "detail");

    let (_, home) =
        send(&app, Method::POST, &actions, Some(json!({"action": "back_to_home"}))).await;
    assert!(home["notices"].as_array().unwrap().is_empty());
    assert_eq!(home["view"]["screen"], "home");
    assert!(home["state"]["region"].is_null());

    let (status, current) = get(&app, &format!("/api/v1/sessions/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current["view"]["screen"], "home");
}

#[tokio::test]
async fn test_rejected_action_becomes_notice() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/api/v1/sessions", None).await;
    let actions = format!("/api/v1/sessions/{}/actions", created["id"].as_str().unwrap());

    let (status, body) =
        send(&app, Method::POST, &actions, Some(json!({"action": "explore_details"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["screen"], "home");
    assert_eq!(body["notices"][0]["level"], "error");

    let (status, body) = send(
        &app,
        Method::POST,
        &actions,
        Some(json!({"action": "show_map", "region": "Atlantis"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["screen"], "home");
    assert!(body["notices"][0]["message"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn test_malformed_action_is_rejected() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/api/v1/sessions", None).await;
    let actions = format!("/api/v1/sessions/{}/actions", created["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::POST, &actions, Some(json!({"action": "fly_away"}))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_unknown_and_deleted_sessions() {
    let app = app();

    let (status, _) = get(&app, "/api/v1/sessions/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/api/v1/sessions/6f1c1a8e-2b55-4a5e-9a39-4e0c7f3d2b11").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, created) = send(&app, Method::POST, "/api/v1/sessions", None).await;
    let uri = format!("/api/v1/sessions/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_idle_session_is_evicted() {
    let app = app_with_limits(SessionLimits {
        idle_timeout: Duration::from_millis(20),
        ..Default::default()
    });

    let (_, created) = send(&app, Method::POST, "/api/v1/sessions", None).await;
    let uri = format!("/api/v1/sessions/{}", created["id"].as_str().unwrap());

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_registry_frees_idle_slots() {
    let app = app_with_limits(SessionLimits {
        idle_timeout: Duration::from_millis(20),
        max_sessions: 1,
    });

    let (status, _) = send(&app, Method::POST, "/api/v1/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/v1/sessions", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Too many active sessions");

    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, _) = send(&app, Method::POST, "/api/v1/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
}
