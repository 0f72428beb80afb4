//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use group_cache::{api::create_router, AppState, Config, Loader, LoaderFn, Registry};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    let registry = Registry::new();
    let loader: Arc<dyn Loader> = Arc::new(LoaderFn::new(|key: &str| {
        if key.starts_with("missing") {
            anyhow::bail!("{} not exist", key);
        }
        Ok(format!("value-{}", key).into_bytes())
    }));
    registry.register("scores", 1024, Some(loader)).unwrap();
    create_router(AppState::new(Arc::new(registry)))
}

fn data_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "group_cache_api_{}_{}",
        name,
        std::process::id()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

async fn send(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn to_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

// == Value Endpoint Tests ==

#[tokio::test]
async fn test_value_endpoint_success() {
    let app = create_test_app();

    let (status, body) = send(&app, "/api/scores/tom").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"value-tom");
}

#[tokio::test]
async fn test_value_endpoint_content_type() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/scores/tom")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()["content-type"],
        "application/octet-stream"
    );
}

#[tokio::test]
async fn test_value_endpoint_unknown_group() {
    let app = create_test_app();

    let (status, body) = send(&app, "/api/unknown/tom").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let json = to_json(&body);
    assert!(json["error"].as_str().unwrap().contains("unknown"));
}

#[tokio::test]
async fn test_value_endpoint_loader_error() {
    let app = create_test_app();

    let (status, body) = send(&app, "/api/scores/missing-1").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(to_json(&body)["error"], "missing-1 not exist");
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_reflect_hits_and_loads() {
    let app = create_test_app();

    send(&app, "/api/scores/tom").await;
    send(&app, "/api/scores/tom").await;
    send(&app, "/api/scores/missing-2").await;

    let (status, body) = send(&app, "/stats/scores").await;
    assert_eq!(status, StatusCode::OK);

    let json = to_json(&body);
    assert_eq!(json["group"], "scores");
    assert_eq!(json["gets"], 3);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 2);
    assert_eq!(json["local_loads"], 1);
    assert_eq!(json["local_load_errors"], 1);
    assert_eq!(json["entries"], 1);
}

#[tokio::test]
async fn test_stats_lists_all_groups() {
    let app = create_test_app();

    let (status, body) = send(&app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    let json = to_json(&body);
    let groups = json.as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["group"], "scores");
    assert_eq!(groups[0]["hit_rate"], 0.0);
}

#[tokio::test]
async fn test_stats_unknown_group() {
    let app = create_test_app();

    let (status, _) = send(&app, "/stats/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, body) = send(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json = to_json(&body);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Configured Server ==

#[tokio::test]
async fn test_configured_group_serves_files() {
    let dir = data_dir("files");
    fs::write(dir.join("logo.svg"), b"<svg/>").unwrap();

    let config = Config {
        group_name: "assets".to_string(),
        data_dir: dir,
        ..Config::default()
    };
    let app = create_router(AppState::from_config(&config).unwrap());

    let (status, body) = send(&app, "/api/assets/logo.svg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<svg/>");

    let (status, _) = send(&app, "/api/assets/absent.svg").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = create_test_app();

    let (status, _) = send(&app, "/nonexistent").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
