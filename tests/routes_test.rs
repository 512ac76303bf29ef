//! Tests for the HTTP surface.
//!
//! Run with: cargo test --test routes_test

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use sensor_charts::common::AppState;
use sensor_charts::config::Config;
use sensor_charts::routes::build_router;

fn app() -> Router {
    build_router(AppState::new(Config::default()).expect("state"))
}

async fn get(uri: &str) -> (StatusCode, String) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf8"))
}

#[tokio::test]
async fn readings_spec_uses_requested_window() {
    let (status, body) = get("/specs/sensor/10/readings?days=10").await;
    assert_eq!(status, StatusCode::OK);

    let doc: Value = serde_json::from_str(&body).expect("json");
    let url = doc["data"]["url"].as_str().expect("url");
    let query = url
        .strip_prefix("/api/sensor/10/readings?start=")
        .expect("resource-scoped url");
    let (start, end) = query.split_once("&end=").expect("end param");
    let start: i64 = start.parse().expect("start");
    let end: i64 = end.parse().expect("end");

    assert_eq!(end - start, 10 * 86_400);
    assert_eq!(doc["data"]["format"]["property"], "data.readings");
    assert_eq!(doc["vconcat"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn non_positive_window_is_bad_request() {
    let (status, body) = get("/specs/sensor/10/readings?days=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("days must be between 1 and"));
}

#[tokio::test]
async fn oversized_window_is_bad_request() {
    for uri in [
        "/specs/sensor/10/readings?days=200000000",
        "/specs/sensor/10/readings/resolved?days=200000000",
    ] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body.contains("got 200000000"), "{body}");
    }
}

#[tokio::test]
async fn energy_stats_spec_has_no_window() {
    let (status, body) = get("/specs/sensor/3/energy_stats").await;
    assert_eq!(status, StatusCode::OK);

    let doc: Value = serde_json::from_str(&body).expect("json");
    assert_eq!(doc["data"]["url"], "/api/sensor/3/energy_stats");
    assert_eq!(doc["data"]["format"]["property"], "stats");
    assert!(doc.get("transform").is_none());
}

#[tokio::test]
async fn sensor_page_embeds_both_charts() {
    let (status, html) = get("/sensor/10").await;
    assert_eq!(status, StatusCode::OK);

    assert!(html.contains("<div id=\"reading-charts\"></div>"));
    assert!(html.contains("vegaEmbed('#reading-charts', "));
    assert!(html.contains("\"url\":\"/api/sensor/10/readings?start="));
    assert!(html.contains("vegaEmbed('#stats-charts', "));
    assert!(html.contains("\"url\":\"/api/sensor/10/energy_stats\""));
    assert_eq!(html.matches("{\"actions\":false}").count(), 2);
}

#[tokio::test]
async fn demo_page_uses_fixed_source() {
    let (status, html) = get("/demo").await;
    assert_eq!(status, StatusCode::OK);

    assert!(html.contains("vegaEmbed('#charts', "));
    assert!(html.contains("/api/sensor/10/readings?start=1548210420&end=1548220420"));
    assert!(html.contains("\"as\":\"timestampms\""));
}

#[tokio::test]
async fn unreachable_data_api_is_bad_gateway() {
    let config = Config {
        data_api_base_url: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    };
    let response = build_router(AppState::new(config).expect("state"))
        .oneshot(
            Request::builder()
                .uri("/specs/sensor/10/readings/resolved")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("infallible");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (status, body) = get("/healthz").await;
    assert_eq!(status, StatusCode::OK);

    let doc: Value = serde_json::from_str(&body).expect("json");
    assert_eq!(doc["status"], "ok");
}
