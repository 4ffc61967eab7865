//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! every /api/v1/* endpoint using `tower::ServiceExt::oneshot()`.
//! No binary spawn, no network port.

use ladle_monitor::api::{create_app, DashboardState};
use ladle_monitor::config::MonitorConfig;
use ladle_monitor::LadleMonitor;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_monitor() -> Arc<LadleMonitor> {
    let mut config = MonitorConfig::default();
    config.simulation.seed = Some(2024);
    config.monitor.autostart = false;
    LadleMonitor::new(&config).unwrap()
}

fn app(monitor: &Arc<LadleMonitor>) -> Router {
    create_app(DashboardState::new(Arc::clone(monitor)))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get(monitor: &Arc<LadleMonitor>, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app(monitor), Method::GET, uri, None).await
}

async fn post(monitor: &Arc<LadleMonitor>, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
    send(app(monitor), Method::POST, uri, body).await
}

/// All GET endpoints for a known ladle should return 200 with the envelope.
#[tokio::test]
async fn test_get_endpoints_return_enveloped_200() {
    let monitor = create_test_monitor();
    let endpoints = [
        "/api/v1/health",
        "/api/v1/ladles",
        "/api/v1/ladles/L-01",
        "/api/v1/ladles/L-01/history",
        "/api/v1/ladles/L-01/analysis",
        "/api/v1/alerts",
        "/api/v1/summary",
    ];

    for endpoint in endpoints {
        let (status, body) = get(&monitor, endpoint).await;
        assert_eq!(status, StatusCode::OK, "GET {endpoint}");
        assert!(body.get("data").is_some(), "GET {endpoint} missing data");
        assert_eq!(body["meta"]["version"], "1", "GET {endpoint} missing meta");
    }
}

#[tokio::test]
async fn test_ladles_table_rows() {
    let monitor = create_test_monitor();
    let (_, body) = get(&monitor, "/api/v1/ladles").await;

    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["id"], "L-01");
    assert_eq!(rows[5]["id"], "L-06");
    for row in rows {
        assert_eq!(row["status"], "Normal");
        assert_eq!(row["recommendation"], "Normal operation — continue monitoring.");
        assert!(row["location"].is_string());
    }
}

#[tokio::test]
async fn test_unknown_ladle_is_404() {
    let monitor = create_test_monitor();
    for uri in [
        "/api/v1/ladles/L-99",
        "/api/v1/ladles/L-99/history",
        "/api/v1/ladles/L-99/analysis",
    ] {
        let (status, body) = get(&monitor, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {uri}");
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_history_is_chronological() {
    let monitor = create_test_monitor();
    let (_, body) = get(&monitor, "/api/v1/ladles/L-02/history").await;

    assert_eq!(body["data"]["ladle_id"], "L-02");
    let samples = body["data"]["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 10);
    let stamps: Vec<&str> = samples.iter().map(|s| s["timestamp"].as_str().unwrap()).collect();
    let parsed: Vec<chrono::DateTime<chrono::Utc>> = stamps.iter().map(|s| s.parse().unwrap()).collect();
    assert!(parsed.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_override_is_accepted_and_visible() {
    let monitor = create_test_monitor();
    let (status, body) = post(
        &monitor,
        "/api/v1/ladles/L-04/override",
        Some(serde_json::json!({"temperature": 1650, "stress": 90, "vibration": 0.9})),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["data"]["applied"], true);
    assert_eq!(body["data"]["alerts_raised"], 1);

    let (_, body) = get(&monitor, "/api/v1/ladles/L-04/analysis").await;
    assert_eq!(body["data"]["status"], "Critical");
    assert_eq!(
        body["data"]["issues"],
        serde_json::json!(["Overheating", "High Stress (crack risk)", "Vibration Anomaly"])
    );

    let (_, body) = get(&monitor, "/api/v1/alerts").await;
    let alerts = body["data"]["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["ladle_id"], "L-04");
}

#[tokio::test]
async fn test_override_on_unknown_ladle_is_still_accepted() {
    let monitor = create_test_monitor();
    let (status, body) = post(
        &monitor,
        "/api/v1/ladles/L-99/override",
        Some(serde_json::json!({"temperature": 1650})),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["data"]["applied"], false);
    assert_eq!(body["data"]["tick"], 1);
}

#[tokio::test]
async fn test_anomaly_forces_overheat() {
    let monitor = create_test_monitor();
    let (status, _) = post(&monitor, "/api/v1/ladles/L-06/anomaly", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (_, body) = get(&monitor, "/api/v1/ladles/L-06").await;
    assert_eq!(body["data"]["temperature"], 1625);
    assert_eq!(body["data"]["stress"], 86);
    assert_eq!(body["data"]["vibration"], 0.8);
    assert_eq!(body["data"]["analysis"]["status"], "Critical");
    assert_eq!(
        body["data"]["analysis"]["recommendation"],
        "Immediate cooling required + Inspect refractory lining / route to maintenance + Check structural balance and mounting"
    );
}

#[tokio::test]
async fn test_alert_limit_default_and_cap() {
    let mut config = MonitorConfig::default();
    config.simulation.seed = Some(1);
    config.monitor.alert_capacity = 12;
    let monitor = LadleMonitor::new(&config).unwrap();

    for _ in 0..15 {
        post(&monitor, "/api/v1/ladles/L-03/anomaly", None).await;
    }

    let (_, body) = get(&monitor, "/api/v1/alerts").await;
    assert_eq!(body["data"]["alerts"].as_array().unwrap().len(), 10);

    let (_, body) = get(&monitor, "/api/v1/alerts?limit=3").await;
    assert_eq!(body["data"]["alerts"].as_array().unwrap().len(), 3);

    let (_, body) = get(&monitor, "/api/v1/alerts?limit=500").await;
    assert_eq!(body["data"]["alerts"].as_array().unwrap().len(), 12);
    assert_eq!(body["data"]["capacity"], 12);
}

#[tokio::test]
async fn test_summary_counts_and_stats() {
    let monitor = create_test_monitor();
    post(&monitor, "/api/v1/ladles/L-01/anomaly", None).await;

    let (_, body) = get(&monitor, "/api/v1/summary").await;
    let counts = &body["data"]["counts"];
    assert_eq!(counts["total"], 6);
    assert_eq!(counts["critical"], 1);
    assert_eq!(body["data"]["stats"]["ticks"], 1);
    assert_eq!(body["data"]["stats"]["alerts_raised"], 1);
    assert_eq!(body["data"]["stats"]["running"], false);
}

#[tokio::test]
async fn test_simulation_start_stop() {
    let monitor = create_test_monitor();

    let (status, body) = post(&monitor, "/api/v1/simulation/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["changed"], true);

    let (_, body) = post(&monitor, "/api/v1/simulation/start", None).await;
    assert_eq!(body["data"]["changed"], false);

    let (_, body) = get(&monitor, "/api/v1/health").await;
    assert_eq!(body["data"]["running"], true);

    let (_, body) = post(&monitor, "/api/v1/simulation/stop", None).await;
    assert_eq!(body["data"]["running"], false);
    assert_eq!(body["data"]["changed"], true);

    monitor.shutdown().await;
}

#[tokio::test]
async fn test_malformed_override_body_is_rejected() {
    let monitor = create_test_monitor();
    let (status, body) = post(
        &monitor,
        "/api/v1/ladles/L-01/override",
        Some(serde_json::json!({"temperature": "hot"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"].is_string());
    assert_eq!(body["meta"]["version"], "1");
    assert_eq!(monitor.stats().await.ticks, 0);
}

#[tokio::test]
async fn test_missing_override_body_is_enveloped() {
    let monitor = create_test_monitor();
    let (status, body) = post(&monitor, "/api/v1/ladles/L-01/override", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(monitor.stats().await.ticks, 0);
}

#[tokio::test]
async fn test_malformed_alert_limit_is_rejected() {
    let monitor = create_test_monitor();
    let (status, body) = get(&monitor, "/api/v1/alerts?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["meta"]["version"], "1");
}
