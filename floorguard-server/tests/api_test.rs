use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use floorguard_core::models::Reading;
use serde_json::{json, Value};
use time::macros::datetime;
use time::Duration;
use tower::ServiceExt;

use crate::common::mock_app::MockApp;

mod common;

async fn get_json(app: &MockApp, uri: &str) -> (StatusCode, Value) {
    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health() {
    let app = MockApp::new().await;

    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
}

#[tokio::test]
async fn test_readings_are_newest_first_and_limited() {
    let app = MockApp::new().await;
    let base = datetime!(2025-03-04 10:00:00 UTC);
    for minute in 0..3 {
        app.ingest(Reading {
            temp: 20.0 + minute as f64,
            ..MockApp::calm_reading(base + Duration::minutes(minute))
        })
        .await;
    }

    let (status, body) = get_json(&app, "/readings?limit=2").await;

    assert_eq!(status, StatusCode::OK);
    let readings = body.as_array().unwrap();
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0]["temp"], json!(22.0));
    assert_eq!(readings[0]["timestamp"], json!("2025-03-04T10:02:00Z"));
    assert_eq!(readings[1]["temp"], json!(21.0));
}

#[tokio::test]
async fn test_metrics_use_instant_window() {
    let app = MockApp::new().await;
    app.ingest(MockApp::calm_reading(datetime!(2025-03-04 10:00:00 UTC))).await;

    let (status, body) = get_json(&app, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    let metrics = body.as_array().unwrap();
    assert_eq!(metrics.len(), 6);
    assert!(metrics.iter().all(|metric| metric["window"] == json!("instant")));
    assert!(metrics.iter().any(|metric| metric["metric_type"] == json!("WBGT")));
}

#[tokio::test]
async fn test_alerts_filter_by_severity() {
    let app = MockApp::new().await;
    app.ingest(Reading {
        temp: 33.0,
        pressure: 940.0,
        co_max: 250.0,
        pm2_5: 40.0,
        pm10: 90.0,
        ..MockApp::calm_reading(datetime!(2025-03-04 10:00:00 UTC))
    })
    .await;

    let (status, body) = get_json(&app, "/alerts").await;
    assert_eq!(status, StatusCode::OK);
    let mut categories: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|alert| alert["category"].as_str().unwrap().to_string())
        .collect();
    categories.sort();
    assert_eq!(categories, vec!["CO_CEILING", "PM10", "PM2.5", "PRESSURE", "TEMP"]);

    let (status, body) = get_json(&app, "/alerts?severity=critical").await;
    assert_eq!(status, StatusCode::OK);
    let critical = body.as_array().unwrap();
    assert_eq!(critical.len(), 2);
    assert!(critical.iter().all(|alert| alert["severity"] == json!("critical")));

    let (status, body) = get_json(&app, "/alerts?severity=apocalyptic").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!(400));
}

#[tokio::test]
async fn test_latest_ventilation() {
    let app = MockApp::new().await;

    let (status, body) = get_json(&app, "/ventilation/latest").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], json!("No ventilation decision recorded yet"));

    let base = datetime!(2025-03-04 10:00:00 UTC);
    app.ingest(MockApp::calm_reading(base)).await;
    app.ingest(Reading {
        pm2_5: 40.0,
        ..MockApp::calm_reading(base + Duration::minutes(1))
    })
    .await;

    let (status, body) = get_json(&app, "/ventilation/latest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ventilation_mode"], json!("DUST_CONTROL"));
    assert_eq!(body["reasons"], json!(["PM warning: PM2.5 orange"]));

    let (status, body) = get_json(&app, "/ventilation?limit=10").await;
    assert_eq!(status, StatusCode::OK);
    let history = body.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1]["ventilation_mode"], json!("NORMAL"));
    assert_eq!(history[1]["fan_supply_speed"], json!(40));
    assert_eq!(history[1]["reasons"], json!([]));
}
