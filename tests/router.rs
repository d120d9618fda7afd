mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use pack_calculator::routes::app_router;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

fn app() -> NormalizePath<Router> {
    app_router(common::create_test_state(), &common::test_config()).unwrap()
}

#[tokio::test]
async fn test_health_route() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let response = app()
        .oneshot(Request::get("/health/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_calculate_route() {
    let request = Request::post("/calculate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"items":501}"#))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["items_shipped"], 750);
    assert_eq!(json["packs"], serde_json::json!({ "250": 1, "500": 1 }));
}

#[tokio::test]
async fn test_calculate_route_rejects_malformed_json() {
    let request = Request::post("/calculate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"items":"#))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ui_served_at_root() {
    let response = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn test_unknown_asset_not_found() {
    let response = app()
        .oneshot(Request::get("/missing.js").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rate_limited_router_builds() {
    let config = pack_calculator::config::Config {
        rate_limit_enabled: true,
        ..common::test_config()
    };

    assert!(app_router(common::create_test_state(), &config).is_ok());
}
