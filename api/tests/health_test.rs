#[allow(dead_code)]
mod helpers;

use axum::http::{Method, StatusCode};
use helpers::{make_test_app, send};

#[tokio::test]
async fn health_check_returns_ok_json() {
    let app = make_test_app().await;

    let (status, json) = send(&app.router, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["message"], "Health check passed");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = make_test_app().await;
    let (status, _) = send(&app.router, Method::GET, "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
