mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, TestApp};

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_ready_endpoint() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method("GET")
        .uri("/ready")
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ready");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/nope")
        .body(Body::empty())
        .unwrap();

    assert_eq!(app.send(request).await.status(), StatusCode::NOT_FOUND);
}
