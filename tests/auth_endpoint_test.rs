mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, TestApp};

async fn login(app: &TestApp, body: &str) -> axum::http::Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri("/api/login")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.send(request).await
}

fn get_with_auth(uri: &str, authorization: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_register_login_and_read() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/api/registration",
            r#"{"username":"broker","password":"hunter2"}"#,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let user = body_json(response).await;
    assert_eq!(user["username"], "broker");
    assert!(user["id"].as_i64().unwrap() > 0);
    assert!(user.get("password").is_none());

    let response = login(&app, r#"{"username":"broker","password":"hunter2"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let claims = app.tokens.validate(&token).unwrap();
    assert_eq!(claims.user_id, user["id"].as_i64().unwrap());

    for authorization in [format!("Bearer {}", token), token.clone()] {
        let response = app
            .send(get_with_auth("/api/all_deals", &authorization))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_missing_token_is_401() {
    let app = TestApp::new().await;

    for uri in [
        "/api/all_deals",
        "/api/all_processed_deals",
        "/api/all_not_processed_deals",
        "/api/all_clear_profit",
    ] {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.send(request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn test_invalid_token_is_403() {
    let app = TestApp::new().await;

    let response = app
        .send(get_with_auth("/api/all_deals", "Bearer not-a-token"))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let forged = dealbook::auth::TokenIssuer::new("other-secret", std::time::Duration::from_secs(60))
        .issue(1)
        .unwrap();
    let response = app
        .send(get_with_auth(
            "/api/all_clear_profit",
            &format!("Bearer {}", forged),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_duplicate_registration_is_409() {
    let app = TestApp::new().await;
    let body = r#"{"username":"broker","password":"pw"}"#;

    assert_eq!(
        app.post_json("/api/registration", body).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        app.post_json("/api/registration", body).await.status(),
        StatusCode::CONFLICT
    );
}

#[tokio::test]
async fn test_bad_credentials_are_401() {
    let app = TestApp::new().await;
    app.post_json(
        "/api/registration",
        r#"{"username":"broker","password":"pw"}"#,
    )
    .await;

    let response = login(&app, r#"{"username":"broker","password":"wrong"}"#).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = login(&app, r#"{"username":"nobody","password":"pw"}"#).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_login_body_is_400() {
    let app = TestApp::new().await;

    let response = login(&app, "not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
