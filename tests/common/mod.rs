#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use dealbook::api::{self, AppState};
use dealbook::auth::TokenIssuer;
use dealbook::cache::{DealCache, MemoryCache, DEFAULT_TTL};
use dealbook::db::{init_db, DealStore};
use dealbook::orchestration::Reconciler;
use dealbook::service::{DealService, ProfitService, UserService};
use dealbook::Repository;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: axum::Router,
    pub repo: Arc<Repository>,
    pub deals: Arc<DealService>,
    pub profits: Arc<ProfitService>,
    pub reconciler: Reconciler,
    pub tokens: Arc<TokenIssuer>,
    _temp: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        let repo = Arc::new(Repository::new(pool));
        Self::with_deal_store(repo.clone(), repo, temp_dir)
    }

    /// Build the app with a substitute deal store, e.g. one that injects failures.
    pub async fn with_store<F>(wrap: F) -> Self
    where
        F: FnOnce(Arc<Repository>) -> Arc<dyn DealStore>,
    {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        let repo = Arc::new(Repository::new(pool));
        let store = wrap(repo.clone());
        Self::with_deal_store(repo, store, temp_dir)
    }

    fn with_deal_store(repo: Arc<Repository>, store: Arc<dyn DealStore>, temp: TempDir) -> Self {
        let tokens = TokenIssuer::new(TEST_SECRET, Duration::from_secs(3600));
        let deals = Arc::new(DealService::new(
            store,
            DealCache::new(Arc::new(MemoryCache::new(64)), DEFAULT_TTL),
        ));
        let profits = Arc::new(ProfitService::new(repo.clone()));
        let users = Arc::new(UserService::new(repo.clone(), tokens.clone()));
        let tokens = Arc::new(tokens);
        let reconciler = Reconciler::new(deals.clone(), profits.clone());

        let router = api::create_router(AppState::new(
            repo.clone(),
            deals.clone(),
            profits.clone(),
            users,
            tokens.clone(),
        ));

        TestApp {
            router,
            repo,
            deals,
            profits,
            reconciler,
            tokens,
            _temp: temp,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get_authorized(&self, uri: &str) -> Response<Body> {
        let token = self.tokens.issue(1).unwrap();
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn get_json_authorized(&self, uri: &str) -> serde_json::Value {
        let response = self.get_authorized(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {} failed", uri);
        body_json(response).await
    }

    pub async fn create_deal(&self, title: &str, expenses: i64, profit: i64) -> serde_json::Value {
        let body = serde_json::json!({"title": title, "expenses": expenses, "profit": profit});
        let response = self.post_json("/api/new_deal", &body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
