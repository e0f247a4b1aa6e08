pub mod auth;
pub mod deals;
pub mod extract;
pub mod health;
pub mod profit;
pub mod users;

use crate::auth::TokenIssuer;
use crate::db::Repository;
use crate::service::{DealService, ProfitService, UserService};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub deals: Arc<DealService>,
    pub profits: Arc<ProfitService>,
    pub users: Arc<UserService>,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(
        repo: Arc<Repository>,
        deals: Arc<DealService>,
        profits: Arc<ProfitService>,
        users: Arc<UserService>,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            repo,
            deals,
            profits,
            users,
            tokens,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/api/all_deals", get(deals::get_all_deals))
        .route("/api/all_processed_deals", get(deals::get_processed_deals))
        .route(
            "/api/all_not_processed_deals",
            get(deals::get_not_processed_deals),
        )
        .route("/api/all_clear_profit", get(profit::get_all_clear_profit))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/api/new_deal", post(deals::create_deal))
        .route("/api/registration", post(users::register))
        .route("/api/login", get(users::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
