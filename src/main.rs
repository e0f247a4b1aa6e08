use anyhow::Context;
use dealbook::auth::TokenIssuer;
use dealbook::cache::{DealCache, MemoryCache};
use dealbook::orchestration::{spawn_reconciler, Reconciler};
use dealbook::service::{DealService, ProfitService, UserService};
use dealbook::{api, config::Config, db::init_db, telemetry, Repository};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Configuration error")?;
    telemetry::init_tracing(config.env);

    // Bind before the pool is opened or the worker spawned.
    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let pool = init_db(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    let repo = Arc::new(Repository::new(pool.clone()));
    let cache = DealCache::new(
        Arc::new(MemoryCache::new(config.cache_max_entries)),
        config.cache_ttl,
    );
    let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl);

    let deals = Arc::new(DealService::new(repo.clone(), cache));
    let profits = Arc::new(ProfitService::new(repo.clone()));
    let users = Arc::new(UserService::new(repo.clone(), tokens.clone()));

    let cancel = CancellationToken::new();
    let worker = spawn_reconciler(
        Arc::new(Reconciler::new(deals.clone(), profits.clone())),
        config.worker_interval,
        cancel.clone(),
    );

    let app = api::create_router(api::AppState::new(
        repo,
        deals,
        profits,
        users,
        Arc::new(tokens),
    ));

    tracing::info!(env = ?config.env, "Server listening on {}", addr);

    let shutdown = cancel.clone();
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => tracing::info!("Shutdown signal received"),
                () = shutdown.cancelled() => {}
            }
        })
        .await;

    cancel.cancel();
    if let Err(e) = worker.await {
        tracing::error!(error = %e, "Reconciliation worker panicked");
    }
    pool.close().await;
    tracing::info!("Shutdown complete");

    served.context("Server error")
}
