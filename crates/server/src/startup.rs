use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use configs::AppConfig;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::errors::{self, StartupError};
use crate::rate_limit::RateLimiter;
use crate::routes;
use crate::state::AppState;

/// Build the router for a ready connection. Also used by tests.
pub fn build_app(db: DatabaseConnection, config: AppConfig) -> (Router, Arc<RateLimiter>) {
    errors::set_expose_detail(!config.is_production());
    let limiter = Arc::new(RateLimiter::new(&config.rate_limit));
    let state = AppState::new(db, config);
    (routes::build_router(state, Arc::clone(&limiter)), limiter)
}

/// Periodically drop rate-limit windows that have elapsed.
fn spawn_limiter_sweeper(limiter: Arc<RateLimiter>) {
    if !limiter.enabled() {
        return;
    }
    let period = limiter.window().max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            limiter.purge_expired();
        }
    });
}

/// Resolves on SIGINT, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(service = "server", event = "shutdown_signal", signal = "SIGINT", "shutting down"),
        _ = terminate => info!(service = "server", event = "shutdown_signal", signal = "SIGTERM", "shutting down"),
    }
}

/// Connect, migrate, serve until a shutdown signal, then close the pool.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let bind_addr = config.bind_addr();
    let db = models::db::connect_with_config(&config.database).await?;
    info!(
        service = "server",
        event = "db_connected",
        max_connections = config.database.max_connections,
        "database pool ready"
    );

    if config.database.run_migrations {
        Migrator::up(&db, None).await?;
        info!(service = "server", event = "migrations_applied", "database schema up to date");
    }

    let prefix = config.api.prefix.clone();
    let environment = config.environment.clone();
    let (app, limiter) = build_app(db.clone(), config);
    spawn_limiter_sweeper(limiter);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|source| StartupError::Bind { addr: bind_addr.clone(), source })?;
    let addr = listener
        .local_addr()
        .map_err(|source| StartupError::Bind { addr: bind_addr, source })?;
    info!(
        service = "server",
        event = "listening",
        %addr,
        api_prefix = %prefix,
        environment = %environment,
        "server listening"
    );

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StartupError::Any(e.into()))?;

    info!(service = "server", event = "draining_done", "in-flight requests finished");
    if let Err(e) = db.close().await {
        warn!(error = %e, "closing database pool failed");
    }
    Ok(())
}
