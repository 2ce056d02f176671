pub mod extract;
pub mod response;

use crate::auth::RemoteAuthGateway;
use crate::config::Config;
use crate::features::{self, TrailsState};
use crate::middleware;
use crate::store::{PgTrailStore, TrailStore};
use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;
use tower_http::compression::CompressionLayer;

/// Connect the store and identity gateway described by `config`
pub async fn build_state(config: &Config) -> anyhow::Result<TrailsState> {
    let store = PgTrailStore::connect(&config.database)
        .await
        .context("Failed to connect to the trail database")?;
    tracing::info!("Database connection pool established");

    if config.database.run_migrations {
        sqlx::migrate!("../../migrations")
            .run(store.pool())
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Database migrations completed");
    }

    let gateway = RemoteAuthGateway::new(&config.auth).context("Failed to build identity client")?;
    tracing::info!(url = gateway.url(), "Identity service client initialized");

    let policy = config.auth_policy()?;
    tracing::info!(policy = %policy.kind(), "Auth policy selected");

    Ok(TrailsState::new(Arc::new(store), Arc::new(gateway), policy))
}

/// Build the application router with all routes and middleware
pub fn create_router(state: TrailsState, config: &Config) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state.clone())
        .merge(features::router(state))
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// Run the server until Ctrl+C or SIGTERM
///
/// On a signal the listener stops accepting at once; in-flight requests get
/// `shutdown_timeout_secs` to finish before the server is dropped.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = build_state(&config).await?;
    let app = create_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    let draining = Arc::new(Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(draining.clone()))
        .into_future();

    let grace = Duration::from_secs(config.server.shutdown_timeout_secs);
    if drain(server, &draining, grace).await? {
        tracing::info!("Server shut down gracefully");
    } else {
        tracing::warn!(
            "Connections still open after {} seconds, shutting down anyway",
            grace.as_secs()
        );
    }
    Ok(())
}

/// Drive `server` to completion, giving up `grace` after `draining` fires
///
/// Returns `false` when the deadline cut the drain short.
async fn drain<F>(server: F, draining: &Notify, grace: Duration) -> std::io::Result<bool>
where
    F: Future<Output = std::io::Result<()>>,
{
    let deadline = async {
        draining.notified().await;
        tracing::info!("Waiting up to {} seconds for connections to close", grace.as_secs());
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => result.map(|()| true),
        _ = deadline => Ok(false),
    }
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Trail Service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health(State(state): State<TrailsState>) -> Response {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "database": "disconnected"
                })),
            )
                .into_response()
        },
    }
}

/// Resolves on Ctrl+C or SIGTERM, then starts the drain deadline
async fn shutdown_signal(draining: Arc<Notify>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Stores a permit, so the drain deadline starts even if it polls late
    draining.notify_one();
}
