//! Server setup and initialization
//!
//! Provides the main application builder and server runner. Startup is
//! ordered: the store is connected and its schema bootstrapped before the
//! sweeper starts and before the listener accepts a single request.

use axum::Router;
use lobby_common::{AppConfig, AppError, StoreBackend};
use lobby_db::{bootstrap_schema, create_pool, PoolConfig};
use lobby_service::{IdleSweeper, ServiceContext};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes skip the rate limiter so probes keep working under load.
///
/// # Errors
/// Returns `AppError::Config` if the rate limiter cannot be configured
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let router = apply_rate_limit(create_router(), &config.rate_limit)?.merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    Ok(router.with_state(state))
}

/// Connect the configured store and build the service context
pub async fn connect_store(backend: &StoreBackend) -> Result<ServiceContext, AppError> {
    match backend {
        StoreBackend::Postgres(db) => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&PoolConfig::from(db))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            bootstrap_schema(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");
            Ok(ServiceContext::postgres(pool))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            Ok(ServiceContext::in_memory())
        }
    }
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let service_context = connect_store(&config.store).await?;
    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server on a bound listener until Ctrl+C
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read listener address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let sweeper = IdleSweeper::new(state.shared_context(), &state.config().sweeper).spawn();
    let app = create_app(state)?;

    let result = match TcpListener::bind(&addr).await {
        Ok(listener) => run_server(app, listener).await,
        Err(e) => Err(AppError::Config(format!("Failed to bind to {addr}: {e}"))),
    };

    sweeper.abort();
    result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
