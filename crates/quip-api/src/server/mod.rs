//! Application assembly and the listener loop

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use quip_common::{AppConfig, AppError, JwtService};
use quip_core::SnowflakeGenerator;
use quip_db::{
    create_pool, run_migrations, DatabaseConfig, PgCommentRepository, PgPostRepository,
    PgReactionRepository, PgVoteRepository,
};
use quip_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Full router: rate-limited `/api/v1`, unthrottled probes, shared layers.
///
/// # Errors
/// `AppError::Config` when the rate limit settings are unusable.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let production = config.app.env.is_production();

    let throttled = apply_rate_limit(create_router(), &config.rate_limit)?;
    let app = apply_middleware(throttled.merge(health_routes()), &config.cors, production);

    Ok(app.with_state(state))
}

/// Connect to PostgreSQL, migrate if asked, and wire the Pg repositories
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let store_error = |e: &dyn std::fmt::Display| AppError::Database(e.to_string());

    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| store_error(&e))?;
    info!("PostgreSQL pool ready");

    if config.database.run_migrations {
        run_migrations(&pool).await.map_err(|e| store_error(&e))?;
    } else {
        warn!("Skipping migrations; schema must already be current");
    }

    let services = ServiceContextBuilder::new()
        .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .vote_repo(Arc::new(PgVoteRepository::new(pool.clone())))
        .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
        .pool(pool)
        .jwt_service(Arc::new(JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry,
        )))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
        .build()?;

    Ok(AppState::new(services, config))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, draining connections");
}

/// Serve `config` until ctrl-c
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let app = create_app(create_app_state(config).await?)?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;
    info!(%addr, "Quip API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::internal)
}
