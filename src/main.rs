mod config;
mod db;
mod errors;
mod handlers;
mod ml;
mod models;

use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::ml::model::LinearModel;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "medintel_forecast=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded");

    // Connect to PostgreSQL
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url())
        .await?;
    tracing::info!("Connected to PostgreSQL");

    // Run migrations
    sqlx::raw_sql(include_str!("../migrations/001_initial_schema.sql"))
        .execute(&pool)
        .await?;
    tracing::info!("Database migrations applied");

    // Load the demand model. The service still starts without one so the
    // deployment is observable; forecast endpoints answer 503 until the
    // artifact is fixed and the process restarted.
    let model = match LinearModel::load(Path::new(&config.model.path)) {
        Ok(m) => {
            tracing::info!(path = %config.model.path, version = m.version(), "Demand model loaded");
            Some(Arc::new(m))
        }
        Err(e) => {
            tracing::error!(path = %config.model.path, error = %e, "Failed to load demand model");
            None
        }
    };

    // Create shared state
    let state = AppState { pool, model };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/forecast", post(handlers::forecasts::generate))
        .route("/api/v1/model", get(handlers::forecasts::model_info))
        .route("/api/v1/hospitals", get(handlers::hospitals::list))
        .route("/api/v1/hospitals/:hospital_id/history", get(handlers::hospitals::get_history))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting MedIntel forecasting service on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
