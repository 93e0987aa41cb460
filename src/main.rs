//! PassGuard Backend Server
//!
//! Password strength scoring and breach checking behind a small HTTP API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        PASSGUARD                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────────┐  ┌─────────────────┐  │
//! │  │  API      │  │  Analyzer        │  │  Breach Client  │  │
//! │  │  (Axum)   │  │  zxcvbn + ONNX   │  │  (k-anonymity,  │  │
//! │  │           │  │  classifiers     │  │   throttled)    │  │
//! │  └─────┬─────┘  └────────┬─────────┘  └────────┬────────┘  │
//! │        └─────────────────┼─────────────────────┘           │
//! │                          ▼                                 │
//! │          models/*.onnx + scaler.json (read-only)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod logic;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logic::analyzer::PasswordAnalyzer;
use logic::breach::{BreachClient, BreachConfig};
use logic::model::threshold::ScoreThresholds;
use logic::model::ModelScorer;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let default_filter = if config.is_production() {
        "passguard=info,tower_http=info"
    } else {
        "passguard=debug,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("PassGuard server starting...");
    tracing::info!("Environment: {}", config.environment);

    // Load classifier artifacts (zero models is a valid, degraded state)
    let scorer = ModelScorer::load_from_dir(Path::new(&config.model_dir));
    let analyzer = Arc::new(PasswordAnalyzer::new(scorer, ScoreThresholds::default()));

    let breach = Arc::new(BreachClient::new(BreachConfig {
        base_url: config.hibp_base_url.clone(),
        request_delay: Duration::from_millis(config.breach_request_delay_ms),
        batch_delay: Duration::from_millis(config.breach_batch_delay_ms),
        timeout: Duration::from_secs(config.breach_timeout_secs),
    }));

    // Build application state
    let state = AppState { analyzer, breach };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<PasswordAnalyzer>,
    pub breach: Arc<BreachClient>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/analyze-password", post(handlers::analyze::analyze_password))
        .route("/api/check-breach", post(handlers::breach::check_breach))
        .route("/api/batch-check-breach", post(handlers::breach::batch_check_breach))
        .route("/api/analyze-and-check", post(handlers::analyze::analyze_and_check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
