//! Zero-day Detect Server
//!
//! Classifies uploaded network-flow CSVs and attributes the attack type.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ZERO-DAY DETECT                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  API      │  │  Ingest   │  │  Alert Dispatch         │ │
//! │  │  Gateway  │─►│  + Gate   │─►│  (Email / Webhook)      │ │
//! │  │  (Axum)   │  │  + Cascade│  │  detached, bounded      │ │
//! │  └───────────┘  └─────┬─────┘  └─────────────────────────┘ │
//! │                       ▼                                     │
//! │              ┌─────────────────┐                            │
//! │              │ Classifier      │                            │
//! │              │ Registry (ONNX) │                            │
//! │              └─────────────────┘                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod logic;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logic::alert::{build_notifiers, Dispatcher};
use logic::detection::Detector;
use logic::model::ClassifierRegistry;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "zeroday_detect=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Zero-day Detect starting...");

    // Load classifiers; any failure keeps the server down
    let manifest = config.manifest().context("Failed to read model manifest")?;
    let registry = ClassifierRegistry::load(&manifest).context("Failed to load classifiers")?;

    let notifiers = build_notifiers(
        config.email.as_ref(),
        config.alert_webhook_url.as_deref(),
        config.notify_timeout,
    );
    let dispatcher = Dispatcher::new(
        tokio::runtime::Handle::current(),
        notifiers,
        config.notify_timeout,
    );
    tracing::info!("Alert channels: {:?}", dispatcher.notifier_names());

    // Build application state
    let state = AppState {
        detector: Detector::new(Arc::new(registry), dispatcher),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub detector: Detector,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let cors = match state.config.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(_) => {
            tracing::warn!(
                "Invalid ALLOWED_ORIGIN '{}', cross-origin requests disabled",
                state.config.allowed_origin
            );
            CorsLayer::new()
        }
    }
    .allow_methods(Any)
    .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/upload", post(handlers::upload::classify))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
