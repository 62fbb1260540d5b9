//! Health Awareness API Server
//!
//! HTTP front-end for the assistant: `POST /message` plus status endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use fallback::{CompletionError, FallbackDelegate, GeminiClient};
use matcher::Matcher;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use reference_index::IndexError;
use responder::Assistant;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod rate_limit;
pub mod routes;
pub mod settings;

pub use rate_limit::{create_governor_config, DefaultGovernorConfig, RateLimitConfig};
pub use settings::{AppConfig, LoggingConfig, ReferenceConfig, ServerConfig};

/// Server errors, all fatal at startup
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Reference data error: {0}")]
    Index(#[from] IndexError),
    #[error("Completion client error: {0}")]
    Completion(#[from] CompletionError),
    #[error("Logging setup failed: {0}")]
    Logging(String),
    #[error("Metrics setup failed: {0}")]
    Metrics(String),
    #[error("Rate limit setup failed: {0}")]
    RateLimit(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state shared across handlers. Immutable after startup.
pub struct AppState {
    /// Message handling
    pub assistant: Assistant,
    /// Name of the completion backend
    pub completion_service: String,
    /// Prometheus handle when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(assistant: Assistant, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            completion_service: assistant.fallback().service_name().to_string(),
            assistant,
            metrics,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Load reference data and wire the assistant from configuration
pub fn build_assistant(config: &AppConfig) -> Result<Assistant, ApiError> {
    let index = reference_index::load_csv(&config.reference.csv_path, &config.reference.columns)?;
    info!(
        "Loaded {} diseases from {}",
        index.len(),
        config.reference.csv_path
    );

    let client = GeminiClient::from_env(config.completion.clone())?;
    let matcher = Matcher::new(Arc::new(index), config.assistant.clone());

    Ok(Assistant::new(matcher, FallbackDelegate::new(Arc::new(client))))
}

/// Create the application router
pub fn create_router(
    state: Arc<AppState>,
    rate_limit: Option<Arc<DefaultGovernorConfig>>,
) -> Router {
    let mut message = Router::new().route("/message", post(routes::message::post_message));
    if let Some(config) = rate_limit {
        message = message.layer(GovernorLayer { config });
    }

    Router::new()
        .route("/", get(routes::health::root))
        .route("/api/v1/health", get(routes::health::health))
        .route("/metrics", get(routes::health::metrics))
        .merge(message)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| ApiError::Logging(format!("invalid log level '{}'", config.level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| ApiError::Logging(e.to_string()))
}

/// Install the global Prometheus recorder
pub fn init_metrics() -> Result<PrometheusHandle, ApiError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ApiError::Metrics(e.to_string()))
}

/// Run the server
pub async fn run_server(config: AppConfig) -> Result<(), ApiError> {
    let assistant = build_assistant(&config)?;
    let metrics = if config.server.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };
    let rate_limit = if config.server.rate_limit.enabled {
        Some(create_governor_config(&config.server.rate_limit)?)
    } else {
        None
    };

    let state = Arc::new(AppState::new(assistant, metrics));
    let app = create_router(state, rate_limit);

    info!("Starting API server on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
