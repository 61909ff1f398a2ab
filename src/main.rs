mod config;
mod dashboard;
mod envelope;
mod error;
mod extractors;
mod openapi;
mod provider;
mod routes;
mod search;
mod weather;

use axum::{
    error_handling::HandleErrorLayer,
    http::{Method, StatusCode},
    BoxError, Json,
};
use reqwest::Client;
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::dashboard::DashboardService;
use crate::error::ErrorResponse;
use crate::provider::{WeatherApiClient, WeatherProvider};
use crate::search::SearchService;
use crate::weather::WeatherService;

/// Shared HTTP client configuration
const HTTP_TIMEOUT_SECS: u64 = 30;
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

#[derive(Clone)]
pub struct AppState {
    pub weather_service: Arc<WeatherService>,
    pub search_service: Arc<SearchService>,
    pub dashboard_service: Arc<DashboardService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire the relay services around one provider
    pub fn new(config: AppConfig, provider: Arc<dyn WeatherProvider>) -> Self {
        let weather_service = Arc::new(WeatherService::new(Arc::clone(&provider)));
        let search_service = Arc::new(SearchService::new(provider));
        let dashboard_service = Arc::new(DashboardService::new(Arc::clone(&weather_service)));

        Self {
            weather_service,
            search_service,
            dashboard_service,
            config: Arc::new(config),
        }
    }
}

/// Create shared HTTP client with connection pooling
fn create_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .pool_max_idle_per_host(10)
        .build()
}

/// Handle request timeout errors
async fn handle_timeout_error(err: BoxError) -> (StatusCode, Json<ErrorResponse>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(ErrorResponse::with_code(
                "Request timeout. Please try again.",
                "TIMEOUT",
            )),
        )
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::with_code(
                "Internal server error. Please try again later.",
                "INTERNAL_ERROR",
            )),
        )
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyrelay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded successfully");

    // Create shared HTTP client with connection pooling
    let http_client = create_http_client()?;
    tracing::debug!("Shared HTTP client created");

    let provider = WeatherApiClient::new(
        http_client,
        &config.upstream.base_url,
        config.weather_api_key.as_deref(),
    )
    .with_timeout(config.upstream.timeout())
    .with_forecast_days(config.upstream.forecast_days);

    if provider.is_configured() {
        tracing::info!(base_url = %config.upstream.base_url, "WeatherAPI client configured");
    } else {
        tracing::warn!("No WeatherAPI key configured; weather requests will fail with 500");
    }

    let addr = format!("{}:{}", config.host, config.port);
    let request_timeout = Duration::from_secs(config.request_timeout_secs);
    let state = AppState::new(config, Arc::new(provider));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    let app = routes::build_router(state)
        .layer(
            ServiceBuilder::new()
                // Handle timeout errors
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(request_timeout),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
