use axum::{routing::get, Router};

use crate::dashboard::handlers as dashboard_handlers;
use crate::openapi::swagger_ui;
use crate::search::handlers as search_handlers;
use crate::weather::handlers as weather_handlers;
use crate::AppState;

/// Relay and view-model routes
fn relay_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(weather_handlers::get_weather))
        .route("/search", get(search_handlers::get_suggestions))
        .route("/dashboard", get(dashboard_handlers::get_dashboard))
}

/// Build the complete application router
///
/// Relay routes are served at the root and again under `/api`, the prefix
/// the browser front end calls.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check at root level
        .route("/", get(weather_handlers::health))
        .route("/health", get(weather_handlers::health))
        .merge(relay_routes())
        .nest("/api", relay_routes())
        // Swagger UI for API documentation
        .merge(swagger_ui())
        .with_state(state)
}
