use axum::{extract::State, Json};
use serde::Serialize;

use crate::envelope::{Cached, DataEnvelope};
use crate::error::RelayError;
use crate::extractors::WeatherParams;
use crate::provider::WeatherReport;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Relay current conditions or the forecast for a location
///
/// GET /weather?location=Colombo&type=current|forecast
pub async fn get_weather(
    State(state): State<AppState>,
    params: WeatherParams,
) -> Result<Cached<DataEnvelope<WeatherReport>>, RelayError> {
    state.weather_service.ensure_configured()?;
    let report = params.report_type()?;

    let data = state
        .weather_service
        .fetch_weather(&params.location, report)
        .await?;

    Ok(Cached(state.config.cache_policy(), DataEnvelope::new(data)))
}
