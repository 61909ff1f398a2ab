use axum::extract::State;

use super::models::Dashboard;
use crate::envelope::{Cached, DataEnvelope};
use crate::error::RelayError;
use crate::extractors::LocationParam;
use crate::AppState;

/// Current conditions, 7-day summary and hourly chart series in one call
///
/// GET /dashboard?location=Colombo
pub async fn get_dashboard(
    State(state): State<AppState>,
    LocationParam(location): LocationParam,
) -> Result<Cached<DataEnvelope<Dashboard>>, RelayError> {
    let dashboard = state.dashboard_service.build(&location).await?;
    Ok(Cached(state.config.cache_policy(), DataEnvelope::new(dashboard)))
}
