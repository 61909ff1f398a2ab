use axum::{extract::State, Json};

use super::models::LocationSuggestion;
use crate::envelope::SuggestionsEnvelope;
use crate::error::RelayError;
use crate::extractors::SearchParam;
use crate::AppState;

/// Location suggestions for the search box
///
/// GET /search?query=Col
pub async fn get_suggestions(
    State(state): State<AppState>,
    SearchParam(query): SearchParam,
) -> Result<Json<SuggestionsEnvelope<LocationSuggestion>>, RelayError> {
    let suggestions = state.search_service.search_locations(&query).await?;
    Ok(Json(SuggestionsEnvelope::new(suggestions)))
}
