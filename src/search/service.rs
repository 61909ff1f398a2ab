use std::sync::Arc;

use super::models::LocationSuggestion;
use crate::error::RelayError;
use crate::provider::WeatherProvider;

/// Shortest query forwarded to the provider, in UTF-16 code units
/// (the length a browser reports for the search box)
pub const MIN_QUERY_LEN: usize = 3;

pub struct SearchService {
    provider: Arc<dyn WeatherProvider>,
}

impl SearchService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Location suggestions for a partial query, in provider order
    pub async fn search_locations(
        &self,
        query: &str,
    ) -> Result<Vec<LocationSuggestion>, RelayError> {
        self.provider.ensure_configured()?;

        if query.encode_utf16().count() < MIN_QUERY_LEN {
            return Err(RelayError::InvalidQuery);
        }

        let suggestions: Vec<LocationSuggestion> = self
            .provider
            .search(query)
            .await?
            .into_iter()
            .map(LocationSuggestion::from)
            .collect();

        tracing::debug!(query = %query, count = suggestions.len(), "Suggestions ready");

        Ok(suggestions)
    }
}
