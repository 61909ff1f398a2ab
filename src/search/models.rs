use serde::Serialize;
use utoipa::ToSchema;

use crate::provider::SearchResult;

/// Minimal location shape offered to the search box
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LocationSuggestion {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub country: String,
}

impl From<SearchResult> for LocationSuggestion {
    fn from(result: SearchResult) -> Self {
        Self {
            id: result.id,
            name: result.name,
            region: result.region,
            country: result.country,
        }
    }
}
