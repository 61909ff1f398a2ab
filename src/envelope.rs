use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success envelope for relayed weather data: `{ success: true, data }`
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Success envelope for location suggestions: `{ success: true, suggestions }`
#[derive(Debug, Serialize)]
pub struct SuggestionsEnvelope<T> {
    pub success: bool,
    pub suggestions: Vec<T>,
}

impl<T> SuggestionsEnvelope<T> {
    pub fn new(suggestions: Vec<T>) -> Self {
        Self {
            success: true,
            suggestions,
        }
    }
}

/// Shared-cache directives attached to successful weather responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub s_maxage_secs: u64,
    pub stale_while_revalidate_secs: u64,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            s_maxage_secs: 300,
            stale_while_revalidate_secs: 60,
        }
    }
}

impl CachePolicy {
    /// Render as a `Cache-Control` header value
    pub fn header_value(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate={}",
            self.s_maxage_secs, self.stale_while_revalidate_secs
        )
    }
}

/// JSON body plus `Cache-Control`
pub struct Cached<T>(pub CachePolicy, pub T);

impl<T: Serialize> IntoResponse for Cached<T> {
    fn into_response(self) -> Response {
        let Cached(policy, body) = self;
        let mut response = Json(body).into_response();
        if let Ok(value) = HeaderValue::from_str(&policy.header_value()) {
            response.headers_mut().insert(header::CACHE_CONTROL, value);
        }
        response
    }
}
