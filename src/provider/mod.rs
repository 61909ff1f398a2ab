#[cfg(test)]
pub mod fixtures;
pub mod models;
mod weatherapi;

pub use models::{CurrentWeather, ForecastWeather, SearchResult, WeatherReport};
pub use weatherapi::WeatherApiClient;

use async_trait::async_trait;

use crate::error::RelayError;

/// Upstream weather data source
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Whether a credential is available for upstream calls
    fn is_configured(&self) -> bool;

    /// `NotConfigured` when no credential is available.
    ///
    /// Services call this before validating any input.
    fn ensure_configured(&self) -> Result<(), RelayError> {
        if self.is_configured() {
            Ok(())
        } else {
            tracing::error!("WeatherAPI key is not configured");
            Err(RelayError::NotConfigured)
        }
    }

    /// Current conditions for a location
    async fn current(&self, location: &str) -> Result<WeatherReport, RelayError>;

    /// Multi-day forecast for a location
    async fn forecast(&self, location: &str) -> Result<WeatherReport, RelayError>;

    /// Locations matching a partial query
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, RelayError>;
}
