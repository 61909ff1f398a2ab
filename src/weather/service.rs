use std::{str::FromStr, sync::Arc};

use crate::error::RelayError;
use crate::provider::{WeatherProvider, WeatherReport};

/// Which WeatherAPI.com report to relay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportType {
    #[default]
    Current,
    Forecast,
}

impl FromStr for ReportType {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "current" => Ok(Self::Current),
            "forecast" => Ok(Self::Forecast),
            other => Err(RelayError::InvalidReportType(other.to_string())),
        }
    }
}

pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// `NotConfigured` ahead of any input validation
    pub fn ensure_configured(&self) -> Result<(), RelayError> {
        self.provider.ensure_configured()
    }

    /// Relay a current or forecast report for a location
    pub async fn fetch_weather(
        &self,
        location: &str,
        report: ReportType,
    ) -> Result<WeatherReport, RelayError> {
        match report {
            ReportType::Current => self.current(location).await,
            ReportType::Forecast => self.forecast(location).await,
        }
    }

    pub async fn current(&self, location: &str) -> Result<WeatherReport, RelayError> {
        self.ensure_configured()?;
        let location = validate_location(location)?;
        self.provider.current(location).await
    }

    pub async fn forecast(&self, location: &str) -> Result<WeatherReport, RelayError> {
        self.ensure_configured()?;
        let location = validate_location(location)?;
        self.provider.forecast(location).await
    }
}

/// Trimmed location, or `InvalidLocation` when nothing is left
fn validate_location(location: &str) -> Result<&str, RelayError> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err(RelayError::InvalidLocation);
    }
    Ok(trimmed)
}
