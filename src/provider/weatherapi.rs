use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::models::{ProviderErrorBody, SearchResult, WeatherReport};
use super::WeatherProvider;
use crate::error::RelayError;

const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FORECAST_DAYS: u8 = 7;

const WEATHER_FALLBACK_MESSAGE: &str = "Failed to fetch weather data";
const SEARCH_FALLBACK_MESSAGE: &str = "Failed to fetch suggestions";

/// Client for WeatherAPI.com
/// https://www.weatherapi.com/docs/
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    forecast_days: u8,
}

impl WeatherApiClient {
    pub fn new(client: Client, base_url: &str, api_key: Option<&str>) -> Self {
        let base_url = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(|k| k.to_string()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }

    /// Deadline for current/forecast calls
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_forecast_days(mut self, days: u8) -> Self {
        self.forecast_days = days;
        self
    }

    fn api_key(&self) -> Result<&str, RelayError> {
        self.ensure_configured()?;
        self.api_key.as_deref().ok_or(RelayError::NotConfigured)
    }

    /// Issue one GET and return the body of a 2xx response.
    ///
    /// With a deadline, the whole exchange (send + body) is dropped once it
    /// elapses. Without one, the shared client's own timeout applies.
    async fn get_body(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        deadline: Option<Duration>,
        fallback_message: &str,
    ) -> Result<String, RelayError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let exchange = async {
            let response = self
                .client
                .get(&url)
                .query(params)
                .send()
                .await
                .map_err(map_transport)?;

            let status = response.status();
            tracing::debug!(endpoint = %endpoint, status = %status, "Received WeatherAPI response");

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(upstream_error(status.as_u16(), &body, fallback_message));
            }

            let body = response.text().await.map_err(map_transport)?;
            Ok::<String, RelayError>(body)
        };

        match deadline {
            Some(limit) => match tokio::time::timeout(limit, exchange).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        endpoint = %endpoint,
                        timeout_ms = limit.as_millis() as u64,
                        "WeatherAPI request exceeded deadline"
                    );
                    Err(RelayError::Timeout)
                }
            },
            None => exchange.await,
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn current(&self, location: &str) -> Result<WeatherReport, RelayError> {
        let key = self.api_key()?;
        tracing::debug!(location = %location, "Fetching current weather");

        let body = self
            .get_body(
                "current.json",
                &[("key", key), ("q", location), ("aqi", "no")],
                Some(self.timeout),
                WEATHER_FALLBACK_MESSAGE,
            )
            .await?;

        let report = WeatherReport::current(parse_json::<Value>(&body)?)?;

        tracing::info!(location = %location, "Current weather fetched successfully");

        Ok(report)
    }

    async fn forecast(&self, location: &str) -> Result<WeatherReport, RelayError> {
        let key = self.api_key()?;
        let days = self.forecast_days.to_string();
        tracing::debug!(location = %location, days = %days, "Fetching forecast");

        let body = self
            .get_body(
                "forecast.json",
                &[
                    ("key", key),
                    ("q", location),
                    ("days", &days),
                    ("aqi", "no"),
                    ("alerts", "no"),
                ],
                Some(self.timeout),
                WEATHER_FALLBACK_MESSAGE,
            )
            .await?;

        let report = WeatherReport::forecast(parse_json::<Value>(&body)?)?;

        tracing::info!(location = %location, "Forecast fetched successfully");

        Ok(report)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, RelayError> {
        let key = self.api_key()?;
        tracing::debug!(query = %query, "Searching locations");

        let body = self
            .get_body(
                "search.json",
                &[("key", key), ("q", query)],
                None,
                SEARCH_FALLBACK_MESSAGE,
            )
            .await?;

        let results: Vec<SearchResult> = parse_json(&body)?;
        tracing::debug!(query = %query, count = results.len(), "Location search completed");

        Ok(results)
    }
}

fn map_transport(err: reqwest::Error) -> RelayError {
    if err.is_timeout() {
        RelayError::Timeout
    } else {
        RelayError::Transport(err)
    }
}

/// Build an upstream error from a non-2xx response, preferring the provider's message
fn upstream_error(status: u16, body: &str, fallback_message: &str) -> RelayError {
    let message = serde_json::from_str::<ProviderErrorBody>(body)
        .ok()
        .and_then(ProviderErrorBody::message)
        .unwrap_or_else(|| fallback_message.to_string());

    tracing::error!(status = status, message = %message, "WeatherAPI error");

    RelayError::Upstream {
        status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
        message,
    }
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, RelayError> {
    serde_json::from_str(body).map_err(|e| RelayError::MalformedResponse(e.to_string()))
}
