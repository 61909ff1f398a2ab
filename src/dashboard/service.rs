use chrono::NaiveDate;
use std::sync::Arc;

use super::condition::{classify_icon, classify_token};
use super::models::{CurrentConditions, Dashboard, ForecastSummaryDay, HourlySeries};
use crate::error::RelayError;
use crate::provider::{CurrentWeather, ForecastWeather};
use crate::weather::WeatherService;

/// Hours between chart samples
const HOURLY_STEP: usize = 3;
/// Samples per chart series
const HOURLY_SAMPLES: usize = 8;

/// Map each forecast day to a summary row, preserving order
pub fn derive_forecast_summary(forecast: &ForecastWeather) -> Vec<ForecastSummaryDay> {
    forecast
        .forecast
        .forecastday
        .iter()
        .map(|day| ForecastSummaryDay {
            day: weekday_label(&day.date),
            temp_high: day.day.maxtemp_c,
            temp_low: day.day.mintemp_c,
            condition: day.day.condition.text.to_lowercase(),
            icon: classify_token(&day.day.condition.text).emoji().to_string(),
        })
        .collect()
}

/// Sample the first day's hours at 00:00, 03:00, ... 21:00.
///
/// Short hour lists yield fewer samples; no forecast days yields empty series.
pub fn derive_hourly_series(forecast: &ForecastWeather) -> HourlySeries {
    let Some(first_day) = forecast.forecast.forecastday.first() else {
        return HourlySeries::default();
    };

    let sampled: Vec<_> = first_day
        .hour
        .iter()
        .step_by(HOURLY_STEP)
        .take(HOURLY_SAMPLES)
        .collect();

    HourlySeries {
        temperature: sampled.iter().map(|h| h.temp_c).collect(),
        precipitation: sampled.iter().map(|h| h.precip_mm).collect(),
        wind: sampled.iter().map(|h| h.wind_kph).collect(),
    }
}

pub fn derive_current_conditions(weather: &CurrentWeather) -> CurrentConditions {
    let current = &weather.current;
    CurrentConditions {
        location: weather.location.name.clone(),
        region: weather.location.region.clone(),
        country: weather.location.country.clone(),
        temp_c: current.temp_c,
        feelslike_c: current.feelslike_c,
        condition: current.condition.text.clone(),
        icon: classify_icon(&current.condition.text),
        humidity: current.humidity,
        wind_kph: current.wind_kph,
        precip_mm: current.precip_mm,
        is_day: current.is_day == 1,
        last_updated: current.last_updated.clone(),
    }
}

/// "2026-10-12" -> "Mon". Unparseable dates are shown as given.
fn weekday_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a").to_string())
        .unwrap_or_else(|_| date.to_string())
}

pub struct DashboardService {
    weather: Arc<WeatherService>,
}

impl DashboardService {
    pub fn new(weather: Arc<WeatherService>) -> Self {
        Self { weather }
    }

    /// Fetch current conditions and the forecast, then derive the view model
    pub async fn build(&self, location: &str) -> Result<Dashboard, RelayError> {
        let (current, forecast) = tokio::try_join!(
            self.weather.current(location),
            self.weather.forecast(location)
        )?;
        let current: CurrentWeather = current.decode()?;
        let forecast: ForecastWeather = forecast.decode()?;

        let hourly = derive_hourly_series(&forecast);
        if hourly.is_empty() {
            tracing::warn!(location = %current.location.name, "Forecast has no hourly points");
        }

        let dashboard = Dashboard {
            current: derive_current_conditions(&current),
            forecast: derive_forecast_summary(&forecast),
            hourly,
        };

        tracing::debug!(
            location = %dashboard.current.location,
            days = dashboard.forecast.len(),
            samples = dashboard.hourly.len(),
            "Dashboard derived"
        );

        Ok(dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::condition::ConditionIcon;
    use crate::provider::fixtures::{current_json, forecast_weather, StubProvider};
    use crate::provider::WeatherReport;
    use async_trait::async_trait;

    #[test]
    fn test_summary_has_one_row_per_day_in_order() {
        let forecast = forecast_weather(7, 24);
        let summary = derive_forecast_summary(&forecast);

        let days: Vec<&str> = summary.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(days, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }

    #[test]
    fn test_summary_keeps_raw_temperatures() {
        let summary = derive_forecast_summary(&forecast_weather(2, 24));

        assert_eq!(summary[0].temp_high, 30.5);
        assert_eq!(summary[0].temp_low, 24.2);
        assert_eq!(summary[1].temp_high, 31.5);
    }

    #[test]
    fn test_summary_icons_follow_condition_priority() {
        let summary = derive_forecast_summary(&forecast_weather(7, 24));
        let icons: Vec<&str> = summary.iter().map(|d| d.icon.as_str()).collect();

        assert_eq!(icons, ["☀️", "🌧️", "⛈️", "❄️", "⛅", "☀️", "🌧️"]);
        assert_eq!(summary[6].condition, "cloudy with rain showers");
    }

    #[test]
    fn test_summary_with_fewer_days() {
        assert_eq!(derive_forecast_summary(&forecast_weather(3, 24)).len(), 3);
    }

    #[test]
    fn test_summary_is_idempotent() {
        let forecast = forecast_weather(7, 24);
        assert_eq!(
            derive_forecast_summary(&forecast),
            derive_forecast_summary(&forecast)
        );
    }

    #[test]
    fn test_unparseable_date_is_kept() {
        let mut forecast = forecast_weather(1, 24);
        forecast.forecast.forecastday[0].date = "someday".to_string();

        assert_eq!(derive_forecast_summary(&forecast)[0].day, "someday");
    }

    #[test]
    fn test_hourly_series_samples_every_third_hour() {
        let forecast = forecast_weather(7, 24);
        let hours = &forecast.forecast.forecastday[0].hour;
        let series = derive_hourly_series(&forecast);

        assert_eq!(series.len(), 8);
        assert_eq!(series.precipitation.len(), 8);
        assert_eq!(series.wind.len(), 8);

        let indices = [0, 3, 6, 9, 12, 15, 18, 21];
        let temps: Vec<f64> = indices.iter().map(|&i| hours[i].temp_c).collect();
        let precip: Vec<f64> = indices.iter().map(|&i| hours[i].precip_mm).collect();
        let wind: Vec<f64> = indices.iter().map(|&i| hours[i].wind_kph).collect();

        assert_eq!(series.temperature, temps);
        assert_eq!(series.precipitation, precip);
        assert_eq!(series.wind, wind);
    }

    #[test]
    fn test_hourly_series_uses_first_day_only() {
        let series = derive_hourly_series(&forecast_weather(2, 24));
        // Day 1 temps start at 100 in the fixture.
        assert!(series.temperature.iter().all(|t| *t < 100.0));
    }

    #[test]
    fn test_hourly_series_degrades_with_short_hour_list() {
        let series = derive_hourly_series(&forecast_weather(1, 10));

        assert_eq!(series.temperature, vec![0.0, 3.0, 6.0, 9.0]);
        assert_eq!(series.wind, vec![10.0, 13.0, 16.0, 19.0]);
    }

    #[test]
    fn test_hourly_series_empty_without_days() {
        let mut forecast = forecast_weather(1, 24);
        forecast.forecast.forecastday.clear();

        assert!(derive_hourly_series(&forecast).is_empty());
    }

    #[test]
    fn test_current_conditions() {
        let weather: CurrentWeather =
            serde_json::from_value(current_json("Colombo", 28.0)).unwrap();
        let current = derive_current_conditions(&weather);

        assert_eq!(current.location, "Colombo");
        assert_eq!(current.temp_c, 28.0);
        assert_eq!(current.feelslike_c, 32.0);
        assert_eq!(current.icon, ConditionIcon::Cloud);
        assert!(current.is_day);
    }

    #[tokio::test]
    async fn test_build_combines_current_and_forecast() {
        let provider = Arc::new(StubProvider::ok());
        let weather = Arc::new(WeatherService::new(provider.clone()));
        let dashboard = DashboardService::new(weather).build("Colombo").await.unwrap();

        assert_eq!(dashboard.current.location, "Colombo");
        assert_eq!(dashboard.forecast.len(), 7);
        assert_eq!(dashboard.hourly.len(), 8);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_build_rejects_empty_location() {
        let provider = Arc::new(StubProvider::ok());
        let weather = Arc::new(WeatherService::new(provider.clone()));
        let result = DashboardService::new(weather).build(" ").await;

        assert!(matches!(result, Err(RelayError::InvalidLocation)));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_build_fails_when_provider_fails() {
        let provider = Arc::new(StubProvider::failing(|| RelayError::Timeout));
        let weather = Arc::new(WeatherService::new(provider));
        let result = DashboardService::new(weather).build("Colombo").await;

        assert!(matches!(result, Err(RelayError::Timeout)));
    }

    /// Serves well-formed but sparse bodies the dashboard cannot read
    struct SparseProvider;

    #[async_trait]
    impl crate::provider::WeatherProvider for SparseProvider {
        fn is_configured(&self) -> bool {
            true
        }

        async fn current(&self, _location: &str) -> Result<WeatherReport, RelayError> {
            WeatherReport::current(serde_json::json!({
                "location": { "name": "Colombo" },
                "current": { "temp_c": 28 }
            }))
        }

        async fn forecast(&self, _location: &str) -> Result<WeatherReport, RelayError> {
            WeatherReport::forecast(crate::provider::fixtures::forecast_json(1, 24))
        }

        async fn search(
            &self,
            _query: &str,
        ) -> Result<Vec<crate::provider::SearchResult>, RelayError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_build_reports_undecodable_payload_as_malformed() {
        let weather = Arc::new(WeatherService::new(Arc::new(SparseProvider)));
        let result = DashboardService::new(weather).build("Colombo").await;

        assert!(matches!(result, Err(RelayError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_build_without_credential_is_not_configured() {
        let provider = Arc::new(StubProvider::unconfigured());
        let weather = Arc::new(WeatherService::new(provider.clone()));
        let result = DashboardService::new(weather).build("").await;

        assert!(matches!(result, Err(RelayError::NotConfigured)));
        assert_eq!(provider.calls(), 0);
    }
}
