//! Sample WeatherAPI.com payloads shared by unit tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::models::{ForecastWeather, SearchResult, WeatherReport};
use super::WeatherProvider;
use crate::error::RelayError;

const DAY_CONDITIONS: [&str; 7] = [
    "Sunny",
    "Patchy rain nearby",
    "Thundery outbreaks possible",
    "Light snow",
    "Overcast",
    "Clear",
    "Cloudy with rain showers",
];

pub fn location_json(name: &str) -> Value {
    json!({
        "name": name,
        "region": "Western",
        "country": "Sri Lanka",
        "lat": 6.93,
        "lon": 79.85,
        "tz_id": "Asia/Colombo",
        "localtime": "2026-10-12 09:15"
    })
}

pub fn current_block_json(temp_c: f64) -> Value {
    json!({
        "last_updated": "2026-10-12 09:00",
        "temp_c": temp_c,
        "temp_f": temp_c * 9.0 / 5.0 + 32.0,
        "is_day": 1,
        "condition": {
            "text": "Partly cloudy",
            "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png",
            "code": 1003
        },
        "wind_mph": 8.1,
        "wind_kph": 13.0,
        "wind_dir": "WSW",
        "pressure_mb": 1010.0,
        "precip_mm": 0.2,
        "humidity": 79,
        "cloud": 50,
        "feelslike_c": temp_c + 4.0,
        "vis_km": 10.0,
        "uv": 7.0,
        "gust_kph": 16.2
    })
}

pub fn current_json(name: &str, temp_c: f64) -> Value {
    json!({
        "location": location_json(name),
        "current": current_block_json(temp_c)
    })
}

/// Hour `i` of day `d` has temp `d * 100 + i`, precip `i / 10`, wind `10 + i`.
pub fn forecast_json(days: usize, hours: usize) -> Value {
    let forecastday: Vec<Value> = (0..days)
        .map(|d| {
            let hour: Vec<Value> = (0..hours)
                .map(|i| {
                    json!({
                        "time": format!("2026-10-{:02} {:02}:00", 12 + d, i),
                        "temp_c": (d * 100 + i) as f64,
                        "precip_mm": i as f64 / 10.0,
                        "wind_kph": 10.0 + i as f64,
                        "chance_of_rain": 20
                    })
                })
                .collect();
            json!({
                "date": format!("2026-10-{:02}", 12 + d),
                "day": {
                    "maxtemp_c": 30.5 + d as f64,
                    "mintemp_c": 24.2 + d as f64,
                    "avgtemp_c": 27.0,
                    "daily_chance_of_rain": 40,
                    "condition": { "text": DAY_CONDITIONS[d % DAY_CONDITIONS.len()], "icon": "" }
                },
                "hour": hour
            })
        })
        .collect();

    json!({
        "location": location_json("Colombo"),
        "current": current_block_json(28.0),
        "forecast": { "forecastday": forecastday }
    })
}

pub fn forecast_weather(days: usize, hours: usize) -> ForecastWeather {
    serde_json::from_value(forecast_json(days, hours)).expect("fixture should deserialize")
}

pub fn current_report(name: &str, temp_c: f64) -> WeatherReport {
    WeatherReport::current(current_json(name, temp_c)).expect("fixture has required blocks")
}

pub fn forecast_report(days: usize, hours: usize) -> WeatherReport {
    WeatherReport::forecast(forecast_json(days, hours)).expect("fixture has required blocks")
}

/// In-memory provider that counts calls and either serves fixtures or fails
pub struct StubProvider {
    calls: AtomicUsize,
    configured: bool,
    failure: Option<fn() -> RelayError>,
}

impl StubProvider {
    pub fn ok() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            configured: true,
            failure: None,
        }
    }

    pub fn failing(failure: fn() -> RelayError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::ok()
        }
    }

    /// Provider without a credential; every upstream call fails with `NotConfigured`
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::ok()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<(), RelayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_configured()?;
        match self.failure {
            Some(failure) => Err(failure()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn current(&self, location: &str) -> Result<WeatherReport, RelayError> {
        self.record()?;
        let name = location.split(',').next().unwrap_or(location).trim();
        Ok(current_report(name, 28.0))
    }

    async fn forecast(&self, _location: &str) -> Result<WeatherReport, RelayError> {
        self.record()?;
        Ok(forecast_report(7, 24))
    }

    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, RelayError> {
        self.record()?;
        Ok(vec![
            SearchResult {
                id: 2801268,
                name: "Colombo".to_string(),
                region: "Western".to_string(),
                country: "Sri Lanka".to_string(),
            },
            SearchResult {
                id: 2632432,
                name: "Columbus".to_string(),
                region: "Ohio".to_string(),
                country: "United States of America".to_string(),
            },
        ])
    }
}
