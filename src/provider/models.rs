use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelayError;

/// A 2xx WeatherAPI.com body whose required blocks have been checked.
///
/// Relayed to clients untouched; decode into the typed views below only
/// where a derivation needs the fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeatherReport(Value);

impl WeatherReport {
    /// Wrap a `current.json` body. `location` and `current` must be objects.
    pub fn current(body: Value) -> Result<Self, RelayError> {
        require_object(&body, "location")?;
        require_object(&body, "current")?;
        Ok(Self(body))
    }

    /// Wrap a `forecast.json` body. `location` must be an object and
    /// `forecast.forecastday` a non-empty array.
    pub fn forecast(body: Value) -> Result<Self, RelayError> {
        require_object(&body, "location")?;
        let days = require_object(&body, "forecast")?
            .get("forecastday")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                RelayError::MalformedResponse("missing `forecast.forecastday` array".to_string())
            })?;

        if days.is_empty() {
            return Err(RelayError::MalformedResponse(
                "forecast contains no days".to_string(),
            ));
        }

        Ok(Self(body))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Typed view over the relayed body
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, RelayError> {
        T::deserialize(&self.0).map_err(|e| RelayError::MalformedResponse(e.to_string()))
    }
}

fn require_object<'a>(
    body: &'a Value,
    name: &str,
) -> Result<&'a serde_json::Map<String, Value>, RelayError> {
    body.get(name)
        .and_then(Value::as_object)
        .ok_or_else(|| RelayError::MalformedResponse(format!("missing `{}` block", name)))
}

// ============================================================================
// Typed views used by the dashboard derivations
// Only the fields the view models read are declared; everything else in the
// provider payload is ignored here and still relayed through WeatherReport.
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Current {
    #[serde(default)]
    pub last_updated: String,
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub is_day: u8,
    pub condition: Condition,
    pub wind_kph: f64,
    pub precip_mm: f64,
    pub humidity: u32,
}

/// `current.json` as read by the dashboard
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentWeather {
    pub location: Location,
    pub current: Current,
}

/// `forecast.json` as read by the dashboard
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastWeather {
    pub location: Location,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastDay {
    /// Local date, `YYYY-MM-DD`
    pub date: String,
    pub day: DaySummary,
    /// Hourly points starting at 00:00 local time
    #[serde(default)]
    pub hour: Vec<HourlyPoint>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyPoint {
    pub temp_c: f64,
    pub precip_mm: f64,
    pub wind_kph: f64,
}

/// One entry of `search.json`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub country: String,
}

/// Error envelope: `{"error": {"code": 1006, "message": "No matching location found."}}`
#[derive(Debug, Deserialize)]
pub struct ProviderErrorBody {
    pub error: Option<ProviderErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderErrorDetail {
    pub message: Option<String>,
}

impl ProviderErrorBody {
    /// Provider message, if the body carried one
    pub fn message(self) -> Option<String> {
        self.error
            .and_then(|e| e.message)
            .filter(|m| !m.trim().is_empty())
    }
}
