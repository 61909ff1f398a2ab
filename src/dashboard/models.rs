use serde::Serialize;
use utoipa::ToSchema;

use super::condition::ConditionIcon;

/// One row of the daily forecast strip
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ForecastSummaryDay {
    /// Short weekday name, e.g. "Mon"
    pub day: String,
    /// Raw `maxtemp_c`; rounding is left to the renderer
    pub temp_high: f64,
    /// Raw `mintemp_c`
    pub temp_low: f64,
    /// Lowercased condition text
    pub condition: String,
    /// Emoji token
    pub icon: String,
}

/// Three parallel chart series sampled every third hour of the first day
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct HourlySeries {
    pub temperature: Vec<f64>,
    pub precipitation: Vec<f64>,
    pub wind: Vec<f64>,
}

impl HourlySeries {
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }
}

/// Headline card for the current conditions
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CurrentConditions {
    pub location: String,
    pub region: String,
    pub country: String,
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub condition: String,
    pub icon: ConditionIcon,
    pub humidity: u32,
    pub wind_kph: f64,
    pub precip_mm: f64,
    pub is_day: bool,
    pub last_updated: String,
}

/// Everything the dashboard page renders
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Dashboard {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastSummaryDay>,
    pub hourly: HourlySeries,
}
