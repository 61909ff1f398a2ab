//! View models derived from WeatherAPI.com payloads.

pub mod condition;
pub mod handlers;
pub mod models;
mod service;

pub use models::{CurrentConditions, Dashboard, ForecastSummaryDay, HourlySeries};
pub use service::DashboardService;
