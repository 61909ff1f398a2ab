use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::envelope::CachePolicy;

/// Variable read when `SKYRELAY_WEATHER_API_KEY` is not set
const LEGACY_API_KEY_VAR: &str = "WEATHER_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// WeatherAPI.com key. When absent every relay call fails with 500.
    #[serde(default)]
    pub weather_api_key: Option<String>,

    /// Whole-request timeout applied by the tower layer
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upstream provider settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Cache-Control directives for successful responses
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            weather_api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
            upstream: UpstreamConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the WeatherAPI.com v1 API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Deadline for current/forecast calls
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Days requested from the forecast endpoint
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Seconds a shared cache may serve the response as fresh
    #[serde(default = "default_s_maxage_secs")]
    pub s_maxage_secs: u64,

    /// Seconds a stale response may be served while revalidating
    #[serde(default = "default_stale_while_revalidate_secs")]
    pub stale_while_revalidate_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            s_maxage_secs: default_s_maxage_secs(),
            stale_while_revalidate_secs: default_stale_while_revalidate_secs(),
        }
    }
}

impl CacheConfig {
    pub fn policy(&self) -> CachePolicy {
        CachePolicy {
            s_maxage_secs: self.s_maxage_secs,
            stale_while_revalidate_secs: self.stale_while_revalidate_secs,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_forecast_days() -> u8 {
    7
}

fn default_s_maxage_secs() -> u64 {
    300
}

fn default_stale_while_revalidate_secs() -> u64 {
    60
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            .set_default("host", default_host())?
            .set_default("port", default_port())?
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // SKYRELAY_UPSTREAM__TIMEOUT_SECS -> upstream.timeout_secs
            .add_source(
                Environment::with_prefix("SKYRELAY")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        let mut config: AppConfig = config.try_deserialize()?;
        let legacy_key = std::env::var(LEGACY_API_KEY_VAR).ok();
        config.weather_api_key = resolve_api_key(config.weather_api_key.take(), legacy_key);

        Ok(config)
    }

    /// Cache policy for successful weather responses
    pub fn cache_policy(&self) -> CachePolicy {
        self.cache.policy()
    }
}

/// Prefer the namespaced key, fall back to the legacy variable. Blank values count as unset.
fn resolve_api_key(primary: Option<String>, legacy: Option<String>) -> Option<String> {
    primary
        .filter(|key| !key.trim().is_empty())
        .or_else(|| legacy.filter(|key| !key.trim().is_empty()))
        .map(|key| key.trim().to_string())
}
