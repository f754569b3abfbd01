//! Configuration management for the NimbusVita advisory server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with NIMBUS__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::StalenessPolicy;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Reading cache configuration
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// OpenWeather API base URL
    pub api_endpoint: String,

    /// OpenWeather API key. Without one every reading is simulated.
    pub api_key: Option<String>,

    /// City used when a request names no location
    pub default_city: String,

    /// ISO country code appended to bare city names
    pub default_country: String,

    /// Timeout for each upstream request
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// How long a live reading is served from the cache
    pub validity_minutes: i64,
}

impl CacheConfig {
    pub fn staleness_policy(&self) -> StalenessPolicy {
        StalenessPolicy::from_minutes(self.validity_minutes)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("NIMBUS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.default_city", "Recife")?
            .set_default("weather.default_country", "BR")?
            .set_default("weather.request_timeout_secs", 10)?
            .set_default("cache.validity_minutes", 60)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (NIMBUS__ prefix)
            .add_source(
                Environment::with_prefix("NIMBUS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Configured API key, ignoring blank values
    pub fn weather_api_key(&self) -> Option<&str> {
        self.weather
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
impl Config {
    /// Offline configuration for unit tests
    pub(crate) fn for_tests(api_key: Option<&str>) -> Self {
        Config {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            weather: WeatherConfig {
                api_endpoint: "http://localhost:9".to_string(),
                api_key: api_key.map(str::to_string),
                default_city: "Recife".to_string(),
                default_country: "BR".to_string(),
                request_timeout_secs: 1,
            },
            cache: CacheConfig {
                validity_minutes: 60,
            },
        }
    }
}
