//! Configuration loader for the `nepal-airwatch` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
//!
use std::env;

use anyhow::{anyhow, Result};

/// Parse an optional numeric environment variable with a default value.
macro_rules! parse_env_num {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Default provider endpoint root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Provider API key, sent as `appid`.
    pub api_key: String,

    /// Provider base URL, without trailing endpoint.
    pub api_base_url: String,

    /// Port the HTTP server binds on 0.0.0.0.
    pub port: u16,

    /// Number of forecast timesteps requested per refresh.
    pub forecast_count: u32,

    /// Timeout for each provider request, in seconds.
    pub http_timeout_secs: u64,

    /// How long a rankings snapshot is served before refetching, in seconds.
    pub rankings_ttl_secs: u64,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `OPENWEATHER_API_KEY` – provider API key
///
/// Optional:
/// - `OPENWEATHER_BASE_URL` – provider base URL (default: OpenWeather 2.5)
/// - `PORT` – listen port (default: 5000)
/// - `FORECAST_COUNT` – forecast timesteps (default: 24)
/// - `HTTP_TIMEOUT_SECS` – provider request timeout (default: 10)
/// - `RANKINGS_TTL_SECS` – rankings cache lifetime (default: 600)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let api_key = require_env!("OPENWEATHER_API_KEY");
    let api_base_url =
        env::var("OPENWEATHER_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
    let port = parse_env_num!("PORT", u16, 5000);
    let forecast_count = parse_env_num!("FORECAST_COUNT", u32, 24);
    let http_timeout_secs = parse_env_num!("HTTP_TIMEOUT_SECS", u64, 10);
    let rankings_ttl_secs = parse_env_num!("RANKINGS_TTL_SECS", u64, 600);

    if api_key.trim().is_empty() {
        return Err(anyhow!("OPENWEATHER_API_KEY must not be empty"));
    }

    Ok(Config {
        api_key,
        api_base_url,
        port,
        forecast_count,
        http_timeout_secs,
        rankings_ttl_secs,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the API key while showing all other configuration values.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  OPENWEATHER_API_KEY  : {}", mask_secret(&self.api_key));
        tracing::info!("  OPENWEATHER_BASE_URL : {}", self.api_base_url);
        tracing::info!("  PORT                 : {}", self.port);
        tracing::info!("  FORECAST_COUNT       : {}", self.forecast_count);
        tracing::info!("  HTTP_TIMEOUT_SECS    : {}", self.http_timeout_secs);
        tracing::info!("  RANKINGS_TTL_SECS    : {}", self.rankings_ttl_secs);
    }
}

/// Keep the last four characters of a secret, star out the rest.
fn mask_secret(secret: &str) -> String {
    // ---
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
