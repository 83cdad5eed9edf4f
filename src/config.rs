//! Configuration loader for the Skycast weather backend.
//!
//! Centralizes all runtime configuration values and their defaults, loading
//! from environment variables (with optional `.env` file support provided by
//! the caller). Consolidating the `env::var` calls here keeps the rest of
//! the codebase free of configuration lookups.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u16 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u16>())
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

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent
/// configuration snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// API key for the upstream weather provider.
    pub api_key: String,

    /// Base URL of the provider's current-weather endpoint.
    pub api_url: String,

    /// Path of the persisted search-history document.
    pub history_path: PathBuf,

    /// TCP port the HTTP server binds to.
    pub port: u16,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `WEATHER_API_KEY` – upstream provider API key
///
/// Optional:
/// - `WEATHER_API_URL` – provider endpoint (default: OpenWeather current weather)
/// - `HISTORY_PATH` – history document path (default: `data/history.json`)
/// - `PORT` – HTTP port (default: 3000)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let api_key = require_env!("WEATHER_API_KEY");
    let api_url = env::var("WEATHER_API_URL")
        .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5/weather".to_string());
    let history_path = env::var("HISTORY_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/history.json"));
    let port = parse_env_u16!("PORT", 3000);

    Ok(Config {
        api_key,
        api_url,
        history_path,
        port,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the API key while showing all other values that were loaded.
    pub fn log_config(&self) {
        // ---
        let masked_key = if self.api_key.len() > 4 {
            format!("{}****", &self.api_key[..4])
        } else {
            "****".to_string()
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  WEATHER_API_KEY : {}", masked_key);
        tracing::info!("  WEATHER_API_URL : {}", self.api_url);
        tracing::info!("  HISTORY_PATH    : {}", self.history_path.display());
        tracing::info!("  PORT            : {}", self.port);
    }
}
