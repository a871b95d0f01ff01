use serde::Deserialize;

use crate::constants::*;

/// Application configuration with sensible defaults.
///
/// Can be overridden via ~/.holographic/config.toml
#[derive(Debug, Clone)]
pub struct Config {
    /// City used for weather lookups (None = default location).
    pub city: Option<String>,
    /// Theme name (built-in).
    pub theme: String,
    /// Dashboard refresh interval in milliseconds.
    pub refresh_interval_ms: u64,
    /// Weather client configuration.
    pub weather: WeatherConfig,
}

/// Weather client settings. The endpoint URLs are configurable so tests
/// (and self-hosted mirrors) can point the client elsewhere.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Geocoding-by-name endpoint.
    pub geocoding_url: String,
    /// Current-conditions endpoint.
    pub forecast_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            timeout_secs: DEFAULT_WEATHER_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            city: None,
            theme: "default".to_string(),
            refresh_interval_ms: DEFAULT_REFRESH_MS,
            weather: WeatherConfig::default(),
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional — missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    city: Option<String>,
    theme: Option<String>,
    refresh_interval_ms: Option<u64>,
    weather: Option<FileWeatherConfig>,
}

/// TOML-deserializable weather config section.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileWeatherConfig {
    geocoding_url: Option<String>,
    forecast_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from ~/.holographic/config.toml, falling back to
    /// defaults for any missing fields. If the file doesn't exist,
    /// returns pure defaults.
    pub fn load() -> Self {
        let config_path = crate::constants::config_file_path();
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Config::default(), // No config file — use defaults
        };
        Self::from_toml_str(&content).unwrap_or_else(|e| {
            eprintln!(
                "Warning: Failed to parse {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            Config::default()
        })
    }

    /// Parse a TOML document and merge it over the defaults.
    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file_config: FileConfig = toml::from_str(content)?;
        let mut config = Config::default();

        if let Some(v) = file_config.city {
            if !v.is_empty() {
                config.city = Some(v);
            }
        }
        if let Some(v) = file_config.theme {
            if !v.is_empty() {
                config.theme = v;
            }
        }
        if let Some(v) = file_config.refresh_interval_ms {
            config.refresh_interval_ms = v.max(MIN_REFRESH_MS);
        }

        if let Some(w) = file_config.weather {
            if let Some(v) = w.geocoding_url {
                if !v.is_empty() {
                    config.weather.geocoding_url = v;
                }
            }
            if let Some(v) = w.forecast_url {
                if !v.is_empty() {
                    config.weather.forecast_url = v;
                }
            }
            if let Some(v) = w.timeout_secs {
                config.weather.timeout_secs = v.max(1);
            }
        }

        Ok(config)
    }
}
