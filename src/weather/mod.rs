//! Weather lookup against the open-meteo APIs.
//!
//! Two endpoints: geocoding-by-name and current-conditions-by-coordinate.
//! Every failure path — network, timeout, bad status, malformed JSON —
//! collapses into the static offline reading; `fetch` never fails.

use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::config::WeatherConfig;
use crate::constants::{DEFAULT_LATITUDE, DEFAULT_LOCATION, DEFAULT_LONGITUDE};
use crate::models::Weather;

/// Async weather client with a fixed per-request timeout.
///
/// Cheap to clone (reqwest's `Client` is an `Arc` internally), so the
/// event loop can hand a clone to the background fetch task.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
    timeout: Duration,
    /// When set, skip the network entirely and report the offline reading.
    offline: bool,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentConditions>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    weather_code: i64,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig, offline: bool) -> Self {
        Self {
            http: Client::new(),
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            offline,
        }
    }

    /// Fetch current conditions for `city` (or the default location).
    /// Never fails: any error anywhere resolves to the offline fallback.
    pub async fn fetch(&self, city: Option<&str>) -> Weather {
        if self.offline {
            return Weather::offline_fallback();
        }
        match self.fetch_live(city).await {
            Ok(weather) => weather,
            Err(_) => Weather::offline_fallback(),
        }
    }

    async fn fetch_live(&self, city: Option<&str>) -> Result<Weather> {
        // Default coordinates; a successful geocode replaces them, any
        // geocoding failure (network, no results) keeps them.
        let mut coords = (DEFAULT_LATITUDE, DEFAULT_LONGITUDE);
        if let Some(city) = city {
            if let Some(found) = self.geocode(city).await {
                coords = found;
            }
        }

        let current = self.current_conditions(coords).await?;
        Ok(Weather {
            location: city.unwrap_or(DEFAULT_LOCATION).to_string(),
            temperature: current.temperature_2m,
            description: describe_code(current.weather_code).to_string(),
        })
    }

    /// Resolve a city name to coordinates via the first search result.
    async fn geocode(&self, city: &str) -> Option<(f64, f64)> {
        let response = self
            .http
            .get(&self.geocoding_url)
            .query(&[("name", city), ("count", "1")])
            .timeout(self.timeout)
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?
            .json::<GeocodeResponse>()
            .await
            .ok()?;

        let first = response.results?.into_iter().next()?;
        Some((first.latitude, first.longitude))
    }

    async fn current_conditions(&self, (lat, lon): (f64, f64)) -> Result<CurrentConditions> {
        let response = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current", "temperature_2m,weather_code".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json::<ForecastResponse>()
            .await?;

        response
            .current
            .ok_or_else(|| anyhow!("forecast response missing current conditions"))
    }
}

/// Map an open-meteo weather code to a human-readable description.
pub fn describe_code(code: i64) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Rain",
        65 => "Heavy rain",
        80 => "Rain showers",
        95 => "Thunderstorm",
        _ => "Weather",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> WeatherConfig {
        WeatherConfig::default()
    }

    /// Endpoints nothing listens on; requests fail fast with a refusal.
    fn unreachable_config() -> WeatherConfig {
        WeatherConfig {
            geocoding_url: "http://127.0.0.1:9/v1/search".to_string(),
            forecast_url: "http://127.0.0.1:9/v1/forecast".to_string(),
            timeout_secs: 1,
        }
    }

    // ── Code descriptions ─────────────────────────────────────────

    #[test]
    fn describe_code_known_values() {
        assert_eq!(describe_code(0), "Clear");
        assert_eq!(describe_code(1), "Mainly clear");
        assert_eq!(describe_code(2), "Partly cloudy");
        assert_eq!(describe_code(3), "Overcast");
        assert_eq!(describe_code(45), "Fog");
        assert_eq!(describe_code(48), "Depositing rime fog");
        assert_eq!(describe_code(51), "Light drizzle");
        assert_eq!(describe_code(53), "Drizzle");
        assert_eq!(describe_code(55), "Dense drizzle");
        assert_eq!(describe_code(61), "Slight rain");
        assert_eq!(describe_code(63), "Rain");
        assert_eq!(describe_code(65), "Heavy rain");
        assert_eq!(describe_code(80), "Rain showers");
        assert_eq!(describe_code(95), "Thunderstorm");
    }

    #[test]
    fn describe_code_unknown_is_generic() {
        assert_eq!(describe_code(42), "Weather");
        assert_eq!(describe_code(-1), "Weather");
        assert_eq!(describe_code(9999), "Weather");
    }

    // ── Fallback paths ────────────────────────────────────────────

    #[tokio::test]
    async fn forced_offline_returns_fallback() {
        let client = WeatherClient::new(&test_config(), true);
        let w = client.fetch(Some("Paris")).await;
        assert_eq!(w, Weather::offline_fallback());
    }

    #[tokio::test]
    async fn unreachable_endpoints_return_fallback() {
        let client = WeatherClient::new(&unreachable_config(), false);
        let w = client.fetch(None).await;
        assert_eq!(w.location, "Moradabad (offline)");
        assert_eq!(w.temperature, 26.0);
        assert_eq!(w.description, "Clear");
    }

    #[tokio::test]
    async fn unreachable_geocoding_still_falls_back_cleanly() {
        // Geocoding failure keeps the default coordinates; the conditions
        // fetch then fails too, landing in the offline reading — but the
        // call itself must not error even for a city nobody can resolve.
        let client = WeatherClient::new(&unreachable_config(), false);
        let w = client.fetch(Some("Nonexistent City XYZ")).await;
        assert!(!w.description.is_empty());
        assert!(w.temperature.is_finite());
    }

    // ── Response parsing ──────────────────────────────────────────

    #[test]
    fn forecast_response_parses() {
        let body = r#"{
            "latitude": 28.8389,
            "longitude": 78.7768,
            "current": { "time": "2024-05-01T12:00", "temperature_2m": 31.4, "weather_code": 2 }
        }"#;
        let parsed: ForecastResponse = serde_json::from_str(body).unwrap();
        let current = parsed.current.unwrap();
        assert_eq!(current.temperature_2m, 31.4);
        assert_eq!(current.weather_code, 2);
    }

    #[test]
    fn geocode_response_takes_first_result() {
        let body = r#"{
            "results": [
                { "name": "Paris", "latitude": 48.85, "longitude": 2.35 },
                { "name": "Paris, TX", "latitude": 33.66, "longitude": -95.55 }
            ]
        }"#;
        let parsed: GeocodeResponse = serde_json::from_str(body).unwrap();
        let first = parsed.results.unwrap().into_iter().next().unwrap();
        assert_eq!(first.latitude, 48.85);
        assert_eq!(first.longitude, 2.35);
    }

    #[test]
    fn geocode_response_without_results_is_none() {
        let parsed: GeocodeResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_none());
    }
}
