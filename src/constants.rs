//! Application-wide constants.
//!
//! Centralizes all magic numbers, endpoint defaults, and filesystem paths
//! so the rest of the codebase stays free of scattered literals.

use std::path::PathBuf;

// ── Timing ────────────────────────────────────────────────────────
/// Minimum allowed refresh rate (ms) to prevent excessive CPU usage.
pub const MIN_REFRESH_MS: u64 = 100;
/// Default dashboard refresh interval (ms).
pub const DEFAULT_REFRESH_MS: u64 = 1000;
/// Event poll timeout (ms) -- how often the UI checks for input.
pub const EVENT_POLL_MS: u64 = 50;
/// Status message display duration (seconds).
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 5;
/// Initial system data settling delay (ms) before the first CPU reading.
pub const INITIAL_SETTLE_MS: u64 = 250;

// ── Weather ───────────────────────────────────────────────────────
/// Geocoding-by-name endpoint (open-meteo search API).
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
/// Current-conditions endpoint (open-meteo forecast API).
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
/// HTTP timeout for weather requests (seconds).
pub const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 8;
/// Fallback coordinates when no city is given or geocoding fails.
pub const DEFAULT_LATITUDE: f64 = 28.8389;
pub const DEFAULT_LONGITUDE: f64 = 78.7768;
/// Name of the fallback location.
pub const DEFAULT_LOCATION: &str = "Moradabad";
/// Temperature reported by the static offline reading (°C).
pub const OFFLINE_TEMPERATURE_C: f64 = 26.0;
/// Description reported by the static offline reading.
pub const OFFLINE_DESCRIPTION: &str = "Clear";

// ── Dashboard Stats ───────────────────────────────────────────────
/// Shown for cpu/mem/disk when the metrics source is unavailable.
pub const METRICS_PLACEHOLDER: &str = "metrics unavailable";
/// 1 GiB in bytes, for free-disk formatting.
pub const ONE_GIB: u64 = 1024 * 1024 * 1024;

// ── UI Layout ─────────────────────────────────────────────────────
/// Dock height in terminal rows.
pub const DOCK_HEIGHT: u16 = 3;
/// Input line height in terminal rows (bordered single-line input).
pub const INPUT_HEIGHT: u16 = 3;
/// Maximum input length (characters) accepted into the text buffer.
pub const MAX_INPUT_LEN: usize = 512;

// ── Spinner Animation ─────────────────────────────────────────────
/// Spinner character sequence for loading indicators.
pub const SPINNER_CHARS: &[&str] = &["◐", "◓", "◑", "◒"];

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.holographic/`.
pub fn app_dir() -> PathBuf {
    home_dir().join(".holographic")
}

/// Returns `~/.holographic/data/`.
pub fn data_dir() -> PathBuf {
    app_dir().join("data")
}

/// Returns `~/.holographic/data/notes.txt`.
pub fn notes_file_path() -> PathBuf {
    data_dir().join("notes.txt")
}

/// Returns `~/.holographic/config.toml`.
pub fn config_file_path() -> PathBuf {
    app_dir().join("config.toml")
}
