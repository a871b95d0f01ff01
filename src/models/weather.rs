use crate::constants::{DEFAULT_LOCATION, OFFLINE_DESCRIPTION, OFFLINE_TEMPERATURE_C};

/// A single weather reading.
/// Constructed fresh per fetch, never mutated, discarded after render.
#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    pub location: String,
    /// Current temperature in °C.
    pub temperature: f64,
    pub description: String,
}

impl Weather {
    /// The static offline reading returned when live lookup fails
    /// (network error, malformed response, timeout, forced offline).
    pub fn offline_fallback() -> Self {
        Self {
            location: format!("{} (offline)", DEFAULT_LOCATION),
            temperature: OFFLINE_TEMPERATURE_C,
            description: OFFLINE_DESCRIPTION.to_string(),
        }
    }
}
