//! Wind models: source decisions, samples and composed results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location name reported when the wind fetch failed
pub const ERROR_LOCATION: &str = "Error";
/// Location name shown before the first reading arrives
pub const LOADING_LOCATION: &str = "Loading...";

/// Which upstream source class serves a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceDecision {
    /// Historical archive, hourly arrays only
    Archive,
    /// Current and near-future forecast, may carry a `current` block
    Forecast,
}

impl fmt::Display for SourceDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDecision::Archive => write!(f, "archive"),
            SourceDecision::Forecast => write!(f, "forecast"),
        }
    }
}

/// Unmodified upstream JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample(pub serde_json::Value);

/// A single normalized wind reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSample {
    /// Wind speed in km/h, never negative
    pub speed_kmh: f64,
    /// Direction the wind blows from, degrees in `[0, 360)`
    pub direction_deg: u16,
}

/// The composed reading handed to the display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindResult {
    pub speed_kmh: f64,
    pub direction_deg: u16,
    pub location_name: String,
    pub failed: bool,
}

impl WindResult {
    /// Result for a wind fetch that could not complete
    #[must_use]
    pub fn failed() -> Self {
        Self {
            speed_kmh: 0.0,
            direction_deg: 0,
            location_name: ERROR_LOCATION.to_string(),
            failed: true,
        }
    }

    /// Placeholder shown until the first resolution lands
    #[must_use]
    pub fn loading() -> Self {
        Self {
            speed_kmh: 0.0,
            direction_deg: 0,
            location_name: LOADING_LOCATION.to_string(),
            failed: false,
        }
    }

    /// Successful result; an absent sample reads as calm air.
    #[must_use]
    pub fn resolved(sample: Option<WindSample>, location_name: String) -> Self {
        let sample = sample.unwrap_or(WindSample {
            speed_kmh: 0.0,
            direction_deg: 0,
        });
        Self {
            speed_kmh: sample.speed_kmh,
            direction_deg: sample.direction_deg,
            location_name,
            failed: false,
        }
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_speed(&self) -> String {
        format!("{:.1} km/h", self.speed_kmh)
    }

    /// Format wind direction in degrees
    #[must_use]
    pub fn format_direction(&self) -> String {
        format!("Direction: {}°", self.direction_deg)
    }

    #[must_use]
    pub fn cardinal(&self) -> &'static str {
        wind_direction_to_cardinal(self.direction_deg)
    }
}

/// Convert wind direction from degrees to a 16-point compass name
#[must_use]
pub fn wind_direction_to_cardinal(degrees: u16) -> &'static str {
    match degrees {
        0..=11 | 349..=360 => "N",
        12..=33 => "NNE",
        34..=56 => "NE",
        57..=78 => "ENE",
        79..=101 => "E",
        102..=123 => "ESE",
        124..=146 => "SE",
        147..=168 => "SSE",
        169..=191 => "S",
        192..=213 => "SSW",
        214..=236 => "SW",
        237..=258 => "WSW",
        259..=281 => "W",
        282..=303 => "WNW",
        304..=326 => "NW",
        327..=348 => "NNW",
        _ => "Unknown",
    }
}
