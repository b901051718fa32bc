//! Sample extraction from Open-Meteo response bodies
//!
//! Forecast bodies carry a `current` block and usually the hourly arrays for
//! the requested day. Archive bodies only carry the hourly arrays. Extraction
//! never fails: gaps come back as `None` and the caller decides what a missing
//! reading means.

use serde_json::Value;

use crate::models::{RawSample, SourceDecision, WindSample};

/// Hourly slot used as the day's representative reading (local noon)
pub const NOON_INDEX: usize = 12;

pub(crate) const SPEED_FIELD: &str = "wind_speed_10m";
pub(crate) const DIRECTION_FIELD: &str = "wind_direction_10m";

/// Pull one wind sample out of `raw` using the schema `decision` names.
#[must_use]
pub fn extract(decision: SourceDecision, raw: &RawSample) -> Option<WindSample> {
    let body = &raw.0;
    match decision {
        SourceDecision::Forecast => from_current(body).or_else(|| from_hourly(body)),
        SourceDecision::Archive => from_hourly(body),
    }
}

fn from_current(body: &Value) -> Option<WindSample> {
    let current = body.get("current")?;
    sample_from(current.get(SPEED_FIELD), current.get(DIRECTION_FIELD))
}

fn from_hourly(body: &Value) -> Option<WindSample> {
    let hourly = body.get("hourly")?;
    let speeds = hourly.get(SPEED_FIELD)?.as_array()?;
    let directions = hourly.get(DIRECTION_FIELD)?.as_array()?;

    let speed = speeds.get(NOON_INDEX)?;
    let direction = directions.get(NOON_INDEX)?;
    sample_from(Some(speed), Some(direction))
}

/// Combine the two components; one usable component is enough.
fn sample_from(speed: Option<&Value>, direction: Option<&Value>) -> Option<WindSample> {
    let speed = speed.and_then(parse_speed);
    let direction = direction.and_then(parse_direction);

    if speed.is_none() && direction.is_none() {
        return None;
    }

    Some(WindSample {
        speed_kmh: speed.unwrap_or(0.0),
        direction_deg: direction.unwrap_or(0),
    })
}

fn parse_speed(value: &Value) -> Option<f64> {
    value.as_f64().filter(|speed| speed.is_finite() && *speed >= 0.0)
}

fn parse_direction(value: &Value) -> Option<u16> {
    let degrees = value.as_f64().filter(|d| d.is_finite())?;
    let wrapped = (degrees.round() as i64).rem_euclid(360);
    u16::try_from(wrapped).ok()
}
