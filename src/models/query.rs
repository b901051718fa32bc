//! Query model: where and when a wind reading is wanted

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::PinwheelError;

/// Latitude of the default location (London)
pub const DEFAULT_LATITUDE: f64 = 51.505;
/// Longitude of the default location (London)
pub const DEFAULT_LONGITUDE: f64 = -0.09;

/// A single wind reading request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Calendar day the reading is for
    pub date: NaiveDate,
}

impl Query {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, date: NaiveDate) -> Self {
        Self {
            latitude,
            longitude,
            date,
        }
    }

    /// London on the given day
    #[must_use]
    pub fn default_for(today: NaiveDate) -> Self {
        Self::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE, today)
    }

    #[must_use]
    pub fn with_location(self, latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..self
        }
    }

    #[must_use]
    pub fn with_date(self, date: NaiveDate) -> Self {
        Self { date, ..self }
    }

    /// Move the date by whole years, keeping month and day.
    ///
    /// Feb 29 lands on Feb 28 in non-leap years. A shift that leaves the
    /// representable calendar range leaves the query unchanged.
    #[must_use]
    pub fn shift_years(self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs().saturating_mul(12));
        let shifted = if delta >= 0 {
            self.date.checked_add_months(months)
        } else {
            self.date.checked_sub_months(months)
        };
        shifted.map_or(self, |date| self.with_date(date))
    }

    /// Whether the requested day lies after `today`
    #[must_use]
    pub fn is_future(&self, today: NaiveDate) -> bool {
        self.date > today
    }

    /// Date in the `YYYY-MM-DD` form the upstream APIs expect
    #[must_use]
    pub fn date_param(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Reject coordinates outside the valid ranges
    pub fn validate(&self) -> Result<(), PinwheelError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(PinwheelError::validation(format!(
                "Latitude must be between -90 and 90, got: {}",
                self.latitude
            )));
        }

        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(PinwheelError::validation(format!(
                "Longitude must be between -180 and 180, got: {}",
                self.longitude
            )));
        }

        Ok(())
    }
}
