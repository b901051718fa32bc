//! Wind Result Composition
//!
//! The pipeline's public entry point: choose a source, fetch, extract, name
//! the place, and fold everything into one `WindResult`.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::PinwheelError;
use crate::config::PinwheelConfig;
use crate::location_resolver::{NominatimResolver, PlaceLookup};
use crate::models::{PlaceName, Query, SourceDecision, WindResult};
use crate::weather::selector::beyond_forecast_horizon;
use crate::weather::{OpenMeteoClient, WindSource, decide, extract};

/// Composes wind readings from a wind source and a place lookup
#[derive(Clone)]
pub struct WindResolver {
    wind: Arc<dyn WindSource>,
    places: Arc<dyn PlaceLookup>,
    forecast_horizon_days: u32,
}

impl WindResolver {
    pub fn new(
        wind: Arc<dyn WindSource>,
        places: Arc<dyn PlaceLookup>,
        forecast_horizon_days: u32,
    ) -> Self {
        Self {
            wind,
            places,
            forecast_horizon_days,
        }
    }

    /// Open-Meteo plus Nominatim, as configured
    pub fn from_config(config: &PinwheelConfig) -> Result<Self, PinwheelError> {
        let wind = OpenMeteoClient::new(&config.weather)?;
        let places = NominatimResolver::new(&config.geocoding)?;
        Ok(Self::new(
            Arc::new(wind),
            Arc::new(places),
            config.weather.forecast_horizon_days,
        ))
    }

    /// Resolve `query` relative to the local calendar day.
    pub async fn resolve_wind(&self, query: &Query) -> WindResult {
        self.resolve_wind_on(query, Local::now().date_naive()).await
    }

    /// Resolve `query` with an explicit reference day.
    ///
    /// Only a failed wind fetch marks the result as failed. Missing data
    /// points read as calm air and a failed place lookup only affects the name.
    #[instrument(skip(self, query), fields(lat = query.latitude, lon = query.longitude, date = %query.date))]
    pub async fn resolve_wind_on(&self, query: &Query, today: NaiveDate) -> WindResult {
        let decision = decide(today, query.date);
        debug!("Selected {} source", decision);

        let sample = if decision == SourceDecision::Forecast
            && beyond_forecast_horizon(today, query.date, self.forecast_horizon_days)
        {
            info!(
                "{} is beyond the {}-day forecast horizon, no reading available",
                query.date, self.forecast_horizon_days
            );
            None
        } else {
            match self.wind.fetch(decision, query).await {
                Ok(raw) => extract(decision, &raw),
                Err(e) => {
                    warn!("Failed to fetch wind data: {}", e);
                    return WindResult::failed();
                }
            }
        };

        if sample.is_none() {
            debug!("No wind sample in {} response, reading as calm", decision);
        }

        let place = self.places.resolve(query.latitude, query.longitude).await;
        let result = WindResult::resolved(sample, PlaceName::label_or_unknown(place));

        info!(
            "Wind at {}: {} from {}°",
            result.location_name,
            result.format_speed(),
            result.direction_deg
        );
        result
    }
}
