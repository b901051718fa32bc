//! Open-Meteo HTTP client for the forecast and archive services

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::PinwheelError;
use crate::config::WeatherConfig;
use crate::models::{Query, RawSample, SourceDecision};
use super::extract::{DIRECTION_FIELD, SPEED_FIELD};

/// Anything that can hand back the raw wind body for a query.
#[async_trait]
pub trait WindSource: Send + Sync {
    /// Fetch the single-day response for `query` from the source `decision` names.
    ///
    /// Unreachable upstreams, non-success statuses and non-JSON bodies are
    /// all errors; an empty or partial body is not.
    async fn fetch(
        &self,
        decision: SourceDecision,
        query: &Query,
    ) -> Result<RawSample, PinwheelError>;
}

/// Client for both Open-Meteo wind sources
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    forecast_url: String,
    archive_url: String,
}

impl OpenMeteoClient {
    /// Create a new client from the weather settings
    pub fn new(config: &WeatherConfig) -> Result<Self, PinwheelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("WindyPinwheel/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PinwheelError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            forecast_url: config.forecast_url.clone(),
            archive_url: config.archive_url.clone(),
        })
    }

    fn endpoint(&self, decision: SourceDecision) -> &str {
        match decision {
            SourceDecision::Forecast => &self.forecast_url,
            SourceDecision::Archive => &self.archive_url,
        }
    }
}

/// Query parameters for a single-day request against either source
#[must_use]
pub fn request_params(decision: SourceDecision, query: &Query) -> Vec<(&'static str, String)> {
    let day = query.date_param();
    let fields = format!("{SPEED_FIELD},{DIRECTION_FIELD}");

    let mut params = vec![
        ("latitude", query.latitude.to_string()),
        ("longitude", query.longitude.to_string()),
        ("start_date", day.clone()),
        ("end_date", day),
        ("hourly", fields.clone()),
    ];
    if decision == SourceDecision::Forecast {
        params.push(("current", fields));
    }
    params
}

#[async_trait]
impl WindSource for OpenMeteoClient {
    #[instrument(skip(self, query), fields(lat = query.latitude, lon = query.longitude, date = %query.date))]
    async fn fetch(
        &self,
        decision: SourceDecision,
        query: &Query,
    ) -> Result<RawSample, PinwheelError> {
        let url = self.endpoint(decision);
        let params = request_params(decision, query);
        debug!("Open-Meteo {} request to {} with {:?}", decision, url, params);

        let start_time = Instant::now();
        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| PinwheelError::network(format!("Open-Meteo request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Open-Meteo {} returned {}: {}", decision, status, body);
            return Err(PinwheelError::api(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error"),
            ));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            PinwheelError::parse(format!("Failed to parse Open-Meteo {decision} response: {e}"))
        })?;

        let elapsed = start_time.elapsed();
        info!(
            "Retrieved {} wind data in {:.3}s",
            decision,
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 5 {
            warn!("Slow Open-Meteo response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(RawSample(body))
    }
}
