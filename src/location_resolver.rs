//! Location Resolution Module
//!
//! Turns a coordinate pair into a display name via Nominatim reverse
//! geocoding. Every fault on this path is swallowed here: callers only ever
//! see a name or nothing.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::PinwheelError;
use crate::config::GeocodingConfig;
use crate::models::PlaceName;

/// Anything that can name a coordinate pair.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    /// Best-effort display name; `None` when nothing usable came back.
    async fn resolve(&self, latitude: f64, longitude: f64) -> Option<PlaceName>;
}

#[derive(Debug, Default, Deserialize)]
pub struct NominatimResponse {
    pub address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NominatimAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub hamlet: Option<String>,
    pub state_district: Option<String>,
    pub country: Option<String>,
}

impl NominatimAddress {
    /// Most specific populated locality, city first
    fn locality(&self) -> Option<&str> {
        [
            &self.city,
            &self.town,
            &self.village,
            &self.hamlet,
            &self.state_district,
        ]
        .into_iter()
        .find_map(|field| non_empty(field))
    }

    /// `"<locality>, <country>"`, the bare locality or country, or nothing
    #[must_use]
    pub fn label(&self) -> Option<String> {
        let country = non_empty(&self.country);
        match (self.locality(), country) {
            (Some(locality), Some(country)) => Some(format!("{locality}, {country}")),
            (Some(locality), None) => Some(locality.to_string()),
            (None, Some(country)) => Some(country.to_string()),
            (None, None) => None,
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Reverse geocoder backed by Nominatim (OpenStreetMap)
#[derive(Debug, Clone)]
pub struct NominatimResolver {
    client: Client,
    base_url: String,
}

impl NominatimResolver {
    pub fn new(config: &GeocodingConfig) -> Result<Self, PinwheelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PinwheelError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    async fn lookup(&self, latitude: f64, longitude: f64) -> Result<NominatimResponse, PinwheelError> {
        let params = [
            ("format", "json".to_string()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
        ];

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<NominatimResponse>().await?)
    }
}

#[async_trait]
impl PlaceLookup for NominatimResolver {
    #[instrument(skip(self))]
    async fn resolve(&self, latitude: f64, longitude: f64) -> Option<PlaceName> {
        match self.lookup(latitude, longitude).await {
            Ok(response) => {
                let label = response.address.as_ref().and_then(NominatimAddress::label);
                debug!("Reverse geocoded to {:?}", label);
                label.map(PlaceName::new)
            }
            Err(e) => {
                warn!("Reverse geocoding failed: {}", e);
                None
            }
        }
    }
}
