//! Configuration management for Windy Pinwheel
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::PinwheelError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PinwheelConfig {
    /// Wind data sources
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Reverse geocoding
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Pinwheel animation
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Open-Meteo endpoints and request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast endpoint (current and near-future data)
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Archive endpoint (historical data)
    #[serde(default = "default_archive_url")]
    pub archive_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// How many days ahead the forecast source is expected to cover
    #[serde(default = "default_forecast_horizon")]
    pub forecast_horizon_days: u32,
}

/// Nominatim reverse geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Reverse geocoding endpoint
    #[serde(default = "default_geocoding_url")]
    pub base_url: String,
    /// User agent sent with every request (required by Nominatim)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_seconds: u32,
}

/// Pinwheel animation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Display refresh rate used by the interval frame source
    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: u32,
    /// Degrees of rotation per frame for each km/h of wind
    #[serde(default = "default_rotation_factor")]
    pub rotation_factor: f64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_archive_url() -> String {
    "https://archive-api.open-meteo.com/v1/archive".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_forecast_horizon() -> u32 {
    16
}

fn default_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}

fn default_user_agent() -> String {
    format!("WindyPinwheel/{}", env!("CARGO_PKG_VERSION"))
}

fn default_geocoding_timeout() -> u32 {
    10
}

fn default_frames_per_second() -> u32 {
    60
}

fn default_rotation_factor() -> f64 {
    crate::animation::ROTATION_FACTOR
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            archive_url: default_archive_url(),
            timeout_seconds: default_weather_timeout(),
            forecast_horizon_days: default_forecast_horizon(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_geocoding_timeout(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames_per_second: default_frames_per_second(),
            rotation_factor: default_rotation_factor(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl PinwheelConfig {
    /// Load configuration from `config_path`, or the default location when `None`,
    /// then apply `WINDY_` environment overrides
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WINDY_WEATHER__TIMEOUT_SECONDS=5 overrides weather.timeout_seconds
        builder = builder.add_source(
            Environment::with_prefix("WINDY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PinwheelConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("windy-pinwheel").join("config.toml"))
    }

    /// Apply default values to empty or zeroed fields
    pub fn apply_defaults(&mut self) {
        if self.weather.forecast_url.is_empty() {
            self.weather.forecast_url = default_forecast_url();
        }
        if self.weather.archive_url.is_empty() {
            self.weather.archive_url = default_archive_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_url();
        }
        if self.geocoding.user_agent.is_empty() {
            self.geocoding.user_agent = default_user_agent();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_geocoding_timeout();
        }
        if self.animation.frames_per_second == 0 {
            self.animation.frames_per_second = default_frames_per_second();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                PinwheelError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.geocoding.timeout_seconds > 300 {
            return Err(
                PinwheelError::config("Geocoding timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.weather.forecast_horizon_days > 366 {
            return Err(PinwheelError::config("Forecast horizon cannot exceed 366 days").into());
        }

        if self.animation.frames_per_second > 240 {
            return Err(
                PinwheelError::config("Animation cannot exceed 240 frames per second").into(),
            );
        }

        if !self.animation.rotation_factor.is_finite() || self.animation.rotation_factor < 0.0 {
            return Err(PinwheelError::config(
                "Rotation factor must be a finite, non-negative number",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PinwheelError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PinwheelError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Forecast", &self.weather.forecast_url),
            ("Archive", &self.weather.archive_url),
            ("Geocoding", &self.geocoding.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(PinwheelError::config(format!(
                    "{name} URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
