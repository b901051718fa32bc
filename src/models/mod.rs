//! Data models for Windy Pinwheel
//!
//! - Query: the location and date a reading is requested for
//! - Wind: source decisions, raw payloads, samples and composed results
//! - Location: display names from reverse geocoding

pub mod location;
pub mod query;
pub mod wind;

pub use location::{PlaceName, UNKNOWN_LOCATION};
pub use query::Query;
pub use wind::{ERROR_LOCATION, LOADING_LOCATION, RawSample, SourceDecision, WindResult, WindSample};
