//! Wind data from the Open-Meteo forecast and archive services
//!
//! - `selector`: which source serves a given date
//! - `open_meteo`: the HTTP client for both sources
//! - `extract`: pulling one representative sample out of either schema

pub mod extract;
pub mod open_meteo;
pub mod selector;

pub use extract::extract;
pub use open_meteo::{OpenMeteoClient, WindSource};
pub use selector::decide;
