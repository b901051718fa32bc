//! Windy Pinwheel - wind readings for any place and date
//!
//! This library resolves a point-in-time wind reading from the Open-Meteo
//! forecast and archive services, names the place via reverse geocoding,
//! and drives a continuously spinning pinwheel from the result.

pub mod animation;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod resolver;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use animation::{AnimationHandle, FrameSource, IntervalFrames, RotationAnimator, RotationState};
pub use config::PinwheelConfig;
pub use error::PinwheelError;
pub use location_resolver::{NominatimResolver, PlaceLookup};
pub use models::{PlaceName, Query, SourceDecision, WindResult, WindSample};
pub use orchestrator::{DisplayState, WindOrchestrator};
pub use resolver::WindResolver;
pub use weather::{OpenMeteoClient, WindSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PinwheelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
