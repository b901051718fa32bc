//! Place names derived from reverse geocoding

use serde::{Deserialize, Serialize};

/// Location name used when no usable address came back
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Human-readable name for a coordinate pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceName {
    pub label: String,
}

impl PlaceName {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Label of a resolved name, or the unknown-location sentinel
    #[must_use]
    pub fn label_or_unknown(name: Option<PlaceName>) -> String {
        name.map_or_else(|| UNKNOWN_LOCATION.to_string(), |n| n.label)
    }
}
