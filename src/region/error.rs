//! Error types for region filtering.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    /// Payload is not a Polygon, Feature or FeatureCollection, or its
    /// outer ring is unusable.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A record's coordinate string is not two numeric fields.
    #[error("Malformed coordinate {0:?}")]
    MalformedCoordinate(String),
}

impl From<serde_json::Error> for RegionError {
    fn from(err: serde_json::Error) -> Self {
        RegionError::InvalidGeometry(err.to_string())
    }
}
