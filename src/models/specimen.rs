//! Collected specimen records and their recorded coordinates.

use serde::{Deserialize, Serialize};

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// OpenStreetMap link centred on this point
    pub fn osm_url(&self, zoom: u8) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={}&mlon={}&zoom={}",
            self.lat, self.lon, zoom
        )
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// A single collected sample ("campione") as exported by the census.
///
/// Every field except the coordinate string is optional in the source data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specimen {
    /// Raw `"<lat>, <lon>"` string, parsed lazily by the region filter
    #[serde(default)]
    pub locality_coordinates: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,

    /// ISO date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub determiner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habitat: Option<String>,
}

impl Specimen {
    pub fn new(locality_coordinates: &str) -> Self {
        Self {
            locality_coordinates: locality_coordinates.to_string(),
            ..Default::default()
        }
    }
}
