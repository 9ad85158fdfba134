//! Region filtering for geo-tagged records.
//!
//! Resolves a GeoJSON polygon payload to a single outer ring and tests
//! recorded coordinates against it with the even-odd ray casting rule.
//! Points lying exactly on the ring boundary have no guaranteed
//! classification.

mod error;
mod filter;
mod geometry;

pub use error::RegionError;
pub use filter::{
    parse_coordinates, point_in_region, records_in_region, species_in_region, Located,
};
pub use geometry::{FeatureBody, PolygonBody, PolygonGeometry, Position, Region, RegionGeometry};
