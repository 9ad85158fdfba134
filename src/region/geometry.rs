//! GeoJSON region payloads and their resolution to a single outer ring.

use geo::{BoundingRect, Coord, LineString, Rect};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::RegionError;

/// Fewest vertices a ring may have before ray casting is meaningful
const MIN_RING_VERTICES: usize = 3;

/// GeoJSON position: `[lon, lat]`, optionally followed by an altitude
pub type Position = Vec<f64>;

/// Body of a `"type": "Polygon"` object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonBody {
    /// Outer ring first, holes after it
    pub coordinates: Vec<Vec<Position>>,
}

/// Geometry member of a Feature. Only polygons are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PolygonGeometry {
    Polygon(PolygonBody),
}

/// Body of a `"type": "Feature"` object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureBody {
    pub geometry: PolygonGeometry,
}

impl FeatureBody {
    pub fn resolve(&self) -> Result<Region, RegionError> {
        match &self.geometry {
            PolygonGeometry::Polygon(polygon) => Region::from_polygon(polygon),
        }
    }
}

/// The three payload shapes a region may be given in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RegionGeometry {
    Polygon(PolygonBody),
    Feature(FeatureBody),
    /// Members are kept unparsed: everything after the first is ignored.
    FeatureCollection { features: Vec<Value> },
}

impl RegionGeometry {
    /// Parse a payload from JSON text
    pub fn from_json(json: &str) -> Result<Self, RegionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve the payload to the outer ring it describes
    pub fn resolve(&self) -> Result<Region, RegionError> {
        match self {
            RegionGeometry::Polygon(polygon) => Region::from_polygon(polygon),
            RegionGeometry::Feature(feature) => feature.resolve(),
            RegionGeometry::FeatureCollection { features } => {
                let first = features.first().ok_or_else(|| {
                    RegionError::InvalidGeometry("feature collection has no features".to_string())
                })?;

                if features.len() > 1 {
                    debug!(
                        "Feature collection has {} features, using the first",
                        features.len()
                    );
                }

                match RegionGeometry::deserialize(first)? {
                    RegionGeometry::Feature(feature) => feature.resolve(),
                    _ => Err(RegionError::InvalidGeometry(
                        "first member of a feature collection is not a Feature".to_string(),
                    )),
                }
            }
        }
    }
}

/// A resolved polygon region: one outer ring plus its envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    ring: LineString<f64>,
    envelope: Rect<f64>,
}

impl Region {
    /// Parse and resolve a GeoJSON payload in one step
    pub fn from_geojson_str(json: &str) -> Result<Self, RegionError> {
        RegionGeometry::from_json(json)?.resolve()
    }

    /// Resolve an already-parsed JSON value
    pub fn from_value(value: &Value) -> Result<Self, RegionError> {
        RegionGeometry::deserialize(value)?.resolve()
    }

    /// Build a region from ring vertices (x = lon, y = lat).
    ///
    /// The ring may or may not repeat its first vertex at the end.
    pub fn from_ring(vertices: Vec<Coord<f64>>) -> Result<Self, RegionError> {
        if vertices.len() < MIN_RING_VERTICES {
            return Err(RegionError::InvalidGeometry(format!(
                "ring has {} vertices, at least {} required",
                vertices.len(),
                MIN_RING_VERTICES
            )));
        }

        let ring = LineString::new(vertices);
        let envelope = ring
            .bounding_rect()
            .ok_or_else(|| RegionError::InvalidGeometry("ring has no extent".to_string()))?;

        Ok(Self { ring, envelope })
    }

    fn from_polygon(polygon: &PolygonBody) -> Result<Self, RegionError> {
        let outer = polygon
            .coordinates
            .first()
            .ok_or_else(|| RegionError::InvalidGeometry("polygon has no rings".to_string()))?;

        if polygon.coordinates.len() > 1 {
            debug!(
                "Ignoring {} hole(s) in region polygon",
                polygon.coordinates.len() - 1
            );
        }

        let vertices = outer
            .iter()
            .map(|position| match position.as_slice() {
                [lon, lat, ..] => Ok(Coord { x: *lon, y: *lat }),
                _ => Err(RegionError::InvalidGeometry(format!(
                    "position {:?} needs at least two numbers",
                    position
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_ring(vertices)
    }

    /// Outer ring as given (x = lon, y = lat)
    pub fn ring(&self) -> &LineString<f64> {
        &self.ring
    }

    pub fn vertex_count(&self) -> usize {
        self.ring.0.len()
    }

    /// Bounding box as (min_lon, min_lat, max_lon, max_lat)
    pub fn bbox(&self) -> (f64, f64, f64, f64) {
        let (min, max) = (self.envelope.min(), self.envelope.max());
        (min.x, min.y, max.x, max.y)
    }

    /// Even-odd test of a point against the outer ring.
    ///
    /// Classification of points exactly on the boundary is unspecified.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        if !self.envelope_contains(lat, lon) {
            return false;
        }
        ray_cast(&self.ring.0, lat, lon)
    }

    fn envelope_contains(&self, lat: f64, lon: f64) -> bool {
        let (min, max) = (self.envelope.min(), self.envelope.max());
        lon >= min.x && lon <= max.x && lat >= min.y && lat <= max.y
    }
}

/// Cast a ray from (lat, lon) towards increasing longitude and count
/// crossings of the edges (vertex[i], vertex[i - 1 mod n]).
///
/// Horizontal edges fail the first comparison, so the division never sees
/// a zero denominator.
pub(crate) fn ray_cast(vertices: &[Coord<f64>], lat: f64, lon: f64) -> bool {
    let Some(mut prev) = vertices.last() else {
        return false;
    };

    let mut inside = false;
    for vertex in vertices {
        let crosses = (vertex.y > lat) != (prev.y > lat)
            && lon < vertex.x + (lat - vertex.y) * (prev.x - vertex.x) / (prev.y - vertex.y);
        if crosses {
            inside = !inside;
        }
        prev = vertex;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square() -> Value {
        json!([[[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]])
    }

    #[test]
    fn test_resolve_bare_polygon() {
        let region = Region::from_value(&json!({
            "type": "Polygon",
            "coordinates": square()
        }))
        .unwrap();
        assert_eq!(region.vertex_count(), 4);
        assert_eq!(region.bbox(), (0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_resolve_feature() {
        let region = Region::from_value(&json!({
            "type": "Feature",
            "properties": { "name": "square" },
            "geometry": { "type": "Polygon", "coordinates": square() }
        }))
        .unwrap();
        assert_eq!(region.vertex_count(), 4);
    }

    #[test]
    fn test_feature_collection_ignores_trailing_members() {
        // Second member is not even valid geometry; it must never be looked at
        let region = Region::from_value(&json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "Polygon", "coordinates": square() } },
                { "type": "Feature", "geometry": null }
            ]
        }))
        .unwrap();
        assert_eq!(region.bbox(), (0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_unknown_type_is_invalid() {
        let err = Region::from_value(&json!({
            "type": "LineString",
            "coordinates": [[0.0, 0.0], [1.0, 1.0]]
        }))
        .unwrap_err();
        assert!(matches!(err, RegionError::InvalidGeometry(_)));
    }

    #[test]
    fn test_feature_with_multipolygon_is_invalid() {
        let err = Region::from_value(&json!({
            "type": "Feature",
            "geometry": { "type": "MultiPolygon", "coordinates": [square()] }
        }))
        .unwrap_err();
        assert!(matches!(err, RegionError::InvalidGeometry(_)));
    }

    #[test]
    fn test_empty_feature_collection_is_invalid() {
        let err = Region::from_value(&json!({
            "type": "FeatureCollection",
            "features": []
        }))
        .unwrap_err();
        assert!(matches!(err, RegionError::InvalidGeometry(_)));
    }

    #[test]
    fn test_short_ring_is_invalid() {
        let err = Region::from_value(&json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 1.0]]]
        }))
        .unwrap_err();
        assert!(matches!(err, RegionError::InvalidGeometry(_)));

        let err = Region::from_value(&json!({ "type": "Polygon", "coordinates": [] })).unwrap_err();
        assert!(matches!(err, RegionError::InvalidGeometry(_)));
    }

    #[test]
    fn test_short_position_is_invalid() {
        let err = Region::from_value(&json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0], [1.0, 1.0]]]
        }))
        .unwrap_err();
        assert!(matches!(err, RegionError::InvalidGeometry(_)));
    }

    #[test]
    fn test_altitude_is_ignored() {
        let region = Region::from_value(&json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0, 120.0], [0.0, 4.0, 130.0], [4.0, 4.0, 90.0]]]
        }))
        .unwrap();
        assert_eq!(region.bbox(), (0.0, 0.0, 4.0, 4.0));
    }

    #[test]
    fn test_holes_are_ignored() {
        let region = Region::from_value(&json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]],
                [[4.0, 4.0], [4.0, 6.0], [6.0, 6.0], [6.0, 4.0]]
            ]
        }))
        .unwrap();
        // Inside the hole, still inside the outer ring
        assert!(region.contains(5.0, 5.0));
    }

    #[test]
    fn test_ray_cast_skips_horizontal_edges() {
        let vertices = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 10.0, y: 0.0 },
            Coord { x: 10.0, y: 10.0 },
            Coord { x: 0.0, y: 10.0 },
        ];
        assert!(ray_cast(&vertices, 5.0, 5.0));
        assert!(!ray_cast(&vertices, 5.0, 12.0));
        assert!(!ray_cast(&[], 5.0, 5.0));
    }

    #[test]
    fn test_envelope_rejects_distant_points() {
        let region = Region::from_geojson_str(
            r#"{"type":"Polygon","coordinates":[[[0,0],[0,10],[10,10],[10,0]]]}"#,
        )
        .unwrap();
        assert!(!region.contains(-50.0, 5.0));
        assert!(!region.contains(5.0, 170.0));
        assert!(!region.contains(f64::NAN, 5.0));
    }
}
