//! Point and record filtering against a region.

use tracing::debug;

use super::{Region, RegionError, RegionGeometry};
use crate::models::{GeoPoint, Species, Specimen};

/// Anything carrying a `"<lat>, <lon>"` coordinate string
pub trait Located {
    fn coordinates(&self) -> &str;
}

impl Located for Specimen {
    fn coordinates(&self) -> &str {
        &self.locality_coordinates
    }
}

impl Located for String {
    fn coordinates(&self) -> &str {
        self
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn coordinates(&self) -> &str {
        (**self).coordinates()
    }
}

/// Parse `"<lat>, <lon>"`, splitting on the first comma.
pub fn parse_coordinates(raw: &str) -> Result<GeoPoint, RegionError> {
    let malformed = || RegionError::MalformedCoordinate(raw.to_string());

    let (lat, lon) = raw.split_once(',').ok_or_else(malformed)?;
    let lat: f64 = lat.trim().parse().map_err(|_| malformed())?;
    let lon: f64 = lon.trim().parse().map_err(|_| malformed())?;

    // "NaN" and "inf" parse as f64 but are not coordinates
    if !lat.is_finite() || !lon.is_finite() {
        return Err(malformed());
    }

    Ok(GeoPoint::new(lat, lon))
}

/// Test a single point against a region payload
pub fn point_in_region(lat: f64, lon: f64, region: &RegionGeometry) -> Result<bool, RegionError> {
    Ok(region.resolve()?.contains(lat, lon))
}

/// Lazily yield the records inside `region`, in input order.
///
/// The payload is resolved before any record is examined. Records whose
/// coordinates cannot be parsed are skipped.
pub fn records_in_region<I>(
    records: I,
    region: &RegionGeometry,
) -> Result<impl Iterator<Item = I::Item>, RegionError>
where
    I: IntoIterator,
    I::Item: Located,
{
    let region = region.resolve()?;
    Ok(records
        .into_iter()
        .filter(move |record| region.contains_record(record)))
}

/// Species with at least one specimen collected inside `region`
pub fn species_in_region<'a>(
    species: &'a [Species],
    region: &RegionGeometry,
) -> Result<impl Iterator<Item = &'a Species> + 'a, RegionError> {
    let region = region.resolve()?;
    Ok(species.iter().filter(move |sp| {
        sp.specimens
            .iter()
            .any(|specimen| region.contains_record(specimen))
    }))
}

impl Region {
    /// Test a record, treating unparseable coordinates as outside
    pub fn contains_record<R: Located + ?Sized>(&self, record: &R) -> bool {
        match parse_coordinates(record.coordinates()) {
            Ok(point) => self.contains(point.lat, point.lon),
            Err(e) => {
                debug!("Skipping record: {}", e);
                false
            }
        }
    }

    /// Species with at least one specimen inside this region
    pub fn species<'r, 'a: 'r>(
        &'r self,
        species: &'a [Species],
    ) -> impl Iterator<Item = &'a Species> + 'r {
        species.iter().filter(move |sp| {
            sp.specimens
                .iter()
                .any(|specimen| self.contains_record(specimen))
        })
    }

    /// Lazily yield the records inside this region, in input order
    pub fn filter<'r, I>(&'r self, records: I) -> impl Iterator<Item = I::Item> + 'r
    where
        I: IntoIterator,
        I::IntoIter: 'r,
        I::Item: Located,
    {
        records
            .into_iter()
            .filter(move |record| self.contains_record(record))
    }
}
