//! Fungi Atlas - filtering and search over mycological census datasets
//!
//! This library provides the shared models and kernels used by the
//! `geofilter` and `census` binaries.

pub mod calendar;
pub mod catalog;
pub mod dataset;
pub mod models;
pub mod region;
pub mod search;

pub use models::{Book, CalendarSpecies, Census, GeoPoint, Species, Specimen};
pub use region::{point_in_region, records_in_region, Region, RegionError, RegionGeometry};
