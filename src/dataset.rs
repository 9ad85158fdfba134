//! Loading of the pre-built JSON datasets from disk.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::models::{Book, Census, SpeciesCalendar};
use crate::region::RegionGeometry;

fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file {}", what, path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} file {}", what, path.display()))
}

/// Load a census export (`census.json` or a per-area file)
pub fn load_census<P: AsRef<Path>>(path: P) -> Result<Census> {
    let census: Census = load_json(path.as_ref(), "census")?;
    info!(
        "Loaded {} species from {}: {}",
        census.species.len(),
        path.as_ref().display(),
        census.summary()
    );
    Ok(census)
}

/// Load the species calendar (`speciesCalendar.json`)
pub fn load_calendar<P: AsRef<Path>>(path: P) -> Result<SpeciesCalendar> {
    let calendar: SpeciesCalendar = load_json(path.as_ref(), "calendar")?;
    info!("Loaded {} calendar entries", calendar.species.len());
    Ok(calendar)
}

/// Load a GeoJSON region payload. The shape is checked here, the ring
/// itself when the region is resolved.
pub fn load_region<P: AsRef<Path>>(path: P) -> Result<RegionGeometry> {
    load_json(path.as_ref(), "region")
}

/// Load the library catalog (`books.json`)
pub fn load_books<P: AsRef<Path>>(path: P) -> Result<Vec<Book>> {
    let books: Vec<Book> = load_json(path.as_ref(), "catalog")?;
    info!("Loaded {} books", books.len());
    Ok(books)
}
