//! Data models for the census, calendar and library datasets.

pub mod book;
pub mod species;
pub mod specimen;

pub use book::Book;
pub use species::{CalendarSpecies, Census, Species, SpeciesCalendar};
pub use specimen::{GeoPoint, Specimen};
