//! Species occurrence calendar: month buckets and date helpers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CalendarSpecies, Specimen};

/// Italian month name and three-letter abbreviation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthName {
    pub full: &'static str,
    pub abbr: &'static str,
}

pub const MONTHS: [MonthName; 12] = [
    MonthName { full: "Gennaio", abbr: "GEN" },
    MonthName { full: "Febbraio", abbr: "FEB" },
    MonthName { full: "Marzo", abbr: "MAR" },
    MonthName { full: "Aprile", abbr: "APR" },
    MonthName { full: "Maggio", abbr: "MAG" },
    MonthName { full: "Giugno", abbr: "GIU" },
    MonthName { full: "Luglio", abbr: "LUG" },
    MonthName { full: "Agosto", abbr: "AGO" },
    MonthName { full: "Settembre", abbr: "SET" },
    MonthName { full: "Ottobre", abbr: "OTT" },
    MonthName { full: "Novembre", abbr: "NOV" },
    MonthName { full: "Dicembre", abbr: "DIC" },
];

/// Which end of the collection period the calendar is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Earliest,
    Latest,
}

impl SortMode {
    /// "MM-DD" date for this mode
    pub fn date<'a>(&self, species: &'a CalendarSpecies) -> &'a str {
        match self {
            SortMode::Earliest => &species.earliest_date,
            SortMode::Latest => &species.latest_date,
        }
    }

    pub fn day_of_year(&self, species: &CalendarSpecies) -> u32 {
        match self {
            SortMode::Earliest => species.earliest_day_of_year,
            SortMode::Latest => species.latest_day_of_year,
        }
    }

    pub fn sample<'a>(&self, species: &'a CalendarSpecies) -> Option<&'a Specimen> {
        match self {
            SortMode::Earliest => species.earliest_sample.as_ref(),
            SortMode::Latest => species.latest_sample.as_ref(),
        }
    }

    /// The opposite end of the period
    pub fn other(&self) -> Self {
        match self {
            SortMode::Earliest => SortMode::Latest,
            SortMode::Latest => SortMode::Earliest,
        }
    }

    /// Label shown above the featured sample
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Earliest => "Prima raccolta",
            SortMode::Latest => "Ultima raccolta",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortMode::Earliest => write!(f, "earliest"),
            SortMode::Latest => write!(f, "latest"),
        }
    }
}

/// Zero-based month index of an "MM-DD" string
pub fn month_index(mmdd: &str) -> Option<usize> {
    let month: usize = mmdd.split('-').next()?.trim().parse().ok()?;
    (1..=12).contains(&month).then(|| month - 1)
}

/// Day of month of an "MM-DD" string
pub fn day_of_month(mmdd: &str) -> Option<u32> {
    mmdd.split('-').nth(1)?.trim().parse().ok()
}

/// Format an ISO date as DD/MM/YYYY, or "—" when missing or unparseable
pub fn format_date(iso_date: Option<&str>) -> String {
    iso_date
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Bar heights (0..=100) for a monthly histogram, relative to the busiest month
pub fn month_bars(monthly_count: &[u32; 12]) -> [u32; 12] {
    let max = monthly_count.iter().copied().max().unwrap_or(0).max(1);
    monthly_count.map(|count| (f64::from(count) * 100.0 / f64::from(max)).round() as u32)
}

/// Species grouped by the month of their first (or last) collection.
///
/// Each bucket is ordered by day of year; entries with an unusable month
/// are left out.
pub fn group_by_month(species: &[CalendarSpecies], mode: SortMode) -> [Vec<&CalendarSpecies>; 12] {
    let mut sorted: Vec<&CalendarSpecies> = species.iter().collect();
    sorted.sort_by_key(|sp| mode.day_of_year(sp));

    let mut buckets: [Vec<&CalendarSpecies>; 12] = Default::default();
    for sp in sorted {
        if let Some(idx) = month_index(mode.date(sp)) {
            buckets[idx].push(sp);
        }
    }
    buckets
}
