//! Species census and species calendar documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Specimen;

/// One censused species with its collected specimens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub genus: String,

    /// Specific epithet
    pub species: String,

    /// "Genus species" as displayed
    #[serde(default)]
    pub full_name: String,

    #[serde(default)]
    pub authority: String,

    /// Taxonomy path: "Regnum: Fungi > Divisio: Basidiomycota > ..."
    #[serde(default)]
    pub lineage: String,

    /// Accepted name when this entry is a synonym
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_authority: Option<String>,

    #[serde(default, rename = "campioniRaccolti")]
    pub specimens: Vec<Specimen>,
}

impl Species {
    pub fn new(genus: &str, species: &str, lineage: &str) -> Self {
        Self {
            genus: genus.to_string(),
            species: species.to_string(),
            full_name: format!("{} {}", genus, species),
            lineage: lineage.to_string(),
            ..Default::default()
        }
    }

    /// Accepted name if this entry is listed under a synonym
    pub fn synonym_of(&self) -> Option<&str> {
        self.current_name
            .as_deref()
            .filter(|current| *current != self.full_name)
    }
}

/// Top-level census document (`census.json` or `<area>.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Census {
    /// Area title, present on per-area exports only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub total_species: usize,

    #[serde(default)]
    pub total_samples: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub species: Vec<Species>,
}

impl Census {
    /// Summary line as shown in the page header
    pub fn summary(&self) -> String {
        let updated = self
            .generated_at
            .map(|ts| ts.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "—".to_string());
        format!(
            "{} specie censite - {} campioni - Ultimo aggiornamento: {}",
            self.total_species, self.total_samples, updated
        )
    }
}

/// One entry of the species calendar (`speciesCalendar.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSpecies {
    pub full_name: String,

    #[serde(default)]
    pub authority: String,

    #[serde(default)]
    pub lineage: String,

    #[serde(default)]
    pub total_samples: u32,

    /// Samples per month, January first
    #[serde(default)]
    pub monthly_count: [u32; 12],

    /// "MM-DD"
    pub earliest_date: String,
    pub latest_date: String,

    pub earliest_day_of_year: u32,
    pub latest_day_of_year: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_sample: Option<Specimen>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_sample: Option<Specimen>,
}

/// Calendar document wrapper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesCalendar {
    #[serde(default)]
    pub species: Vec<CalendarSpecies>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonym_of() {
        let mut sp = Species::new("Boletus", "luridus", "");
        assert_eq!(sp.synonym_of(), None);

        sp.current_name = Some("Boletus luridus".to_string());
        assert_eq!(sp.synonym_of(), None);

        sp.current_name = Some("Suillellus luridus".to_string());
        assert_eq!(sp.synonym_of(), Some("Suillellus luridus"));
    }

    #[test]
    fn test_summary_without_timestamp() {
        let census = Census {
            title: None,
            total_species: 2,
            total_samples: 5,
            generated_at: None,
            species: Vec::new(),
        };
        assert_eq!(
            census.summary(),
            "2 specie censite - 5 campioni - Ultimo aggiornamento: —"
        );
    }
}
