//! Taxonomic search over the species census.
//!
//! Free-text search, exact taxon search, genus/species dropdown filtering
//! and autocomplete suggestions. All matching is case-insensitive.

use hashbrown::HashSet;
use regex::RegexBuilder;
use std::collections::BTreeSet;
use tracing::debug;

use crate::models::Species;

/// Maximum number of autocomplete suggestions returned
pub const MAX_SUGGESTIONS: usize = 10;

/// Separator between ranks in a lineage string
const LINEAGE_SEPARATOR: &str = " > ";

/// Split a lineage into (rank, name) pairs.
///
/// Parts without a `": "` separator are skipped.
pub fn lineage_taxa(lineage: &str) -> Vec<(&str, &str)> {
    lineage
        .split(LINEAGE_SEPARATOR)
        .filter_map(|part| {
            let (rank, name) = part.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                None
            } else {
                Some((rank.trim(), name))
            }
        })
        .collect()
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_any_field(species: &Species, word: &str) -> bool {
    contains_ci(&species.genus, word)
        || contains_ci(&species.species, word)
        || contains_ci(&species.lineage, word)
}

/// Free-text search as typed in the search box.
///
/// * one word: substring of genus, epithet or lineage
/// * two words: substring of the full name
/// * more: substring of the full name, falling back to every word matching
///   genus, epithet or lineage when nothing matched
pub fn free_search<'a>(species: &'a [Species], query: &str) -> Vec<&'a Species> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return species.iter().collect();
    }

    let words: Vec<&str> = query.split_whitespace().collect();

    let results: Vec<&Species> = match words.len() {
        1 => species
            .iter()
            .filter(|sp| matches_any_field(sp, &query))
            .collect(),
        2 => species
            .iter()
            .filter(|sp| contains_ci(&sp.full_name, &query))
            .collect(),
        _ => {
            let by_name: Vec<&Species> = species
                .iter()
                .filter(|sp| contains_ci(&sp.full_name, &query))
                .collect();

            if by_name.is_empty() {
                species
                    .iter()
                    .filter(|sp| words.iter().all(|word| matches_any_field(sp, word)))
                    .collect()
            } else {
                by_name
            }
        }
    };

    debug!("Free search {:?}: {} results", query, results.len());
    results
}

/// Exact search for a taxon clicked in a lineage or genus link.
///
/// Matches the genus exactly or the taxon as a whole word in the lineage.
pub fn taxon_search<'a>(species: &'a [Species], taxon: &str) -> Vec<&'a Species> {
    let taxon = taxon.trim().to_lowercase();
    if taxon.is_empty() {
        return Vec::new();
    }

    let word = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&taxon)))
        .case_insensitive(true)
        .build();

    species
        .iter()
        .filter(|sp| {
            sp.genus.to_lowercase() == taxon
                || word
                    .as_ref()
                    .map(|re| re.is_match(&sp.lineage))
                    .unwrap_or(false)
        })
        .collect()
}

/// Dropdown filter: `None` matches everything.
pub fn filter_by_genus_species<'a>(
    species: &'a [Species],
    genus: Option<&str>,
    epithet: Option<&str>,
) -> Vec<&'a Species> {
    species
        .iter()
        .filter(|sp| genus.map_or(true, |g| sp.genus == g))
        .filter(|sp| epithet.map_or(true, |e| sp.species == e))
        .collect()
}

/// Sorted distinct genera
pub fn genera(species: &[Species]) -> Vec<&str> {
    species
        .iter()
        .map(|sp| sp.genus.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted distinct epithets within a genus
pub fn epithets_in_genus<'a>(species: &'a [Species], genus: &str) -> Vec<&'a str> {
    species
        .iter()
        .filter(|sp| sp.genus == genus)
        .map(|sp| sp.species.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Up to [`MAX_SUGGESTIONS`] distinct suggestions, in first-seen order.
pub fn autocomplete(species: &[Species], query: &str) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut suggestions = Vec::new();
    let mut push = |candidate: String| {
        if seen.insert(candidate.clone()) {
            suggestions.push(candidate);
        }
    };

    for sp in species {
        if contains_ci(&sp.genus, &query) {
            push(sp.genus.clone());
        }
        if contains_ci(&sp.species, &query) {
            push(format!("{} {}", sp.genus, sp.species));
        }
        for (_, name) in lineage_taxa(&sp.lineage) {
            if contains_ci(name, &query) {
                push(name.to_string());
            }
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Keyboard selection state of an autocomplete list.
///
/// `None` means no item is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutocompleteCursor {
    selected: Option<usize>,
}

impl AutocompleteCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrow down: move to the next item, stopping at the last one
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) => (i + 1).min(len - 1),
        });
    }

    /// Arrow up: move to the previous item, leaving the list from the first
    pub fn previous(&mut self) {
        self.selected = match self.selected {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The highlighted suggestion, if any
    pub fn pick<'a>(&self, suggestions: &'a [String]) -> Option<&'a str> {
        self.selected
            .and_then(|i| suggestions.get(i))
            .map(String::as_str)
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }
}
