//! Library catalog entries (`books.json` / `config.json`).

use serde::{Deserialize, Serialize};

/// A catalogued book or series volume
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub titolo: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autori: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editore: Option<String>,

    /// Publication year, kept as text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// 1..=3 stars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,

    #[serde(default = "default_copies")]
    pub copie: u32,
}

fn default_copies() -> u32 {
    1
}

impl Book {
    pub fn new(titolo: &str) -> Self {
        Self {
            titolo: titolo.to_string(),
            copie: 1,
            ..Default::default()
        }
    }

    /// Text value of a sortable field by its JSON name
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "titolo" => Some(self.titolo.clone()),
            "volume" => self.volume.clone(),
            "autori" => self.autori.clone(),
            "editore" => self.editore.clone(),
            "data" => self.data.clone(),
            "rating" => self.rating.map(|r| r.to_string()),
            "copie" => Some(self.copie.to_string()),
            _ => None,
        }
    }
}
