use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub global: GlobalConfig,
    #[serde(default)]
    pub regions: Vec<RegionConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GlobalConfig {
    pub census: PathBuf,
}

/// A named GeoJSON region file
#[derive(Debug, Deserialize, Clone)]
pub struct RegionConfig {
    pub name: String,
    pub path: PathBuf,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn region(&self, name: &str) -> Option<&RegionConfig> {
        self.regions.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[global]
census = "data/census.json"

[[regions]]
name = "clusone"
path = "regions/clusone.geojson"
"#
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.global.census, PathBuf::from("data/census.json"));
        assert_eq!(
            config.region("clusone").map(|r| r.path.clone()),
            Some(PathBuf::from("regions/clusone.geojson"))
        );
        assert!(config.region("bergamo").is_none());
    }

    #[test]
    fn test_missing_global_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "regions = []").unwrap();
        assert!(Config::load_from_file(file.path()).is_err());
    }
}
