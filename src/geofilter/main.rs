//! Region filter for census datasets.
//!
//! Prints, as JSON lines, the species (or individual specimens) whose
//! recorded coordinates fall inside a GeoJSON polygon.

mod config;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fungi_atlas::dataset::{load_census, load_region};
use fungi_atlas::region::parse_coordinates;
use fungi_atlas::{Species, Specimen};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "geofilter")]
#[command(about = "Filter census records by a GeoJSON region")]
struct Args {
    /// GeoJSON file (Polygon, Feature or FeatureCollection)
    #[arg(short, long, conflicts_with = "region_name")]
    region: Option<PathBuf>,

    /// Name of a region declared in the config file
    #[arg(long)]
    region_name: Option<String>,

    /// Census JSON file (overrides the config file)
    #[arg(short, long)]
    census: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print matching specimens instead of species
    #[arg(long)]
    specimens: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// One specimen line, tagged with the species it belongs to
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpecimenLine<'a> {
    full_name: &'a str,
    osm_url: Option<String>,
    #[serde(flatten)]
    specimen: &'a Specimen,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for results
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = args
        .config
        .as_ref()
        .map(Config::load_from_file)
        .transpose()?;

    let census_path = args
        .census
        .clone()
        .or_else(|| config.as_ref().map(|c| c.global.census.clone()))
        .context("No census file given (use --census or a config file)")?;

    let region_path = match (&args.region, &args.region_name) {
        (Some(path), _) => path.clone(),
        (None, Some(name)) => config
            .as_ref()
            .and_then(|c| c.region(name))
            .map(|r| r.path.clone())
            .with_context(|| format!("Region '{}' not found in config", name))?,
        (None, None) => anyhow::bail!("No region given (use --region or --region-name)"),
    };

    info!("Region: {}", region_path.display());
    let geometry = load_region(&region_path)?;
    let region = geometry
        .resolve()
        .with_context(|| format!("Unusable region in {}", region_path.display()))?;
    let (min_lon, min_lat, max_lon, max_lat) = region.bbox();
    info!(
        "Region ring has {} vertices, bbox [{}, {}, {}, {}]",
        region.vertex_count(),
        min_lon,
        min_lat,
        max_lon,
        max_lat
    );

    let census = load_census(&census_path)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut count = 0;

    if args.specimens {
        for sp in &census.species {
            for specimen in region.filter(&sp.specimens) {
                let line = SpecimenLine {
                    full_name: &sp.full_name,
                    osm_url: parse_coordinates(&specimen.locality_coordinates)
                        .ok()
                        .map(|point| point.osm_url(14)),
                    specimen,
                };
                writeln!(out, "{}", serde_json::to_string(&line)?)?;
                count += 1;
            }
        }
    } else {
        let species: Vec<&Species> = region.species(&census.species).collect();
        for sp in &species {
            writeln!(out, "{}", serde_json::to_string(sp)?)?;
        }
        count = species.len();
    }

    out.flush()?;
    info!(
        "{} {} inside region",
        count,
        if args.specimens { "specimens" } else { "species" }
    );

    Ok(())
}
