//! Census search and calendar tool.
//!
//! Runs the taxonomic search, the species calendar grouping and the library
//! catalog filter over the JSON datasets, printing JSON lines.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fungi_atlas::calendar::{self, SortMode, MONTHS};
use fungi_atlas::catalog::{advanced_sort, display_tags, CatalogFilter};
use fungi_atlas::dataset::{load_books, load_calendar, load_census};
use fungi_atlas::search;
use fungi_atlas::Species;

#[derive(Parser, Debug)]
#[command(name = "census")]
#[command(about = "Search the fungi census, calendar and library catalog")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Free-text search over genus, species and lineage
    Search {
        #[arg(long, default_value = "census.json")]
        census: PathBuf,
        query: Vec<String>,
    },
    /// Exact taxon search (genus or whole lineage word)
    Taxon {
        #[arg(long, default_value = "census.json")]
        census: PathBuf,
        name: String,
    },
    /// Filter by genus and specific epithet
    Filter {
        #[arg(long, default_value = "census.json")]
        census: PathBuf,
        #[arg(long)]
        genus: Option<String>,
        #[arg(long)]
        species: Option<String>,
    },
    /// Autocomplete suggestions for a partial query
    Suggest {
        #[arg(long, default_value = "census.json")]
        census: PathBuf,
        query: String,
    },
    /// Species grouped by month of first (or last) collection
    Calendar {
        #[arg(long, default_value = "speciesCalendar.json")]
        calendar: PathBuf,
        /// Group by latest instead of earliest collection date
        #[arg(long)]
        latest: bool,
    },
    /// Filter the library catalog
    Books {
        #[arg(long, default_value = "data/books.json")]
        books: PathBuf,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        rating: Option<u8>,
        query: Vec<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthLine<'a> {
    month: &'static str,
    abbr: &'static str,
    count: usize,
    species: Vec<CalendarEntry<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CalendarEntry<'a> {
    full_name: &'a str,
    day: Option<u32>,
    collected: String,
    month_bars: [u32; 12],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookLine<'a> {
    titolo: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    volume: Option<&'a str>,
    tags: Vec<String>,
}

fn print_species<W: Write>(out: &mut W, species: &[&Species]) -> Result<()> {
    for sp in species {
        writeln!(out, "{}", serde_json::to_string(sp)?)?;
    }
    info!("Risultati: {}", species.len());
    Ok(())
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

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match args.command {
        Command::Search { census, query } => {
            let census = load_census(&census)?;
            let results = search::free_search(&census.species, &query.join(" "));
            print_species(&mut out, &results)?;
        }
        Command::Taxon { census, name } => {
            let census = load_census(&census)?;
            let results = search::taxon_search(&census.species, &name);
            print_species(&mut out, &results)?;
        }
        Command::Filter {
            census,
            genus,
            species,
        } => {
            let census = load_census(&census)?;
            let results = search::filter_by_genus_species(
                &census.species,
                genus.as_deref(),
                species.as_deref(),
            );
            print_species(&mut out, &results)?;
        }
        Command::Suggest { census, query } => {
            let census = load_census(&census)?;
            for suggestion in search::autocomplete(&census.species, &query) {
                writeln!(out, "{}", serde_json::to_string(&suggestion)?)?;
            }
        }
        Command::Calendar {
            calendar: path,
            latest,
        } => {
            let data = load_calendar(&path)?;
            let mode = if latest {
                SortMode::Latest
            } else {
                SortMode::Earliest
            };
            info!("Grouping calendar by {} collection", mode);

            let buckets = calendar::group_by_month(&data.species, mode);
            for (month, bucket) in MONTHS.iter().zip(buckets.iter()) {
                let line = MonthLine {
                    month: month.full,
                    abbr: month.abbr,
                    count: bucket.len(),
                    species: bucket
                        .iter()
                        .map(|sp| CalendarEntry {
                            full_name: &sp.full_name,
                            day: calendar::day_of_month(mode.date(sp)),
                            collected: calendar::format_date(
                                mode.sample(sp)
                                    .and_then(|s| s.collection_date.as_deref()),
                            ),
                            month_bars: calendar::month_bars(&sp.monthly_count),
                        })
                        .collect(),
                };
                writeln!(out, "{}", serde_json::to_string(&line)?)?;
            }
        }
        Command::Books {
            books,
            tag,
            rating,
            query,
        } => {
            let mut books = load_books(&books)?;
            advanced_sort(&mut books, &["titolo", "volume"]);

            let filter = CatalogFilter {
                query: query.join(" "),
                tag,
                rating,
            };
            let visible = filter.apply(&books);
            for book in &visible {
                let line = BookLine {
                    titolo: &book.titolo,
                    volume: book.volume.as_deref(),
                    tags: display_tags(book),
                };
                writeln!(out, "{}", serde_json::to_string(&line)?)?;
            }
            info!("{} of {} books shown", visible.len(), books.len());
        }
    }

    out.flush()?;
    Ok(())
}
