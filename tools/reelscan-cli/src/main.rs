//! Reelscan command line
//!
//! Fetches movies and people from the film database, lists a media server
//! library section with film database ids, or runs the extractors over a
//! document saved on disk.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use reelscan_client::config::{DEFAULT_IMDB_URL, DEFAULT_PLEX_PORT};
use reelscan_client::{ClientConfig, ImdbClient, PlexClient, PlexConfig};
use reelscan_core::parser::first_search_result;
use reelscan_core::{IdKind, LibraryListing, Movie, MovieExtractor, Person};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Cast size requested when none is given
const DEFAULT_CAST_LIMIT: usize = 5;

/// CLI arguments
#[derive(Parser)]
#[command(name = "reelscan")]
#[command(about = "Extract movie and person facts from film database pages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Film database base URL
    #[arg(long, global = true, env = "REELSCAN_IMDB_URL", default_value = DEFAULT_IMDB_URL)]
    imdb_url: String,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, global = true, env = "REELSCAN_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a movie by title id and print it as JSON
    Movie {
        /// Title id, e.g. tt0133093
        id: String,

        /// Cast members wanted (advisory, the full table is always read)
        #[arg(short, long, default_value_t = DEFAULT_CAST_LIMIT)]
        cast_limit: usize,
    },
    /// Fetch a person by id, or look the id up by name first
    Person {
        /// Person id, e.g. nm0000206
        id: Option<String>,

        /// Name to search for when no id is given
        #[arg(short, long, required_unless_present = "id", conflicts_with = "id")]
        name: Option<String>,
    },
    /// List a media server library section with film database ids
    Library {
        /// Media server host
        #[arg(short = 'H', long, env = "PLEX_HOST", default_value = "localhost")]
        plex_host: String,

        /// Media server port
        #[arg(short = 'p', long, env = "PLEX_PORT", default_value_t = DEFAULT_PLEX_PORT)]
        plex_port: u16,

        /// Media server access token
        #[arg(short = 't', long, env = "PLEX_TOKEN", hide_env_values = true)]
        plex_token: String,

        /// Library section number
        #[arg(short, long, env = "PLEX_SECTION", default_value_t = 1)]
        section: u32,
    },
    /// Run an extractor over a local document
    Extract {
        /// What the document is
        #[arg(value_enum)]
        kind: DocumentKind,

        /// Path to the saved page or listing
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DocumentKind {
    /// A title page
    Movie,
    /// A name page
    Person,
    /// A search results page
    Search,
    /// A library section listing
    Library,
}

impl Cli {
    fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn client_config(&self) -> ClientConfig {
        ClientConfig::new()
            .with_imdb_url(self.imdb_url.as_str())
            .with_timeout(self.timeout())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Movie { id, cast_limit } => {
            let client = ImdbClient::new(cli.client_config())?;
            let movie = Movie::fetch(&client, id, *cast_limit)
                .with_context(|| format!("Failed to fetch movie {id}"))?;
            info!(%id, title = %movie.title, "movie fetched");
            println!("{}", serde_json::to_string_pretty(&movie)?);
        }
        Commands::Person { id, name } => {
            let client = ImdbClient::new(cli.client_config())?;
            let id = match (id, name) {
                (Some(id), _) => id.clone(),
                (None, Some(name)) => {
                    let mut wanted = Person::named(name.as_str());
                    wanted
                        .resolve_id(&client)
                        .with_context(|| format!("Failed to find a person named {name:?}"))?
                        .to_string()
                }
                (None, None) => anyhow::bail!("Either a person id or --name is required"),
            };
            let mut person = Person::new(id.as_str());
            person
                .fetch(&client)
                .with_context(|| format!("Failed to fetch person {id}"))?;
            info!(%id, name = %person.name, "person fetched");
            println!("{}", serde_json::to_string_pretty(&person)?);
        }
        Commands::Library {
            plex_host,
            plex_port,
            plex_token,
            section,
        } => {
            let config = PlexConfig::new()
                .with_host(plex_host.as_str())
                .with_port(*plex_port)
                .with_token(plex_token.as_str())
                .with_section(*section)
                .with_timeout(cli.timeout());
            let listing = PlexClient::new(config)?
                .library()
                .with_context(|| format!("Failed to list library section {section}"))?;
            print_listing(&listing);
        }
        Commands::Extract { kind, file } => extract(*kind, file)?,
    }

    Ok(())
}

/// Runs the extractor for `kind` over a saved document and prints the result.
fn extract(kind: DocumentKind, file: &Path) -> Result<()> {
    let document = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    match kind {
        DocumentKind::Movie => {
            let id = id_from_path(file);
            let movie = MovieExtractor::new(&document).extract(&id, DEFAULT_CAST_LIMIT);
            println!("{}", serde_json::to_string_pretty(&movie)?);
        }
        DocumentKind::Person => {
            let mut person = Person::new(id_from_path(file));
            if let Err(err) = person.load(document) {
                warn!(file = %file.display(), error = %err, "person page incomplete");
            }
            println!("{}", serde_json::to_string_pretty(&person)?);
        }
        DocumentKind::Search => {
            let (kind, id) = first_search_result(&document)
                .with_context(|| format!("No search result in {}", file.display()))?;
            let result = serde_json::json!({ "kind": kind.to_string(), "id": id });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        DocumentKind::Library => {
            let listing = LibraryListing::from_xml(&document)
                .with_context(|| format!("Failed to decode {}", file.display()))?;
            print_listing(&listing);
        }
    }

    Ok(())
}

fn print_listing(listing: &LibraryListing) {
    for (title, id) in listing.cross_reference() {
        let id = id.unwrap_or_else(|err| {
            warn!(%title, error = %err, "no film database id for library entry");
            String::new()
        });
        println!("{}", listing_line(title, &id));
    }
}

fn listing_line(title: &str, id: &str) -> String {
    format!("Movie: {title} ID: {id}")
}

/// Uses the file stem as the record id when it looks like one.
fn id_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| IdKind::of(stem).is_some())
        .unwrap_or_default()
        .to_string()
}
