//! Book-Trawler main entry point
//!
//! This is the command-line interface for the Book-Trawler catalog crawler.

use anyhow::Context;
use book_trawler::config::{load_config_with_hash, Config};
use book_trawler::crawler::{run, CrawlRequest, FilterSpec, RunOutcome};
use book_trawler::output::{format_record_count, load_titles, print_views, write_records};
use book_trawler::sort::{sort_records, SortSpec};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Book-Trawler: crawls a paginated book catalog
///
/// Collects up to N books from the requested categories, keeping only those
/// that pass every filter, then prints them in each requested sort order and
/// saves them to a JSON file keyed by title.
#[derive(Parser, Debug)]
#[command(name = "book-trawler")]
#[command(version)]
#[command(about = "Crawls a paginated book catalog", long_about = None)]
struct Cli {
    /// Maximum number of books to collect
    #[arg(short = 'b', long = "book-number", default_value_t = 1000)]
    book_number: usize,

    /// Category names to crawl, in order (default: the whole catalog)
    #[arg(short = 'g', long = "genres", num_args = 1.., value_name = "NAME")]
    genres: Vec<String>,

    /// Filter on price, rating or in_stock with <, > or =, e.g. -f price '<' 20
    #[arg(
        short = 'f',
        long = "filter",
        num_args = 3,
        value_names = ["FIELD", "OP", "VALUE"],
        action = ArgAction::Append,
        allow_negative_numbers = true
    )]
    filters: Vec<String>,

    /// Sort by title, price, star_rating, in_stock or category, ascending or descending
    #[arg(
        short = 's',
        long = "sort",
        num_args = 2,
        value_names = ["FIELD", "DIRECTION"],
        action = ArgAction::Append
    )]
    sorting: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// JSON file to write (overrides the configured json-path)
    #[arg(short, long, value_name = "JSON")]
    output: Option<PathBuf>,

    /// Print the titles stored in the JSON file instead of overwriting it
    #[arg(short = 'F', long = "title-list")]
    title_list: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(cli.config.as_deref())?;

    let filters = FilterSpec::parse(
        cli.filters
            .chunks_exact(3)
            .map(|c| [c[0].as_str(), c[1].as_str(), c[2].as_str()]),
    )
    .context("invalid --filter")?;

    let sorting = SortSpec::parse(
        cli.sorting
            .chunks_exact(2)
            .map(|c| [c[0].as_str(), c[1].as_str()]),
    )
    .context("invalid --sort")?;

    let request = CrawlRequest {
        quota: cli.book_number,
        filters,
        categories: cli.genres,
    };

    let outcome = handle_crawl(&config, &request).await?;

    let views = sort_records(&outcome.records, &sorting);
    print_views(&views);

    let json_path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.json_path));

    if cli.title_list {
        handle_title_list(&json_path)?;
    } else {
        write_records(&json_path, &outcome.records)
            .with_context(|| format!("failed to save records to {}", json_path.display()))?;
    }

    println!("{}", format_record_count(outcome.records.len()));

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("book_trawler=info,warn"),
            1 => EnvFilter::new("book_trawler=debug,info"),
            2 => EnvFilter::new("book_trawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file if one was given, defaults otherwise
fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, request: &CrawlRequest) -> anyhow::Result<RunOutcome> {
    tracing::info!("Crawling catalog at {}", config.catalog.base_url);

    let outcome = match run(config, request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    for name in &outcome.unresolved_categories {
        eprintln!("warning: category '{}' was not found in the catalog", name);
    }

    Ok(outcome)
}

/// Handles --title-list: prints the titles of the persisted file
fn handle_title_list(json_path: &Path) -> anyhow::Result<()> {
    let titles = load_titles(json_path)
        .with_context(|| format!("failed to read titles from {}", json_path.display()))?;

    for title in titles {
        println!("{}", title);
    }

    Ok(())
}
