use anyhow::{Context, Result};
use catalog::{
    build_with, BuildReport, CatalogConfig, MovieCatalog, PartitionedSearcher, SearchMode,
    SortAlgorithm, DEFAULT_PARTITIONS,
};
use clap::Parser;
use colored::Colorize;
use data_loader::{HeaderPolicy, LoaderConfig, Record, DEFAULT_WORKERS};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// title-search - exact title lookup over joined ratings and titles
#[derive(Parser)]
#[command(name = "title-search")]
#[command(about = "Join title ratings and metadata, then look movies up by exact title", long_about = None)]
struct Cli {
    /// Path to the ratings TSV (identifier, averageRating, numVotes)
    #[arg(long, default_value = "title.ratings.tsv")]
    ratings: PathBuf,

    /// Path to the titles TSV (identifier, category, title, ..., genres)
    #[arg(long, default_value = "title.basics.tsv")]
    titles: PathBuf,

    /// Number of join workers
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Sort algorithm used to order the catalog (quick, heap)
    #[arg(long, default_value_t = SortAlgorithm::Quick)]
    sort: SortAlgorithm,

    /// Lookup variant used by the `search` command (sequential, partitioned)
    #[arg(long, default_value_t = SearchMode::Sequential)]
    mode: SearchMode,

    /// Number of ranges searched concurrently in partitioned mode
    #[arg(long, default_value_t = DEFAULT_PARTITIONS)]
    partitions: usize,

    /// Treat the first line of both files as a header and skip it
    #[arg(long)]
    skip_header: bool,

    /// Print found movies as JSON
    #[arg(long)]
    json: bool,
}

/// A line typed at the menu prompt
#[derive(Debug, PartialEq, Eq)]
enum MenuCommand {
    Search,
    Quit,
    Invalid,
}

impl MenuCommand {
    fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "search" => MenuCommand::Search,
            "q" | "quit" => MenuCommand::Quit,
            _ => MenuCommand::Invalid,
        }
    }
}

/// The lookup variant chosen at startup
enum Lookup {
    Sequential,
    Partitioned(PartitionedSearcher),
}

impl Lookup {
    fn new(mode: SearchMode, partitions: usize) -> Result<Self> {
        Ok(match mode {
            SearchMode::Sequential => Lookup::Sequential,
            SearchMode::Partitioned => Lookup::Partitioned(
                PartitionedSearcher::new(partitions).context("Failed to start search workers")?,
            ),
        })
    }

    fn mode(&self) -> SearchMode {
        match self {
            Lookup::Sequential => SearchMode::Sequential,
            Lookup::Partitioned(_) => SearchMode::Partitioned,
        }
    }

    fn find<'a>(&self, movies: &'a MovieCatalog, title: &str) -> Option<&'a Record> {
        match self {
            Lookup::Sequential => movies.lookup(title),
            Lookup::Partitioned(searcher) => movies.lookup_partitioned(searcher, title),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing on stderr so it never interleaves with prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let header_policy = if cli.skip_header {
        HeaderPolicy::Skip
    } else {
        HeaderPolicy::Data
    };
    let config = CatalogConfig::new()
        .with_loader(
            LoaderConfig::default()
                .with_workers(cli.workers)
                .with_header_policy(header_policy),
        )
        .with_sort(cli.sort);
    let lookup = Lookup::new(cli.mode, cli.partitions)?;

    println!(
        "Loading {} and {}...",
        cli.ratings.display(),
        cli.titles.display()
    );
    let (ratings, titles) = (cli.ratings.clone(), cli.titles.clone());
    let (movies, report) =
        tokio::task::spawn_blocking(move || build_with(&ratings, &titles, &config))
            .await
            .context("Catalog build task failed")?
            .context("Failed to load dataset")?;

    print_report(&report, movies.len());
    info!(mode = %lookup.mode(), "Ready for searches");

    run_menu(&movies, &lookup, cli.json).await
}

/// Read menu commands from stdin until `quit` or end of input
async fn run_menu(movies: &MovieCatalog, lookup: &Lookup, json: bool) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!("{} - search for a movie by title", "search".bold());
        println!("{} - quit", "quit or q".bold());
        prompt("Enter your choice: ")?;

        let Some(choice) = lines.next_line().await? else {
            break;
        };
        match MenuCommand::parse(&choice) {
            MenuCommand::Search => {
                prompt("Please enter the movie you'd like to search exactly as it was published: ")?;
                let Some(title) = lines.next_line().await? else {
                    break;
                };
                let title = title.trim();
                debug!("Searching for {:?}", title);

                let start = Instant::now();
                let found = lookup.find(movies, title);
                let elapsed = start.elapsed();

                print_result(found, json)?;
                println!("Search time ({}): {:?}", lookup.mode(), elapsed);
            }
            MenuCommand::Quit => {
                println!("Quitting...");
                break;
            }
            MenuCommand::Invalid => {
                println!("{}", "Invalid choice, please try again.".red());
            }
        }
    }
    Ok(())
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", text);
    std::io::stdout().flush()?;
    Ok(())
}

/// Helper function to print the per-stage build timings
fn print_report(report: &BuildReport, movies: usize) {
    for timing in &report.stages {
        println!(
            "{} Time to {}: {:?} ({} entries)",
            "✓".green(),
            timing.stage.label(),
            timing.elapsed,
            timing.items
        );
    }
    println!("Loaded {} movies in {:?}", movies, report.total());
}

fn print_result(found: Option<&Record>, json: bool) -> Result<()> {
    match found {
        Some(movie) if json => {
            println!("{}", serde_json::to_string_pretty(movie)?);
        }
        Some(movie) => {
            println!(
                "{} Title: {}, Rating: {:.1}, NumVotes: {}, Genres: {}",
                "Movie found:".green().bold(),
                movie.title,
                movie.average_rating,
                movie.num_votes,
                movie.genres
            );
        }
        None => println!("{}", "Movie not found.".yellow()),
    }
    Ok(())
}
