//! # Movie Catalog
//!
//! Coordinates the whole build:
//! 1. Build the rating index from the ratings file
//! 2. Join the titles file against it on a worker pool
//! 3. Sort the joined records by title
//!
//! Each stage is timed and reported in a `BuildReport` instead of being
//! printed, so callers decide what to show.

use std::path::Path;
use std::time::{Duration, Instant};

use data_loader::{join_movies, load_rating_index, LoaderConfig, Record};
use serde::Serialize;
use tracing::{info, instrument};

use crate::search::{binary_search_title, PartitionedSearcher};
use crate::sort::{is_sorted_by_title, SortAlgorithm, Sorter};

/// A build stage that gets timed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Ratings,
    Join,
    Sort,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Ratings => "map ratings",
            Stage::Join => "map movies",
            Stage::Sort => "sort movies",
        }
    }
}

/// Wall time and output size of one stage
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed: Duration,
    /// Entries produced by the stage (ratings indexed, movies joined, records sorted)
    pub items: usize,
}

/// Timings for every stage of a build, in the order they ran
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub stages: Vec<StageTiming>,
}

impl BuildReport {
    /// Record a finished stage that began at `start`
    pub fn record(&mut self, stage: Stage, start: Instant, items: usize) {
        let elapsed = start.elapsed();
        info!("Time to {}: {:?} ({} items)", stage.label(), elapsed, items);
        self.stages.push(StageTiming { stage, elapsed, items });
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageTiming> {
        self.stages.iter().find(|t| t.stage == stage)
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().map(|t| t.elapsed).sum()
    }
}

/// Settings for a full catalog build
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub loader: LoaderConfig,
    pub sort: SortAlgorithm,
}

impl CatalogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loader(mut self, loader: LoaderConfig) -> Self {
        self.loader = loader;
        self
    }

    /// Configure the join worker count (default: 16)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.loader.workers = workers;
        self
    }

    /// Configure the sort algorithm (default: quick)
    pub fn with_sort(mut self, sort: SortAlgorithm) -> Self {
        self.sort = sort;
        self
    }
}

/// Title-sorted collection of joined movies
#[derive(Debug, Clone, Default)]
pub struct MovieCatalog {
    records: Vec<Record>,
}

impl MovieCatalog {
    /// Sort `records` with `sorter` and wrap them
    pub fn from_records(mut records: Vec<Record>, sorter: &dyn Sorter) -> Self {
        sorter.sort(&mut records);
        Self { records }
    }

    /// Exact, case-sensitive title lookup
    pub fn lookup(&self, title: &str) -> Option<&Record> {
        binary_search_title(&self.records, title)
    }

    /// Lookup across the searcher's partitions (see `PartitionedSearcher`)
    pub fn lookup_partitioned(&self, searcher: &PartitionedSearcher, title: &str) -> Option<&Record> {
        searcher.search(&self.records, title)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        is_sorted_by_title(&self.records)
    }
}

/// Build a sorted catalog from the two files with `workers` join workers
pub fn build(ratings_path: &Path, titles_path: &Path, workers: usize) -> data_loader::Result<MovieCatalog> {
    let config = CatalogConfig::new().with_workers(workers);
    build_with(ratings_path, titles_path, &config).map(|(catalog, _)| catalog)
}

/// Build a sorted catalog and report how long each stage took.
///
/// Any I/O failure stops the build at the stage that hit it.
#[instrument(skip_all, fields(
    ratings = %ratings_path.display(),
    titles = %titles_path.display(),
    workers = config.loader.workers,
    sort = %config.sort,
))]
pub fn build_with(
    ratings_path: &Path,
    titles_path: &Path,
    config: &CatalogConfig,
) -> data_loader::Result<(MovieCatalog, BuildReport)> {
    let mut report = BuildReport::default();

    let start = Instant::now();
    let ratings = load_rating_index(ratings_path, &config.loader)?;
    report.record(Stage::Ratings, start, ratings.len());

    let start = Instant::now();
    let movies = join_movies(titles_path, &ratings, &config.loader)?;
    report.record(Stage::Join, start, movies.len());
    // The index is only needed for the join
    drop(ratings);

    let records: Vec<Record> = movies.into_values().collect();
    let sorter = config.sort.sorter();
    let start = Instant::now();
    let catalog = MovieCatalog::from_records(records, sorter.as_ref());
    report.record(Stage::Sort, start, catalog.len());

    info!("Catalog ready: {} movies in {:?}", catalog.len(), report.total());
    Ok((catalog, report))
}

/// Sequential exact-title lookup
pub fn lookup<'a>(catalog: &'a MovieCatalog, title: &str) -> Option<&'a Record> {
    catalog.lookup(title)
}
