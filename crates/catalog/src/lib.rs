//! # Catalog Crate
//!
//! Turns the joined movie records into a title-sorted catalog and serves
//! exact-title lookups over it.
//!
//! ## Components
//!
//! ### Ordering engine (`sort`)
//! - `QuickSort`: random-pivot partition-exchange, expected O(n log n)
//! - `HeapSort`: guaranteed O(n log n), in place
//!
//! ### Lookup engine (`search`)
//! - `binary_search_title`: sequential, case-sensitive
//! - `PartitionedSearcher`: P contiguous ranges searched concurrently
//!
//! ### Facade (`catalog`)
//! - `build` / `build_with`: ratings -> join -> sort, with stage timings
//! - `lookup`: sequential lookup on a built catalog
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{build_with, CatalogConfig, SortAlgorithm};
//! use std::path::Path;
//!
//! let config = CatalogConfig::new().with_workers(16).with_sort(SortAlgorithm::Heap);
//! let (movies, report) = build_with(
//!     Path::new("title.ratings.tsv"),
//!     Path::new("title.basics.tsv"),
//!     &config,
//! )?;
//!
//! println!("Built in {:?}", report.total());
//! if let Some(movie) = movies.lookup("Casablanca") {
//!     println!("{} ({})", movie.title, movie.average_rating);
//! }
//! ```

// Public modules
pub mod catalog;
pub mod search;
pub mod sort;

// Re-export commonly used types
pub use catalog::{build, build_with, lookup, BuildReport, CatalogConfig, MovieCatalog, Stage, StageTiming};
pub use search::{binary_search_title, PartitionedSearcher, SearchMode, DEFAULT_PARTITIONS};
pub use sort::{HeapSort, QuickSort, SortAlgorithm, Sorter};
