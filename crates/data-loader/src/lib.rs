//! # Data Loader Crate
//!
//! This crate loads the tab-separated ratings and titles datasets and
//! joins them into movie `Record`s.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (RatingInfo, RatingIndex, Record)
//! - **parser**: Line reading and row parsing for both files
//! - **ratings**: Build the identifier -> rating index
//! - **join**: Parallel filter/join of the titles file against the index
//! - **config**: Worker count, channel capacity and header policy
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{join_movies, load_rating_index, LoaderConfig};
//! use std::path::Path;
//!
//! let config = LoaderConfig::default().with_workers(8);
//! let ratings = load_rating_index(Path::new("title.ratings.tsv"), &config)?;
//! let movies = join_movies(Path::new("title.basics.tsv"), &ratings, &config)?;
//!
//! println!("Joined {} movies", movies.len());
//! ```

// Public modules
pub mod config;
pub mod error;
pub mod join;
pub mod parser;
pub mod ratings;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{HeaderPolicy, LoaderConfig, DEFAULT_CHANNEL_CAPACITY, DEFAULT_WORKERS};
pub use error::{DataLoadError, Result};
pub use join::{join_lines, join_movies, partition_ranges};
pub use ratings::load_rating_index;
pub use types::{RatingIndex, RatingInfo, Record, TitleId};
