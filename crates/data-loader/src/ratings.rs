//! Rating index builder.
//!
//! Streams the ratings file line by line into a `RatingIndex`. Later lines
//! win when an identifier repeats.

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::parser;
use crate::types::RatingIndex;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Build the identifier -> rating table from a ratings file.
///
/// Open and read failures abort the load. Rows with fewer than three
/// fields are skipped and bad numbers become zero.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_rating_index(path: &Path, config: &LoaderConfig) -> Result<RatingIndex> {
    let mut index = RatingIndex::new();
    let mut skipped = 0usize;

    let lines = parser::for_each_line(path, config.header_policy.lines_to_skip(), |line| {
        match parser::parse_rating_line(line) {
            Some((id, info)) => index.insert(id, info),
            None => skipped += 1,
        }
    })?;

    debug!("Skipped {} short rating rows", skipped);
    info!("Indexed {} ratings from {} lines", index.len(), lines);
    Ok(index)
}
