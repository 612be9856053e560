//! Parallel join of the titles file against the rating index.
//!
//! ## Algorithm
//! 1. Read the whole titles file into memory as lines
//! 2. Cut the lines into `workers` contiguous, nearly equal chunks
//! 3. Each worker filters its chunk (≥9 fields, category "movie",
//!    identifier present in the index) and sends finished Records
//!    down a bounded channel
//! 4. The calling thread drains the channel while the workers run and
//!    inserts each Record keyed by identifier
//!
//! Only the draining thread touches the output map. Workers share the
//! index and their slice of lines by reference.

use crate::config::LoaderConfig;
use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::{RatingIndex, Record, TitleId};
use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;
use std::sync::mpsc;
use tracing::{debug, info, instrument};

/// Boundaries of `workers` contiguous chunks covering `0..len`.
///
/// Chunk `i` is `i*len/workers .. (i+1)*len/workers`, so sizes differ by
/// at most one and some chunks are empty when `len < workers`.
pub fn partition_ranges(len: usize, workers: usize) -> impl Iterator<Item = Range<usize>> {
    (0..workers).map(move |i| (i * len / workers)..((i + 1) * len / workers))
}

/// Join one titles row against the index
pub fn join_line(line: &str, ratings: &RatingIndex) -> Option<Record> {
    let row = parser::parse_title_row(line)?;
    if !row.is_movie() {
        return None;
    }
    let rating = ratings.get(row.id)?;
    Some(Record::new(row.id, row.title, row.genres, *rating))
}

/// Join already-loaded title lines on a pool of `config.workers` threads
#[instrument(skip_all, fields(lines = lines.len(), workers = config.workers))]
pub fn join_lines(
    lines: &[String],
    ratings: &RatingIndex,
    config: &LoaderConfig,
) -> Result<HashMap<TitleId, Record>> {
    if config.workers == 0 {
        return Err(DataLoadError::InvalidWorkerCount);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|i| format!("join-worker-{}", i))
        .build()?;

    let (sender, receiver) = mpsc::sync_channel::<Record>(config.channel_capacity);
    let mut movies = HashMap::new();

    pool.in_place_scope(|scope| {
        for (worker, range) in partition_ranges(lines.len(), config.workers).enumerate() {
            let chunk = &lines[range];
            let sender = sender.clone();
            scope.spawn(move |_| {
                let mut sent = 0usize;
                for line in chunk {
                    if let Some(record) = join_line(line, ratings) {
                        // The receiver only goes away if the aggregator is gone
                        if sender.send(record).is_err() {
                            return;
                        }
                        sent += 1;
                    }
                }
                debug!("Worker {} joined {} of {} lines", worker, sent, chunk.len());
            });
        }

        // Workers hold the remaining senders; the loop below ends once they all finish
        drop(sender);

        for record in receiver {
            movies.insert(record.id.clone(), record);
        }
    });

    Ok(movies)
}

/// Read the titles file and join it against `ratings`.
///
/// The file is read completely before any worker starts, so I/O errors
/// surface without partial results.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn join_movies(
    path: &Path,
    ratings: &RatingIndex,
    config: &LoaderConfig,
) -> Result<HashMap<TitleId, Record>> {
    let lines = parser::read_lines(path, config.header_policy.lines_to_skip())?;
    let movies = join_lines(&lines, ratings, config)?;
    info!("Joined {} movies from {} title lines", movies.len(), lines.len());
    Ok(movies)
}
