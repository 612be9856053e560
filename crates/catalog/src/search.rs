//! Lookup engine: exact-title search over a title-sorted slice.
//!
//! ## Variants
//! - `binary_search_title`: classic binary search, case-sensitive match
//! - `PartitionedSearcher`: splits the slice into P contiguous ranges and
//!   binary-searches each on its own worker. A midpoint matches when the
//!   titles are equal ignoring case, but narrowing still uses ordinary
//!   byte-wise comparison, so the sort order stays valid inside each range.
//!   The consequence is that a title differing only in case is found only
//!   if some midpoint happens to land on it.
//!
//! A miss is `None` in both variants.

use data_loader::{partition_ranges, Record};
use rayon::ThreadPool;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::mpsc;
use tracing::trace;

/// Default number of ranges for the partitioned search
pub const DEFAULT_PARTITIONS: usize = 4;

/// Unicode case-insensitive equality
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Index of a record whose title is exactly `title`
pub fn binary_search_index(records: &[Record], title: &str) -> Option<usize> {
    if records.is_empty() {
        return None;
    }
    let mut low = 0;
    let mut high = records.len() - 1;

    while low <= high {
        let mid = low + (high - low) / 2;
        match records[mid].title.as_str().cmp(title) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => {
                if mid == 0 {
                    return None;
                }
                high = mid - 1;
            }
        }
    }
    None
}

/// Find the record whose title is exactly `title`.
///
/// `records` must be sorted by title. With duplicate titles any one of
/// them may be returned.
pub fn binary_search_title<'a>(records: &'a [Record], title: &str) -> Option<&'a Record> {
    binary_search_index(records, title).map(|i| &records[i])
}

/// Binary search inside one partition, giving up once `cancel` is set
fn search_partition(records: &[Record], title: &str, cancel: &AtomicBool) -> Option<usize> {
    if records.is_empty() {
        return None;
    }
    let mut low = 0;
    let mut high = records.len() - 1;

    while low <= high {
        if cancel.load(AtomicOrdering::Relaxed) {
            return None;
        }
        let mid = low + (high - low) / 2;
        let candidate = records[mid].title.as_str();
        if eq_ignore_case(candidate, title) {
            return Some(mid);
        }
        if candidate < title {
            low = mid + 1;
        } else {
            if mid == 0 {
                return None;
            }
            high = mid - 1;
        }
    }
    None
}

/// Concurrent search over P contiguous ranges of a sorted slice.
///
/// Owns a pool of exactly P threads so searches never compete with the
/// global rayon pool.
pub struct PartitionedSearcher {
    pool: ThreadPool,
    partitions: usize,
}

impl PartitionedSearcher {
    /// Create a searcher with `partitions` workers (0 is treated as 1)
    pub fn new(partitions: usize) -> data_loader::Result<Self> {
        let partitions = partitions.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(partitions)
            .thread_name(|i| format!("search-worker-{}", i))
            .build()?;
        Ok(Self { pool, partitions })
    }

    pub fn partitions(&self) -> usize {
        self.partitions
    }

    /// Search every range at once and return the first match reported.
    ///
    /// Workers send `Some(index)` or `None` to a shared channel. The first
    /// `Some` wins and raises a flag that makes the other workers stop at
    /// their next step.
    pub fn search<'a>(&self, records: &'a [Record], title: &str) -> Option<&'a Record> {
        let found = AtomicBool::new(false);
        let (sender, receiver) = mpsc::channel::<Option<usize>>();

        let hit = self.pool.in_place_scope(|scope| {
            for (worker, range) in partition_ranges(records.len(), self.partitions).enumerate() {
                let sender = sender.clone();
                let found = &found;
                scope.spawn(move |_| {
                    let offset = range.start;
                    let hit = search_partition(&records[range], title, found).map(|i| offset + i);
                    if hit.is_some() {
                        found.store(true, AtomicOrdering::Relaxed);
                    }
                    trace!("Search worker {} finished: {:?}", worker, hit);
                    // The orchestrator may already have its answer
                    let _ = sender.send(hit);
                });
            }
            drop(sender);

            receiver.iter().flatten().next()
        });

        hit.map(|i| &records[i])
    }
}

impl fmt::Debug for PartitionedSearcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionedSearcher")
            .field("partitions", &self.partitions)
            .finish()
    }
}

/// Which lookup variant a caller wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Sequential,
    Partitioned,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Sequential => write!(f, "sequential"),
            SearchMode::Partitioned => write!(f, "partitioned"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" | "binary" => Ok(SearchMode::Sequential),
            "partitioned" | "concurrent" => Ok(SearchMode::Partitioned),
            other => Err(format!("unknown search mode: {}", other)),
        }
    }
}
