//! Ordering engine: in-place sorts of records by title.
//!
//! Two interchangeable algorithms sit behind the `Sorter` trait:
//!
//! - `QuickSort`: partition-exchange around a random pivot. Expected
//!   O(n log n), but O(n²) is still possible with unlucky pivots or many
//!   equal titles, since every element equal to the pivot lands on the
//!   same side.
//! - `HeapSort`: guaranteed O(n log n) with no extra memory.
//!
//! Titles compare byte-wise (`str` ordering). Neither sort is stable, so
//! records with equal titles may come out in any relative order.

use data_loader::Record;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;

/// Strict title ordering used by both sorts
pub fn title_less(a: &Record, b: &Record) -> bool {
    a.title < b.title
}

/// True if every adjacent pair is in ascending title order
pub fn is_sorted_by_title(records: &[Record]) -> bool {
    records.windows(2).all(|pair| pair[0].title <= pair[1].title)
}

/// An in-place title sort.
///
/// `Send + Sync` so a catalog can hold one behind a shared reference.
pub trait Sorter: Send + Sync {
    /// Returns the name of this algorithm (for logging)
    fn name(&self) -> &str;

    /// Sort `records` by ascending title
    fn sort(&self, records: &mut [Record]);
}

/// Randomised-pivot partition-exchange sort
#[derive(Debug, Clone, Default)]
pub struct QuickSort {
    seed: Option<u64>,
}

impl QuickSort {
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Use a fixed pivot sequence instead of the thread RNG
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Sorter for QuickSort {
    fn name(&self) -> &str {
        "quick"
    }

    fn sort(&self, records: &mut [Record]) {
        match self.seed {
            Some(seed) => quick_sort_by(records, &title_less, &mut StdRng::seed_from_u64(seed)),
            None => quick_sort_by(records, &title_less, &mut rand::rng()),
        }
    }
}

/// Binary max-heap sort
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSort;

impl Sorter for HeapSort {
    fn name(&self) -> &str {
        "heap"
    }

    fn sort(&self, records: &mut [Record]) {
        heap_sort_by(records, &title_less);
    }
}

/// Which sort a catalog build should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortAlgorithm {
    #[default]
    Quick,
    Heap,
}

impl SortAlgorithm {
    pub fn sorter(self) -> Box<dyn Sorter> {
        match self {
            SortAlgorithm::Quick => Box::new(QuickSort::new()),
            SortAlgorithm::Heap => Box::new(HeapSort),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortAlgorithm::Quick => write!(f, "quick"),
            SortAlgorithm::Heap => write!(f, "heap"),
        }
    }
}

impl FromStr for SortAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quick" | "quicksort" => Ok(SortAlgorithm::Quick),
            "heap" | "heapsort" => Ok(SortAlgorithm::Heap),
            other => Err(format!("unknown sort algorithm: {}", other)),
        }
    }
}

/// Partition-exchange sort with a random pivot per partition.
///
/// Recurses into the smaller side and loops on the larger one, so stack
/// depth stays logarithmic even when the running time does not.
pub fn quick_sort_by<T, F, R>(mut v: &mut [T], less: &F, rng: &mut R)
where
    F: Fn(&T, &T) -> bool,
    R: Rng + ?Sized,
{
    while v.len() > 1 {
        let last = v.len() - 1;
        let pivot = rng.random_range(0..v.len());
        v.swap(pivot, last);

        let mut store = 0;
        for i in 0..last {
            if less(&v[i], &v[last]) {
                v.swap(store, i);
                store += 1;
            }
        }
        v.swap(store, last);

        let (left, rest) = std::mem::take(&mut v).split_at_mut(store);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quick_sort_by(left, less, rng);
            v = right;
        } else {
            quick_sort_by(right, less, rng);
            v = left;
        }
    }
}

/// In-place heap sort
pub fn heap_sort_by<T, F>(v: &mut [T], less: &F)
where
    F: Fn(&T, &T) -> bool,
{
    let len = v.len();
    for root in (0..len / 2).rev() {
        sift_down(v, root, len, less);
    }
    for end in (1..len).rev() {
        v.swap(0, end);
        sift_down(v, 0, end, less);
    }
}

/// Restore the max-heap property below `root`, looking only at `v[..end]`
fn sift_down<T, F>(v: &mut [T], mut root: usize, end: usize, less: &F)
where
    F: Fn(&T, &T) -> bool,
{
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            break;
        }
        if child + 1 < end && less(&v[child], &v[child + 1]) {
            child += 1;
        }
        if !less(&v[root], &v[child]) {
            break;
        }
        v.swap(root, child);
        root = child;
    }
}
