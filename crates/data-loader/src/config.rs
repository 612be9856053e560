//! Loader configuration.

/// Default number of join workers
pub const DEFAULT_WORKERS: usize = 16;

/// Default capacity of the hand-off channel between join workers and the aggregator
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// How the first line of each input file is treated.
///
/// The same policy applies to both files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderPolicy {
    /// Every line is data. A header row fails the row filters on its own:
    /// "titleType" is never "movie", and a ratings header only adds an
    /// entry no movie row can join against.
    #[default]
    Data,
    /// Drop the first line before parsing
    Skip,
}

impl HeaderPolicy {
    pub(crate) fn lines_to_skip(self) -> usize {
        match self {
            HeaderPolicy::Data => 0,
            HeaderPolicy::Skip => 1,
        }
    }
}

/// Settings shared by the rating index builder and the join pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Number of join workers (and contiguous chunks)
    pub workers: usize,
    /// Bound on records buffered between workers and the aggregator
    pub channel_capacity: usize,
    pub header_policy: HeaderPolicy,
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            header_policy: HeaderPolicy::Data,
        }
    }

    /// Configure the worker count (default: 16)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Configure the hand-off channel capacity (default: 1024)
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn with_header_policy(mut self, policy: HeaderPolicy) -> Self {
        self.header_policy = policy;
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.workers, 16);
        assert_eq!(config.header_policy, HeaderPolicy::Data);
    }

    #[test]
    fn test_builder_chain() {
        let config = LoaderConfig::new()
            .with_workers(4)
            .with_channel_capacity(8)
            .with_header_policy(HeaderPolicy::Skip);

        assert_eq!(config.workers, 4);
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.header_policy.lines_to_skip(), 1);
    }
}
