//! Core domain types for the ratings and titles datasets.
//!
//! - `RatingInfo` is one row of the ratings file
//! - `RatingIndex` maps identifiers to their `RatingInfo`
//! - `Record` is a title that survived the join as a movie

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque identifier shared by both datasets (e.g. "tt0000001")
pub type TitleId = String;

// =============================================================================
// Rating-related Types
// =============================================================================

/// Average rating and vote count for one identifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingInfo {
    pub average_rating: f64,
    pub num_votes: i64,
}

/// Lookup table from identifier to rating, built once before the join.
///
/// Read-only while the join runs, so workers share it by plain reference.
#[derive(Debug, Clone, Default)]
pub struct RatingIndex {
    pub(crate) ratings: HashMap<TitleId, RatingInfo>,
}

impl RatingIndex {
    /// Creates a new, empty RatingIndex
    pub fn new() -> Self {
        Self {
            ratings: HashMap::new(),
        }
    }

    /// Get the rating for an identifier
    pub fn get(&self, id: &str) -> Option<&RatingInfo> {
        self.ratings.get(id)
    }

    /// Insert a rating, replacing any earlier entry for the same identifier
    pub fn insert(&mut self, id: impl Into<TitleId>, info: RatingInfo) {
        self.ratings.insert(id.into(), info);
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl FromIterator<(TitleId, RatingInfo)> for RatingIndex {
    fn from_iter<I: IntoIterator<Item = (TitleId, RatingInfo)>>(iter: I) -> Self {
        Self {
            ratings: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Record Type
// =============================================================================

/// A movie that appeared in both files.
///
/// Only the join pipeline creates these. Nothing mutates them afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: TitleId,
    pub title: String,
    pub average_rating: f64,
    pub num_votes: i64,
    /// Raw comma-joined genre list, e.g. "Drama,Comedy"
    pub genres: String,
}

impl Record {
    /// Combine a titles row with its rating
    pub fn new(
        id: impl Into<TitleId>,
        title: impl Into<String>,
        genres: impl Into<String>,
        rating: RatingInfo,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            average_rating: rating.average_rating,
            num_votes: rating.num_votes,
            genres: genres.into(),
        }
    }
}
