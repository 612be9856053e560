//! End-to-end tests: write both TSV files, build the catalog, look titles up.

use catalog::{build, build_with, lookup, CatalogConfig, PartitionedSearcher, SortAlgorithm, Stage};
use data_loader::{DataLoadError, HeaderPolicy, LoaderConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RATINGS: &str = "\
tconst\taverageRating\tnumVotes
tt0000001\t7.5\t100
tt0000002\tabc\t50
tt0000003\t8.1\t2000
tt0000004\t6.0\t10
tt0000005\t5.5\t7
";

const TITLES: &str = "\
tconst\ttitleType\tprimaryTitle\toriginalTitle\tisAdult\tstartYear\tendYear\truntimeMinutes\tgenres
tt0000001\tmovie\tExample Film\t0\t0\t0\t0\t0\tDrama,Comedy
tt0000002\tmovie\tBroken Rating\tBroken Rating\t0\t1990\t\\N\t80\tHorror
tt0000003\tmovie\tAnother Film\tAnother Film\t0\t2001\t\\N\t120\tAction
tt0000004\tshort\tA Short\tA Short\t0\t1920\t\\N\t5\tAnimation
tt0000005\tmovie\tTruncated
tt0000006\tmovie\tNo Rating\tNo Rating\t0\t2010\t\\N\t95\tDrama
";

fn write_fixture() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let ratings = dir.path().join("title.ratings.tsv");
    let titles = dir.path().join("title.basics.tsv");
    fs::write(&ratings, RATINGS).unwrap();
    fs::write(&titles, TITLES).unwrap();
    (dir, ratings, titles)
}

fn sorted_titles(records: &[data_loader::Record]) -> Vec<&str> {
    records.iter().map(|r| r.title.as_str()).collect()
}

#[test]
fn test_build_joins_filters_and_sorts() {
    let (_dir, ratings, titles) = write_fixture();

    let movies = build(&ratings, &titles, 4).unwrap();

    assert!(movies.is_sorted());
    assert_eq!(
        sorted_titles(movies.records()),
        vec!["Another Film", "Broken Rating", "Example Film"]
    );

    let example = lookup(&movies, "Example Film").unwrap();
    assert_eq!(example.id, "tt0000001");
    assert_eq!(example.average_rating, 7.5);
    assert_eq!(example.num_votes, 100);
    assert_eq!(example.genres, "Drama,Comedy");

    let broken = lookup(&movies, "Broken Rating").unwrap();
    assert_eq!(broken.average_rating, 0.0);
    assert_eq!(broken.num_votes, 50);

    assert!(lookup(&movies, "A Short").is_none());
    assert!(lookup(&movies, "No Rating").is_none());
    assert!(lookup(&movies, "Truncated").is_none());
}

#[test]
fn test_both_sorts_and_worker_counts_agree() {
    let (_dir, ratings, titles) = write_fixture();

    let baseline = build(&ratings, &titles, 1).unwrap();
    for sort in [SortAlgorithm::Quick, SortAlgorithm::Heap] {
        for workers in [2, 16] {
            let config = CatalogConfig::new().with_workers(workers).with_sort(sort);
            let (movies, _) = build_with(&ratings, &titles, &config).unwrap();
            assert_eq!(movies.records(), baseline.records(), "{} / {}", sort, workers);
        }
    }
}

#[test]
fn test_report_covers_every_stage() {
    let (_dir, ratings, titles) = write_fixture();

    let (movies, report) = build_with(&ratings, &titles, &CatalogConfig::new()).unwrap();

    let stages: Vec<Stage> = report.stages.iter().map(|t| t.stage).collect();
    assert_eq!(stages, vec![Stage::Ratings, Stage::Join, Stage::Sort]);
    // The ratings header is indexed as data
    assert_eq!(report.stage(Stage::Ratings).unwrap().items, 6);
    assert_eq!(report.stage(Stage::Join).unwrap().items, movies.len());
    assert!(report.total() >= report.stage(Stage::Sort).unwrap().elapsed);
}

#[test]
fn test_skip_header_gives_same_catalog() {
    let (_dir, ratings, titles) = write_fixture();

    let loader = LoaderConfig::default().with_header_policy(HeaderPolicy::Skip);
    let (skipped, report) =
        build_with(&ratings, &titles, &CatalogConfig::new().with_loader(loader)).unwrap();
    let kept = build(&ratings, &titles, 16).unwrap();

    assert_eq!(skipped.records(), kept.records());
    assert_eq!(report.stage(Stage::Ratings).unwrap().items, 5);
}

#[test]
fn test_partitioned_lookup_on_built_catalog() {
    let (_dir, ratings, titles) = write_fixture();
    let movies = build(&ratings, &titles, 16).unwrap();

    let searcher = PartitionedSearcher::new(4).unwrap();
    for title in ["Another Film", "Broken Rating", "Example Film"] {
        assert_eq!(movies.lookup_partitioned(&searcher, title).unwrap().title, title);
    }
    assert!(movies.lookup_partitioned(&searcher, "Missing").is_none());
}

#[test]
fn test_missing_ratings_file_aborts_build() {
    let dir = tempfile::tempdir().unwrap();
    let titles = dir.path().join("title.basics.tsv");
    fs::write(&titles, TITLES).unwrap();

    let err = build(Path::new("/nonexistent/title.ratings.tsv"), &titles, 4).unwrap_err();
    assert!(matches!(err, DataLoadError::Open { .. }));
}

#[test]
fn test_zero_workers_aborts_build() {
    let (_dir, ratings, titles) = write_fixture();
    let err = build(&ratings, &titles, 0).unwrap_err();
    assert!(matches!(err, DataLoadError::InvalidWorkerCount));
}
