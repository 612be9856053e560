use data_loader::{join_movies, load_rating_index, LoaderConfig};
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let mut args = std::env::args().skip(1);
    let ratings_path = PathBuf::from(args.next().unwrap_or_else(|| "title.ratings.tsv".into()));
    let titles_path = PathBuf::from(args.next().unwrap_or_else(|| "title.basics.tsv".into()));

    println!("Loading ratings and titles...\n");

    for workers in [1, 4, 16] {
        let config = LoaderConfig::default().with_workers(workers);

        let start = Instant::now();
        let ratings = load_rating_index(&ratings_path, &config)
            .expect("Failed to load ratings");
        let ratings_elapsed = start.elapsed();

        let start = Instant::now();
        let movies = join_movies(&titles_path, &ratings, &config)
            .expect("Failed to join titles");
        let join_elapsed = start.elapsed();

        println!("=== {} workers ===", workers);
        println!("Ratings: {} in {:?}", ratings.len(), ratings_elapsed);
        println!("Movies:  {} in {:?}", movies.len(), join_elapsed);
        println!();
    }
}
