//! Parser for the tab-separated ratings and titles files.
//!
//! - ratings: identifier \t averageRating \t numVotes [\t ...]
//! - titles:  identifier \t category \t title \t (5 columns) \t genres [\t ...]
//!
//! Row parsers never fail. A row that does not have enough fields is
//! `None`, and unparsable numbers fall back to zero.

use crate::error::{DataLoadError, Result};
use crate::types::RatingInfo;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::trace;

/// Minimum number of tab-separated fields in a ratings row
pub const RATING_FIELDS: usize = 3;

/// Minimum number of tab-separated fields in a titles row
pub const TITLE_FIELDS: usize = 9;

/// The only category that becomes a Record
pub const MOVIE_CATEGORY: &str = "movie";

const GENRES_FIELD: usize = 8;

/// Open a file, mapping the failure to `DataLoadError::Open`
fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| DataLoadError::open(path, e))?;
    Ok(BufReader::new(file))
}

/// Turn one raw line into a String.
///
/// Invalid UTF-8 is replaced rather than rejected, and a trailing `\r`
/// from CRLF files is dropped.
fn decode_line(mut bytes: Vec<u8>) -> String {
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    match String::from_utf8(bytes) {
        Ok(line) => line,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Stream every line of `reader` into `f`, skipping the first `skip` lines
fn scan_lines<R: Read>(
    reader: BufReader<R>,
    path: &Path,
    skip: usize,
    mut f: impl FnMut(&str),
) -> Result<usize> {
    let mut count = 0;
    for (idx, chunk) in reader.split(b'\n').enumerate() {
        let bytes = chunk.map_err(|e| DataLoadError::read(path, e))?;
        if idx < skip {
            continue;
        }
        f(&decode_line(bytes));
        count += 1;
    }
    Ok(count)
}

/// Visit each line of a file in order without keeping them around.
///
/// Returns the number of lines visited.
pub fn for_each_line(path: &Path, skip: usize, f: impl FnMut(&str)) -> Result<usize> {
    let reader = open(path)?;
    scan_lines(reader, path, skip, f)
}

/// Read a whole file into memory as a list of lines
pub fn read_lines(path: &Path, skip: usize) -> Result<Vec<String>> {
    let reader = open(path)?;
    let mut lines = Vec::new();
    scan_lines(reader, path, skip, |line| lines.push(line.to_string()))?;
    Ok(lines)
}

/// Parse an average rating, defaulting to 0.0
///
/// Example: "7.5" -> 7.5
///          "abc" -> 0.0
pub fn parse_average_rating(s: &str) -> f64 {
    s.parse().unwrap_or_else(|_| {
        trace!(value = s, "unparsable average rating, using 0.0");
        0.0
    })
}

/// Parse a signed vote count, defaulting to 0
///
/// Example: "-4" -> -4
///          "5000000000" -> 5000000000
///          "many" -> 0
pub fn parse_vote_count(s: &str) -> i64 {
    s.parse().unwrap_or_else(|_| {
        trace!(value = s, "unparsable vote count, using 0");
        0
    })
}

/// Parse one ratings row into its identifier and rating.
///
/// Returns `None` only when the row has fewer than three fields.
pub fn parse_rating_line(line: &str) -> Option<(&str, RatingInfo)> {
    let mut fields = line.split('\t');
    let id = fields.next()?;
    let average = fields.next()?;
    let votes = fields.next()?;

    Some((
        id,
        RatingInfo {
            average_rating: parse_average_rating(average),
            num_votes: parse_vote_count(votes),
        },
    ))
}

/// The columns of a titles row that the join cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleRow<'a> {
    pub id: &'a str,
    pub category: &'a str,
    pub title: &'a str,
    pub genres: &'a str,
}

impl TitleRow<'_> {
    pub fn is_movie(&self) -> bool {
        self.category == MOVIE_CATEGORY
    }
}

/// Split a titles row, requiring at least nine fields
pub fn parse_title_row(line: &str) -> Option<TitleRow<'_>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < TITLE_FIELDS {
        return None;
    }
    Some(TitleRow {
        id: fields[0],
        category: fields[1],
        title: fields[2],
        genres: fields[GENRES_FIELD],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_rating_line() {
        let (id, info) = parse_rating_line("tt0000001\t7.5\t100").unwrap();
        assert_eq!(id, "tt0000001");
        assert_eq!(info.average_rating, 7.5);
        assert_eq!(info.num_votes, 100);
    }

    #[test]
    fn test_bad_numbers_default_to_zero() {
        let (_, info) = parse_rating_line("tt0000002\tabc\t50").unwrap();
        assert_eq!(info, RatingInfo { average_rating: 0.0, num_votes: 50 });

        let (_, info) = parse_rating_line("tt0000003\t6.1\tmany").unwrap();
        assert_eq!(info.average_rating, 6.1);
        assert_eq!(info.num_votes, 0);
    }

    #[test]
    fn test_vote_counts_keep_sign_and_width() {
        let (_, info) = parse_rating_line("tt1\t5.0\t-5").unwrap();
        assert_eq!(info.num_votes, -5);

        let (_, info) = parse_rating_line("tt1\t5.0\t5000000000").unwrap();
        assert_eq!(info.num_votes, 5_000_000_000);

        assert_eq!(parse_vote_count("4.5"), 0);
        assert_eq!(parse_vote_count(""), 0);
    }

    #[test]
    fn test_short_rating_line_is_skipped() {
        assert!(parse_rating_line("tt0000001\t7.5").is_none());
        assert!(parse_rating_line("").is_none());
    }

    #[test]
    fn test_extra_rating_fields_are_ignored() {
        let (id, info) = parse_rating_line("tt9\t8.0\t12\tignored").unwrap();
        assert_eq!(id, "tt9");
        assert_eq!(info.num_votes, 12);
    }

    #[test]
    fn test_parse_title_row() {
        let row = parse_title_row("tt0000001\tmovie\tExample Film\t0\t0\t0\t0\t0\tDrama,Comedy")
            .unwrap();
        assert_eq!(row.id, "tt0000001");
        assert_eq!(row.title, "Example Film");
        assert_eq!(row.genres, "Drama,Comedy");
        assert!(row.is_movie());
    }

    #[test]
    fn test_title_row_needs_nine_fields() {
        assert!(parse_title_row("tt1\tmovie\tShort Row\t0\t0\t0\t0\t0").is_none());
    }

    #[test]
    fn test_header_row_is_not_a_movie() {
        let header = "tconst\ttitleType\tprimaryTitle\toriginalTitle\tisAdult\tstartYear\tendYear\truntimeMinutes\tgenres";
        let row = parse_title_row(header).unwrap();
        assert!(!row.is_movie());
    }

    #[test]
    fn test_scan_lines_strips_crlf_and_skips() {
        let data = "header\r\nfirst\r\nsecond";
        let reader = BufReader::new(Cursor::new(data.as_bytes()));
        let mut seen = Vec::new();
        let count = scan_lines(reader, Path::new("mem"), 1, |l| seen.push(l.to_string())).unwrap();

        assert_eq!(count, 2);
        assert_eq!(seen, vec!["first", "second"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let line = decode_line(vec![b'a', 0xff, b'b', b'\n']);
        assert_eq!(line, "a\u{fffd}b");
    }
}
