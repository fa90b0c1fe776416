//! Parser for the CSV data files.
//!
//! This module handles parsing the two tabular sources:
//! - ratings.csv: userId,movieId,rating,timestamp
//! - movies.csv: movieId,title,genres
//!
//! Both files carry a header row. Fields follow CSV quoting rules: a field
//! may be wrapped in double quotes (titles contain commas), and a doubled
//! quote inside a quoted field is a literal quote. Genres are a
//! pipe-delimited list inside a single field.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a file into lines, mapping the open failure to a path-carrying error
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Split one CSV line into fields, honoring double-quote wrapping.
///
/// Inside a quoted field, `""` is an escaped literal quote and commas are
/// data. Quotes are stripped from the returned fields.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// True if this line is the header row of either source file
fn is_header(line: &str) -> bool {
    line.starts_with("userId") || line.starts_with("movieId")
}

/// Parse the ratings.csv file
///
/// Format: userId,movieId,rating,timestamp
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let lines = read_lines(path)?;
    let mut ratings = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue; // Skip empty lines
        }
        if idx == 0 && is_header(line_trimmed) {
            continue;
        }

        let fields = split_csv_line(line_trimmed);
        if fields.len() != 4 {
            return Err(DataLoadError::ParseError {
                file: "ratings.csv".to_string(),
                line: line_no,
                reason: format!("expected 4 fields, found {}", fields.len()),
            });
        }

        let rating = Rating {
            user_id: fields[0].parse().map_err(|e| DataLoadError::ParseError {
                file: "ratings.csv".to_string(),
                line: line_no,
                reason: format!("Invalid userId: {}", e),
            })?,
            movie_id: fields[1].parse().map_err(|e| DataLoadError::ParseError {
                file: "ratings.csv".to_string(),
                line: line_no,
                reason: format!("Invalid movieId: {}", e),
            })?,
            rating: fields[2].parse().map_err(|e| DataLoadError::ParseError {
                file: "ratings.csv".to_string(),
                line: line_no,
                reason: format!("Invalid rating: {}", e),
            })?,
            timestamp: fields[3].parse().map_err(|e| DataLoadError::ParseError {
                file: "ratings.csv".to_string(),
                line: line_no,
                reason: format!("Invalid timestamp: {}", e),
            })?,
        };

        ratings.push(rating);
    }

    Ok(ratings)
}

/// Parse the movies.csv file
///
/// Format: movieId,title,genres
///
/// Titles are often quoted ("American President, The (1995)"). Genres are
/// pipe-separated: "Animation|Children|Comedy".
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let lines = read_lines(path)?;
    let mut movies = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue; // Skip empty lines
        }
        if idx == 0 && is_header(line_trimmed) {
            continue;
        }

        let fields = split_csv_line(line_trimmed);
        if fields.len() != 3 {
            return Err(DataLoadError::ParseError {
                file: "movies.csv".to_string(),
                line: line_no,
                reason: format!("expected 3 fields, found {}", fields.len()),
            });
        }

        let movie = Movie {
            id: fields[0].parse().map_err(|e| DataLoadError::ParseError {
                file: "movies.csv".to_string(),
                line: line_no,
                reason: format!("Invalid movieId: {}", e),
            })?,
            title: fields[1].clone(),
            genres: parse_genres(&fields[2]),
        };

        movies.push(movie);
    }
    Ok(movies)
}

/// Parse pipe-separated genres, preserving order.
///
/// Example: "Action|Adventure|Sci-Fi" -> ["Action", "Adventure", "Sci-Fi"]
///
/// The placeholder "(no genres listed)" is kept as a literal tag; the first
/// entry is what callers display as the primary genre.
fn parse_genres(s: &str) -> Vec<String> {
    s.split('|')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}
