//! # Data Loader Crate
//!
//! This crate handles loading and indexing the movie catalog and rating
//! history that the recommendation engine serves from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, Dataset)
//! - **parser**: Parse the CSV sources into Rust structs
//! - **index**: Build and validate the in-memory Dataset
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! // Load the entire dataset
//! let dataset = Dataset::load_from_files(Path::new("data"))?;
//!
//! // Query data
//! let movie = dataset.movie(1).unwrap();
//! let ratings = dataset.ratings_for_user(1);
//!
//! println!("{} has {} ratings", movie.title, ratings.len());
//! ```
//!
//! The Dataset is loaded once at startup and never mutated afterwards;
//! callers share it behind an `Arc`.

// Public modules
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{Dataset, Movie, MovieId, Rating, UserId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_creation() {
        let dataset = Dataset::new();

        assert_eq!(dataset.user_count(), 0);
        assert_eq!(dataset.movie_count(), 0);
        assert_eq!(dataset.rating_count(), 0);
    }

    #[test]
    fn test_insert_movie() {
        let mut dataset = Dataset::new();

        let movie = Movie {
            id: 1,
            title: "Toy Story (1995)".to_string(),
            genres: vec![
                "Adventure".to_string(),
                "Animation".to_string(),
                "Children".to_string(),
            ],
        };

        dataset.insert_movie(movie);

        let retrieved = dataset.movie(1).unwrap();
        assert_eq!(retrieved.id, 1);
        assert_eq!(retrieved.genres.len(), 3);
        assert_eq!(retrieved.primary_genre(), "Adventure");
    }

    #[test]
    fn test_insert_rating() {
        let mut dataset = Dataset::new();

        let rating = Rating {
            user_id: 1,
            movie_id: 1193,
            rating: 5.0,
            timestamp: 978300760,
        };

        dataset.insert_rating(rating);

        let user_ratings = dataset.ratings_for_user(1);
        assert_eq!(user_ratings.len(), 1);
        assert_eq!(user_ratings[0].rating, 5.0);
        assert_eq!(dataset.rating_count(), 1);
    }

    #[test]
    fn test_duplicate_rating_rows_are_retained() {
        let mut dataset = Dataset::new();

        for value in [4.0, 2.0] {
            dataset.insert_rating(Rating {
                user_id: 1,
                movie_id: 10,
                rating: value,
                timestamp: 0,
            });
        }

        // Both events kept, in insertion order
        let ratings = dataset.ratings_for_user(1);
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].rating, 4.0);
        assert_eq!(ratings[1].rating, 2.0);
    }

    #[test]
    fn test_empty_queries() {
        let dataset = Dataset::new();

        // Querying non-existent data should return None or empty slices
        assert!(dataset.movie(999).is_none());
        assert!(dataset.ratings_for_user(999).is_empty());
        assert!(dataset.user_ids().is_empty());
    }

    #[test]
    fn test_primary_genre_of_untagged_movie() {
        let movie = Movie {
            id: 7,
            title: "Untagged".to_string(),
            genres: vec![],
        };
        assert_eq!(movie.primary_genre(), "");
    }
}
