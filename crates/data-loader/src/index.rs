//! Dataset loading and validation.
//!
//! Builds the Dataset from the two tabular sources:
//! - Parse ratings.csv and movies.csv in parallel
//! - Build the primary stores and the per-user rating index
//! - Validate rating values

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

/// Valid rating range: half-star steps between 0.5 and 5.0
const MIN_RATING: f32 = 0.5;
const MAX_RATING: f32 = 5.0;

impl Dataset {
    /// Load the catalog and interaction store from a data directory.
    ///
    /// Expects `ratings.csv` and `movies.csv` inside `data_dir`. This is
    /// the main entry point for loading data; any error here is fatal for
    /// the serving process.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading dataset from {:?}", data_dir);

        let ratings_path = data_dir.join("ratings.csv");
        let movies_path = data_dir.join("movies.csv");

        // Parse both files in parallel; each returns Result<Vec<T>>
        let (ratings, movies) = rayon::join(
            || parser::parse_ratings(&ratings_path),
            || parser::parse_movies(&movies_path),
        );
        let ratings = ratings?;
        let movies = movies?;

        info!(
            "Parsed {} movies and {} ratings",
            movies.len(),
            ratings.len()
        );

        let mut dataset = Dataset::new();
        for movie in movies {
            dataset.insert_movie(movie);
        }
        for rating in ratings {
            dataset.insert_rating(rating);
        }

        dataset.validate()?;

        info!(
            "Dataset ready: {} users, {} movies, {} ratings",
            dataset.user_count(),
            dataset.movie_count(),
            dataset.rating_count()
        );
        Ok(dataset)
    }

    /// Validate rating values.
    ///
    /// Only the rating range is checked. A rating whose movie id is absent
    /// from the catalog is allowed: display-time joins drop such rows
    /// silently, and the recommendation path never touches them.
    pub fn validate(&self) -> Result<()> {
        for rating in &self.ratings {
            if !(MIN_RATING..=MAX_RATING).contains(&rating.rating) {
                return Err(DataLoadError::InvalidValue {
                    field: "rating".to_string(),
                    value: rating.rating.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fixture(dir: &Path, ratings: &str, movies: &str) {
        fs::write(dir.join("ratings.csv"), ratings).unwrap();
        fs::write(dir.join("movies.csv"), movies).unwrap();
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(
            dir.path(),
            "userId,movieId,rating,timestamp\n\
             1,1,4.0,964982703\n\
             1,3,4.0,964981247\n\
             2,1,3.5,1445714835\n",
            "movieId,title,genres\n\
             1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy\n\
             2,Jumanji (1995),Adventure|Children|Fantasy\n\
             3,Grumpier Old Men (1995),Comedy|Romance\n",
        );

        let dataset = Dataset::load_from_files(dir.path()).unwrap();
        assert_eq!(dataset.user_count(), 2);
        assert_eq!(dataset.movie_count(), 3);
        assert_eq!(dataset.rating_count(), 3);
        assert_eq!(dataset.ratings_for_user(1).len(), 2);
        assert_eq!(dataset.user_ids(), vec![1, 2]);

        // Catalog enumeration follows file order
        let titles: Vec<&str> = dataset.movies().map(|m| m.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Toy Story (1995)",
                "Jumanji (1995)",
                "Grumpier Old Men (1995)"
            ]
        );
    }

    #[test]
    fn test_load_rejects_out_of_range_rating() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(
            dir.path(),
            "userId,movieId,rating,timestamp\n1,1,7.5,964982703\n",
            "movieId,title,genres\n1,Toy Story (1995),Comedy\n",
        );

        let err = Dataset::load_from_files(dir.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_load_allows_dangling_rating_reference() {
        // Rating for movie 99 which is not in the catalog: tolerated at
        // load, dropped at display-join time.
        let dir = tempfile::tempdir().unwrap();
        write_fixture(
            dir.path(),
            "userId,movieId,rating,timestamp\n1,99,5.0,964982703\n",
            "movieId,title,genres\n1,Toy Story (1995),Comedy\n",
        );

        let dataset = Dataset::load_from_files(dir.path()).unwrap();
        assert_eq!(dataset.rating_count(), 1);
        assert!(dataset.movie(99).is_none());
    }

    #[test]
    fn test_load_missing_directory() {
        let err = Dataset::load_from_files(Path::new("no/such/dir")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
