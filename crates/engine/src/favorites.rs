//! Favorites extraction: a user's top historical picks, for display
//! context next to fresh recommendations.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use data_loader::{Dataset, MovieId, UserId};

/// One of a user's top-rated movies
#[derive(Debug, Clone, Serialize)]
pub struct Favorite {
    pub movie_id: MovieId,
    pub title: String,
    /// First genre tag of the movie
    pub primary_genre: String,
    /// The rating the user gave
    pub rating: f32,
}

/// Derives a user's highest-rated history from the interaction store.
#[derive(Clone)]
pub struct FavoritesExtractor {
    dataset: Arc<Dataset>,
}

impl FavoritesExtractor {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// The user's `top_n` highest-rated movies, descending by rating.
    ///
    /// Ties keep the original interaction order (stable sort). Duplicate
    /// (user, movie) rating rows are retained as separate entries. The
    /// top `top_n` interactions are selected first and then joined to the
    /// catalog; an interaction whose movie is missing from the catalog is
    /// dropped silently, so the result may be shorter than `top_n` even
    /// when more history exists. Empty history yields an empty vector.
    pub fn top_favorites(&self, user_id: UserId, top_n: usize) -> Vec<Favorite> {
        let mut history = self.dataset.ratings_for_user(user_id).to_vec();
        history.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        history.truncate(top_n);

        let favorites: Vec<Favorite> = history
            .into_iter()
            .filter_map(|r| {
                let movie = self.dataset.movie(r.movie_id)?;
                Some(Favorite {
                    movie_id: r.movie_id,
                    title: movie.title.clone(),
                    primary_genre: movie.primary_genre().to_string(),
                    rating: r.rating,
                })
            })
            .collect();

        debug!(
            "Extracted {} favorites for user {} (requested {})",
            favorites.len(),
            user_id,
            top_n
        );
        favorites
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Movie, Rating};

    fn fixture() -> FavoritesExtractor {
        let mut dataset = Dataset::new();
        for (id, title) in [(1, "First"), (2, "Second"), (3, "Third")] {
            dataset.insert_movie(Movie {
                id,
                title: title.to_string(),
                genres: vec!["Drama".to_string()],
            });
        }
        for (movie_id, value) in [(1, 3.0), (2, 5.0), (3, 4.0)] {
            dataset.insert_rating(Rating {
                user_id: 7,
                movie_id,
                rating: value,
                timestamp: 0,
            });
        }
        FavoritesExtractor::new(Arc::new(dataset))
    }

    #[test]
    fn test_favorites_sorted_descending_by_rating() {
        let favorites = fixture().top_favorites(7, 5);

        let ids: Vec<MovieId> = favorites.iter().map(|f| f.movie_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(favorites[0].rating, 5.0);
        assert_eq!(favorites[0].title, "Second");
    }

    #[test]
    fn test_favorites_truncated_to_top_n() {
        let favorites = fixture().top_favorites(7, 2);
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].movie_id, 2);
        assert_eq!(favorites[1].movie_id, 3);
    }

    #[test]
    fn test_favorites_tie_keeps_interaction_order() {
        let mut dataset = Dataset::new();
        for id in [1, 2] {
            dataset.insert_movie(Movie {
                id,
                title: format!("Movie {}", id),
                genres: vec![],
            });
        }
        // Same rating, movie 1 rated first
        for movie_id in [1, 2] {
            dataset.insert_rating(Rating {
                user_id: 7,
                movie_id,
                rating: 4.0,
                timestamp: 0,
            });
        }

        let favorites = FavoritesExtractor::new(Arc::new(dataset)).top_favorites(7, 2);
        assert_eq!(favorites[0].movie_id, 1);
        assert_eq!(favorites[1].movie_id, 2);
    }

    #[test]
    fn test_dangling_reference_dropped_after_selection() {
        let mut dataset = Dataset::new();
        dataset.insert_movie(Movie {
            id: 1,
            title: "Known".to_string(),
            genres: vec![],
        });
        // Highest-rated interaction points at a movie missing from the
        // catalog; it occupies a selection slot, then drops at the join.
        dataset.insert_rating(Rating {
            user_id: 7,
            movie_id: 99,
            rating: 5.0,
            timestamp: 0,
        });
        dataset.insert_rating(Rating {
            user_id: 7,
            movie_id: 1,
            rating: 4.0,
            timestamp: 0,
        });

        let extractor = FavoritesExtractor::new(Arc::new(dataset));

        let favorites = extractor.top_favorites(7, 1);
        assert!(favorites.is_empty());

        let favorites = extractor.top_favorites(7, 2);
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].movie_id, 1);
    }

    #[test]
    fn test_no_history_yields_empty() {
        assert!(fixture().top_favorites(999, 5).is_empty());
    }
}
