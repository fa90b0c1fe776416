//! Core domain types for the MovieLens-style dataset.
//!
//! This module defines the fundamental data structures used throughout the
//! system:
//! - Type aliases for domain clarity (UserId, MovieId)
//! - Movie and Rating row types
//! - Dataset, the in-memory catalog and interaction store

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with movie IDs

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Movie
// =============================================================================

/// Represents a movie in the catalog.
///
/// Genre tags are kept as strings in their original order. The dataset uses
/// an open-ended tag vocabulary ("Sci-Fi", "IMAX", "(no genres listed)"),
/// so a closed enum would reject valid rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Genre tags, order preserved from the source file.
    pub genres: Vec<String>,
}

impl Movie {
    /// The first genre tag, used as the display genre.
    pub fn primary_genre(&self) -> &str {
        self.genres.first().map(String::as_str).unwrap_or("")
    }
}

// =============================================================================
// Rating
// =============================================================================

/// A single historical rating event: one user rated one movie once.
///
/// Small, copyable struct; the dataset stores it both in the flat rating
/// list and in the per-user index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value, 0.5 to 5.0 in half-star steps
    pub rating: f32,
    /// Unix timestamp when the rating was made; carried but unused by queries
    pub timestamp: i64,
}

// =============================================================================
// Dataset - catalog and interaction store
// =============================================================================

/// In-memory view of the full catalog and all historical interactions.
///
/// Loaded once at startup and shared read-only afterwards; no method mutates
/// it after construction, so concurrent readers need no locking.
///
/// Movie enumeration order is the file load order. Candidate generation
/// depends on that order being stable, so it is kept explicitly rather than
/// relying on HashMap iteration.
#[derive(Debug)]
pub struct Dataset {
    // Primary data stores
    pub(crate) movies: HashMap<MovieId, Movie>,
    /// Movie ids in load order, for stable enumeration
    pub(crate) movie_order: Vec<MovieId>,
    /// All ratings in load order
    pub(crate) ratings: Vec<Rating>,

    // Rating index for fast per-user lookups
    pub(crate) user_ratings: HashMap<UserId, Vec<Rating>>,
}

impl Dataset {
    /// Creates a new, empty Dataset
    pub fn new() -> Self {
        Self {
            movies: HashMap::new(),
            movie_order: Vec::new(),
            ratings: Vec::new(),
            user_ratings: HashMap::new(),
        }
    }

    // Getters - these return references, never owned copies of the store

    /// Get a movie by ID
    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Iterate over all movies in load order
    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movie_order.iter().filter_map(|id| self.movies.get(id))
    }

    /// Get all ratings made by a user, in load order.
    ///
    /// Returns an empty slice (not an error) if the user has no history.
    pub fn ratings_for_user(&self, user_id: UserId) -> &[Rating] {
        self.user_ratings
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All ratings in load order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// All user ids present in the interaction store, ascending
    pub fn user_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.user_ratings.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of distinct users with at least one rating
    pub fn user_count(&self) -> usize {
        self.user_ratings.len()
    }

    /// Number of movies in the catalog
    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// Number of ratings in the interaction store
    pub fn rating_count(&self) -> usize {
        self.ratings.len()
    }

    // Mutators - used during data loading only

    /// Insert a movie into the catalog, preserving load order.
    ///
    /// Re-inserting an existing id replaces the metadata without adding a
    /// second enumeration slot.
    pub fn insert_movie(&mut self, movie: Movie) {
        let id = movie.id;
        if self.movies.insert(id, movie).is_none() {
            self.movie_order.push(id);
        }
    }

    /// Insert a rating and update the per-user index.
    ///
    /// Duplicate (user, movie) rows are retained as distinct events.
    pub fn insert_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
        self.user_ratings
            .entry(rating.user_id)
            .or_default()
            .push(rating);
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}
