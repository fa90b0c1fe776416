//! # Recommendation Engine
//!
//! This module coordinates the recommendation pipeline:
//! 1. Look up the user's rating history
//! 2. Build the candidate set (unrated, known to the codec)
//! 3. Encode the user once and all candidates in one vectorized call
//! 4. Score the whole candidate batch with a single model invocation
//! 5. Rank by descending score and select the top N
//! 6. Assemble display-ready results from the catalog

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, instrument};

use data_loader::{Dataset, MovieId, UserId};
use id_codec::IdCodec;
use mf_model::MfModel;

/// Final recommendation returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    /// First genre tag of the movie
    pub primary_genre: String,
    /// Model affinity score in (0, 1)
    pub score: f32,
}

/// Recommendation engine over the shared read-only context.
///
/// Holds the dataset, codec, and model behind `Arc`s; every request is a
/// pure read, so one engine can serve any number of logical callers.
#[derive(Clone)]
pub struct Recommender {
    dataset: Arc<Dataset>,
    codec: Arc<IdCodec>,
    model: Arc<MfModel>,
}

impl Recommender {
    /// Create an engine over an already-loaded context.
    ///
    /// The model must have been loaded against this codec's index-space
    /// sizes; `MfModel::load` enforces that at startup.
    pub fn new(dataset: Arc<Dataset>, codec: Arc<IdCodec>, model: Arc<MfModel>) -> Self {
        Self {
            dataset,
            codec,
            model,
        }
    }

    /// Generate the top `top_n` recommendations for a user.
    ///
    /// Returns an empty vector for users with no rating history and for
    /// users with nothing left to recommend; neither is an error. Scores
    /// are descending; equal scores keep catalog enumeration order.
    #[instrument(skip(self))]
    pub fn recommend(&self, user_id: UserId, top_n: usize) -> Result<Vec<Recommendation>> {
        let start = Instant::now();

        // Cold-start policy: no history means no recommendations
        let history = self.dataset.ratings_for_user(user_id);
        if history.is_empty() {
            info!("User {} has no rating history, returning empty", user_id);
            return Ok(Vec::new());
        }

        let candidates = self.build_candidates(history.iter().map(|r| r.movie_id));
        debug!(
            "Built candidate set for user {}: {} movies",
            user_id,
            candidates.len()
        );
        if candidates.is_empty() {
            info!("No scoreable candidates for user {}, returning empty", user_id);
            return Ok(Vec::new());
        }

        // Encode the user once and the whole candidate set in one call.
        // Candidates passed the codec membership filter, and a user with
        // history is in the codec by construction, so neither can fail.
        let user_idx = self
            .codec
            .encode_user(user_id)
            .context("Encoding a user with rating history")?;
        let movie_idxs = self
            .codec
            .encode_movies(&candidates)
            .context("Encoding codec-filtered candidates")?;

        // One batch, one model invocation
        let pairs: Vec<(usize, usize)> = movie_idxs.into_iter().map(|m| (user_idx, m)).collect();
        let scores = self
            .model
            .predict(&pairs)
            .context("Scoring candidate batch")?;

        let recommendations = self.rank_and_select(candidates, scores, top_n);

        info!(
            "Generated {} recommendations for user {} in {:.2?}",
            recommendations.len(),
            user_id,
            start.elapsed()
        );
        Ok(recommendations)
    }

    /// Candidate set: catalog in load order, minus rated, minus movies
    /// unknown to the codec (never rated by anyone during training, hence
    /// no learned embedding).
    fn build_candidates(&self, rated: impl Iterator<Item = MovieId>) -> Vec<MovieId> {
        let rated: HashSet<MovieId> = rated.collect();
        self.dataset
            .movies()
            .map(|m| m.id)
            .filter(|id| !rated.contains(id) && self.codec.contains_movie(*id))
            .collect()
    }

    /// Rank candidates by score and assemble the top N results.
    fn rank_and_select(
        &self,
        candidates: Vec<MovieId>,
        scores: Vec<f32>,
        top_n: usize,
    ) -> Vec<Recommendation> {
        let mut scored: Vec<(MovieId, f32)> = candidates.into_iter().zip(scores).collect();

        // Stable sort: equal scores keep candidate enumeration order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_n);

        scored
            .into_iter()
            .filter_map(|(movie_id, score)| {
                let movie = self.dataset.movie(movie_id)?;
                Some(Recommendation {
                    movie_id,
                    title: movie.title.clone(),
                    primary_genre: movie.primary_genre().to_string(),
                    score,
                })
            })
            .collect()
    }
}
