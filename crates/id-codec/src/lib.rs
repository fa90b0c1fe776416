//! # Identifier Codec Crate
//!
//! Bidirectional mapping between natural-domain identifiers (user ids,
//! movie ids) and the dense zero-based index space the scoring model is
//! shaped by.
//!
//! The codec is fit exactly once, on the interaction store: every user and
//! every movie that appears in at least one rating gets one index in
//! `[0, count)`. A catalog movie nobody has rated has no learned embedding
//! and is absent from the codec; encoding it is an error, never a silent
//! assignment, so callers filter candidates by membership before scoring.
//!
//! Index assignment is deterministic: unique ids sorted ascending, index =
//! rank. A model artifact trained against the same interaction set
//! therefore lines up row-for-row with this codec.
//!
//! ## Example Usage
//!
//! ```ignore
//! use id_codec::IdCodec;
//!
//! let codec = IdCodec::fit(dataset.ratings());
//! let user_idx = codec.encode_user(42)?;
//! let movie_idxs = codec.encode_movies(&candidates)?;
//! ```

use data_loader::{MovieId, Rating, UserId};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::info;

/// Errors returned when encoding identifiers absent at fit time
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    /// User id was not present in the interaction store at fit time
    #[error("Unknown user id: {0}")]
    UnknownUser(UserId),

    /// Movie id was not present in the interaction store at fit time
    #[error("Unknown movie id: {0}")]
    UnknownMovie(MovieId),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CodecError>;

/// Bijective mapping from natural ids to dense model indices.
///
/// Built once from the full interaction store; no insertion afterwards.
/// Indices are stable for the process lifetime.
#[derive(Debug, Clone)]
pub struct IdCodec {
    user_index: HashMap<UserId, usize>,
    movie_index: HashMap<MovieId, usize>,
}

impl IdCodec {
    /// Fit the codec on the interaction store.
    ///
    /// Collects the distinct user and movie ids appearing in `ratings`,
    /// sorts each set ascending, and assigns indices by rank.
    pub fn fit(ratings: &[Rating]) -> Self {
        let user_ids: BTreeSet<UserId> = ratings.iter().map(|r| r.user_id).collect();
        let movie_ids: BTreeSet<MovieId> = ratings.iter().map(|r| r.movie_id).collect();

        let user_index = user_ids.into_iter().enumerate().map(|(i, id)| (id, i)).collect();
        let movie_index = movie_ids.into_iter().enumerate().map(|(i, id)| (id, i)).collect();

        let codec = Self {
            user_index,
            movie_index,
        };
        info!(
            "Fit codec: {} users, {} movies",
            codec.num_users(),
            codec.num_movies()
        );
        codec
    }

    /// Size of the user index space
    pub fn num_users(&self) -> usize {
        self.user_index.len()
    }

    /// Size of the movie index space
    pub fn num_movies(&self) -> usize {
        self.movie_index.len()
    }

    /// True if the user was present at fit time
    pub fn contains_user(&self, id: UserId) -> bool {
        self.user_index.contains_key(&id)
    }

    /// True if the movie was present at fit time
    pub fn contains_movie(&self, id: MovieId) -> bool {
        self.movie_index.contains_key(&id)
    }

    /// Encode a user id to its model index
    pub fn encode_user(&self, id: UserId) -> Result<usize> {
        self.user_index
            .get(&id)
            .copied()
            .ok_or(CodecError::UnknownUser(id))
    }

    /// Encode a movie id to its model index
    pub fn encode_movie(&self, id: MovieId) -> Result<usize> {
        self.movie_index
            .get(&id)
            .copied()
            .ok_or(CodecError::UnknownMovie(id))
    }

    /// Encode a batch of movie ids, preserving order.
    ///
    /// Fails atomically: if any id is unknown the whole call errors and no
    /// partial encoding is returned.
    pub fn encode_movies(&self, ids: &[MovieId]) -> Result<Vec<usize>> {
        ids.iter().map(|&id| self.encode_movie(id)).collect()
    }
}
