//! # Matrix-Factorization Scoring Model
//!
//! Loads a trained matrix-factorization parameter snapshot and scores
//! (user index, movie index) pairs in batches.
//!
//! The scoring function is fixed by training: a latent vector per user, a
//! latent vector per movie, their inner product, plus one learned scalar
//! bias per user and per movie, passed through a sigmoid. Scores are
//! therefore bounded to (0, 1) and deterministic for a loaded parameter
//! set.
//!
//! The model cannot be loaded independently of the identifier codec: its
//! parameter matrices are shaped by the codec's two index-space sizes, and
//! [`MfModel::load`] rejects any artifact whose shape disagrees with them.
//!
//! ## Example Usage
//!
//! ```ignore
//! use mf_model::MfModel;
//!
//! let model = MfModel::load(Path::new("model/recommender.bin"),
//!                           codec.num_users(), codec.num_movies())?;
//! let scores = model.predict(&[(user_idx, movie_idx)])?;
//! ```

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading or invoking the scoring model
#[derive(Error, Debug)]
pub enum ModelError {
    /// Artifact file could not be found or opened
    #[error("Model artifact not found: {path}")]
    ArtifactNotFound { path: String },

    /// I/O error occurred while reading or writing the artifact
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Artifact bytes could not be decoded
    #[error("Corrupt model artifact: {0}")]
    CorruptArtifact(String),

    /// Artifact shape disagrees with the expected index-space sizes
    #[error("Shape mismatch for {field}: expected {expected}, found {found}")]
    ShapeMismatch {
        field: String,
        expected: usize,
        found: usize,
    },

    /// A predict index falls outside the model's index space
    #[error("{kind} index {index} out of range (size {size})")]
    IndexOutOfRange {
        kind: String,
        index: usize,
        size: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ModelError>;

// =============================================================================
// MfParams - the persisted parameter snapshot
// =============================================================================

/// Serializable parameter snapshot, as written by the training pipeline.
///
/// Weight matrices are stored row-major as flat vectors alongside their
/// shapes, and reconstructed into ndarray matrices on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MfParams {
    pub num_users: usize,
    pub num_movies: usize,
    pub embedding_dim: usize,
    /// User latent factors, row-major [num_users x embedding_dim]
    pub user_factors: Vec<f32>,
    /// Movie latent factors, row-major [num_movies x embedding_dim]
    pub item_factors: Vec<f32>,
    /// Per-user scalar bias [num_users]
    pub user_bias: Vec<f32>,
    /// Per-movie scalar bias [num_movies]
    pub item_bias: Vec<f32>,
}

impl MfParams {
    /// Persist the snapshot to a file with bincode encoding
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes =
            bincode::serialize(self).map_err(|e| ModelError::CorruptArtifact(e.to_string()))?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

// =============================================================================
// MfModel - the loaded scoring function
// =============================================================================

/// The loaded matrix-factorization model.
///
/// Construction validates every shape once; `predict` then only has to
/// bounds-check indices. Immutable after load, safe to share read-only.
#[derive(Debug)]
pub struct MfModel {
    user_factors: Array2<f32>,
    item_factors: Array2<f32>,
    user_bias: Array1<f32>,
    item_bias: Array1<f32>,
}

impl MfModel {
    /// Load the model from a persisted artifact.
    ///
    /// `num_users` and `num_movies` come from the identifier codec; an
    /// artifact trained against a different index space is rejected with
    /// a [`ModelError::ShapeMismatch`]. Any failure here is fatal for the
    /// serving process.
    pub fn load(path: &Path, num_users: usize, num_movies: usize) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ModelError::ArtifactNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ModelError::IoError(e)
            }
        })?;

        let params: MfParams = bincode::deserialize(&bytes)
            .map_err(|e| ModelError::CorruptArtifact(e.to_string()))?;

        if params.num_users != num_users {
            return Err(ModelError::ShapeMismatch {
                field: "num_users".to_string(),
                expected: num_users,
                found: params.num_users,
            });
        }
        if params.num_movies != num_movies {
            return Err(ModelError::ShapeMismatch {
                field: "num_movies".to_string(),
                expected: num_movies,
                found: params.num_movies,
            });
        }

        let model = Self::from_params(params)?;
        info!(
            "Loaded model artifact from {:?}: {} users x {} movies, dim {}",
            path,
            model.num_users(),
            model.num_movies(),
            model.embedding_dim()
        );
        Ok(model)
    }

    /// Build the model from an in-memory snapshot, validating all shapes.
    pub fn from_params(params: MfParams) -> Result<Self> {
        let MfParams {
            num_users,
            num_movies,
            embedding_dim,
            user_factors,
            item_factors,
            user_bias,
            item_bias,
        } = params;

        check_len("user_factors", num_users * embedding_dim, user_factors.len())?;
        check_len("item_factors", num_movies * embedding_dim, item_factors.len())?;
        check_len("user_bias", num_users, user_bias.len())?;
        check_len("item_bias", num_movies, item_bias.len())?;

        let user_factors = Array2::from_shape_vec((num_users, embedding_dim), user_factors)
            .map_err(|e| ModelError::CorruptArtifact(e.to_string()))?;
        let item_factors = Array2::from_shape_vec((num_movies, embedding_dim), item_factors)
            .map_err(|e| ModelError::CorruptArtifact(e.to_string()))?;

        Ok(Self {
            user_factors,
            item_factors,
            user_bias: Array1::from_vec(user_bias),
            item_bias: Array1::from_vec(item_bias),
        })
    }

    /// Size of the user index space
    pub fn num_users(&self) -> usize {
        self.user_factors.nrows()
    }

    /// Size of the movie index space
    pub fn num_movies(&self) -> usize {
        self.item_factors.nrows()
    }

    /// Latent dimension of the factor matrices
    pub fn embedding_dim(&self) -> usize {
        self.user_factors.ncols()
    }

    /// Score a batch of (user index, movie index) pairs.
    ///
    /// Returns one score per input pair, in input order, each in (0, 1).
    /// The whole batch is scored in this one call; callers must not loop
    /// over per-pair invocations.
    pub fn predict(&self, pairs: &[(usize, usize)]) -> Result<Vec<f32>> {
        let mut scores = Vec::with_capacity(pairs.len());

        for &(user_idx, movie_idx) in pairs {
            if user_idx >= self.num_users() {
                return Err(ModelError::IndexOutOfRange {
                    kind: "user".to_string(),
                    index: user_idx,
                    size: self.num_users(),
                });
            }
            if movie_idx >= self.num_movies() {
                return Err(ModelError::IndexOutOfRange {
                    kind: "movie".to_string(),
                    index: movie_idx,
                    size: self.num_movies(),
                });
            }

            let affinity = self
                .user_factors
                .row(user_idx)
                .dot(&self.item_factors.row(movie_idx))
                + self.user_bias[user_idx]
                + self.item_bias[movie_idx];

            scores.push(sigmoid(affinity));
        }

        Ok(scores)
    }
}

fn check_len(field: &str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(ModelError::ShapeMismatch {
            field: field.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

/// Squash a raw affinity into (0, 1)
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
