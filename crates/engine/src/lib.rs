//! Engine crate for the Cinematch recommendation core.
//!
//! This crate exposes the two operations the presentation layer calls:
//! [`Recommender::recommend`] and [`FavoritesExtractor::top_favorites`].
//! Both operate over the shared read-only context (dataset, codec, model)
//! loaded once at startup; neither mutates anything.

pub mod favorites;
pub mod recommender;

pub use favorites::{Favorite, FavoritesExtractor};
pub use recommender::{Recommendation, Recommender};
