//! # bookrec Core
//!
//! Core library for the bookrec book recommender.
//!
//! This crate provides the data structures and lookups behind a recommendation:
//!
//! - [`PivotMatrix`] - Title x rater rating matrix
//! - [`RatingsTable`] - Poster, rating and author per title
//! - [`NeighborIndex`] - Fitted k-nearest-neighbor index over pivot rows
//! - [`Recommender`] - Immutable context running lookup, enrichment and shuffle
//! - [`RecommendationResult`] - Index-aligned titles, posters, ratings and links
//!
//! ## Example
//!
//! ```rust
//! use bookrec_core::{Artifacts, Distance, PivotMatrix, RatingRow, RatingsTable, Recommender, RecommenderConfig};
//!
//! let pivot = PivotMatrix::from_ratings(vec![
//!     ("Dune", "u1", 9.0),
//!     ("Foundation", "u1", 8.0),
//!     ("Emma", "u2", 6.0),
//! ]).unwrap();
//! let ratings = RatingsTable::new(vec![
//!     RatingRow::new("Dune", "http://img/dune.jpg", 9.0),
//!     RatingRow::new("Foundation", "http://img/foundation.jpg", 8.0),
//! ]);
//!
//! let config = RecommenderConfig { neighbors: 2, display_count: 2, ..Default::default() };
//! let recommender = Recommender::new(
//!     Artifacts::from_pivot(pivot, ratings, Distance::Cosine),
//!     config,
//! ).unwrap();
//!
//! let titles = recommender.recommend("Dune").unwrap();
//! assert_eq!(titles, vec!["Dune", "Foundation"]);
//! ```

pub mod artifacts;
pub mod distance;
pub mod error;
pub mod feedback;
pub mod link;
pub mod neighbors;
pub mod pivot;
pub mod ratings;
pub mod recommender;
pub mod result;
pub mod vector;

pub use artifacts::Artifacts;
pub use distance::Distance;
pub use error::{Error, Result};
pub use feedback::{submit_feedback, FeedbackAck, FEEDBACK_THANKS};
pub use link::{search_link, DEFAULT_SEARCH_BASE};
pub use neighbors::{Neighbor, NeighborIndex, NeighborIndexData};
pub use pivot::{PivotMatrix, PivotMatrixData};
pub use ratings::{RatingRow, RatingsTable};
pub use recommender::{MissPolicy, Recommender, RecommenderConfig};
pub use result::{random_permutation, shuffle_parallel, Recommendation, RecommendationResult};
pub use vector::Vector;
