//! # bookrec
//!
//! Item-based book recommendations served as a web page.
//!
//! A nearest-neighbor model over a title x reader rating matrix is fitted
//! offline and stored as four artifacts. bookrec loads them once, then for a
//! selected title looks up its nearest rows, attaches poster, rating and a
//! search link to each, shuffles the results and renders them as cards.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! bookrec --artifacts-dir ./artifacts --http-port 8501
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use bookrec::prelude::*;
//!
//! let artifacts = ArtifactStore::new("./artifacts").load().unwrap();
//! let recommender = Recommender::new(artifacts, RecommenderConfig::default()).unwrap();
//!
//! let result = recommender.present("Harry Potter and the Chamber of Secrets (Book 2)").unwrap();
//! for card in result.cards(5) {
//!     println!("{} ({}) -> {}", card.title, card.rating, card.link);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `bookrec-core` - Pivot matrix, ratings table, neighbor index, recommender
//! - `bookrec-storage` - Artifact store (bincode blobs, manifest checksums)
//! - `bookrec-api` - HTML page and JSON endpoints on actix-web

// Re-export core types
pub use bookrec_core::{
    Artifacts, Distance, Error, MissPolicy, Neighbor, NeighborIndex, PivotMatrix, RatingRow,
    RatingsTable, Recommendation, RecommendationResult, Recommender, RecommenderConfig, Result,
    Vector,
};

// Re-export storage
pub use bookrec_storage::{ArtifactStore, Manifest};

// Re-export API
pub use bookrec_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ArtifactStore, Artifacts, Distance, Error, MissPolicy, PivotMatrix, RatingRow,
        RatingsTable, Recommendation, RecommendationResult, Recommender, RecommenderConfig,
        Result, RestApi,
    };
}

/// Search link helpers
pub mod link {
    pub use bookrec_core::link::{decode_query, encode_query, search_link, DEFAULT_SEARCH_BASE};
}
