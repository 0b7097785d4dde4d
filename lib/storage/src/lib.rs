pub mod manifest;
pub mod store;

pub use manifest::{ArtifactEntry, Manifest};
pub use store::{ArtifactStore, BOOK_NAMES_FILE, MANIFEST_FILE, MODEL_FILE, PIVOT_FILE, RATINGS_FILE};
