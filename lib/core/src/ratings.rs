//! Display metadata per title.
//!
//! Rows are keyed loosely by title: the same title may appear on many rows
//! (one per rater in the source data). Lookups return the first match.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingRow {
    pub title: String,
    pub image_url: String,
    pub rating: f32,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub publisher: Option<String>,
    /// Number of ratings the title received in the source data
    #[serde(default)]
    pub num_ratings: Option<u32>,
}

impl RatingRow {
    #[must_use]
    pub fn new(title: impl Into<String>, image_url: impl Into<String>, rating: f32) -> Self {
        Self {
            title: title.into(),
            image_url: image_url.into(),
            rating,
            author: None,
            year: None,
            publisher: None,
            num_ratings: None,
        }
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<RatingRow>", into = "Vec<RatingRow>")]
pub struct RatingsTable {
    rows: Vec<RatingRow>,
    first_by_title: AHashMap<String, usize>,
}

impl RatingsTable {
    pub fn new(rows: Vec<RatingRow>) -> Self {
        let mut first_by_title = AHashMap::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            first_by_title.entry(row.title.clone()).or_insert(idx);
        }
        Self {
            rows,
            first_by_title,
        }
    }

    /// First row whose title equals `title` exactly
    pub fn first_match(&self, title: &str) -> Option<&RatingRow> {
        self.first_by_title.get(title).map(|&idx| &self.rows[idx])
    }

    pub fn contains(&self, title: &str) -> bool {
        self.first_by_title.contains_key(title)
    }

    pub fn rows(&self) -> &[RatingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<RatingRow>> for RatingsTable {
    fn from(rows: Vec<RatingRow>) -> Self {
        Self::new(rows)
    }
}

impl From<RatingsTable> for Vec<RatingRow> {
    fn from(table: RatingsTable) -> Self {
        table.rows
    }
}
