//! Title x rater rating matrix.
//!
//! Row order is the integer index shared with the [`NeighborIndex`](crate::NeighborIndex):
//! row `i` of the matrix and row `i` of the index describe the same title.

use crate::{Error, Result, Vector};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Serialized form of a [`PivotMatrix`]. The title lookup table is rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotMatrixData {
    pub titles: Vec<String>,
    pub raters: Vec<String>,
    pub rows: Vec<Vector>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PivotMatrixData", into = "PivotMatrixData")]
pub struct PivotMatrix {
    titles: Vec<String>,
    raters: Vec<String>,
    rows: Vec<Vector>,
    // first row carrying each title
    by_title: AHashMap<String, usize>,
}

impl PivotMatrix {
    pub fn new(titles: Vec<String>, raters: Vec<String>, rows: Vec<Vector>) -> Result<Self> {
        if titles.len() != rows.len() {
            return Err(Error::InvalidArtifact(format!(
                "pivot matrix has {} titles but {} rows",
                titles.len(),
                rows.len()
            )));
        }

        for row in &rows {
            if row.dim() != raters.len() {
                return Err(Error::InvalidDimension {
                    expected: raters.len(),
                    actual: row.dim(),
                });
            }
        }

        let mut by_title = AHashMap::with_capacity(titles.len());
        for (idx, title) in titles.iter().enumerate() {
            by_title.entry(title.clone()).or_insert(idx);
        }

        Ok(Self {
            titles,
            raters,
            rows,
            by_title,
        })
    }

    /// Build a matrix from `(title, rater, rating)` triples.
    /// Titles and raters keep first-seen order; missing cells are 0.
    pub fn from_ratings<I, T, R>(ratings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, R, f32)>,
        T: Into<String>,
        R: Into<String>,
    {
        let mut titles: Vec<String> = Vec::new();
        let mut raters: Vec<String> = Vec::new();
        let mut title_idx: AHashMap<String, usize> = AHashMap::new();
        let mut rater_idx: AHashMap<String, usize> = AHashMap::new();
        let mut cells: Vec<(usize, usize, f32)> = Vec::new();

        for (title, rater, rating) in ratings {
            let title = title.into();
            let rater = rater.into();
            let t = *title_idx.entry(title.clone()).or_insert_with(|| {
                titles.push(title);
                titles.len() - 1
            });
            let r = *rater_idx.entry(rater.clone()).or_insert_with(|| {
                raters.push(rater);
                raters.len() - 1
            });
            cells.push((t, r, rating));
        }

        let mut rows = vec![vec![0.0f32; raters.len()]; titles.len()];
        for (t, r, rating) in cells {
            rows[t][r] = rating;
        }

        Self::new(titles, raters, rows.into_iter().map(Vector::new).collect())
    }

    /// Row index of the first row labelled exactly `title`
    pub fn row_of(&self, title: &str) -> Option<usize> {
        self.by_title.get(title).copied()
    }

    pub fn title(&self, row: usize) -> Option<&str> {
        self.titles.get(row).map(String::as_str)
    }

    pub fn row(&self, idx: usize) -> Option<&Vector> {
        self.rows.get(idx)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn raters(&self) -> &[String] {
        &self.raters
    }

    pub fn rows(&self) -> &[Vector] {
        &self.rows
    }

    pub fn contains(&self, title: &str) -> bool {
        self.by_title.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn num_raters(&self) -> usize {
        self.raters.len()
    }
}

impl TryFrom<PivotMatrixData> for PivotMatrix {
    type Error = Error;

    fn try_from(data: PivotMatrixData) -> Result<Self> {
        Self::new(data.titles, data.raters, data.rows)
    }
}

impl From<PivotMatrix> for PivotMatrixData {
    fn from(matrix: PivotMatrix) -> Self {
        Self {
            titles: matrix.titles,
            raters: matrix.raters,
            rows: matrix.rows,
        }
    }
}
