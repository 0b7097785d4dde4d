use crate::{Error, NeighborIndex, PivotMatrix, RatingsTable, Result};
use tracing::warn;

/// The four precomputed tables the recommender reads
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub index: NeighborIndex,
    /// Titles offered for selection
    pub book_names: Vec<String>,
    pub ratings: RatingsTable,
    pub pivot: PivotMatrix,
}

impl Artifacts {
    pub fn new(
        index: NeighborIndex,
        book_names: Vec<String>,
        ratings: RatingsTable,
        pivot: PivotMatrix,
    ) -> Self {
        Self {
            index,
            book_names,
            ratings,
            pivot,
        }
    }

    /// Fit an index over `pivot` and offer every pivot title for selection.
    pub fn from_pivot(pivot: PivotMatrix, ratings: RatingsTable, metric: crate::Distance) -> Self {
        let index = NeighborIndex::fit(&pivot, metric);
        let book_names = pivot.titles().to_vec();
        Self::new(index, book_names, ratings, pivot)
    }

    /// Check that the tables describe the same titles in the same row order.
    pub fn validate(&self) -> Result<()> {
        if self.index.len() != self.pivot.len() {
            return Err(Error::InvalidArtifact(format!(
                "neighbor index has {} rows, pivot matrix has {}",
                self.index.len(),
                self.pivot.len()
            )));
        }

        if !self.pivot.is_empty() && self.index.dim() != self.pivot.num_raters() {
            return Err(Error::InvalidDimension {
                expected: self.pivot.num_raters(),
                actual: self.index.dim(),
            });
        }

        if let Some(row) = self
            .index
            .rows()
            .iter()
            .zip(self.pivot.rows())
            .position(|(fitted, pivot_row)| fitted != pivot_row)
        {
            return Err(Error::InvalidArtifact(format!(
                "neighbor index row {} does not match pivot matrix row for {:?}",
                row,
                self.pivot.title(row).unwrap_or_default()
            )));
        }

        if let Some(missing) = self.book_names.iter().find(|t| !self.pivot.contains(t)) {
            return Err(Error::InvalidArtifact(format!(
                "book name not present in pivot matrix: {}",
                missing
            )));
        }

        let unrated = self
            .pivot
            .titles()
            .iter()
            .filter(|t| !self.ratings.contains(t))
            .count();
        if unrated > 0 {
            warn!(unrated, "pivot titles without a ratings entry");
        }

        Ok(())
    }
}
