//! Brute-force k-nearest-neighbor index over pivot matrix rows.

use crate::{Distance, Error, PivotMatrix, Result, Vector};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A neighbor returned by [`NeighborIndex::kneighbors`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    /// Row in the fitted matrix
    pub row: usize,
    pub distance: f32,
}

/// Serialized form of a [`NeighborIndex`], checked on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborIndexData {
    pub metric: Distance,
    pub dim: usize,
    pub rows: Vec<Vector>,
}

/// Fitted nearest-neighbor structure. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "NeighborIndexData", into = "NeighborIndexData")]
pub struct NeighborIndex {
    metric: Distance,
    dim: usize,
    rows: Vec<Vector>,
}

impl NeighborIndex {
    /// Fit over every row of `pivot`, keeping the matrix row order.
    pub fn fit(pivot: &PivotMatrix, metric: Distance) -> Self {
        Self {
            metric,
            dim: pivot.num_raters(),
            rows: pivot.rows().to_vec(),
        }
    }

    pub fn from_rows(rows: Vec<Vector>, metric: Distance) -> Result<Self> {
        let dim = rows.first().map(Vector::dim).unwrap_or(0);
        if let Some(bad) = rows.iter().find(|r| r.dim() != dim) {
            return Err(Error::InvalidDimension {
                expected: dim,
                actual: bad.dim(),
            });
        }
        Ok(Self { metric, dim, rows })
    }

    pub fn rows(&self) -> &[Vector] {
        &self.rows
    }

    pub fn metric(&self) -> Distance {
        self.metric
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `k` rows closest to `query`, nearest first.
    ///
    /// Ties are broken by row index so results are stable. A row identical to
    /// `query` is returned like any other. Fewer than `k` rows are returned
    /// when the index is smaller than `k`.
    pub fn kneighbors(&self, query: &Vector, k: usize) -> Result<Vec<Neighbor>> {
        if query.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: query.dim(),
            });
        }

        let mut scored: Vec<Neighbor> = self
            .rows
            .iter()
            .enumerate()
            .map(|(row, v)| Neighbor {
                row,
                distance: self.metric.between(query, v),
            })
            .collect();

        let key = |n: &Neighbor| (OrderedFloat(n.distance), n.row);
        if k < scored.len() {
            scored.select_nth_unstable_by_key(k, key);
            scored.truncate(k);
        }
        scored.sort_unstable_by_key(key);
        Ok(scored)
    }

    /// Neighbors of a row already in the index
    pub fn kneighbors_of_row(&self, row: usize, k: usize) -> Result<Vec<Neighbor>> {
        let query = self.rows.get(row).ok_or_else(|| {
            Error::InvalidArtifact(format!("row {} out of range for index of {}", row, self.rows.len()))
        })?;
        self.kneighbors(query, k)
    }
}

impl TryFrom<NeighborIndexData> for NeighborIndex {
    type Error = Error;

    fn try_from(data: NeighborIndexData) -> Result<Self> {
        if data.rows.is_empty() {
            return Ok(Self {
                metric: data.metric,
                dim: data.dim,
                rows: data.rows,
            });
        }
        let index = Self::from_rows(data.rows, data.metric)?;
        if index.dim != data.dim {
            return Err(Error::InvalidDimension {
                expected: data.dim,
                actual: index.dim,
            });
        }
        Ok(index)
    }
}

impl From<NeighborIndex> for NeighborIndexData {
    fn from(index: NeighborIndex) -> Self {
        Self {
            metric: index.metric,
            dim: index.dim,
            rows: index.rows,
        }
    }
}
