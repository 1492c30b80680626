use crate::error::{AppError, AppResult};

/// A single entry of a similarity row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub score: f64,
}

/// Precomputed square matrix of pairwise similarity scores
///
/// Stored row-major. Scores are only read, never computed here.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds the matrix from its rows, rejecting non-square or non-finite input
    pub fn from_rows(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(AppError::InvalidDataset(format!(
                    "similarity row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            if let Some(j) = row.iter().position(|score| !score.is_finite()) {
                return Err(AppError::InvalidDataset(format!(
                    "similarity score at ({}, {}) is not a finite number",
                    i, j
                )));
            }
            scores.extend(row);
        }

        Ok(Self { size, scores })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Scores of `index` against every item, in ascending neighbor order
    pub fn row_for(&self, index: usize) -> AppResult<Vec<Neighbor>> {
        if index >= self.size {
            return Err(AppError::OutOfRange {
                index,
                len: self.size,
            });
        }

        let start = index * self.size;
        Ok(self.scores[start..start + self.size]
            .iter()
            .enumerate()
            .map(|(index, &score)| Neighbor { index, score })
            .collect())
    }
}
