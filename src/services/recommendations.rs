use std::{cmp::Ordering, sync::Arc};

use crate::{error::AppResult, models::ScoredTitle, services::dataset::Dataset};

/// Ranks movies by precomputed similarity to a selected title
///
/// Holds a handle to the loaded dataset and nothing else, so it is cheap to
/// clone and safe to call from many tasks at once. Ranking never performs I/O
/// and never logs; callers decide how to surface errors.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    dataset: Arc<Dataset>,
}

impl RecommendationEngine {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Titles of the `k` movies most similar to `title`, best first
    ///
    /// Returns `min(k, movies - 1)` titles and never the queried title itself.
    /// Fails with `NotFound` when the title is not in the catalog.
    pub fn recommend(&self, title: &str, k: usize) -> AppResult<Vec<String>> {
        Ok(self
            .recommend_scored(title, k)?
            .into_iter()
            .map(|scored| scored.title)
            .collect())
    }

    /// Same ranking as [`recommend`](Self::recommend), keeping index and score
    pub fn recommend_scored(&self, title: &str, k: usize) -> AppResult<Vec<ScoredTitle>> {
        let catalog = self.dataset.catalog();
        let index = catalog.lookup_index(title)?;
        let mut row = self.dataset.matrix().row_for(index)?;

        // sort_by is stable: equal scores keep ascending index order
        row.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        row.into_iter()
            .filter(|neighbor| neighbor.index != index)
            .take(k)
            .map(|neighbor| -> AppResult<ScoredTitle> {
                Ok(ScoredTitle {
                    index: neighbor.index,
                    title: catalog.title_at(neighbor.index)?.to_string(),
                    score: neighbor.score,
                })
            })
            .collect()
    }
}
