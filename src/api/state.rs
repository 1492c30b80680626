use std::sync::Arc;

use crate::services::{Dataset, PosterProvider, PosterSettings, RecommendationEngine};

/// Shared application state
///
/// Everything here is immutable after startup, so handlers share it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    pub engine: RecommendationEngine,
    pub poster_provider: Arc<dyn PosterProvider>,
    pub poster_settings: PosterSettings,
    /// Number of recommendations when the request does not specify one
    pub default_count: usize,
}

impl AppState {
    pub fn new(
        dataset: Arc<Dataset>,
        poster_provider: Arc<dyn PosterProvider>,
        poster_settings: PosterSettings,
        default_count: usize,
    ) -> Self {
        Self {
            engine: RecommendationEngine::new(dataset),
            poster_provider,
            poster_settings,
            default_count,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        self.engine.dataset()
    }
}
