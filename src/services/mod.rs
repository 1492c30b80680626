pub mod artifacts;
pub mod catalog;
pub mod dataset;
pub mod posters;
pub mod providers;
pub mod recommendations;
pub mod similarity;

pub use catalog::CatalogStore;
pub use dataset::Dataset;
pub use posters::PosterSettings;
pub use providers::{NoopPosterProvider, PosterProvider, TmdbPosterProvider};
pub use recommendations::RecommendationEngine;
pub use similarity::SimilarityMatrix;
