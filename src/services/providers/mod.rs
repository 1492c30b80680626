//! Movie metadata providers used to decorate recommendations with posters
//!
//! Providers are looked up once per recommended title. They never influence
//! ranking; a provider that fails or finds nothing just leaves the poster empty.

use crate::error::AppResult;

pub mod tmdb;

pub use tmdb::TmdbPosterProvider;

/// Trait for poster metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Resolve a movie title to a displayable poster URL
    ///
    /// `Ok(None)` means the provider answered but has no poster for the title.
    async fn resolve_poster_url(&self, title: &str) -> AppResult<Option<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Provider used when no metadata service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPosterProvider;

#[async_trait::async_trait]
impl PosterProvider for NoopPosterProvider {
    async fn resolve_poster_url(&self, _title: &str) -> AppResult<Option<String>> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
