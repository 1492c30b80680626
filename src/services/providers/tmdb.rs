//! The Movie Database (TMDB) poster provider
//!
//! Searches TMDB by title and uses the first match's poster. TMDB returns
//! relative `poster_path` values; they are joined to a sized image base URL.
//!
//! API Flow:
//! 1. Search: /search/movie?query={title} → ranked matches with `poster_path`
//! 2. Poster: {image_base_url}{poster_path}

use crate::{
    cache::{Cache, CacheKey},
    cached,
    error::{AppError, AppResult},
    models::TmdbSearchResponse,
    services::providers::PosterProvider,
};
use reqwest::Client as HttpClient;

const POSTER_CACHE_TTL: u64 = 604800; // 1 week
const SEARCH_LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbPosterProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
    cache: Cache,
}

impl TmdbPosterProvider {
    pub fn new(
        http_client: HttpClient,
        cache: Cache,
        api_key: String,
        api_url: String,
        image_base_url: String,
    ) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    /// Poster URL of the first search result, if it has one
    fn poster_from_search(&self, response: &TmdbSearchResponse) -> Option<String> {
        let path = response.results.first()?.poster_path.as_deref()?;
        if path.is_empty() {
            return None;
        }

        if path.starts_with('/') {
            Some(format!("{}{}", self.image_base_url, path))
        } else {
            Some(format!("{}/{}", self.image_base_url, path))
        }
    }

    async fn search_poster(&self, title: &str) -> AppResult<Option<String>> {
        let url = format!("{}/search/movie", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", title),
                ("language", SEARCH_LANGUAGE),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let search: TmdbSearchResponse = response.json().await?;
        let poster = self.poster_from_search(&search);

        tracing::debug!(
            title = %title,
            results = search.results.len(),
            found = poster.is_some(),
            provider = "tmdb",
            "Poster search completed"
        );

        Ok(poster)
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbPosterProvider {
    async fn resolve_poster_url(&self, title: &str) -> AppResult<Option<String>> {
        if title.trim().is_empty() {
            return Ok(None);
        }

        cached!(
            self.cache,
            CacheKey::Poster(title.to_string()),
            POSTER_CACHE_TTL,
            self.search_poster(title)
        )
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::create_redis_client;

    fn create_test_provider(image_base_url: &str) -> TmdbPosterProvider {
        let client = create_redis_client("redis://127.0.0.1:1").unwrap();
        let (cache, _handle) = Cache::new(client);

        TmdbPosterProvider::new(
            HttpClient::new(),
            cache,
            "test_key".to_string(),
            "http://test.local/3/".to_string(),
            image_base_url.to_string(),
        )
    }

    fn search(json: &str) -> TmdbSearchResponse {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_poster_from_first_result() {
        let provider = create_test_provider("https://image.tmdb.org/t/p/w500");
        let response = search(
            r#"{"results": [
                {"id": 155, "title": "The Dark Knight", "poster_path": "/qJ2tW6WMUDux911r6m7haRef0WH.jpg"},
                {"id": 272, "title": "Batman Begins", "poster_path": "/other.jpg"}
            ]}"#,
        );

        assert_eq!(
            provider.poster_from_search(&response).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/qJ2tW6WMUDux911r6m7haRef0WH.jpg")
        );
    }

    #[tokio::test]
    async fn test_first_result_without_poster_is_absent() {
        let provider = create_test_provider("https://image.tmdb.org/t/p/w500");
        let response = search(
            r#"{"results": [
                {"id": 1, "title": "Obscure", "poster_path": null},
                {"id": 2, "title": "Obscure II", "poster_path": "/p.jpg"}
            ]}"#,
        );

        assert!(provider.poster_from_search(&response).is_none());
    }

    #[tokio::test]
    async fn test_no_results_is_absent() {
        let provider = create_test_provider("https://image.tmdb.org/t/p/w500");
        assert!(provider
            .poster_from_search(&search(r#"{"results": []}"#))
            .is_none());
    }

    #[tokio::test]
    async fn test_trailing_slashes_normalized() {
        let provider = create_test_provider("https://image.tmdb.org/t/p/w500/");
        let response = search(r#"{"results": [{"id": 3, "poster_path": "/x.jpg"}]}"#);

        assert_eq!(provider.api_url, "http://test.local/3");
        assert_eq!(
            provider.poster_from_search(&response).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/x.jpg")
        );
    }

    #[tokio::test]
    async fn test_blank_title_skips_lookup() {
        let provider = create_test_provider("https://image.tmdb.org/t/p/w500");
        assert_eq!(provider.resolve_poster_url("   ").await.unwrap(), None);
        assert_eq!(provider.name(), "tmdb");
    }
}
