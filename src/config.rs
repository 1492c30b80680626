use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the movie catalog artifact (JSON list of titles)
    #[serde(default = "default_movies_path")]
    pub movies_path: PathBuf,

    /// Path to the similarity matrix artifact (JSON list of rows)
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,

    /// Where to download the catalog from when `movies_path` is missing
    #[serde(default)]
    pub movies_url: Option<String>,

    /// Where to download the matrix from when `similarity_path` is missing
    #[serde(default)]
    pub similarity_url: Option<String>,

    /// TMDB API key; poster lookups are disabled without it
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with TMDB `poster_path` values
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Redis connection URL for the poster cache
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Number of recommendations returned when the caller does not ask for a count
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Per-title poster lookup timeout in milliseconds
    #[serde(default = "default_poster_timeout_ms")]
    pub poster_timeout_ms: u64,

    /// Maximum number of poster lookups in flight per request
    #[serde(default = "default_poster_concurrency")]
    pub poster_concurrency: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_movies_path() -> PathBuf {
    PathBuf::from("data/movies.json")
}

fn default_similarity_path() -> PathBuf {
    PathBuf::from("data/similarity.json")
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_recommendation_count() -> usize {
    30
}

fn default_poster_timeout_ms() -> u64 {
    5000
}

fn default_poster_concurrency() -> usize {
    8
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?
            .validated()
    }

    fn validated(self) -> anyhow::Result<Self> {
        if self.poster_concurrency == 0 {
            anyhow::bail!("POSTER_CONCURRENCY must be at least 1");
        }
        Ok(self)
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_millis(self.poster_timeout_ms)
    }

    /// Whether a non-empty TMDB key was supplied
    pub fn posters_enabled(&self) -> bool {
        self.tmdb_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}
