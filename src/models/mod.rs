use serde::{Deserialize, Serialize};

/// One element of the catalog artifact
///
/// Artifacts exported from a data frame carry extra columns alongside the title,
/// while hand-written ones are often a bare list of names. Both are accepted.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CatalogEntry {
    Title(String),
    Record {
        title: String,
        #[serde(default)]
        movie_id: Option<u64>,
    },
}

impl CatalogEntry {
    pub fn into_title(self) -> String {
        match self {
            CatalogEntry::Title(title) => title,
            CatalogEntry::Record { title, .. } => title,
        }
    }
}

/// A ranked neighbor of the queried movie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredTitle {
    /// Position of the neighbor in the catalog and matrix
    #[serde(skip)]
    pub index: usize,
    pub title: String,
    pub score: f64,
}

/// A ranked neighbor enriched with its poster
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub score: f64,
    /// Absent when no poster was found or the lookup failed
    pub poster_url: Option<String>,
}

/// Response body for the recommendations endpoint
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// The movie the recommendations were computed for
    pub title: String,
    pub recommendations: Vec<Recommendation>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from GET /search/movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

/// A single movie in a TMDB search result
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}
