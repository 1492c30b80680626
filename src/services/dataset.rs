use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::CatalogEntry,
    services::{catalog::CatalogStore, similarity::SimilarityMatrix},
};

/// Catalog and similarity matrix loaded together
///
/// Built once at startup and shared read-only; both halves are indexed by the
/// same item positions.
#[derive(Debug)]
pub struct Dataset {
    catalog: CatalogStore,
    matrix: SimilarityMatrix,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Pairs a catalog with its matrix, rejecting mismatched dimensions
    pub fn new(catalog: CatalogStore, matrix: SimilarityMatrix) -> AppResult<Self> {
        if catalog.len() != matrix.size() {
            return Err(AppError::InvalidDataset(format!(
                "catalog has {} movies but similarity matrix is {}x{}",
                catalog.len(),
                matrix.size(),
                matrix.size()
            )));
        }

        Ok(Self {
            catalog,
            matrix,
            loaded_at: Utc::now(),
        })
    }

    /// Convenience constructor from raw titles and rows
    pub fn from_parts(titles: Vec<String>, rows: Vec<Vec<f64>>) -> AppResult<Self> {
        Self::new(CatalogStore::new(titles), SimilarityMatrix::from_rows(rows)?)
    }

    /// Reads the catalog and matrix artifacts from disk
    pub fn load(movies_path: &Path, similarity_path: &Path) -> anyhow::Result<Self> {
        let entries: Vec<CatalogEntry> = read_json(movies_path)?;
        let rows: Vec<Vec<f64>> = read_json(similarity_path)?;

        let titles = entries.into_iter().map(CatalogEntry::into_title).collect();
        let dataset = Self::from_parts(titles, rows)?;

        tracing::info!(
            movies = dataset.catalog.len(),
            movies_path = %movies_path.display(),
            similarity_path = %similarity_path.display(),
            "Dataset loaded"
        );

        Ok(dataset)
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_from_parts_aligned() {
        let dataset = Dataset::from_parts(
            vec!["A".to_string(), "B".to_string()],
            vec![vec![1.0, 0.4], vec![0.4, 1.0]],
        )
        .unwrap();

        assert_eq!(dataset.catalog().len(), 2);
        assert_eq!(dataset.matrix().size(), 2);
    }

    #[test]
    fn test_misaligned_dimensions_rejected() {
        let result = Dataset::from_parts(
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec![vec![1.0, 0.4], vec![0.4, 1.0]],
        );
        assert!(matches!(result, Err(AppError::InvalidDataset(_))));
    }

    #[test]
    fn test_load_from_files() {
        let movies = write_temp(r#"[{"movie_id": 19995, "title": "Avatar"}, "Spectre"]"#);
        let similarity = write_temp("[[1.0, 0.1], [0.1, 1.0]]");

        let dataset = Dataset::load(movies.path(), similarity.path()).unwrap();

        assert_eq!(dataset.catalog().all_titles(), &["Avatar", "Spectre"]);
        assert_eq!(dataset.catalog().lookup_index("Spectre").unwrap(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let similarity = write_temp("[]");
        let err = Dataset::load(Path::new("/nonexistent/movies.json"), similarity.path())
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/movies.json"));
    }

    #[test]
    fn test_load_malformed_matrix() {
        let movies = write_temp(r#"["Avatar"]"#);
        let similarity = write_temp(r#"{"not": "a matrix"}"#);
        assert!(Dataset::load(movies.path(), similarity.path()).is_err());
    }
}
