use std::collections::HashMap;

use crate::error::{AppError, AppResult};

/// Ordered, immutable list of movie titles
///
/// A title's position in this list is its index in the similarity matrix.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    titles: Vec<String>,
    index_by_title: HashMap<String, usize>,
}

impl CatalogStore {
    /// Builds the store from titles in load order
    ///
    /// Duplicate titles keep their first position for lookups.
    pub fn new(titles: Vec<String>) -> Self {
        let mut index_by_title = HashMap::with_capacity(titles.len());
        for (index, title) in titles.iter().enumerate() {
            index_by_title.entry(title.clone()).or_insert(index);
        }

        Self {
            titles,
            index_by_title,
        }
    }

    /// Exact, case-sensitive lookup of a title's index
    pub fn lookup_index(&self, title: &str) -> AppResult<usize> {
        self.index_by_title
            .get(title)
            .copied()
            .ok_or_else(|| AppError::NotFound(title.to_string()))
    }

    pub fn title_at(&self, index: usize) -> AppResult<&str> {
        self.titles
            .get(index)
            .map(String::as_str)
            .ok_or(AppError::OutOfRange {
                index,
                len: self.titles.len(),
            })
    }

    /// All titles in load order
    pub fn all_titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CatalogStore {
        CatalogStore::new(vec![
            "Avatar".to_string(),
            "Titanic".to_string(),
            "The Dark Knight".to_string(),
        ])
    }

    #[test]
    fn test_lookup_index() {
        let catalog = catalog();
        assert_eq!(catalog.lookup_index("Avatar").unwrap(), 0);
        assert_eq!(catalog.lookup_index("The Dark Knight").unwrap(), 2);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = catalog();
        let err = catalog.lookup_index("titanic").unwrap_err();
        assert!(matches!(err, AppError::NotFound(title) if title == "titanic"));
    }

    #[test]
    fn test_duplicate_titles_resolve_to_first() {
        let catalog = CatalogStore::new(vec![
            "Heat".to_string(),
            "Alien".to_string(),
            "Heat".to_string(),
        ]);
        assert_eq!(catalog.lookup_index("Heat").unwrap(), 0);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_title_at() {
        let catalog = catalog();
        assert_eq!(catalog.title_at(1).unwrap(), "Titanic");
        assert!(matches!(
            catalog.title_at(3),
            Err(AppError::OutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_all_titles_preserves_load_order() {
        let catalog = catalog();
        assert_eq!(
            catalog.all_titles(),
            &["Avatar", "Titanic", "The Dark Knight"]
        );
        assert!(!catalog.is_empty());
    }
}
