//! Story catalog lookup.

use async_trait::async_trait;
use betal_core::error::DomainError;

use crate::application::loader;
use crate::domain::story::Story;

/// Bundled catalog data, in the web client's JSON format.
const BUILTIN_STORIES_JSON: &str = include_str!("../../data/stories.json");

/// Read-only source of stories. Implementations may be remote, so lookups are
/// async and may fail.
#[async_trait]
pub trait StoryCatalog: Send + Sync {
    /// All stories for `theme` (primary theme or tag), in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the catalog is unreachable.
    async fn stories_by_theme(&self, theme: &str) -> Result<Vec<Story>, DomainError>;

    /// The story with `id`, if present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the catalog is unreachable.
    async fn story_by_id(&self, id: &str) -> Result<Option<Story>, DomainError>;

    /// Number of stories the catalog can serve.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the catalog is unreachable.
    async fn story_count(&self) -> Result<usize, DomainError>;
}

/// A catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    stories: Vec<Story>,
}

impl InMemoryCatalog {
    /// Creates a catalog from already-validated stories.
    #[must_use]
    pub fn new(stories: Vec<Story>) -> Self {
        Self { stories }
    }

    /// The catalog bundled with the crate: one story per built-in theme.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the bundled data fails to parse.
    pub fn builtin() -> Result<Self, DomainError> {
        Ok(Self::new(loader::parse_stories_json(BUILTIN_STORIES_JSON)?))
    }

    /// All stories, in catalog order.
    #[must_use]
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Number of stories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Whether the catalog holds no stories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Distinct primary themes, in order of first appearance.
    #[must_use]
    pub fn themes(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for story in &self.stories {
            if !seen.contains(&story.theme.as_str()) {
                seen.push(&story.theme);
            }
        }
        seen
    }
}

#[async_trait]
impl StoryCatalog for InMemoryCatalog {
    async fn stories_by_theme(&self, theme: &str) -> Result<Vec<Story>, DomainError> {
        Ok(self
            .stories
            .iter()
            .filter(|s| s.matches_theme(theme))
            .cloned()
            .collect())
    }

    async fn story_by_id(&self, id: &str) -> Result<Option<Story>, DomainError> {
        Ok(self.stories.iter().find(|s| s.id == id).cloned())
    }

    async fn story_count(&self) -> Result<usize, DomainError> {
        Ok(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_one_story_per_theme() {
        let catalog = InMemoryCatalog::builtin().unwrap();

        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.themes(),
            vec!["wisdom", "courage", "kindness", "justice"]
        );
    }

    #[tokio::test]
    async fn test_stories_by_theme_filters_by_theme() {
        let catalog = InMemoryCatalog::builtin().unwrap();

        let stories = catalog.stories_by_theme("courage").await.unwrap();

        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].id, "courage-1");
        assert_eq!(stories[0].correct_answer_index, 1);
    }

    #[tokio::test]
    async fn test_story_count_matches_len() {
        let catalog = InMemoryCatalog::builtin().unwrap();

        assert_eq!(catalog.story_count().await.unwrap(), catalog.len());
    }

    #[tokio::test]
    async fn test_stories_by_theme_unknown_theme_is_empty() {
        let catalog = InMemoryCatalog::builtin().unwrap();

        let stories = catalog.stories_by_theme("greed").await.unwrap();

        assert!(stories.is_empty());
    }

    #[tokio::test]
    async fn test_story_by_id_finds_story() {
        let catalog = InMemoryCatalog::builtin().unwrap();

        let story = catalog.story_by_id("justice-1").await.unwrap().unwrap();

        assert_eq!(story.title, "The Honest Merchant's Scale");
        assert_eq!(story.subtitles.len(), 6);
        assert!(catalog.story_by_id("missing").await.unwrap().is_none());
    }
}
