//! Test catalogs and story fixtures.

use async_trait::async_trait;
use betal_content::application::catalog::StoryCatalog;
use betal_content::domain::story::{RawStory, Story};
use betal_core::error::DomainError;

/// Builds a valid story with `id` and `theme`, two options, and the second
/// option correct.
///
/// # Panics
///
/// Never; the fixture always validates.
#[must_use]
pub fn story_fixture(id: &str, theme: &str) -> Story {
    Story::try_from(RawStory {
        id: id.to_owned(),
        title: format!("Tale {id}"),
        theme: theme.to_owned(),
        content: "Once upon a time. The end.".to_owned(),
        question: "What is the lesson?".to_owned(),
        options: vec!["Greed".to_owned(), "Kindness".to_owned()],
        correct_answer: Some(1),
        moral: "Be kind.".to_owned(),
        ..RawStory::default()
    })
    .unwrap()
}

/// A catalog that is always unreachable.
#[derive(Debug)]
pub struct FailingCatalog;

#[async_trait]
impl StoryCatalog for FailingCatalog {
    async fn stories_by_theme(&self, _theme: &str) -> Result<Vec<Story>, DomainError> {
        Err(DomainError::Infrastructure("catalog unreachable".into()))
    }

    async fn story_by_id(&self, _id: &str) -> Result<Option<Story>, DomainError> {
        Err(DomainError::Infrastructure("catalog unreachable".into()))
    }

    async fn story_count(&self) -> Result<usize, DomainError> {
        Err(DomainError::Infrastructure("catalog unreachable".into()))
    }
}
