//! Parsing catalog files and overlaying generated media metadata.
//!
//! Records are validated one by one: a malformed record is logged and
//! skipped, it never poisons the rest of the catalog.

use std::collections::HashMap;
use std::path::Path;

use betal_core::error::DomainError;
use serde::Deserialize;
use tracing::{info, warn};

use crate::application::catalog::InMemoryCatalog;
use crate::domain::media::normalize_media_path;
use crate::domain::story::{RawStory, Story};
use crate::domain::subtitles::SubtitleCue;

fn stories_from_records(records: Vec<serde_json::Value>) -> Vec<Story> {
    let mut stories: Vec<Story> = Vec::with_capacity(records.len());
    for (position, record) in records.into_iter().enumerate() {
        let story = serde_json::from_value::<RawStory>(record)
            .map_err(|e| DomainError::Validation(format!("record {position}: {e}")))
            .and_then(Story::try_from);
        match story {
            Ok(story) if stories.iter().any(|s| s.id == story.id) => {
                warn!(story_id = %story.id, "duplicate story id, keeping the first record");
            }
            Ok(story) => stories.push(story),
            Err(e) => warn!(position, error = %e, "skipping malformed story record"),
        }
    }
    stories
}

fn expect_array(value: serde_json::Value) -> Result<Vec<serde_json::Value>, DomainError> {
    match value {
        serde_json::Value::Array(records) => Ok(records),
        _ => Err(DomainError::Validation(
            "story catalog must be a list of records".to_owned(),
        )),
    }
}

/// Parses a JSON array of story records.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the input is not a JSON array.
pub fn parse_stories_json(input: &str) -> Result<Vec<Story>, DomainError> {
    let value: serde_json::Value = serde_json::from_str(input)
        .map_err(|e| DomainError::Validation(format!("invalid catalog JSON: {e}")))?;
    Ok(stories_from_records(expect_array(value)?))
}

/// Parses a YAML sequence of story records.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the input is not a YAML sequence.
pub fn parse_stories_yaml(input: &str) -> Result<Vec<Story>, DomainError> {
    let value: serde_json::Value = serde_yaml::from_str(input)
        .map_err(|e| DomainError::Validation(format!("invalid catalog YAML: {e}")))?;
    Ok(stories_from_records(expect_array(value)?))
}

/// Loads a catalog file, choosing the format from its extension
/// (`.json`, `.yaml`, `.yml`).
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the file cannot be read and
/// `DomainError::Validation` for an unknown extension or unparseable content.
pub fn load_catalog_file(path: &Path) -> Result<InMemoryCatalog, DomainError> {
    let input = std::fs::read_to_string(path).map_err(|e| {
        DomainError::Infrastructure(format!("cannot read catalog {}: {e}", path.display()))
    })?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let stories = match extension.as_deref() {
        Some("json") => parse_stories_json(&input)?,
        Some("yaml" | "yml") => parse_stories_yaml(&input)?,
        _ => {
            return Err(DomainError::Validation(format!(
                "unsupported catalog format: {}",
                path.display()
            )));
        }
    };
    info!(path = %path.display(), stories = stories.len(), "story catalog loaded");
    Ok(InMemoryCatalog::new(stories))
}

/// Media metadata written by the content generator for one story.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedMedia {
    pub id: String,
    pub images: Vec<String>,
    #[serde(alias = "audio_url")]
    pub audio_url: Option<String>,
    #[serde(alias = "video_url")]
    pub video_url: Option<String>,
    pub subtitles: Vec<SubtitleCue>,
}

/// Parses the generator's `all_stories_data.json`.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the input is not a JSON array of
/// media records.
pub fn parse_generated_media_json(input: &str) -> Result<Vec<GeneratedMedia>, DomainError> {
    serde_json::from_str(input)
        .map_err(|e| DomainError::Validation(format!("invalid generated media JSON: {e}")))
}

/// Overlays generated media onto `stories`, matching by id. Generated paths
/// are normalized; audio falls back to the video track when no narration
/// file exists. Fields the generator left empty keep the base value, and
/// stories without generated media are returned unchanged.
#[must_use]
pub fn overlay_generated_media(stories: Vec<Story>, generated: &[GeneratedMedia]) -> Vec<Story> {
    let by_id: HashMap<&str, &GeneratedMedia> =
        generated.iter().map(|g| (g.id.as_str(), g)).collect();

    stories
        .into_iter()
        .map(|mut story| {
            let Some(media) = by_id.get(story.id.as_str()) else {
                return story;
            };
            let images: Vec<String> = media
                .images
                .iter()
                .filter_map(|i| normalize_media_path(i))
                .collect();
            if !images.is_empty() {
                story.media.images = images;
            }
            let video = media.video_url.as_deref().and_then(normalize_media_path);
            let audio = media
                .audio_url
                .as_deref()
                .and_then(normalize_media_path)
                .or_else(|| video.clone());
            if audio.is_some() {
                story.media.audio_url = audio;
            }
            if video.is_some() {
                story.media.video_url = video;
            }
            let cues: Vec<SubtitleCue> = media
                .subtitles
                .iter()
                .filter(|c| c.is_well_formed())
                .cloned()
                .collect();
            if !cues.is_empty() {
                story.subtitles = cues;
            }
            story
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_STORIES: &str = r#"[
        {
            "id": "wisdom-1",
            "title": "The Wise Old Man",
            "theme": "wisdom",
            "question": "Why?",
            "options": ["a", "b"],
            "correctAnswer": 1
        },
        {
            "id": "courage-1",
            "theme": "courage",
            "tags": ["kindness"],
            "question": "Who?",
            "options": ["a", "b", "c"],
            "correctAnswer": 0
        }
    ]"#;

    #[test]
    fn test_parse_stories_json_reads_all_valid_records() {
        let stories = parse_stories_json(TWO_STORIES).unwrap();

        assert_eq!(stories.len(), 2);
        assert_eq!(stories[1].tags, vec!["kindness".to_owned()]);
    }

    #[test]
    fn test_parse_stories_json_skips_malformed_records() {
        let input = r#"[
            {"id": "ok", "theme": "wisdom", "question": "q", "options": ["a", "b"], "correctAnswer": 0},
            {"id": "bad-index", "theme": "wisdom", "question": "q", "options": ["a", "b"], "correctAnswer": 9},
            {"id": 42},
            "not an object"
        ]"#;

        let stories = parse_stories_json(input).unwrap();

        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].id, "ok");
    }

    #[test]
    fn test_parse_stories_json_keeps_first_duplicate() {
        let input = r#"[
            {"id": "dup", "title": "first", "theme": "wisdom", "question": "q", "options": ["a", "b"], "correctAnswer": 0},
            {"id": "dup", "title": "second", "theme": "wisdom", "question": "q", "options": ["a", "b"], "correctAnswer": 0}
        ]"#;

        let stories = parse_stories_json(input).unwrap();

        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].title, "first");
    }

    #[test]
    fn test_parse_stories_json_rejects_non_array() {
        match parse_stories_json(r#"{"stories": []}"#).unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("list of records")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_stories_json_rejects_invalid_json() {
        assert!(parse_stories_json("[{").is_err());
    }

    #[test]
    fn test_parse_stories_yaml_reads_records() {
        let input = "
- id: kindness-2
  theme: kindness
  question: What did the elephant do?
  options:
    - Ran away
    - Helped the ants
  correct_answer: 1
  moral: Small kindnesses matter.
";

        let stories = parse_stories_yaml(input).unwrap();

        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].id, "kindness-2");
        assert_eq!(stories[0].correct_answer_index, 1);
        assert_eq!(stories[0].moral, "Small kindnesses matter.");
    }

    #[test]
    fn test_overlay_generated_media_replaces_media_by_id() {
        let stories = parse_stories_json(TWO_STORIES).unwrap();
        let generated = parse_generated_media_json(
            r#"[{
                "id": "wisdom-1",
                "images": ["public\\generated_content\\images\\wisdom-1_scene_01.png"],
                "videoUrl": "public/generated_content/videos/wisdom-1_video.mp4",
                "subtitles": [{"start": 0.0, "end": 3.2, "text": "Once upon a time."}]
            }]"#,
        )
        .unwrap();

        let merged = overlay_generated_media(stories, &generated);

        let wisdom = &merged[0];
        assert_eq!(
            wisdom.media.images,
            vec!["/generated_content/images/wisdom-1_scene_01.png".to_owned()]
        );
        assert_eq!(
            wisdom.media.video_url.as_deref(),
            Some("/generated_content/videos/wisdom-1_video.mp4")
        );
        assert_eq!(wisdom.media.audio_url, wisdom.media.video_url);
        assert_eq!(wisdom.subtitles.len(), 1);
        assert_eq!(merged[1].media, parse_stories_json(TWO_STORIES).unwrap()[1].media);
    }

    #[test]
    fn test_load_catalog_file_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("betal-catalog-unknown.toml");
        std::fs::write(&path, "[]").unwrap();

        let result = load_catalog_file(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_load_catalog_file_missing_file_is_infrastructure_error() {
        let path = std::env::temp_dir().join("betal-catalog-does-not-exist.json");

        assert!(matches!(
            load_catalog_file(&path),
            Err(DomainError::Infrastructure(_))
        ));
    }
}
