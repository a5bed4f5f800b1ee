//! The story record and its validation at the catalog boundary.

use betal_core::error::DomainError;
use serde::{Deserialize, Serialize};

use super::media::normalize_media_path;
use super::subtitles::{SubtitleCue, cue_at, generate_subtitles};
use super::themes::normalize_theme;

/// Media references for a story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryMedia {
    /// Scene images, in display order.
    pub images: Vec<String>,
    /// Narration audio.
    pub audio_url: Option<String>,
    /// Pre-rendered video (takes precedence over audio for playback).
    pub video_url: Option<String>,
}

/// A validated story record. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Stable identifier, e.g. `wisdom-1`.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Primary theme.
    pub theme: String,
    /// Extra themes this story may be selected for.
    pub tags: Vec<String>,
    /// Narrative text.
    pub content: String,
    /// Media references.
    pub media: StoryMedia,
    /// Subtitle cues, ordered by start time.
    pub subtitles: Vec<SubtitleCue>,
    /// Quiz question.
    pub question: String,
    /// Answer options, in display order.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_answer_index: usize,
    /// The moral shown after answering.
    pub moral: String,
}

impl Story {
    /// Whether this story belongs to `theme` (primary theme or tag,
    /// case-insensitive).
    #[must_use]
    pub fn matches_theme(&self, theme: &str) -> bool {
        let theme = normalize_theme(theme);
        self.theme == theme || self.tags.contains(&theme)
    }

    /// Whether `index` is the correct option.
    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_answer_index
    }

    /// The text of the correct option.
    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer_index]
    }

    /// The subtitle cue showing at `seconds` into playback, if any.
    #[must_use]
    pub fn subtitle_at(&self, seconds: f64) -> Option<&SubtitleCue> {
        cue_at(&self.subtitles, seconds)
    }
}

/// Loosely-typed story record as it arrives from catalog files. Accepts the
/// camelCase field names of the web client's data files and snake_case.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStory {
    pub id: String,
    pub title: String,
    pub theme: String,
    pub tags: Vec<String>,
    pub content: String,
    pub images: Vec<String>,
    #[serde(alias = "audio_url")]
    pub audio_url: Option<String>,
    #[serde(alias = "video_url")]
    pub video_url: Option<String>,
    pub subtitles: Vec<SubtitleCue>,
    pub question: String,
    pub options: Vec<String>,
    #[serde(alias = "correct_answer", alias = "correctAnswerIndex", alias = "correct_answer_index")]
    pub correct_answer: Option<usize>,
    pub moral: String,
}

fn required(field: &'static str, value: String, id: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!(
            "story {id:?}: {field} must not be empty"
        )));
    }
    Ok(trimmed.to_owned())
}

impl TryFrom<RawStory> for Story {
    type Error = DomainError;

    fn try_from(raw: RawStory) -> Result<Self, Self::Error> {
        let id = raw.id.trim().to_owned();
        if id.is_empty() {
            return Err(DomainError::Validation("story id must not be empty".to_owned()));
        }
        let theme = normalize_theme(&required("theme", raw.theme, &id)?);
        let question = required("question", raw.question, &id)?;

        if raw.options.len() < 2 {
            return Err(DomainError::Validation(format!(
                "story {id:?}: at least two options are required, got {}",
                raw.options.len()
            )));
        }
        let correct_answer_index = raw.correct_answer.ok_or_else(|| {
            DomainError::Validation(format!("story {id:?}: correct answer is missing"))
        })?;
        if correct_answer_index >= raw.options.len() {
            return Err(DomainError::Validation(format!(
                "story {id:?}: correct answer {correct_answer_index} is out of range for {} options",
                raw.options.len()
            )));
        }

        for cue in &raw.subtitles {
            if !cue.is_well_formed() {
                return Err(DomainError::Validation(format!(
                    "story {id:?}: subtitle cue {}..{} is malformed",
                    cue.start, cue.end
                )));
            }
        }
        let mut subtitles = raw.subtitles;
        if subtitles.is_empty() {
            subtitles = generate_subtitles(&raw.content);
        }
        subtitles.sort_by(|a, b| a.start.total_cmp(&b.start));

        let title = if raw.title.trim().is_empty() {
            id.clone()
        } else {
            raw.title.trim().to_owned()
        };

        let media = StoryMedia {
            images: raw
                .images
                .iter()
                .filter_map(|i| normalize_media_path(i))
                .collect(),
            audio_url: raw.audio_url.as_deref().and_then(normalize_media_path),
            video_url: raw.video_url.as_deref().and_then(normalize_media_path),
        };

        Ok(Self {
            id,
            title,
            theme,
            tags: raw
                .tags
                .into_iter()
                .map(|t| normalize_theme(&t))
                .filter(|t| !t.is_empty())
                .collect(),
            content: raw.content.trim().to_owned(),
            media,
            subtitles,
            question,
            options: raw.options,
            correct_answer_index,
            moral: raw.moral.trim().to_owned(),
        })
    }
}
