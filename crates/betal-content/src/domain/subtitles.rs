//! Subtitle cues: lookup during playback and timing generation from text.

use serde::{Deserialize, Serialize};

/// Shortest time a generated cue stays on screen, in seconds.
pub const MIN_CUE_SECONDS: f64 = 3.0;
/// Longest time a generated cue stays on screen, in seconds.
pub const MAX_CUE_SECONDS: f64 = 8.0;
/// Narration pace used to size generated cues (about 150 words per minute).
pub const SECONDS_PER_WORD: f64 = 0.4;

/// A single subtitle line, timed in seconds from the start of playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleCue {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Text to display.
    pub text: String,
}

impl SubtitleCue {
    /// Finite, non-negative and not inverted.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start >= 0.0 && self.start <= self.end
    }

    /// Whether the cue is showing at `seconds` (both ends inclusive).
    #[must_use]
    pub fn is_active_at(&self, seconds: f64) -> bool {
        seconds >= self.start && seconds <= self.end
    }
}

/// The first cue showing at `seconds`, if any.
#[must_use]
pub fn cue_at(cues: &[SubtitleCue], seconds: f64) -> Option<&SubtitleCue> {
    cues.iter().find(|cue| cue.is_active_at(seconds))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Splits `content` into sentences ending in `.`, `!` or `?`. Trailing text
/// without a terminator is dropped, as are runs of bare punctuation.
fn sentences(content: &str) -> Vec<String> {
    let normalized = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = Vec::new();
    let mut current = String::new();
    for ch in normalized.chars() {
        if matches!(ch, '.' | '!' | '?') {
            if !current.is_empty() {
                current.push(ch);
                let sentence = current.trim();
                if !sentence.is_empty() {
                    out.push(sentence.to_owned());
                }
                current.clear();
            }
        } else {
            current.push(ch);
        }
    }
    out
}

/// Builds back-to-back cues for `content`, one per sentence. Each cue lasts
/// `words * 0.4` seconds clamped to `[3, 8]`; times are rounded to 0.1 s.
#[must_use]
pub fn generate_subtitles(content: &str) -> Vec<SubtitleCue> {
    let mut cues = Vec::new();
    let mut cursor = 0.0_f64;
    for sentence in sentences(content) {
        #[allow(clippy::cast_precision_loss)]
        let words = sentence.split_whitespace().count() as f64;
        let duration = (words * SECONDS_PER_WORD).clamp(MIN_CUE_SECONDS, MAX_CUE_SECONDS);
        cues.push(SubtitleCue {
            start: round_tenth(cursor),
            end: round_tenth(cursor + duration),
            text: sentence,
        });
        cursor += duration;
    }
    cues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(start: f64, end: f64, text: &str) -> SubtitleCue {
        SubtitleCue {
            start,
            end,
            text: text.to_owned(),
        }
    }

    #[test]
    fn test_cue_at_returns_matching_cue() {
        let cues = vec![cue(0.0, 5.0, "first"), cue(5.0, 10.0, "second")];

        assert_eq!(cue_at(&cues, 2.5).unwrap().text, "first");
        assert_eq!(cue_at(&cues, 7.0).unwrap().text, "second");
    }

    #[test]
    fn test_cue_at_boundary_prefers_earlier_cue() {
        let cues = vec![cue(0.0, 5.0, "first"), cue(5.0, 10.0, "second")];

        assert_eq!(cue_at(&cues, 5.0).unwrap().text, "first");
    }

    #[test]
    fn test_cue_at_outside_all_cues_returns_none() {
        let cues = vec![cue(1.0, 2.0, "only")];

        assert!(cue_at(&cues, 0.5).is_none());
        assert!(cue_at(&cues, 2.1).is_none());
    }

    #[test]
    fn test_generate_subtitles_splits_on_sentence_terminators() {
        let cues = generate_subtitles("Have you studied the stars? No!   Then half your life is wasted.");

        let texts: Vec<&str> = cues.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Have you studied the stars?", "No!", "Then half your life is wasted."]
        );
    }

    #[test]
    fn test_generate_subtitles_clamps_durations() {
        let long_sentence = format!("{}.", vec!["word"; 30].join(" "));
        let content = format!("Short one. {long_sentence}");

        let cues = generate_subtitles(&content);

        assert_eq!(cues[0].start, 0.0);
        assert_eq!(cues[0].end, 3.0);
        assert_eq!(cues[1].start, 3.0);
        assert_eq!(cues[1].end, 11.0);
    }

    #[test]
    fn test_generate_subtitles_scales_mid_length_sentences() {
        // 10 words -> 4.0 seconds
        let cues = generate_subtitles("one two three four five six seven eight nine ten.");

        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].end, 4.0);
    }

    #[test]
    fn test_generate_subtitles_drops_unterminated_tail_and_bare_punctuation() {
        let cues = generate_subtitles("It ended... and then");

        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "It ended.");
    }

    #[test]
    fn test_generate_subtitles_of_empty_content_is_empty() {
        assert!(generate_subtitles("   ").is_empty());
    }

    #[test]
    fn test_is_well_formed_rejects_negative_and_nan() {
        assert!(cue(0.0, 0.0, "").is_well_formed());
        assert!(!cue(-1.0, 2.0, "").is_well_formed());
        assert!(!cue(f64::NAN, 2.0, "").is_well_formed());
    }
}
