//! Player intents accepted by the controller.

use serde::Serialize;

/// The intents the presentation layer can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// Tap the sleeping mascot.
    Wake,
    /// Pick a theme while awake.
    ChooseTheme,
    /// Media playback finished.
    PlaybackEnded,
    /// Pick an answer option.
    Answer,
    /// Use a mercy pass.
    DontKnow,
    /// Leave the result screen early.
    Dismiss,
    /// Wipe coins, curse and mercy usage.
    Reset,
}

impl IntentKind {
    /// The type name for this intent (for logging).
    #[must_use]
    pub fn intent_type(self) -> &'static str {
        match self {
            Self::Wake => "game.wake",
            Self::ChooseTheme => "game.choose_theme",
            Self::PlaybackEnded => "game.playback_ended",
            Self::Answer => "game.answer",
            Self::DontKnow => "game.dont_know",
            Self::Dismiss => "game.dismiss",
            Self::Reset => "game.reset",
        }
    }
}
