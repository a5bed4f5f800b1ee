//! Notices: the user-visible result of every intent.
//!
//! Guard violations are not errors. They come back as notices and leave the
//! state untouched.

use serde::Serialize;

use super::intents::IntentKind;
use super::session::{Phase, ThemeTicket};

/// What happened in response to an intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// Betal woke up; a theme can be chosen.
    Awakened,
    /// Betal refuses to wake or tell a story while the curse lasts.
    StillCursed {
        /// Whole seconds left, rounded up.
        seconds_remaining: u64,
    },
    /// A story was picked and playback can start.
    StoryStarted {
        /// Picked story.
        story_id: String,
        /// Theme it was picked for.
        theme: String,
    },
    /// The catalog has nothing for the theme.
    NoStoriesForTheme {
        /// Requested theme.
        theme: String,
    },
    /// The catalog could not be reached; choosing again retries.
    CatalogUnavailable {
        /// Requested theme.
        theme: String,
        /// Underlying failure.
        reason: String,
    },
    /// A response arrived for a request that was superseded or cancelled.
    StaleResponse {
        /// Ticket of the discarded response.
        ticket: ThemeTicket,
    },
    /// Playback ended; the question is showing.
    QuestionReady,
    /// Correct answer.
    CoinEarned {
        /// Coin total after the reward.
        coins: u64,
    },
    /// Wrong answer.
    Cursed {
        /// Curse length in whole seconds.
        seconds: u64,
    },
    /// Mercy accepted, more remain.
    MercyGranted {
        /// Passes still available.
        remaining: u32,
    },
    /// Mercy accepted, and that was the last one.
    MercyExhausted,
    /// Mercy refused because every pass is used.
    MercyRejected,
    /// The chosen option does not exist.
    InvalidOption {
        /// Index sent.
        index: usize,
        /// Number of options on the question.
        options: usize,
    },
    /// The result screen was left early.
    Dismissed,
    /// The result pause ran out and Betal went back to sleep.
    ReturnedToSleep,
    /// Progress wiped.
    GameReset,
    /// The intent does not apply in the current phase.
    Ignored {
        /// Intent received.
        intent: IntentKind,
        /// Phase at the time.
        phase: Phase,
    },
}

impl Notice {
    /// Whether the intent was refused (state unchanged).
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::StillCursed { .. }
                | Self::NoStoriesForTheme { .. }
                | Self::CatalogUnavailable { .. }
                | Self::StaleResponse { .. }
                | Self::MercyRejected
                | Self::InvalidOption { .. }
                | Self::Ignored { .. }
        )
    }

    /// Text for the toast shown to the player.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Awakened => {
                "Betal awakens from his ancient slumber! Choose a theme for your tale...".to_owned()
            }
            Self::StillCursed { seconds_remaining } => {
                format!("Betal is still angry! Wait {seconds_remaining} more seconds...")
            }
            Self::StoryStarted { theme, .. } => format!("Betal will tell you a tale of {theme}..."),
            Self::NoStoriesForTheme { theme } => format!("Betal knows no tales of {theme}."),
            Self::CatalogUnavailable { .. } => {
                "Betal cannot recall his tales right now. Try again.".to_owned()
            }
            Self::QuestionReady => "Betal has a question for you...".to_owned(),
            Self::CoinEarned { .. } => "Correct! You earned a Wisdom Coin!".to_owned(),
            Self::Cursed { seconds } => format!("Wrong answer! You are cursed for {seconds} seconds!"),
            Self::MercyGranted { remaining } => {
                format!("Betal appreciates your honesty. {remaining} mercies remaining.")
            }
            Self::MercyExhausted => {
                "You have used all your mercy! Betal will no longer accept 'I don't know'!".to_owned()
            }
            Self::MercyRejected => "Betal no longer accepts 'I don't know'.".to_owned(),
            Self::InvalidOption { .. } => "That is not one of Betal's choices.".to_owned(),
            Self::Dismissed | Self::ReturnedToSleep => "Betal returns to slumber.".to_owned(),
            Self::GameReset => "The game has been reset.".to_owned(),
            Self::StaleResponse { .. } | Self::Ignored { .. } => String::new(),
        }
    }
}
