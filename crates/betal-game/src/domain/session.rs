//! Transient session state: the phase machine and mascot mood.

use betal_content::domain::story::Story;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Screen the player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Betal sleeps; waiting for a wake intent.
    Sleeping,
    /// Betal is awake; waiting for a theme.
    Awake,
    /// A story is playing.
    Story,
    /// The quiz question (and, once answered, the result) is showing.
    Question,
}

impl Phase {
    /// Returns the phase as a string.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sleeping => "sleeping",
            Self::Awake => "awake",
            Self::Story => "story",
            Self::Question => "question",
        }
    }
}

/// Betal's disposition, driven by the last answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Default, and after a correct answer or an accepted "I don't know".
    Calm,
    /// After a wrong answer.
    Angry,
}

/// How the player resolved a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// Picked the correct option.
    Correct,
    /// Picked a wrong option.
    Incorrect,
    /// Used a mercy pass.
    DontKnow,
}

/// Identifies one catalog request. Only the newest ticket is ever applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ThemeTicket(pub u64);

/// Per-page interactive state. Never persisted.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub(crate) phase: Phase,
    pub(crate) mood: Mood,
    pub(crate) active_story: Option<Story>,
    pub(crate) active_theme: Option<String>,
    pub(crate) last_outcome: Option<AnswerOutcome>,
    pub(crate) pending_return: Option<DateTime<Utc>>,
    pub(crate) pending_theme: Option<ThemeTicket>,
    pub(crate) tickets_issued: u64,
}

impl SessionView {
    /// Fresh session: asleep and calm.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Sleeping,
            mood: Mood::Calm,
            active_story: None,
            active_theme: None,
            last_outcome: None,
            pending_return: None,
            pending_theme: None,
            tickets_issued: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current mood.
    #[must_use]
    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// Story being told or asked about.
    #[must_use]
    pub fn active_story(&self) -> Option<&Story> {
        self.active_story.as_ref()
    }

    /// Theme chosen while awake.
    #[must_use]
    pub fn active_theme(&self) -> Option<&str> {
        self.active_theme.as_deref()
    }

    /// Result of the current question, once answered.
    #[must_use]
    pub fn last_outcome(&self) -> Option<AnswerOutcome> {
        self.last_outcome
    }

    /// When the result screen gives way to sleep.
    #[must_use]
    pub fn pending_return(&self) -> Option<DateTime<Utc>> {
        self.pending_return
    }

    /// The catalog request still awaited, if any.
    #[must_use]
    pub fn pending_theme(&self) -> Option<ThemeTicket> {
        self.pending_theme
    }

    pub(crate) fn issue_ticket(&mut self) -> ThemeTicket {
        self.tickets_issued += 1;
        let ticket = ThemeTicket(self.tickets_issued);
        self.pending_theme = Some(ticket);
        ticket
    }

    /// Back to sleep: clears the story, theme, result and anything pending.
    pub(crate) fn fall_asleep(&mut self) {
        self.phase = Phase::Sleeping;
        self.mood = Mood::Calm;
        self.active_story = None;
        self.active_theme = None;
        self.last_outcome = None;
        self.pending_return = None;
        self.pending_theme = None;
    }
}

impl Default for SessionView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_ticket_supersedes_the_last() {
        let mut session = SessionView::new();

        let first = session.issue_ticket();
        let second = session.issue_ticket();

        assert_ne!(first, second);
        assert_eq!(session.pending_theme(), Some(second));
    }

    #[test]
    fn test_fall_asleep_clears_everything_transient() {
        let mut session = SessionView::new();
        session.phase = Phase::Question;
        session.mood = Mood::Angry;
        session.active_theme = Some("wisdom".into());
        session.last_outcome = Some(AnswerOutcome::Incorrect);
        session.issue_ticket();

        session.fall_asleep();

        assert_eq!(session.phase(), Phase::Sleeping);
        assert_eq!(session.mood(), Mood::Calm);
        assert_eq!(session.active_theme(), None);
        assert_eq!(session.last_outcome(), None);
        assert_eq!(session.pending_theme(), None);
        assert_eq!(session.pending_return(), None);
    }

    #[test]
    fn test_phase_serializes_as_its_name() {
        for phase in [Phase::Sleeping, Phase::Awake, Phase::Story, Phase::Question] {
            assert_eq!(serde_json::to_value(phase).unwrap(), phase.name());
        }
    }
}
