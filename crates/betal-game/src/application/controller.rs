//! The session phase controller.
//!
//! `GameEngine` turns player intents into state changes on the session and
//! the persisted game state. Every intent returns a `Notice`; intents that do
//! not apply leave everything untouched. Time never advances on its own:
//! the delayed return to sleep and curse expiry are applied by `tick`, which
//! runs at the start of every intent and snapshot.

use betal_content::application::catalog::StoryCatalog;
use betal_content::domain::story::Story;
use betal_content::domain::themes::normalize_theme;
use betal_core::error::DomainError;
use betal_core::rng::DeterministicRng;
use tracing::{debug, info, instrument, warn};

use crate::application::store::{DontKnowUse, GameStateStore};
use crate::application::views::{GameSnapshot, curse_seconds_remaining};
use crate::domain::intents::IntentKind;
use crate::domain::notices::Notice;
use crate::domain::rules::GameRules;
use crate::domain::session::{AnswerOutcome, Mood, Phase, SessionView, ThemeTicket};

/// Drives one player's session.
#[derive(Debug)]
pub struct GameEngine {
    store: GameStateStore,
    session: SessionView,
    rules: GameRules,
}

impl GameEngine {
    /// Creates an engine over `store`, starting asleep.
    #[must_use]
    pub fn new(store: GameStateStore, rules: GameRules) -> Self {
        Self {
            store,
            session: SessionView::new(),
            rules,
        }
    }

    /// The persisted-state store.
    #[must_use]
    pub fn store(&self) -> &GameStateStore {
        &self.store
    }

    /// The transient session.
    #[must_use]
    pub fn session(&self) -> &SessionView {
        &self.session
    }

    /// Rules in force.
    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Applies pending time-based changes, then describes the game.
    pub fn snapshot(&mut self) -> GameSnapshot {
        self.tick();
        GameSnapshot::at(
            self.store.state(),
            &self.session,
            &self.rules,
            self.store.now(),
        )
    }

    /// Clears an expired curse and performs a due return to sleep.
    ///
    /// Returns `Notice::ReturnedToSleep` when the result pause ran out.
    pub fn tick(&mut self) -> Option<Notice> {
        self.store.clear_expired_curse();
        let due = self.session.pending_return?;
        if !self.store.is_due(due) {
            return None;
        }
        self.session.fall_asleep();
        debug!("result pause over, back to sleep");
        Some(Notice::ReturnedToSleep)
    }

    /// Wakes Betal unless a curse is active.
    #[instrument(skip(self), fields(phase = self.session.phase.name()))]
    pub fn wake(&mut self) -> Notice {
        self.tick();
        if self.session.phase != Phase::Sleeping {
            return self.ignored(IntentKind::Wake);
        }
        if self.store.is_cursed() {
            return self.still_cursed();
        }
        self.session.phase = Phase::Awake;
        info!("betal awakened");
        Notice::Awakened
    }

    /// Starts choosing a story for `theme`. The returned ticket must be
    /// handed back with the catalog's answer; any ticket issued earlier is
    /// superseded.
    ///
    /// # Errors
    ///
    /// Returns the refusal notice when not awake or while cursed.
    #[instrument(skip(self), fields(phase = self.session.phase.name()))]
    pub fn begin_theme_request(&mut self, theme: &str) -> Result<ThemeTicket, Notice> {
        self.tick();
        if self.session.phase != Phase::Awake {
            return Err(self.ignored(IntentKind::ChooseTheme));
        }
        if self.store.is_cursed() {
            return Err(self.still_cursed());
        }
        let theme = normalize_theme(theme);
        let ticket = self.session.issue_ticket();
        info!(ticket = ticket.0, theme = %theme, "theme requested");
        self.session.active_theme = Some(theme);
        Ok(ticket)
    }

    /// Applies the catalog's answer to the request behind `ticket`.
    ///
    /// A response for anything but the newest outstanding request is
    /// discarded with `Notice::StaleResponse`.
    pub fn complete_theme_request(
        &mut self,
        ticket: ThemeTicket,
        result: Result<Vec<Story>, DomainError>,
        rng: &mut dyn DeterministicRng,
    ) -> Notice {
        self.tick();
        if self.session.phase != Phase::Awake || self.session.pending_theme != Some(ticket) {
            debug!(ticket = ticket.0, "discarding stale catalog response");
            return Notice::StaleResponse { ticket };
        }
        self.session.pending_theme = None;
        let theme = self.session.active_theme.clone().unwrap_or_default();

        let mut stories = match result {
            Ok(stories) if !stories.is_empty() => stories,
            Ok(_) => {
                self.session.active_theme = None;
                info!(theme = %theme, "no stories for theme");
                return Notice::NoStoriesForTheme { theme };
            }
            Err(e) => {
                self.session.active_theme = None;
                warn!(theme = %theme, error = %e, "catalog unavailable");
                return Notice::CatalogUnavailable {
                    theme,
                    reason: e.to_string(),
                };
            }
        };

        let last = stories.len() - 1;
        let max = u32::try_from(last).unwrap_or(u32::MAX);
        let picked = rng.next_u32_range(0, max);
        let index = usize::try_from(picked).map_or(last, |i| i.min(last));
        let story = stories.swap_remove(index);

        info!(story_id = %story.id, theme = %theme, "story started");
        let notice = Notice::StoryStarted {
            story_id: story.id.clone(),
            theme,
        };
        self.session.active_story = Some(story);
        self.session.phase = Phase::Story;
        notice
    }

    /// Chooses a theme in one step: requests stories from `catalog` and
    /// picks one uniformly at random.
    pub async fn choose_theme(
        &mut self,
        theme: &str,
        catalog: &dyn StoryCatalog,
        rng: &mut dyn DeterministicRng,
    ) -> Notice {
        let ticket = match self.begin_theme_request(theme) {
            Ok(ticket) => ticket,
            Err(notice) => return notice,
        };
        let result = catalog.stories_by_theme(&normalize_theme(theme)).await;
        self.complete_theme_request(ticket, result, rng)
    }

    /// Story playback finished; show the question.
    pub fn notify_playback_ended(&mut self) -> Notice {
        self.tick();
        if self.session.phase != Phase::Story {
            return self.ignored(IntentKind::PlaybackEnded);
        }
        self.session.phase = Phase::Question;
        Notice::QuestionReady
    }

    /// Answers the question. Correct earns a coin; wrong starts a curse.
    #[instrument(skip(self), fields(phase = self.session.phase.name()))]
    pub fn answer(&mut self, correct: bool) -> Notice {
        self.tick();
        if !self.awaiting_answer() {
            return self.ignored(IntentKind::Answer);
        }
        let notice = if correct {
            let coins = self.store.add_coin();
            self.session.mood = Mood::Calm;
            self.session.last_outcome = Some(AnswerOutcome::Correct);
            info!(coins, "correct answer");
            Notice::CoinEarned { coins }
        } else {
            self.store.apply_curse(self.rules.curse_duration);
            self.session.mood = Mood::Angry;
            self.session.last_outcome = Some(AnswerOutcome::Incorrect);
            info!("wrong answer, curse applied");
            Notice::Cursed {
                seconds: curse_seconds_remaining(self.rules.curse_duration),
            }
        };
        self.schedule_return();
        notice
    }

    /// Answers with the option at `index` of the active story.
    pub fn answer_option(&mut self, index: usize) -> Notice {
        self.tick();
        if !self.awaiting_answer() {
            return self.ignored(IntentKind::Answer);
        }
        let Some(story) = self.session.active_story.as_ref() else {
            return self.ignored(IntentKind::Answer);
        };
        if index >= story.options.len() {
            return Notice::InvalidOption {
                index,
                options: story.options.len(),
            };
        }
        let correct = story.is_correct(index);
        self.answer(correct)
    }

    /// Uses a mercy pass: no coin, no curse. Refused once all are used.
    #[instrument(skip(self), fields(phase = self.session.phase.name()))]
    pub fn answer_dont_know(&mut self) -> Notice {
        self.tick();
        if !self.awaiting_answer() {
            return self.ignored(IntentKind::DontKnow);
        }
        let notice = match self.store.use_dont_know() {
            DontKnowUse::Rejected => return Notice::MercyRejected,
            DontKnowUse::Granted { remaining } => Notice::MercyGranted { remaining },
            DontKnowUse::Exhausted => Notice::MercyExhausted,
        };
        self.session.mood = Mood::Calm;
        self.session.last_outcome = Some(AnswerOutcome::DontKnow);
        info!(used = self.store.state().dont_know_count, "mercy granted");
        self.schedule_return();
        notice
    }

    /// Leaves the result screen before the pause runs out.
    pub fn dismiss(&mut self) -> Notice {
        self.tick();
        if self.session.phase != Phase::Question || self.session.last_outcome.is_none() {
            return self.ignored(IntentKind::Dismiss);
        }
        self.session.fall_asleep();
        Notice::Dismissed
    }

    /// Wipes coins, curse and mercy usage and puts Betal back to sleep,
    /// cancelling the result pause and any outstanding theme request.
    #[instrument(skip(self), fields(phase = self.session.phase.name()))]
    pub fn reset(&mut self) -> Notice {
        self.store.reset();
        self.session.fall_asleep();
        info!("game reset");
        Notice::GameReset
    }

    fn awaiting_answer(&self) -> bool {
        self.session.phase == Phase::Question && self.session.last_outcome.is_none()
    }

    fn schedule_return(&mut self) {
        if self.rules.return_delay <= chrono::Duration::zero() {
            self.session.fall_asleep();
            return;
        }
        self.session.pending_return = Some(self.store.deadline_after(self.rules.return_delay));
    }

    fn still_cursed(&self) -> Notice {
        Notice::StillCursed {
            seconds_remaining: curse_seconds_remaining(self.store.curse_time_remaining()),
        }
    }

    fn ignored(&self, intent: IntentKind) -> Notice {
        debug!(intent = intent.intent_type(), phase = self.session.phase.name(), "intent ignored");
        Notice::Ignored {
            intent,
            phase: self.session.phase,
        }
    }
}
