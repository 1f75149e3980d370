//! The dock state machine.
//!
//! Every transition is applied to `GameState` first. Persistence is submitted
//! afterwards as a `PersistJob` and its outcome never feeds back into state.

use super::constants::{MAX_POSITION, MIN_POSITION, MOVE_STEP};
use super::game_state::{FishingMode, GameState, Overlay, Posture};
use crate::achievements::AchievementId;
use crate::fishing::{roll_catch, CaughtFish};
use crate::input::{GameAction, InputAggregator, Walk};
use crate::persistence::{CatchRecord, PersistJob, PersistenceSink};
use crate::weather::WeatherChange;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Something that happened during a tick or action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    LineCast,
    Caught(CaughtFish),
    PostureChanged(Posture),
    Moved { position: i32 },
    OverlayOpened(Overlay),
    OverlayClosed(Overlay),
    CatchDismissed,
    WeatherChanged(WeatherChange),
    AchievementUnlocked(AchievementId),
}

/// A running game: state, input views, and the persistence sink.
pub struct GameSession {
    state: GameState,
    input: InputAggregator,
    sink: Box<dyn PersistenceSink>,
}

impl GameSession {
    pub fn new(state: GameState, sink: Box<dyn PersistenceSink>) -> Self {
        Self {
            state,
            input: InputAggregator::new(),
            sink,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input_mut(&mut self) -> &mut InputAggregator {
        &mut self.input
    }

    // =========================================================================
    // Loop entry points
    // =========================================================================

    /// Advances one tick: pending actions, held movement, then the weather timer.
    ///
    /// `now` is the wall clock in unix milliseconds.
    pub fn tick(&mut self, delta: Duration, rng: &mut impl Rng, now: i64) -> Vec<GameEvent> {
        let mut events = Vec::new();

        for action in self.input.take_actions() {
            events.extend(self.apply_action(action, rng, now));
        }

        if let Some(walk) = self.input.walk_direction() {
            events.extend(self.step(walk));
        }

        for change in self.state.weather.tick(delta) {
            events.extend(self.on_weather_change(change, now));
        }

        events
    }

    /// Applies one discrete action, from a key edge or a clicked hotspot.
    pub fn apply_action(
        &mut self,
        action: GameAction,
        rng: &mut impl Rng,
        now: i64,
    ) -> Vec<GameEvent> {
        match action {
            GameAction::Dismiss => self.dismiss(),
            GameAction::OpenCollection => self.open_overlay(Overlay::Collection),
            GameAction::OpenAchievements => self.open_overlay(Overlay::Achievements),
            // Overlays are modal for everything below
            _ if self.state.overlay != Overlay::None => Vec::new(),
            GameAction::ToggleSit => self.toggle_sit(),
            GameAction::Fish => match self.state.player.fishing_mode {
                FishingMode::Idle => self.cast(),
                FishingMode::LineCast => {
                    let fish = roll_catch(rng, self.state.current_weather(), now);
                    self.reel_in(fish, now)
                }
            },
        }
    }

    /// Drains finished persistence jobs and logs failures. Returns the failure count.
    pub fn poll_persistence(&mut self) -> usize {
        let mut failures = 0;
        for outcome in self.sink.drain_outcomes() {
            match outcome.result {
                Ok(()) => debug!(job = outcome.kind, "persisted"),
                Err(e) => {
                    failures += 1;
                    warn!(job = outcome.kind, error = %e, "persistence failed; keeping local state");
                }
            }
        }
        failures
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// `Idle -> LineCast`. Clears any pending catch notice.
    pub fn cast(&mut self) -> Vec<GameEvent> {
        let player = &mut self.state.player;
        if player.fishing_mode != FishingMode::Idle {
            return Vec::new();
        }
        player.fishing_mode = FishingMode::LineCast;
        player.current_catch = None;
        debug!(position = player.position, "line cast");
        vec![GameEvent::LineCast]
    }

    /// `LineCast -> Idle` landing `fish`.
    ///
    /// Local state (notice, counter, stats, collection, achievements) is
    /// updated before the catch and stats are handed to the sink.
    pub fn reel_in(&mut self, fish: CaughtFish, now: i64) -> Vec<GameEvent> {
        if self.state.player.fishing_mode != FishingMode::LineCast {
            return Vec::new();
        }

        let caught_before = self.state.player.total_fish_caught;
        let player = &mut self.state.player;
        player.fishing_mode = FishingMode::Idle;
        player.current_catch = Some(fish.clone());
        player.total_fish_caught += 1;

        self.state.stats.record_catch(&fish);
        self.state.collection.insert(0, fish.clone());

        info!(
            species = fish.species.name(),
            size_cm = fish.size_cm,
            weather = fish.weather.name(),
            total = self.state.player.total_fish_caught,
            "fish caught"
        );

        let mut events = vec![GameEvent::Caught(fish.clone())];

        let owner = self.state.owner.clone().unwrap_or_default();
        self.sink
            .submit(PersistJob::RecordCatch(CatchRecord::new(&owner, &fish)));
        self.sink.submit(PersistJob::SaveStats(self.state.stats.clone()));

        let newly = self.state.achievements.on_fish_caught(caught_before, now);
        events.extend(self.reveal_unlocks(newly, now));
        events
    }

    pub fn toggle_sit(&mut self) -> Vec<GameEvent> {
        let player = &mut self.state.player;
        player.posture = match player.posture {
            Posture::Standing => Posture::Sitting,
            Posture::Sitting => Posture::Standing,
        };
        vec![GameEvent::PostureChanged(player.posture)]
    }

    /// Moves one step, clamped to the dock. No event when already at the edge.
    pub fn step(&mut self, walk: Walk) -> Vec<GameEvent> {
        if self.state.overlay != Overlay::None {
            return Vec::new();
        }
        let player = &mut self.state.player;
        let next = (player.position + walk.sign() * MOVE_STEP).clamp(MIN_POSITION, MAX_POSITION);
        if next == player.position {
            return Vec::new();
        }
        player.position = next;
        vec![GameEvent::Moved { position: next }]
    }

    /// Opens `overlay`, replacing whichever one was open.
    pub fn open_overlay(&mut self, overlay: Overlay) -> Vec<GameEvent> {
        if overlay == Overlay::None || self.state.overlay == overlay {
            return Vec::new();
        }
        self.state.overlay = overlay;
        vec![GameEvent::OverlayOpened(overlay)]
    }

    /// Closes the open overlay; with none open, clears the catch notice.
    pub fn dismiss(&mut self) -> Vec<GameEvent> {
        match self.state.overlay {
            Overlay::None => {
                if self.state.player.current_catch.take().is_some() {
                    vec![GameEvent::CatchDismissed]
                } else {
                    Vec::new()
                }
            }
            open => {
                self.state.overlay = Overlay::None;
                vec![GameEvent::OverlayClosed(open)]
            }
        }
    }

    // =========================================================================
    // Progression
    // =========================================================================

    fn on_weather_change(&mut self, change: WeatherChange, now: i64) -> Vec<GameEvent> {
        info!(weather = change.weather.name(), laps = change.lap_count, "weather changed");
        let mut events = vec![GameEvent::WeatherChanged(change)];
        if change.completed_lap {
            let laps_before = change.lap_count - 1;
            let newly = self.state.achievements.on_weather_lap(laps_before, now);
            events.extend(self.reveal_unlocks(newly, now));
        }
        events
    }

    /// Persists fresh unlocks and opens the achievements overlay for them.
    fn reveal_unlocks(&mut self, newly: Vec<AchievementId>, now: i64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if newly.is_empty() {
            return events;
        }
        for id in newly {
            info!(achievement = id.as_str(), "achievement unlocked");
            self.sink.submit(PersistJob::UnlockAchievement {
                achievement_id: id,
                unlocked_at: now,
            });
            events.push(GameEvent::AchievementUnlocked(id));
        }
        events.extend(self.open_overlay(Overlay::Achievements));
        events
    }
}
