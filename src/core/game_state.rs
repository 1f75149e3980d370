use crate::achievements::Achievements;
use crate::core::constants::START_POSITION;
use crate::fishing::CaughtFish;
use crate::persistence::{Profile, StatsRecord};
use crate::weather::{Weather, WeatherState};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posture {
    Standing,
    Sitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FishingMode {
    Idle,
    LineCast,
}

/// Modal overlay. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Collection,
    Achievements,
}

/// The fisherman on the dock.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Percent along the dock, clamped to [MIN_POSITION, MAX_POSITION]
    pub position: i32,
    pub posture: Posture,
    pub fishing_mode: FishingMode,
    /// Catch notice, shown until dismissed or the next cast
    pub current_catch: Option<CaughtFish>,
    /// Lifetime total; seeded from stored stats, then session-authoritative
    pub total_fish_caught: u64,
}

impl PlayerState {
    pub fn new(total_fish_caught: u64) -> Self {
        Self {
            position: START_POSITION,
            posture: Posture::Standing,
            fishing_mode: FishingMode::Idle,
            current_catch: None,
            total_fish_caught,
        }
    }

    pub fn is_sitting(&self) -> bool {
        self.posture == Posture::Sitting
    }

    pub fn is_fishing(&self) -> bool {
        self.fishing_mode == FishingMode::LineCast
    }
}

/// Everything the running session owns. Discarded on exit.
#[derive(Debug, Clone)]
pub struct GameState {
    pub player: PlayerState,
    pub weather: WeatherState,
    pub overlay: Overlay,
    /// Local copy of the owner's stats; written through after each catch
    pub stats: StatsRecord,
    /// Newest first
    pub collection: Vec<CaughtFish>,
    pub achievements: Achievements,
    /// `None` when playing offline
    pub owner: Option<String>,
}

impl GameState {
    pub fn new(weather_interval: Duration) -> Self {
        Self::from_profile(Profile::offline(), weather_interval)
    }

    pub fn from_profile(profile: Profile, weather_interval: Duration) -> Self {
        Self {
            player: PlayerState::new(profile.stats.total_caught),
            weather: WeatherState::new(weather_interval),
            overlay: Overlay::None,
            stats: profile.stats,
            collection: profile.catches,
            achievements: profile.achievements,
            owner: profile.owner,
        }
    }

    pub fn current_weather(&self) -> Weather {
        self.weather.current()
    }

    pub fn is_offline(&self) -> bool {
        self.owner.is_none()
    }
}
