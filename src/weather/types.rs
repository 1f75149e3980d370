//! Weather kinds and cycle state.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A cosmetic weather kind. The cycle visits them in `WEATHER_CYCLE` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunset,
    Mountain,
    Snow,
    Rain,
    Starry,
}

/// Fixed visiting order of the weather cycle.
pub const WEATHER_CYCLE: [Weather; 5] = [
    Weather::Sunset,
    Weather::Mountain,
    Weather::Snow,
    Weather::Rain,
    Weather::Starry,
];

impl Weather {
    pub fn name(&self) -> &'static str {
        match self {
            Weather::Sunset => "Sunset",
            Weather::Mountain => "Mountain",
            Weather::Snow => "Snow",
            Weather::Rain => "Rain",
            Weather::Starry => "Starry Night",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Weather::Sunset => "🌅",
            Weather::Mountain => "⛰",
            Weather::Snow => "❄",
            Weather::Rain => "🌧",
            Weather::Starry => "★",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Weather cycle position plus the timer that drives it.
#[derive(Debug, Clone)]
pub struct WeatherState {
    /// Index into `WEATHER_CYCLE`.
    pub cycle_index: usize,
    /// Completed traversals of the whole cycle.
    pub lap_count: u32,
    /// Time accumulated toward the next advance.
    pub elapsed: Duration,
    /// Time each weather lasts.
    pub interval: Duration,
}

/// One advance of the weather cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherChange {
    pub weather: Weather,
    /// True when this advance wrapped back to the first weather.
    pub completed_lap: bool,
    /// Lap count after this advance.
    pub lap_count: u32,
}
