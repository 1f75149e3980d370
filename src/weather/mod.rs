//! Weather cycle: a fixed rotation of cosmetic weather advanced on a timer.

pub mod logic;
pub mod types;

pub use types::{Weather, WeatherChange, WeatherState, WEATHER_CYCLE};
