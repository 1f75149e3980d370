//! Weather cycle timing.

use super::types::{Weather, WeatherChange, WeatherState, WEATHER_CYCLE};
use std::time::Duration;

impl WeatherState {
    /// Starts at the first weather with no laps completed.
    pub fn new(interval: Duration) -> Self {
        Self {
            cycle_index: 0,
            lap_count: 0,
            elapsed: Duration::ZERO,
            interval,
        }
    }

    pub fn current(&self) -> Weather {
        WEATHER_CYCLE[self.cycle_index]
    }

    /// Time left before the next advance.
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }

    /// Moves to the next weather. Wrapping to index 0 counts one lap.
    pub fn advance(&mut self) -> WeatherChange {
        self.cycle_index = (self.cycle_index + 1) % WEATHER_CYCLE.len();
        let completed_lap = self.cycle_index == 0;
        if completed_lap {
            self.lap_count += 1;
        }
        WeatherChange {
            weather: self.current(),
            completed_lap,
            lap_count: self.lap_count,
        }
    }

    /// Accumulates `delta` and advances once per full interval elapsed.
    ///
    /// A zero interval never advances.
    pub fn tick(&mut self, delta: Duration) -> Vec<WeatherChange> {
        let mut changes = Vec::new();
        if self.interval.is_zero() {
            return changes;
        }

        self.elapsed += delta;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            changes.push(self.advance());
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(150);

    #[test]
    fn test_starts_at_sunset() {
        let state = WeatherState::new(INTERVAL);
        assert_eq!(state.current(), Weather::Sunset);
        assert_eq!(state.lap_count, 0);
    }

    #[test]
    fn test_tick_below_interval_does_not_advance() {
        let mut state = WeatherState::new(INTERVAL);
        assert!(state.tick(Duration::from_secs(149)).is_empty());
        assert_eq!(state.cycle_index, 0);
        assert_eq!(state.remaining(), Duration::from_secs(1));
    }

    #[test]
    fn test_cycle_is_periodic_and_counts_one_lap_per_period() {
        let mut state = WeatherState::new(INTERVAL);
        let mut seen = Vec::new();

        for _ in 0..(WEATHER_CYCLE.len() * 3) {
            let changes = state.tick(INTERVAL);
            assert_eq!(changes.len(), 1);
            seen.push(state.cycle_index);
        }

        assert_eq!(seen, vec![1, 2, 3, 4, 0, 1, 2, 3, 4, 0, 1, 2, 3, 4, 0]);
        assert_eq!(state.lap_count, 3);
    }

    #[test]
    fn test_only_wraparound_completes_lap() {
        let mut state = WeatherState::new(INTERVAL);
        for expected in &WEATHER_CYCLE[1..] {
            let change = state.advance();
            assert_eq!(change.weather, *expected);
            assert!(!change.completed_lap);
        }
        let change = state.advance();
        assert_eq!(change.weather, Weather::Sunset);
        assert!(change.completed_lap);
        assert_eq!(change.lap_count, 1);
    }

    #[test]
    fn test_long_tick_advances_every_elapsed_interval() {
        let mut state = WeatherState::new(INTERVAL);
        let changes = state.tick(INTERVAL * 6 + Duration::from_secs(10));
        assert_eq!(changes.len(), 6);
        assert_eq!(changes.iter().filter(|c| c.completed_lap).count(), 1);
        assert_eq!(state.cycle_index, 1);
        assert_eq!(state.elapsed, Duration::from_secs(10));
    }

    #[test]
    fn test_zero_interval_never_advances() {
        let mut state = WeatherState::new(Duration::ZERO);
        assert!(state.tick(Duration::from_secs(1000)).is_empty());
        assert_eq!(state.current(), Weather::Sunset);
    }
}
