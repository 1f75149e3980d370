//! Achievement ids, definitions, and the unlock engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstCatch,
    WeatherPerseverance,
}

impl AchievementId {
    /// Stable string key used in persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstCatch => "first_catch",
            AchievementId::WeatherPerseverance => "weather_perseverance",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "first_catch" => Some(AchievementId::FirstCatch),
            "weather_perseverance" => Some(AchievementId::WeatherPerseverance),
            _ => None,
        }
    }
}

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    /// Shown once the achievement is unlocked
    pub unlocked_quote: &'static str,
    pub icon: &'static str,
}

/// Record of an unlocked achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    /// Unix timestamp in milliseconds
    pub unlocked_at: i64,
}

/// Session view of which achievements are unlocked.
#[derive(Debug, Clone, Default)]
pub struct Achievements {
    pub unlocked: HashMap<AchievementId, UnlockedAchievement>,
}

impl Achievements {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains_key(&id)
    }

    pub fn unlocked_at(&self, id: AchievementId) -> Option<i64> {
        self.unlocked.get(&id).map(|u| u.unlocked_at)
    }

    /// Unlock an achievement. Returns true if newly unlocked.
    ///
    /// An already-unlocked achievement keeps its original timestamp.
    pub fn unlock(&mut self, id: AchievementId, now: i64) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.unlocked
            .insert(id, UnlockedAchievement { unlocked_at: now });
        true
    }

    pub fn total_count(&self) -> usize {
        super::data::ALL_ACHIEVEMENTS.len()
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    // =========================================================================
    // Event Handlers (called from the game state machine)
    // =========================================================================

    /// Called when a fish is reeled in.
    /// `caught_before` is the running total before this catch.
    pub fn on_fish_caught(&mut self, caught_before: u64, now: i64) -> Vec<AchievementId> {
        let mut newly = Vec::new();
        if caught_before == 0 && self.unlock(AchievementId::FirstCatch, now) {
            newly.push(AchievementId::FirstCatch);
        }
        newly
    }

    /// Called when the weather cycle wraps back to its first weather.
    /// `laps_before` is the lap count before this wrap.
    pub fn on_weather_lap(&mut self, laps_before: u32, now: i64) -> Vec<AchievementId> {
        let mut newly = Vec::new();
        if laps_before == 0 && self.unlock(AchievementId::WeatherPerseverance, now) {
            newly.push(AchievementId::WeatherPerseverance);
        }
        newly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_unlock() {
        let mut achievements = Achievements::default();

        assert!(!achievements.is_unlocked(AchievementId::FirstCatch));
        assert!(achievements.unlock(AchievementId::FirstCatch, 100));
        assert!(achievements.is_unlocked(AchievementId::FirstCatch));

        // Second unlock should return false and keep the timestamp
        assert!(!achievements.unlock(AchievementId::FirstCatch, 200));
        assert_eq!(achievements.unlocked_at(AchievementId::FirstCatch), Some(100));
    }

    #[test]
    fn test_first_catch_only_from_zero() {
        let mut achievements = Achievements::default();
        assert!(achievements.on_fish_caught(3, 10).is_empty());
        assert!(!achievements.is_unlocked(AchievementId::FirstCatch));

        assert_eq!(
            achievements.on_fish_caught(0, 20),
            vec![AchievementId::FirstCatch]
        );
        assert!(achievements.on_fish_caught(0, 30).is_empty());
        assert!(achievements.on_fish_caught(1, 40).is_empty());
        assert_eq!(achievements.unlocked_at(AchievementId::FirstCatch), Some(20));
    }

    #[test]
    fn test_weather_perseverance_on_first_lap() {
        let mut achievements = Achievements::default();
        assert_eq!(
            achievements.on_weather_lap(0, 5),
            vec![AchievementId::WeatherPerseverance]
        );
        assert!(achievements.on_weather_lap(1, 6).is_empty());
        assert_eq!(achievements.unlocked_count(), 1);
        assert_eq!(achievements.total_count(), 2);
    }

    #[test]
    fn test_achievement_key_roundtrip() {
        for id in [AchievementId::FirstCatch, AchievementId::WeatherPerseverance] {
            assert_eq!(AchievementId::from_key(id.as_str()), Some(id));
        }
        assert_eq!(AchievementId::from_key("slayer"), None);
    }
}
