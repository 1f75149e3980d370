//! Persisted record types and their filter / patch shapes.

use super::store::{Filter, Record};
use crate::achievements::{AchievementDef, AchievementId};
use crate::core::constants::{ACHIEVEMENTS_KEY, CATCHES_KEY, STATS_KEY};
use crate::fishing::{CaughtFish, FishSpecies};
use crate::weather::Weather;
use serde::{Deserialize, Serialize};

// =============================================================================
// Catches
// =============================================================================

/// A stored catch. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatchRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub owner: String,
    pub species: FishSpecies,
    pub size_cm: u32,
    pub weather: Weather,
    pub caught_at: i64,
}

impl CatchRecord {
    pub fn new(owner: &str, fish: &CaughtFish) -> Self {
        Self {
            id: String::new(),
            owner: owner.to_string(),
            species: fish.species,
            size_cm: fish.size_cm,
            weather: fish.weather,
            caught_at: fish.caught_at,
        }
    }

    pub fn to_fish(&self) -> CaughtFish {
        CaughtFish {
            species: self.species,
            size_cm: self.size_cm,
            weather: self.weather,
            caught_at: self.caught_at,
        }
    }
}

/// Catches have no mutable fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPatch;

impl Record for CatchRecord {
    type Patch = NoPatch;
    const COLLECTION: &'static str = CATCHES_KEY;

    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn apply(&mut self, _patch: NoPatch) {}
}

/// Catch query: optional owner, optional newest-first ordering.
#[derive(Debug, Clone, Default)]
pub struct CatchFilter {
    pub owner: Option<String>,
    pub newest_first: bool,
}

impl CatchFilter {
    pub fn owned_by(owner: &str) -> Self {
        Self {
            owner: Some(owner.to_string()),
            newest_first: false,
        }
    }

    pub fn newest_first(mut self) -> Self {
        self.newest_first = true;
        self
    }
}

impl Filter<CatchRecord> for CatchFilter {
    fn matches(&self, record: &CatchRecord) -> bool {
        self.owner.as_deref().map_or(true, |o| record.owner == o)
    }

    fn order(&self, records: &mut Vec<CatchRecord>) {
        if self.newest_first {
            records.sort_by(|a, b| b.caught_at.cmp(&a.caught_at));
        }
    }
}

// =============================================================================
// Stats
// =============================================================================

/// Lifetime statistics, one record per owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub owner: String,
    pub total_caught: u64,
    pub biggest_size_cm: u32,
    pub most_recent_weather: Option<Weather>,
}

impl StatsRecord {
    pub fn empty(owner: &str) -> Self {
        Self {
            id: String::new(),
            owner: owner.to_string(),
            total_caught: 0,
            biggest_size_cm: 0,
            most_recent_weather: None,
        }
    }

    /// Folds one catch in. `biggest_size_cm` never decreases.
    pub fn record_catch(&mut self, fish: &CaughtFish) {
        self.total_caught += 1;
        self.biggest_size_cm = self.biggest_size_cm.max(fish.size_cm);
        self.most_recent_weather = Some(fish.weather);
    }

    pub fn to_patch(&self) -> StatsPatch {
        StatsPatch {
            total_caught: Some(self.total_caught),
            biggest_size_cm: Some(self.biggest_size_cm),
            most_recent_weather: self.most_recent_weather,
        }
    }
}

/// Partial stats update. `None` leaves a field untouched.
///
/// Counters only move up: a session that started from empty stats cannot
/// lower what is already stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsPatch {
    pub total_caught: Option<u64>,
    pub biggest_size_cm: Option<u32>,
    pub most_recent_weather: Option<Weather>,
}

impl Record for StatsRecord {
    type Patch = StatsPatch;
    const COLLECTION: &'static str = STATS_KEY;

    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn apply(&mut self, patch: StatsPatch) {
        if let Some(total) = patch.total_caught {
            self.total_caught = self.total_caught.max(total);
        }
        if let Some(biggest) = patch.biggest_size_cm {
            self.biggest_size_cm = self.biggest_size_cm.max(biggest);
        }
        if let Some(weather) = patch.most_recent_weather {
            self.most_recent_weather = Some(weather);
        }
    }
}

/// Stats query by owner.
#[derive(Debug, Clone, Default)]
pub struct StatsFilter {
    pub owner: Option<String>,
}

impl StatsFilter {
    pub fn owned_by(owner: &str) -> Self {
        Self {
            owner: Some(owner.to_string()),
        }
    }
}

impl Filter<StatsRecord> for StatsFilter {
    fn matches(&self, record: &StatsRecord) -> bool {
        self.owner.as_deref().map_or(true, |o| record.owner == o)
    }
}

// =============================================================================
// Achievements
// =============================================================================

/// A stored achievement. `unlocked` only moves false to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub owner: String,
    pub achievement_id: AchievementId,
    pub title: String,
    pub description: String,
    pub unlocked_quote: String,
    pub unlocked: bool,
    pub unlocked_at: Option<i64>,
}

impl AchievementRecord {
    /// A locked record seeded from a definition.
    pub fn locked(owner: &str, def: &AchievementDef) -> Self {
        Self {
            id: String::new(),
            owner: owner.to_string(),
            achievement_id: def.id,
            title: def.title.to_string(),
            description: def.description.to_string(),
            unlocked_quote: def.unlocked_quote.to_string(),
            unlocked: false,
            unlocked_at: None,
        }
    }
}

/// Partial achievement update.
#[derive(Debug, Clone, Copy, Default)]
pub struct AchievementPatch {
    pub unlocked: Option<bool>,
    pub unlocked_at: Option<i64>,
}

impl AchievementPatch {
    pub fn unlock(at: i64) -> Self {
        Self {
            unlocked: Some(true),
            unlocked_at: Some(at),
        }
    }
}

impl Record for AchievementRecord {
    type Patch = AchievementPatch;
    const COLLECTION: &'static str = ACHIEVEMENTS_KEY;

    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn apply(&mut self, patch: AchievementPatch) {
        // One-way: a stored unlock is never reverted or re-stamped
        if self.unlocked {
            return;
        }
        if let Some(unlocked) = patch.unlocked {
            self.unlocked = unlocked;
        }
        if self.unlocked {
            self.unlocked_at = patch.unlocked_at.or(self.unlocked_at);
        }
    }
}

/// Achievement query by owner and achievement id.
#[derive(Debug, Clone, Default)]
pub struct AchievementFilter {
    pub owner: Option<String>,
    pub achievement_id: Option<AchievementId>,
}

impl AchievementFilter {
    pub fn owned_by(owner: &str) -> Self {
        Self {
            owner: Some(owner.to_string()),
            achievement_id: None,
        }
    }

    pub fn with_id(mut self, id: AchievementId) -> Self {
        self.achievement_id = Some(id);
        self
    }
}

impl Filter<AchievementRecord> for AchievementFilter {
    fn matches(&self, record: &AchievementRecord) -> bool {
        self.owner.as_deref().map_or(true, |o| record.owner == o)
            && self.achievement_id.map_or(true, |id| record.achievement_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fish(size_cm: u32, weather: Weather) -> CaughtFish {
        CaughtFish {
            species: FishSpecies::Trout,
            size_cm,
            weather,
            caught_at: 0,
        }
    }

    #[test]
    fn test_stats_biggest_only_increases() {
        let mut stats = StatsRecord::empty("me");
        stats.record_catch(&fish(80, Weather::Rain));
        stats.record_catch(&fish(20, Weather::Snow));
        assert_eq!(stats.total_caught, 2);
        assert_eq!(stats.biggest_size_cm, 80);
        assert_eq!(stats.most_recent_weather, Some(Weather::Snow));

        stats.apply(StatsPatch {
            biggest_size_cm: Some(30),
            ..Default::default()
        });
        assert_eq!(stats.biggest_size_cm, 80);
    }

    #[test]
    fn test_stats_patch_never_lowers_total() {
        let mut stored = StatsRecord::empty("me");
        stored.total_caught = 50;
        stored.biggest_size_cm = 100;

        let mut fresh = StatsRecord::empty("me");
        fresh.record_catch(&fish(30, Weather::Rain));
        stored.apply(fresh.to_patch());

        assert_eq!(stored.total_caught, 50);
        assert_eq!(stored.biggest_size_cm, 100);
        assert_eq!(stored.most_recent_weather, Some(Weather::Rain));

        stored.apply(StatsPatch {
            total_caught: Some(51),
            ..Default::default()
        });
        assert_eq!(stored.total_caught, 51);
    }

    #[test]
    fn test_achievement_patch_is_one_way() {
        let def = crate::achievements::get_achievement_def(AchievementId::FirstCatch).unwrap();
        let mut record = AchievementRecord::locked("me", def);

        record.apply(AchievementPatch::unlock(100));
        assert!(record.unlocked);
        assert_eq!(record.unlocked_at, Some(100));

        record.apply(AchievementPatch::unlock(500));
        assert_eq!(record.unlocked_at, Some(100));

        record.apply(AchievementPatch {
            unlocked: Some(false),
            unlocked_at: None,
        });
        assert!(record.unlocked);
    }

    #[test]
    fn test_catch_filter_orders_newest_first() {
        let mut records: Vec<CatchRecord> = [3, 9, 1]
            .iter()
            .map(|&t| {
                let mut f = fish(50, Weather::Sunset);
                f.caught_at = t;
                CatchRecord::new("me", &f)
            })
            .collect();
        CatchFilter::owned_by("me").newest_first().order(&mut records);
        let times: Vec<_> = records.iter().map(|r| r.caught_at).collect();
        assert_eq!(times, vec![9, 3, 1]);
    }

    #[test]
    fn test_achievement_filter_matches_owner_and_id() {
        let def = crate::achievements::get_achievement_def(AchievementId::FirstCatch).unwrap();
        let record = AchievementRecord::locked("me", def);
        assert!(AchievementFilter::owned_by("me").matches(&record));
        assert!(AchievementFilter::owned_by("me")
            .with_id(AchievementId::FirstCatch)
            .matches(&record));
        assert!(!AchievementFilter::owned_by("me")
            .with_id(AchievementId::WeatherPerseverance)
            .matches(&record));
        assert!(!AchievementFilter::owned_by("you").matches(&record));
    }
}
