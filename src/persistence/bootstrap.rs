//! Startup loading: identity, stats, collection, and achievement seeding.
//!
//! Nothing here is fatal. A missing identity means offline play; a failed read
//! falls back to defaults for that piece only.

use super::backend::KeyValueBackend;
use super::identity::IdentityProvider;
use super::records::{AchievementFilter, AchievementRecord, CatchFilter, StatsFilter, StatsRecord};
use super::store::StoreError;
use super::writer::Stores;
use crate::achievements::{Achievements, ALL_ACHIEVEMENTS};
use crate::core::constants::{ACHIEVEMENTS_KEY, CATCHES_KEY, STATS_KEY};
use crate::fishing::CaughtFish;
use tracing::{info, warn};

/// Everything the session needs from storage at startup.
#[derive(Debug, Clone)]
pub struct Profile {
    /// `None` when playing offline
    pub owner: Option<String>,
    pub stats: StatsRecord,
    /// Newest first
    pub catches: Vec<CaughtFish>,
    pub achievements: Achievements,
}

impl Profile {
    pub fn offline() -> Self {
        Self {
            owner: None,
            stats: StatsRecord::empty(""),
            catches: Vec::new(),
            achievements: Achievements::default(),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.owner.is_none()
    }
}

/// Creates a locked record for every definition the owner does not have yet.
///
/// Existing records are left alone, so running this on every startup never
/// duplicates an achievement. Returns the number of records created.
pub fn seed_achievements(stores: &mut Stores, owner: &str) -> usize {
    let mut created = 0;
    for def in ALL_ACHIEVEMENTS {
        let filter = AchievementFilter::owned_by(owner).with_id(def.id);
        let existing = match stores.achievements.filter(&filter) {
            Ok(existing) => existing,
            Err(e) => {
                warn!(achievement = def.id.as_str(), error = %e, "could not check achievement");
                continue;
            }
        };
        if !existing.is_empty() {
            continue;
        }
        match stores
            .achievements
            .create(AchievementRecord::locked(owner, def))
        {
            Ok(_) => created += 1,
            Err(e) => warn!(achievement = def.id.as_str(), error = %e, "could not seed achievement"),
        }
    }
    created
}

/// Resolves identity and loads the owner's saved progress.
pub fn load_profile(identity: &dyn IdentityProvider, stores: &mut Stores) -> Profile {
    let owner = match identity.current_user() {
        Ok(user) => user.email,
        Err(e) => {
            info!(error = %e, "no identity; playing offline");
            return Profile::offline();
        }
    };

    let stats = load_stats(stores, &owner).unwrap_or_else(|e| {
        warn!(error = %e, "could not load stats; starting fresh");
        StatsRecord::empty(&owner)
    });

    let catches = stores
        .catches
        .filter(&CatchFilter::owned_by(&owner).newest_first())
        .map(|records| records.iter().map(|r| r.to_fish()).collect())
        .unwrap_or_else(|e| {
            warn!(error = %e, "could not load collection");
            Vec::new()
        });

    let seeded = seed_achievements(stores, &owner);

    let achievements = stores
        .achievements
        .filter(&AchievementFilter::owned_by(&owner))
        .map(|records| achievements_from_records(&records))
        .unwrap_or_else(|e| {
            warn!(error = %e, "could not load achievements");
            Achievements::default()
        });

    info!(
        owner = %owner,
        total_caught = stats.total_caught,
        catches = catches.len(),
        seeded,
        unlocked = achievements.unlocked_count(),
        "profile loaded"
    );

    Profile {
        owner: Some(owner),
        stats,
        catches,
        achievements,
    }
}

fn load_stats(stores: &Stores, owner: &str) -> Result<StatsRecord, StoreError> {
    let existing = stores.stats.filter(&StatsFilter::owned_by(owner))?;
    Ok(existing
        .into_iter()
        .next()
        .unwrap_or_else(|| StatsRecord::empty(owner)))
}

/// Unlock state from stored records. Locked records contribute nothing.
pub fn achievements_from_records(records: &[AchievementRecord]) -> Achievements {
    let mut achievements = Achievements::default();
    for record in records.iter().filter(|r| r.unlocked) {
        achievements.unlock(record.achievement_id, record.unlocked_at.unwrap_or(0));
    }
    achievements
}

/// Deletes every stored collection.
pub fn wipe_profile(backend: &mut impl KeyValueBackend) -> Result<(), StoreError> {
    for key in [CATCHES_KEY, STATS_KEY, ACHIEVEMENTS_KEY] {
        backend.remove(key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;
    use crate::persistence::backend::MemoryBackend;
    use crate::persistence::identity::{ConfiguredIdentity, OfflineIdentity};

    #[test]
    fn test_seeding_twice_creates_no_duplicates() {
        let mut stores = Stores::on_backend(MemoryBackend::new());
        assert_eq!(seed_achievements(&mut stores, "me"), 2);
        assert_eq!(seed_achievements(&mut stores, "me"), 0);
        assert_eq!(stores.achievements.list().unwrap().len(), 2);
    }

    #[test]
    fn test_seeding_keeps_existing_unlock() {
        let mut stores = Stores::on_backend(MemoryBackend::new());
        let def = crate::achievements::get_achievement_def(AchievementId::FirstCatch).unwrap();
        let mut unlocked = AchievementRecord::locked("me", def);
        unlocked.unlocked = true;
        unlocked.unlocked_at = Some(77);
        stores.achievements.create(unlocked).unwrap();

        assert_eq!(seed_achievements(&mut stores, "me"), 1);
        let records = stores
            .achievements
            .filter(&AchievementFilter::owned_by("me").with_id(AchievementId::FirstCatch))
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].unlocked_at, Some(77));
    }

    #[test]
    fn test_seeding_is_per_owner() {
        let mut stores = Stores::on_backend(MemoryBackend::new());
        seed_achievements(&mut stores, "me");
        assert_eq!(seed_achievements(&mut stores, "you"), 2);
    }

    #[test]
    fn test_offline_identity_skips_loading() {
        let backend = MemoryBackend::new();
        let mut stores = Stores::on_backend(backend.clone());
        let profile = load_profile(&OfflineIdentity, &mut stores);
        assert!(profile.is_offline());
        assert!(stores.achievements.list().unwrap().is_empty());
    }

    #[test]
    fn test_read_failure_falls_back_to_defaults() {
        let backend = MemoryBackend::new();
        backend.set_failing(true);
        let mut stores = Stores::on_backend(backend);
        let profile = load_profile(&ConfiguredIdentity::new("me"), &mut stores);
        assert_eq!(profile.owner.as_deref(), Some("me"));
        assert_eq!(profile.stats.total_caught, 0);
        assert!(profile.catches.is_empty());
        assert_eq!(profile.achievements.unlocked_count(), 0);
    }

    #[test]
    fn test_wipe_profile_removes_everything() {
        let mut backend = MemoryBackend::new();
        let mut stores = Stores::on_backend(backend.clone());
        seed_achievements(&mut stores, "me");
        wipe_profile(&mut backend).unwrap();
        assert!(stores.achievements.list().unwrap().is_empty());
    }
}
