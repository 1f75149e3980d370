//! Persistence integration tests
//!
//! Sessions write through the record stores and a later startup reads the
//! same progress back.

use lakeside::achievements::AchievementId;
use lakeside::core::{GameSession, GameState};
use lakeside::fishing::{catch_from_draw, FishSpecies};
use lakeside::persistence::writer::execute_job;
use lakeside::persistence::{
    load_profile, seed_achievements, wipe_profile, AchievementFilter, BackgroundWriter,
    ConfiguredIdentity, FileBackend, InlineWriter, MemoryBackend, PersistJob, StatsFilter,
    StatsRecord, Stores,
};
use lakeside::weather::Weather;
use std::path::PathBuf;
use std::time::Duration;

const OWNER: &str = "angler@example.com";
const NOW: i64 = 1_700_000_000_000;

fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("lakeside-it-{}", uuid::Uuid::new_v4()))
}

/// Plays `sizes.len()` casts and reels with fixed catches.
fn play_catches(stores: Stores, backend: &MemoryBackend, sizes: &[f64]) -> GameSession {
    let mut load_stores = Stores::on_backend(backend.clone());
    let profile = load_profile(&ConfiguredIdentity::new(OWNER), &mut load_stores);
    let mut session = GameSession::new(
        GameState::from_profile(profile, Duration::from_secs(150)),
        Box::new(InlineWriter::new(stores, OWNER)),
    );
    for (i, size) in sizes.iter().enumerate() {
        session.cast();
        let fish = catch_from_draw(*size, i, Weather::Rain, NOW + i as i64);
        session.reel_in(fish, NOW + i as i64);
    }
    session
}

// ============================================================================
// Write-through and reload
// ============================================================================

#[test]
fn test_progress_survives_restart() {
    let backend = MemoryBackend::new();
    let mut session = play_catches(
        Stores::on_backend(backend.clone()),
        &backend,
        &[20.0, 95.6, 40.2],
    );
    assert_eq!(session.poll_persistence(), 0);

    let mut stores = Stores::on_backend(backend.clone());
    let profile = load_profile(&ConfiguredIdentity::new(OWNER), &mut stores);

    assert_eq!(profile.owner.as_deref(), Some(OWNER));
    assert_eq!(profile.stats.total_caught, 3);
    assert_eq!(profile.stats.biggest_size_cm, 96);
    assert_eq!(profile.stats.most_recent_weather, Some(Weather::Rain));

    // Newest first
    let species: Vec<FishSpecies> = profile.catches.iter().map(|f| f.species).collect();
    assert_eq!(
        species,
        vec![FishSpecies::Salmon, FishSpecies::Trout, FishSpecies::Bass]
    );
    assert!(profile.achievements.is_unlocked(AchievementId::FirstCatch));
    assert_eq!(
        profile.achievements.unlocked_at(AchievementId::FirstCatch),
        Some(NOW)
    );

    let state = GameState::from_profile(profile, Duration::from_secs(150));
    assert_eq!(state.player.total_fish_caught, 3);
}

#[test]
fn test_single_stats_record_per_owner() {
    let backend = MemoryBackend::new();
    play_catches(Stores::on_backend(backend.clone()), &backend, &[30.0, 50.0]);
    play_catches(Stores::on_backend(backend.clone()), &backend, &[70.0]);

    let stores = Stores::on_backend(backend);
    let stats = stores.stats.filter(&StatsFilter::owned_by(OWNER)).unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].total_caught, 3);
    assert_eq!(stats[0].biggest_size_cm, 70);
}

#[test]
fn test_background_writer_flushes_on_drop() {
    let backend = MemoryBackend::new();
    let writer = BackgroundWriter::spawn(Stores::on_backend(backend.clone()), OWNER).unwrap();
    let mut load_stores = Stores::on_backend(backend.clone());
    let profile = load_profile(&ConfiguredIdentity::new(OWNER), &mut load_stores);
    let mut session = GameSession::new(
        GameState::from_profile(profile, Duration::from_secs(150)),
        Box::new(writer),
    );
    session.cast();
    session.reel_in(catch_from_draw(64.0, 4, Weather::Snow, NOW), NOW);
    drop(session);

    let stores = Stores::on_backend(backend);
    assert_eq!(stores.catches.list().unwrap().len(), 1);
    let stats = stores.stats.filter(&StatsFilter::owned_by(OWNER)).unwrap();
    assert_eq!(stats[0].total_caught, 1);
}

#[test]
fn test_failed_stats_read_does_not_lower_stored_total() {
    let backend = MemoryBackend::new();
    let mut stores = Stores::on_backend(backend.clone());
    let mut saved = StatsRecord::empty(OWNER);
    saved.total_caught = 50;
    saved.biggest_size_cm = 100;
    stores.stats.create(saved).unwrap();

    backend.set_failing(true);
    let profile = load_profile(&ConfiguredIdentity::new(OWNER), &mut stores);
    assert_eq!(profile.stats.total_caught, 0);
    backend.set_failing(false);

    let mut session = GameSession::new(
        GameState::from_profile(profile, Duration::from_secs(150)),
        Box::new(InlineWriter::new(stores, OWNER)),
    );
    session.cast();
    session.reel_in(catch_from_draw(30.0, 1, Weather::Snow, NOW), NOW);
    assert_eq!(session.poll_persistence(), 0);
    assert_eq!(session.state().player.total_fish_caught, 1);

    let stores = Stores::on_backend(backend);
    let stats = stores.stats.filter(&StatsFilter::owned_by(OWNER)).unwrap();
    assert_eq!(stats.len(), 1);
    assert!(stats[0].total_caught >= 50);
    assert_eq!(stats[0].biggest_size_cm, 100);
    assert_eq!(stats[0].most_recent_weather, Some(Weather::Snow));
}

// ============================================================================
// Achievement records
// ============================================================================

#[test]
fn test_seeding_is_idempotent() {
    let mut stores = Stores::on_backend(MemoryBackend::new());
    assert_eq!(seed_achievements(&mut stores, OWNER), 2);
    assert_eq!(seed_achievements(&mut stores, OWNER), 0);

    let records = stores
        .achievements
        .filter(&AchievementFilter::owned_by(OWNER))
        .unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| !r.unlocked));

    // Another owner gets their own set
    assert_eq!(seed_achievements(&mut stores, "other@example.com"), 2);
}

#[test]
fn test_unlock_keeps_first_timestamp() {
    let mut stores = Stores::on_backend(MemoryBackend::new());
    seed_achievements(&mut stores, OWNER);

    for at in [NOW, NOW + 5_000] {
        let job = PersistJob::UnlockAchievement {
            achievement_id: AchievementId::WeatherPerseverance,
            unlocked_at: at,
        };
        execute_job(&mut stores, OWNER, job).unwrap();
    }

    let filter = AchievementFilter::owned_by(OWNER).with_id(AchievementId::WeatherPerseverance);
    let records = stores.achievements.filter(&filter).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].unlocked);
    assert_eq!(records[0].unlocked_at, Some(NOW));
}

#[test]
fn test_unlock_without_seed_creates_record() {
    let mut stores = Stores::on_backend(MemoryBackend::new());
    let job = PersistJob::UnlockAchievement {
        achievement_id: AchievementId::FirstCatch,
        unlocked_at: NOW,
    };
    execute_job(&mut stores, OWNER, job).unwrap();

    let records = stores
        .achievements
        .filter(&AchievementFilter::owned_by(OWNER))
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "First Catch");
    assert!(records[0].unlocked);
}

// ============================================================================
// File backend
// ============================================================================

#[test]
fn test_file_backend_round_trip_and_wipe() {
    let dir = temp_data_dir();
    let backend = FileBackend::new(&dir).unwrap();
    {
        let mut session_stores = Stores::on_backend(backend.clone());
        let profile = load_profile(&ConfiguredIdentity::new(OWNER), &mut session_stores);
        let mut session = GameSession::new(
            GameState::from_profile(profile, Duration::from_secs(150)),
            Box::new(InlineWriter::new(session_stores, OWNER)),
        );
        session.cast();
        session.reel_in(catch_from_draw(33.3, 3, Weather::Starry, NOW), NOW);
        assert_eq!(session.poll_persistence(), 0);
    }
    assert!(dir.join("catches.json").exists());
    assert!(dir.join("stats.json").exists());

    let mut stores = Stores::on_backend(FileBackend::new(&dir).unwrap());
    let profile = load_profile(&ConfiguredIdentity::new(OWNER), &mut stores);
    assert_eq!(profile.stats.total_caught, 1);
    assert_eq!(profile.catches[0].species, FishSpecies::Pike);
    assert_eq!(profile.catches[0].size_cm, 33);

    let mut wipe_backend = backend.clone();
    wipe_profile(&mut wipe_backend).unwrap();
    let mut stores = Stores::on_backend(backend);
    let profile = load_profile(&ConfiguredIdentity::new(OWNER), &mut stores);
    assert_eq!(profile.stats.total_caught, 0);
    assert!(profile.catches.is_empty());
    assert!(!profile.achievements.is_unlocked(AchievementId::FirstCatch));

    let _ = std::fs::remove_dir_all(&dir);
}
