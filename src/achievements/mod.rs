//! Achievement system.
//!
//! Unlocks are one-way and idempotent. Records are persisted per owner through
//! the achievement store; see `persistence`.

pub mod data;
pub mod types;

pub use data::{get_achievement_def, ALL_ACHIEVEMENTS};
pub use types::{AchievementDef, AchievementId, Achievements, UnlockedAchievement};
