//! Static achievement definitions.

use super::types::{AchievementDef, AchievementId};

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstCatch,
        title: "First Catch",
        description: "Reel in your very first fish",
        unlocked_quote: "Every angler remembers the first one that didn't get away.",
        icon: "🎣",
    },
    AchievementDef {
        id: AchievementId::WeatherPerseverance,
        title: "Weather Perseverance",
        description: "Stay on the dock through every kind of weather",
        unlocked_quote: "Sun, snow, rain and stars. The lake never closes, and neither do you.",
        icon: "🌦",
    },
];

/// Get an achievement definition by id.
pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.id == id)
}
